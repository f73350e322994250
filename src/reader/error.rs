use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use super::convert::{DecimalSeparator, ValueKind};
use crate::query::QueryPart;

/// The bracket a section header line is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Opening,
    Closing,
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bracket::Opening => f.write_str("opening '['"),
            Bracket::Closing => f.write_str("closing ']'"),
        }
    }
}

/// Failure to turn a raw value into the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConvertError {
    #[error("'{raw}' is not an integer")]
    NotAnInteger { raw: String },

    #[error("'{raw}' is out of range for {kind}")]
    IntegerOutOfRange { raw: String, kind: ValueKind },

    /// `found` is set when the text uses the other decimal separator.
    #[error("'{raw}' is not a floating point number{}", separator_hint(.found, .separator))]
    NotAFloat {
        raw: String,
        separator: DecimalSeparator,
        found: Option<char>,
    },

    #[error("'{raw}' is out of range for {kind}")]
    FloatOutOfRange { raw: String, kind: ValueKind },
}

fn separator_hint(found: &Option<char>, separator: &DecimalSeparator) -> String {
    match found {
        Some(ch) => format!(
            ": found '{ch}' but the decimal separator must be '{}'",
            separator.as_char()
        ),
        None => String::new(),
    }
}

/// Error returned by a query.
///
/// `origin` names the source the error was found in: a file path, or
/// `<memory>` for in-memory text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IniError {
    #[error("malformed query '{query}': {reason}")]
    MalformedQuery { query: String, reason: &'static str },

    #[error("invalid character {ch:?} in {part} name '{name}' of query '{query}'")]
    InvalidQueryCharacter {
        query: String,
        part: QueryPart,
        name: String,
        ch: char,
    },

    #[error("failed to read '{origin}': {source}")]
    SourceOpen {
        origin: String,
        source: std::io::Error,
    },

    #[error("{origin}:{line}: section header is missing its {missing} bracket")]
    UnclosedSectionHeader {
        origin: String,
        line: usize,
        missing: Bracket,
    },

    #[error("{origin}:{line}: section header brackets are in the wrong order")]
    MalformedSectionBrackets { origin: String, line: usize },

    #[error("{origin}:{line}: no value assigned to '{key}'")]
    MissingAssignedValue {
        origin: String,
        line: usize,
        key: String,
    },

    #[error("section '{section}' not found in '{origin}'")]
    SectionNotFound { origin: String, section: String },

    #[error(
        "key '{key}' not found in section '{section}' of '{origin}'; keys present: {}",
        KeyList(.observed)
    )]
    KeyNotFound {
        origin: String,
        section: String,
        key: String,
        observed: BTreeSet<String>,
    },

    #[error("{origin}:{line}: invalid value for '{key}': {source}")]
    Convert {
        origin: String,
        line: usize,
        key: String,
        source: ConvertError,
    },
}

struct KeyList<'a>(&'a BTreeSet<String>);

impl fmt::Display for KeyList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(none)");
        }
        for (i, key) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(key)?;
        }
        Ok(())
    }
}

/// Flat classification of every [`IniError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedQuery,
    InvalidQueryCharacter,
    SourceOpenFailure,
    UnclosedSectionHeader,
    MalformedSectionBrackets,
    MissingAssignedValue,
    SectionNotFound,
    KeyNotFound,
    NotAnInteger,
    IntegerOutOfRange,
    NotAFloat,
    FloatOutOfRange,
}

impl IniError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IniError::MalformedQuery { .. } => ErrorKind::MalformedQuery,
            IniError::InvalidQueryCharacter { .. } => ErrorKind::InvalidQueryCharacter,
            IniError::SourceOpen { .. } => ErrorKind::SourceOpenFailure,
            IniError::UnclosedSectionHeader { .. } => ErrorKind::UnclosedSectionHeader,
            IniError::MalformedSectionBrackets { .. } => ErrorKind::MalformedSectionBrackets,
            IniError::MissingAssignedValue { .. } => ErrorKind::MissingAssignedValue,
            IniError::SectionNotFound { .. } => ErrorKind::SectionNotFound,
            IniError::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            IniError::Convert { source, .. } => match source {
                ConvertError::NotAnInteger { .. } => ErrorKind::NotAnInteger,
                ConvertError::IntegerOutOfRange { .. } => ErrorKind::IntegerOutOfRange,
                ConvertError::NotAFloat { .. } => ErrorKind::NotAFloat,
                ConvertError::FloatOutOfRange { .. } => ErrorKind::FloatOutOfRange,
            },
        }
    }

    /// The 1-based source line the error was found on, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            IniError::UnclosedSectionHeader { line, .. }
            | IniError::MalformedSectionBrackets { line, .. }
            | IniError::MissingAssignedValue { line, .. }
            | IniError::Convert { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Keys seen in the queried section when the requested key was absent.
    pub fn observed_keys(&self) -> Option<&BTreeSet<String>> {
        match self {
            IniError::KeyNotFound { observed, .. } => Some(observed),
            _ => None,
        }
    }
}
