//! Line classification and the section-scoped scan.

use std::collections::BTreeSet;
use std::io::BufRead;

use log::{debug, trace};

use super::error::{Bracket, ConvertError, IniError};
use crate::query::Query;

const COMMENT: char = ';';
const SECTION_OPEN: char = '[';
const SECTION_CLOSE: char = ']';
const ASSIGN: char = '=';

/// A classified source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    /// Section name, trimmed but not yet lowercased.
    Header(&'a str),
    /// `value` is `None` when the line has no `=`.
    Entry { key: &'a str, value: Option<&'a str> },
}

/// A header line that could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderFault {
    Missing(Bracket),
    Reversed,
}

impl HeaderFault {
    fn at(self, origin: &str, line: usize) -> IniError {
        let origin = origin.to_string();
        match self {
            HeaderFault::Missing(missing) => IniError::UnclosedSectionHeader {
                origin,
                line,
                missing,
            },
            HeaderFault::Reversed => IniError::MalformedSectionBrackets { origin, line },
        }
    }
}

fn trim(s: &str) -> &str {
    s.trim_matches([' ', '\t'])
}

pub(crate) fn classify(line: &str) -> Result<Line<'_>, HeaderFault> {
    let line = match line.find(COMMENT) {
        Some(pos) => &line[..pos],
        None => line,
    };
    let line = trim(line);
    if line.is_empty() {
        return Ok(Line::Blank);
    }

    match (line.find(SECTION_OPEN), line.find(SECTION_CLOSE)) {
        (Some(open), Some(close)) if open < close => {
            return Ok(Line::Header(trim(&line[open + 1..close])));
        }
        (Some(_), Some(_)) => return Err(HeaderFault::Reversed),
        (Some(_), None) => return Err(HeaderFault::Missing(Bracket::Closing)),
        (None, Some(_)) => return Err(HeaderFault::Missing(Bracket::Opening)),
        (None, None) => {}
    }

    Ok(match line.split_once(ASSIGN) {
        Some((key, value)) => Line::Entry {
            key: trim(key),
            value: Some(trim(value)),
        },
        None => Line::Entry {
            key: line,
            value: None,
        },
    })
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Scans `reader` once for the value of `query`.
///
/// Every matching assignment is converted as it is met, so a later
/// occurrence of the section replaces an earlier value, and a bad value
/// fails the scan even if it would have been overridden.
pub(crate) fn scan<R, T, F>(
    mut reader: R,
    origin: &str,
    query: &Query,
    mut convert: F,
) -> Result<T, IniError>
where
    R: BufRead,
    F: FnMut(&str) -> Result<T, ConvertError>,
{
    let mut current: Option<String> = None;
    let mut section_seen = false;
    let mut observed: BTreeSet<String> = BTreeSet::new();
    let mut found: Option<(usize, T)> = None;

    let mut buf = Vec::new();
    let mut number = 0;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| IniError::SourceOpen {
                origin: origin.to_string(),
                source,
            })?;
        if read == 0 {
            break;
        }
        number += 1;

        // Bytes that are not UTF-8 only matter on lines the query looks at.
        let line = String::from_utf8_lossy(strip_line_ending(&buf));

        match classify(&line).map_err(|fault| fault.at(origin, number))? {
            Line::Blank => {}
            Line::Header(name) => {
                let name = name.to_lowercase();
                trace!("{origin}:{number}: entering section '{name}'");
                if name == query.section() {
                    section_seen = true;
                }
                current = Some(name);
            }
            Line::Entry { key, value } => {
                if current.as_deref() != Some(query.section()) {
                    continue;
                }
                if !observed.contains(key) {
                    observed.insert(key.to_string());
                }
                if key != query.key() {
                    continue;
                }

                let raw = value
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| IniError::MissingAssignedValue {
                        origin: origin.to_string(),
                        line: number,
                        key: key.to_string(),
                    })?;
                let converted = convert(raw).map_err(|source| IniError::Convert {
                    origin: origin.to_string(),
                    line: number,
                    key: key.to_string(),
                    source,
                })?;

                if let Some((previous, _)) = found.replace((number, converted)) {
                    debug!("{origin}:{number}: '{query}' overrides the value from line {previous}");
                }
            }
        }
    }

    if !section_seen {
        return Err(IniError::SectionNotFound {
            origin: origin.to_string(),
            section: query.section().to_string(),
        });
    }

    match found {
        Some((_, value)) => Ok(value),
        None => Err(IniError::KeyNotFound {
            origin: origin.to_string(),
            section: query.section().to_string(),
            key: query.key().to_string(),
            observed,
        }),
    }
}
