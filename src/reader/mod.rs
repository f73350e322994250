//! Typed lookups of `section.key` values in INI sources.

mod convert;
mod error;
mod scanner;
mod source;

use std::io::BufRead;

use log::debug;

use crate::query::Query;
use crate::settings::ReaderSettings;
use crate::Error;

pub use convert::{convert, DecimalSeparator, FromIni, Value, ValueKind};
pub use error::{Bracket, ConvertError, ErrorKind, IniError};
pub use source::{IniFile, IniSource};

/// Looks up `query` in a stream the caller already holds.
///
/// The query is validated before anything is read from `reader`.
pub fn get_value<T, R>(reader: R, query: &str, separator: DecimalSeparator) -> Result<T, IniError>
where
    T: FromIni,
    R: BufRead,
{
    let query = Query::parse(query)?;
    scanner::scan(reader, "<stream>", &query, |raw| T::from_ini(raw, separator))
}

/// A source paired with the settings used to convert its values.
///
/// The reader keeps no parsed state: every query opens the source afresh
/// and scans it once, so repeated sections resolve to their last
/// occurrence and the file can change between queries.
///
/// ## Example
///
/// ```no_run
/// use ini_query::{DecimalSeparator, IniFile, IniReader, ReaderSettings};
///
/// let reader = IniReader::builder()
///     .with_source(IniFile::new("file1.ini"))
///     .with_settings(ReaderSettings::default().with_decimal_separator(DecimalSeparator::Comma))
///     .build()?;
///
/// let var1: f64 = reader.get("section1.var1")?;
/// let name: String = reader.get("section1.var2")?;
/// # Ok::<(), ini_query::Error>(())
/// ```
#[derive(Debug)]
pub struct IniReader<S> {
    source: S,
    settings: ReaderSettings,
}

impl<S: IniSource> IniReader<S> {
    /// Creates a reader over `source` with default settings.
    pub fn new(source: S) -> Self {
        Self {
            source,
            settings: ReaderSettings::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn settings(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Returns the value of `query` converted to `T`.
    pub fn get<T: FromIni>(&self, query: &str) -> Result<T, IniError> {
        let query = Query::parse(query)?;
        let separator = self.settings.decimal_separator;
        self.scan(&query, T::KIND, |raw| T::from_ini(raw, separator))
    }

    /// Returns the value of `query` converted to `kind`.
    pub fn get_value(&self, query: &str, kind: ValueKind) -> Result<Value, IniError> {
        let query = Query::parse(query)?;
        let separator = self.settings.decimal_separator;
        self.scan(&query, kind, |raw| convert(raw, kind, separator))
    }

    fn scan<T, F>(&self, query: &Query, kind: ValueKind, convert: F) -> Result<T, IniError>
    where
        F: FnMut(&str) -> Result<T, ConvertError>,
    {
        let origin = self.source.name();
        debug!("looking up '{query}' as {kind} in {origin}");

        let reader = self.source.open().map_err(|source| IniError::SourceOpen {
            origin: origin.clone(),
            source,
        })?;
        let result = scanner::scan(reader, &origin, query, convert);

        match &result {
            Ok(_) => debug!("found '{query}' in {origin}"),
            Err(e) => debug!("lookup of '{query}' in {origin} failed: {e}"),
        }
        result
    }
}

impl IniReader<()> {
    /// Creates a new builder for constructing an `IniReader`.
    pub fn builder() -> IniReaderBuilder<()> {
        IniReaderBuilder {
            source: None,
            settings: ReaderSettings::default(),
        }
    }
}

/// Builder for constructing an [`IniReader`].
///
/// The builder starts without a source (`IniReaderBuilder<()>`) and
/// transitions to `IniReaderBuilder<S>` when
/// [`with_source`](Self::with_source) is called.
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct IniReaderBuilder<S> {
    source: Option<S>,
    settings: ReaderSettings,
}

impl IniReaderBuilder<()> {
    /// Attaches the source every query will scan.
    pub fn with_source<S: IniSource>(self, source: S) -> IniReaderBuilder<S> {
        IniReaderBuilder {
            source: Some(source),
            settings: self.settings,
        }
    }
}

impl<S> IniReaderBuilder<S> {
    /// Sets the conversion settings, usually the result of
    /// [`Settings::build`](crate::Settings::build).
    pub fn with_settings(mut self, settings: ReaderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Builds the `IniReader`.
    ///
    /// Returns an error if no source was provided.
    pub fn build(self) -> Result<IniReader<S>, Error> {
        Ok(IniReader {
            source: self.source.ok_or(Error::MissingSource)?,
            settings: self.settings,
        })
    }
}
