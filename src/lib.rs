//! Typed, section-scoped lookups in INI-style text.
//!
//! Each query names a value as `section.key`. The source is scanned once
//! per query; section names match case-insensitively, keys exactly, and a
//! repeated section overrides values from its earlier occurrences.
//!
//! ```
//! use ini_query::IniReader;
//!
//! let reader = IniReader::new("[Server]\nport = 8080 ; default\n[server]\nport = 9090");
//! let port: u16 = reader.get("server.port")?;
//! assert_eq!(port, 9090);
//! # Ok::<(), ini_query::IniError>(())
//! ```

mod error;
pub mod query;
pub mod reader;
pub mod settings;

pub use error::Error;
pub use query::Query;
pub use reader::{
    get_value, DecimalSeparator, ErrorKind, FromIni, IniError, IniFile, IniReader, IniSource,
    Value, ValueKind,
};
pub use settings::{ReaderSettings, Settings, SettingsError};
