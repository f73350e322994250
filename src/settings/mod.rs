//! Reader settings and their layered loading.

mod builder;
mod env;
mod error;
mod file;

use serde::Deserialize;
use toml::Table;

use crate::reader::DecimalSeparator;

pub use builder::Settings;
pub use env::EnvSource;
pub use error::SettingsError;
pub use file::FileSource;

/// Settings that shape how a reader converts values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderSettings {
    /// Decimal point accepted when converting floats.
    pub decimal_separator: DecimalSeparator,
}

impl ReaderSettings {
    pub fn with_decimal_separator(mut self, separator: DecimalSeparator) -> Self {
        self.decimal_separator = separator;
        self
    }
}

/// One layer of settings.
///
/// A layer is a flat table of `ReaderSettings` field names to values. Keys
/// a layer leaves out are inherited from earlier layers.
pub trait SettingsSource: Send + Sync + std::fmt::Debug {
    fn layer(&self) -> Result<Table, SettingsError>;
}
