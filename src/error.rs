use crate::reader::IniError;
use crate::settings::SettingsError;
use thiserror::Error;

/// Top-level error type for the ini-query library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Ini(#[from] IniError),

    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("ini reader requires a source")]
    MissingSource,
}
