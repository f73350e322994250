use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("settings file {} does not exist", .0.display())]
    Missing(PathBuf),

    #[error("could not read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("settings file {} is not valid TOML: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("environment variable {name} is not valid unicode")]
    EnvNotUnicode { name: String },

    #[error("invalid reader settings: {0}")]
    Invalid(#[from] toml::de::Error),
}
