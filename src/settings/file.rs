use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use toml::Table;

use super::{SettingsError, SettingsSource};

/// A TOML settings file such as
///
/// ```toml
/// decimal_separator = ","
/// ```
///
/// An optional file that does not exist contributes an empty layer.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl SettingsSource for FileSource {
    fn layer(&self) -> Result<Table, SettingsError> {
        let path = &self.path;
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound && !self.required => {
                debug!("skipping missing settings file {}", path.display());
                return Ok(Table::new());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SettingsError::Missing(path.clone()));
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };

        let layer: Table = toml::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.clone(),
            source,
        })?;
        debug!("read {} setting(s) from {}", layer.len(), path.display());
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_layer_holds_file_keys() {
        let file = toml_file("decimal_separator = \",\"\n");
        let layer = FileSource::new(file.path(), true).layer().unwrap();

        assert_eq!(layer.len(), 1);
        assert_eq!(layer["decimal_separator"].as_str(), Some(","));
    }

    #[test]
    fn test_invalid_toml() {
        let file = toml_file("decimal_separator = ");
        let err = FileSource::new(file.path(), true).layer().unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let path = "/nonexistent/path/reader.toml";

        let err = FileSource::new(path, true).layer().unwrap_err();
        assert!(matches!(err, SettingsError::Missing(_)));

        let layer = FileSource::new(path, false).layer().unwrap();
        assert!(layer.is_empty());
    }

    #[test]
    fn test_directory_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path(), false).layer().unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
