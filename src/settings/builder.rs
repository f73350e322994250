use std::path::Path;

use toml::{Table, Value};

use super::{EnvSource, FileSource, ReaderSettings, SettingsError, SettingsSource};

/// Builder for layering [`ReaderSettings`] from TOML files and the
/// environment.
///
/// Sources are applied in registration order, with later sources
/// overriding earlier ones. Fields no source mentions keep their defaults.
///
/// ## Example
///
/// ```no_run
/// use ini_query::Settings;
///
/// // defaults -> shared file -> environment -> local file
/// let settings = Settings::builder()
///     .with_file("reader.toml", true)
///     .with_env("INI", "__")
///     .with_file("reader.local.toml", false)
///     .build()?;
/// # Ok::<(), ini_query::SettingsError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Settings {
    sources: Vec<Box<dyn SettingsSource>>,
}

impl Settings {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Loads settings from environment variables with the given prefix,
    /// e.g. `INI__DECIMAL_SEPARATOR` for prefix `INI` and separator `__`.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    pub fn with_source(mut self, source: impl SettingsSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Stacks every layer, later keys replacing earlier ones, then
    /// deserializes the result.
    pub fn build(self) -> Result<ReaderSettings, SettingsError> {
        let mut merged = Table::new();
        for source in &self.sources {
            merged.extend(source.layer()?);
        }
        Ok(Value::Table(merged).try_into::<ReaderSettings>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::DecimalSeparator;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        let settings = Settings::builder().build().unwrap();
        assert_eq!(settings, ReaderSettings::default());
        assert_eq!(settings.decimal_separator, DecimalSeparator::Dot);
    }

    #[test]
    fn test_later_file_overrides_earlier() {
        let base = settings_file(r#"decimal_separator = ".""#);
        let local = settings_file(r#"decimal_separator = ",""#);

        let settings = Settings::builder()
            .with_file(base.path(), true)
            .with_file(local.path(), true)
            .build()
            .unwrap();
        assert_eq!(settings.decimal_separator, DecimalSeparator::Comma);
    }

    #[test]
    fn test_optional_missing_file_is_skipped() {
        let base = settings_file(r#"decimal_separator = "comma""#);

        let settings = Settings::builder()
            .with_file(base.path(), true)
            .with_file("/nonexistent/reader.local.toml", false)
            .build()
            .unwrap();
        assert_eq!(settings.decimal_separator, DecimalSeparator::Comma);
    }

    #[test]
    fn test_environment_overrides_file() {
        let base = settings_file(r#"decimal_separator = ".""#);
        std::env::set_var("INIQUERYBUILDERTEST__DECIMAL_SEPARATOR", ",");

        let settings = Settings::builder()
            .with_file(base.path(), true)
            .with_env("INIQUERYBUILDERTEST", "__")
            .build()
            .unwrap();
        assert_eq!(settings.decimal_separator, DecimalSeparator::Comma);
    }

    #[derive(Debug)]
    struct Fixed(&'static str);

    impl SettingsSource for Fixed {
        fn layer(&self) -> Result<Table, SettingsError> {
            let mut layer = Table::new();
            layer.insert("decimal_separator".into(), Value::String(self.0.into()));
            Ok(layer)
        }
    }

    #[test]
    fn test_layer_without_key_keeps_earlier_value() {
        let empty = settings_file("");

        let settings = Settings::builder()
            .with_source(Fixed(","))
            .with_file(empty.path(), true)
            .build()
            .unwrap();
        assert_eq!(settings.decimal_separator, DecimalSeparator::Comma);

        let settings = Settings::builder()
            .with_source(Fixed(","))
            .with_source(Fixed("."))
            .build()
            .unwrap();
        assert_eq!(settings.decimal_separator, DecimalSeparator::Dot);
    }

    #[test]
    fn test_unknown_separator_is_rejected() {
        let base = settings_file(r#"decimal_separator = ";""#);
        let result = Settings::builder().with_file(base.path(), true).build();
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let base = settings_file(r##"comment_marker = "#""##);
        let result = Settings::builder().with_file(base.path(), true).build();
        assert!(matches!(result, Err(SettingsError::Invalid(_))));
    }
}
