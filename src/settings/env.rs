use std::ffi::OsString;

use toml::{Table, Value};

use super::{SettingsError, SettingsSource};

/// Reads settings from variables named `{prefix}{separator}{FIELD}`, e.g.
/// `INI__DECIMAL_SEPARATOR=,` for prefix `INI` and separator `__`.
///
/// The field part is lowercased; values are taken as strings.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into() + &separator,
        }
    }

    fn layer_from<I>(&self, vars: I) -> Result<Table, SettingsError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut layer = Table::new();
        for (name, value) in vars {
            let Some(field) = name.to_str().and_then(|n| n.strip_prefix(&self.prefix)) else {
                continue;
            };
            if field.is_empty() {
                continue;
            }
            let value = value.into_string().map_err(|_| SettingsError::EnvNotUnicode {
                name: name.to_string_lossy().into_owned(),
            })?;
            layer.insert(field.to_lowercase(), Value::String(value));
        }
        Ok(layer)
    }
}

impl SettingsSource for EnvSource {
    fn layer(&self) -> Result<Table, SettingsError> {
        self.layer_from(std::env::vars_os())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(k), OsString::from(v)))
            .collect()
    }

    #[test]
    fn test_only_prefixed_vars_are_read() {
        let source = EnvSource::new("INI", "__");
        let layer = source
            .layer_from(vars(&[
                ("INI__DECIMAL_SEPARATOR", ","),
                ("OTHER__DECIMAL_SEPARATOR", "."),
                ("INI_DECIMAL_SEPARATOR", "."),
                ("INI__", "ignored"),
            ]))
            .unwrap();

        assert_eq!(layer.len(), 1);
        assert_eq!(layer["decimal_separator"].as_str(), Some(","));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_unicode_value_is_an_error() {
        use std::os::unix::ffi::OsStringExt;

        let source = EnvSource::new("INI", "__");
        let bad = (
            OsString::from("INI__DECIMAL_SEPARATOR"),
            OsString::from_vec(vec![0xEA]),
        );
        let err = source.layer_from(vec![bad]).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::EnvNotUnicode { ref name } if name == "INI__DECIMAL_SEPARATOR"
        ));

        // unrelated variables are never decoded
        let other = (OsString::from("PATHLIKE"), OsString::from_vec(vec![0xEA]));
        assert!(source.layer_from(vec![other]).unwrap().is_empty());
    }

    #[test]
    #[should_panic(expected = "separator must not be empty")]
    fn test_empty_separator_panics() {
        EnvSource::new("INI", "");
    }
}
