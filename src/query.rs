//! Validation of `section.key` queries.

use crate::reader::IniError;

/// Which half of a query a bad character was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPart {
    Section,
    Key,
}

impl std::fmt::Display for QueryPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryPart::Section => f.write_str("section"),
            QueryPart::Key => f.write_str("key"),
        }
    }
}

/// A validated `section.key` query.
///
/// The section name is lowercased so headers match case-insensitively.
/// The key keeps its case and is matched exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    section: String,
    key: String,
}

impl Query {
    /// Splits `raw` on its first `.` and validates both halves.
    ///
    /// Only letters and digits are accepted in either half.
    pub fn parse(raw: &str) -> Result<Self, IniError> {
        let (section, key) = raw.split_once('.').ok_or_else(|| IniError::MalformedQuery {
            query: raw.to_string(),
            reason: "section and key must be separated by '.'",
        })?;

        if section.is_empty() || key.is_empty() {
            return Err(IniError::MalformedQuery {
                query: raw.to_string(),
                reason: "expected the form section.key",
            });
        }

        let section = section.to_lowercase();
        check_name(raw, &section, QueryPart::Section)?;
        check_name(raw, key, QueryPart::Key)?;

        Ok(Self {
            section,
            key: key.to_string(),
        })
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}

fn check_name(query: &str, name: &str, part: QueryPart) -> Result<(), IniError> {
    match name.chars().find(|c| !c.is_alphanumeric()) {
        Some(ch) => Err(IniError::InvalidQueryCharacter {
            query: query.to_string(),
            part,
            name: name.to_string(),
            ch,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::ErrorKind;

    #[test]
    fn test_parse_lowercases_section_only() {
        let query = Query::parse("Section1.Var1").unwrap();
        assert_eq!(query.section(), "section1");
        assert_eq!(query.key(), "Var1");
    }

    #[test]
    fn test_missing_delimiter() {
        let err = Query::parse("section1var1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedQuery);
    }

    #[test]
    fn test_empty_halves() {
        for raw in [".var1", "section1.", "."] {
            let err = Query::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedQuery, "{raw}");
        }
    }

    #[test]
    fn test_splits_on_first_dot() {
        // "var.1" contains punctuation, so the second dot is rejected
        let err = Query::parse("section1.var.1").unwrap_err();
        assert!(matches!(
            err,
            IniError::InvalidQueryCharacter {
                part: QueryPart::Key,
                ch: '.',
                ..
            }
        ));
    }

    #[test]
    fn test_punctuation_in_section() {
        let err = Query::parse("secti#on1.var1").unwrap_err();
        assert!(matches!(
            err,
            IniError::InvalidQueryCharacter {
                part: QueryPart::Section,
                ch: '#',
                ..
            }
        ));
    }

    #[test]
    fn test_whitespace_in_key() {
        let err = Query::parse("section1.va r1").unwrap_err();
        assert!(matches!(
            err,
            IniError::InvalidQueryCharacter {
                part: QueryPart::Key,
                ch: ' ',
                ..
            }
        ));
    }

    #[test]
    fn test_control_and_underscore_rejected() {
        assert!(Query::parse("section1.var\t1").is_err());
        assert!(Query::parse("section_1.var1").is_err());
    }

    #[test]
    fn test_non_ascii_letters_accepted() {
        let query = Query::parse("Раздел.ключ").unwrap();
        assert_eq!(query.section(), "раздел");
        assert_eq!(query.key(), "ключ");
    }
}
