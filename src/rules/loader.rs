//! Cargador de tablas de reglas desde archivos TOML

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result, RuleError};
use crate::rules::{RuleSet, SubstitutionRule};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    #[serde(default, rename = "rule")]
    rules: Vec<RuleRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleRecord {
    find: Option<String>,
    pattern: Option<String>,
    replace: String,
    count: Option<usize>,
    description: Option<String>,
}

impl RuleRecord {
    fn into_rule(self, index: usize) -> Result<SubstitutionRule, RuleError> {
        let mut rule = match (self.find, self.pattern) {
            (Some(find), None) => SubstitutionRule::literal(&find, &self.replace)?,
            (None, Some(pattern)) => SubstitutionRule::pattern(&pattern, &self.replace)?,
            _ => return Err(RuleError::AmbiguousMatcher { index }),
        };
        match self.count {
            Some(0) => return Err(RuleError::ZeroCount { index }),
            Some(n) => rule = rule.first(n),
            None => {}
        }
        if let Some(desc) = self.description {
            rule = rule.with_description(&desc);
        }
        Ok(rule)
    }
}

pub struct RuleLoader;

impl RuleLoader {
    /// Carga una tabla de reglas desde un archivo
    ///
    /// Formato esperado:
    ///
    /// ```toml
    /// [[rule]]
    /// find = "<label>📍 Ubicación</label>"
    /// replace = '<label data-i18n="info.location">📍 Ubicación</label>'
    ///
    /// [[rule]]
    /// pattern = '(<button[^>]*)>Otro \+</button>'
    /// replace = '${1} data-i18n="info.other">Otro +</button>'
    /// count = 1
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<RuleSet> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: RuleFile = toml::from_str(&text).map_err(|source| Error::RuleTable {
            path: path.to_path_buf(),
            source,
        })?;
        let rules = Self::build(file)?;
        tracing::info!(path = %path.display(), rules = rules.len(), "tabla de reglas cargada");
        Ok(rules)
    }

    /// Carga una tabla de reglas desde texto TOML
    pub fn load_from_str(text: &str) -> Result<RuleSet> {
        let file: RuleFile = toml::from_str(text).map_err(|source| Error::RuleTable {
            path: "<texto>".into(),
            source,
        })?;
        Self::build(file)
    }

    fn build(file: RuleFile) -> Result<RuleSet> {
        let rules = file
            .rules
            .into_iter()
            .enumerate()
            .map(|(i, record)| record.into_rule(i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuleSet::from(rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Occurrences;

    #[test]
    fn test_load_literal_and_pattern() {
        let rules = RuleLoader::load_from_str(
            r#"
[[rule]]
find = "<label>📍 Ubicación</label>"
replace = '<label data-i18n="info.location">📍 Ubicación</label>'

[[rule]]
pattern = '(<button[^>]*)>Otro \+</button>'
replace = '${1} data-i18n="info.other">Otro +</button>'
count = 1
description = "Otro +"
"#,
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.keys(), vec!["info.location", "info.other"]);
        assert_eq!(rules.rules()[1].occurrences, Occurrences::First(1));
        assert_eq!(rules.rules()[1].description, "Otro +");
    }

    #[test]
    fn test_both_matchers_is_error() {
        let err = RuleLoader::load_from_str(
            r#"
[[rule]]
find = "a"
pattern = "a"
replace = '<b data-i18n="x">a</b>'
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Rule(RuleError::AmbiguousMatcher { index: 1 })));
    }

    #[test]
    fn test_zero_count_is_error() {
        let err = RuleLoader::load_from_str(
            r#"
[[rule]]
find = "a"
replace = '<b data-i18n="x">a</b>'
count = 0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Rule(RuleError::ZeroCount { index: 1 })));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = RuleLoader::load_from_str("[[rule]\nfind = ").unwrap_err();
        assert!(matches!(err, Error::RuleTable { .. }));
    }

    #[test]
    fn test_empty_file_is_empty_set() {
        let rules = RuleLoader::load_from_str("").unwrap();
        assert!(rules.is_empty());
    }
}
