//! Vocabulario de claves de i18n
//!
//! Correspondencia clave → significado derivada de la tabla de reglas. Es el
//! contrato con el catálogo de traducciones que consume los atributos.

use std::collections::{BTreeMap, BTreeSet};

use crate::rules::{scan_markers, RuleSet};

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: BTreeMap<String, String>,
}

impl Vocabulary {
    /// Construye el vocabulario; ante claves repetidas gana la primera regla
    pub fn from_rules(rules: &RuleSet) -> Self {
        let mut entries = BTreeMap::new();
        for rule in rules.rules() {
            for marker in rule.markers() {
                entries
                    .entry(marker.key.clone())
                    .or_insert_with(|| rule.description.clone());
            }
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entradas ordenadas por clave
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Claves usadas en el documento, de cualquier tipo de atributo
    pub fn keys_in(text: &str) -> BTreeSet<String> {
        scan_markers(text).into_iter().map(|m| m.key).collect()
    }

    /// Claves del documento que el vocabulario no define
    pub fn unknown_keys(&self, text: &str) -> Vec<String> {
        Self::keys_in(text)
            .into_iter()
            .filter(|key| !self.contains(key))
            .collect()
    }

    /// Claves del vocabulario que el documento no usa
    pub fn unused_keys(&self, text: &str) -> Vec<&str> {
        let used = Self::keys_in(text);
        self.entries
            .keys()
            .filter(|key| !used.contains(key.as_str()))
            .map(String::as_str)
            .collect()
    }
}
