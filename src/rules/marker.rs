//! Atributos marcadores de i18n

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-i18n(?:-([a-z]+(?:-[a-z]+)*))?="([^"]+)""#)
        .expect("regex de marcadores válida")
});

/// Tipo de atributo marcador que consume el sistema de localización
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub enum AttributeKind {
    /// Texto del elemento
    #[serde(rename = "data-i18n")]
    Text,
    #[serde(rename = "data-i18n-placeholder")]
    Placeholder,
    #[serde(rename = "data-i18n-aria-label")]
    AriaLabel,
    /// Tooltips (`title`)
    #[serde(rename = "data-i18n-title")]
    Title,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 4] = [
        AttributeKind::Text,
        AttributeKind::Placeholder,
        AttributeKind::AriaLabel,
        AttributeKind::Title,
    ];

    /// Nombre del atributo en el HTML
    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::Text => "data-i18n",
            AttributeKind::Placeholder => "data-i18n-placeholder",
            AttributeKind::AriaLabel => "data-i18n-aria-label",
            AttributeKind::Title => "data-i18n-title",
        }
    }

    fn from_suffix(suffix: Option<&str>) -> Option<Self> {
        match suffix {
            None => Some(AttributeKind::Text),
            Some("placeholder") => Some(AttributeKind::Placeholder),
            Some("aria-label") => Some(AttributeKind::AriaLabel),
            Some("title") => Some(AttributeKind::Title),
            Some(_) => None,
        }
    }

    /// Cuenta las apariciones de `nombre=` en el texto
    pub fn count_in(self, text: &str) -> usize {
        text.matches(&format!("{}=", self.name())).count()
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Marcador `atributo="clave"` insertado en un elemento
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Marker {
    pub attribute: AttributeKind,
    pub key: String,
}

impl Marker {
    pub fn new(attribute: AttributeKind, key: impl Into<String>) -> Self {
        Self {
            attribute,
            key: key.into(),
        }
    }

    pub fn text(key: impl Into<String>) -> Self {
        Self::new(AttributeKind::Text, key)
    }

    pub fn placeholder(key: impl Into<String>) -> Self {
        Self::new(AttributeKind::Placeholder, key)
    }

    /// Forma tal como aparece en el HTML: `data-i18n="info.save"`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=\"{}\"", self.attribute.name(), self.key)
    }
}

/// Extrae todos los marcadores del texto, en orden de aparición
pub fn scan_markers(text: &str) -> Vec<Marker> {
    MARKER_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let attribute = AttributeKind::from_suffix(caps.get(1).map(|m| m.as_str()))?;
            Some(Marker::new(attribute, &caps[2]))
        })
        .collect()
}
