//! Errores de la biblioteca

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error al definir una regla de sustitución.
///
/// Se detecta al construir la regla, nunca al procesar un documento.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("el texto a buscar está vacío")]
    EmptyFind,

    #[error("patrón inválido '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("el reemplazo de '{find}' no inserta ningún marcador data-i18n")]
    NoMarker { find: String },

    #[error("la regla #{index} debe tener exactamente uno de 'find' o 'pattern'")]
    AmbiguousMatcher { index: usize },

    #[error("la regla #{index} tiene count = 0")]
    ZeroCount { index: usize },
}

/// Error general del anotador
#[derive(Debug, Error)]
pub enum Error {
    #[error("no se pudo leer '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no se pudo escribir '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("configuración inválida en '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("tabla de reglas inválida en '{}': {source}", path.display())]
    RuleTable {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Rule(#[from] RuleError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
