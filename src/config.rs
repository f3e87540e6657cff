//! Configuración y argumentos CLI

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::rules::{AttributeKind, Marker};

/// Nombre del archivo de configuración buscado en el directorio actual
pub const CONFIG_FILE: &str = "anotador.toml";

/// Documento por defecto
pub const DEFAULT_DOCUMENT: &str = "site/secciones/info.html";

/// Anotador i18n para HTML estático
#[derive(Debug, Parser)]
#[command(name = "anotador", version, about)]
pub struct Cli {
    /// Archivo de configuración (default: ./anotador.toml si existe)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Sin subcomando se muestra la ayuda
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inserta los atributos data-i18n y sobrescribe el documento
    Annotate {
        /// Documento HTML (default: site/secciones/info.html)
        document: Option<PathBuf>,

        /// Tabla de reglas TOML en lugar de la integrada
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
    /// Informa de los textos sin anotar (no modifica el documento)
    Verify {
        /// Documento HTML (default: site/secciones/info.html)
        document: Option<PathBuf>,
    },
    /// Muestra el vocabulario de claves y, con documento, las diferencias
    Vocabulary {
        /// Documento HTML a contrastar con el vocabulario
        document: Option<PathBuf>,

        /// Tabla de reglas TOML en lugar de la integrada
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Documento a anotar y verificar
    pub document: PathBuf,
    /// Tabla de reglas externa; sin ella se usa la integrada
    pub rules: Option<PathBuf>,
    pub verifier: VerifierConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document: PathBuf::from(DEFAULT_DOCUMENT),
            rules: None,
            verifier: VerifierConfig::default(),
        }
    }
}

impl Config {
    /// Carga la configuración.
    ///
    /// Con ruta explícita el archivo debe existir; sin ella se usa
    /// `anotador.toml` si está en el directorio actual, o los valores por defecto.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load_from_file(CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "configuración cargada");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Parámetros de las heurísticas del verificador
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    /// Elemento cuya etiqueta de apertura debe llevar data-i18n
    pub element: String,
    /// Caracteres anteriores a un placeholder donde buscar su marcador
    pub placeholder_window: usize,
    /// Caracteres a cada lado de una frase donde buscar su marcador
    pub phrase_window: usize,
    /// Caracteres anteriores al texto de un botón chip
    pub chip_window: usize,
    /// Ejemplos listados por categoría en el informe
    pub sample_limit: usize,
    pub phrases: Vec<PhraseCheck>,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            element: "label".to_string(),
            placeholder_window: 150,
            phrase_window: 100,
            chip_window: 100,
            sample_limit: 5,
            phrases: PhraseCheck::defaults(),
        }
    }
}

/// Frase literal que debe aparecer junto a su marcador
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhraseCheck {
    pub text: String,
    pub key: String,
    #[serde(default = "default_attribute")]
    pub attribute: AttributeKind,
}

fn default_attribute() -> AttributeKind {
    AttributeKind::Text
}

impl PhraseCheck {
    pub fn new(text: &str, key: &str) -> Self {
        Self {
            text: text.to_string(),
            key: key.to_string(),
            attribute: AttributeKind::Text,
        }
    }

    pub fn marker(&self) -> Marker {
        Marker::new(self.attribute, self.key.as_str())
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self::new("Importante:", "info.important"),
            Self::new("Guardar", "info.save"),
            Self::new("Estamos", "info.weAre"),
            Self::new("guardando tu información", "info.savingYourInfo"),
        ]
    }
}
