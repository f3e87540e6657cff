//! Documento HTML en memoria y ventanas de texto

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Documento de texto cargado completo en memoria.
///
/// Se lee entero en UTF-8, se modifica en memoria y se persiste
/// sobrescribiendo el archivo original (sin copia de seguridad).
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Carga el documento desde disco
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = text.len(), "documento cargado");
        Ok(Self::new(path, text))
    }

    /// Sobrescribe el archivo con el contenido actual
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, &self.text).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), bytes = self.text.len(), "documento escrito");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    /// Nombre del archivo en mayúsculas, para títulos de informe
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| "DOCUMENTO".to_string())
    }
}

/// Índice de inicio de los `chars` caracteres anteriores a `end`.
///
/// `end` debe caer en un límite de carácter.
pub fn start_before(text: &str, end: usize, chars: usize) -> usize {
    if chars == 0 {
        return end;
    }
    text[..end]
        .char_indices()
        .rev()
        .nth(chars - 1)
        .map_or(0, |(i, _)| i)
}

/// Índice de fin de los `chars` caracteres a partir de `start`.
pub fn end_after(text: &str, start: usize, chars: usize) -> usize {
    text[start..]
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(i, _)| start + i)
}

/// Ventana de hasta `chars` caracteres que precede a `end`
pub fn window_before(text: &str, end: usize, chars: usize) -> &str {
    &text[start_before(text, end, chars)..end]
}

/// Ventana de `before` caracteres antes y `after` caracteres después de `pos`
pub fn window_around(text: &str, pos: usize, before: usize, after: usize) -> &str {
    &text[start_before(text, pos, before)..end_after(text, pos, after)]
}
