//! Informe del verificador

use std::fmt;

use crate::rules::AttributeKind;

const RULE: &str = "============================================================";

/// Categoría de un hallazgo
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingKind {
    /// Elemento (p. ej. `<label>`) sin data-i18n en su etiqueta de apertura
    UnmarkedElement { tag: String },
    /// Botón chip sin data-i18n
    UnmarkedChip,
    /// Placeholder sin data-i18n-placeholder cercano
    UnmarkedPlaceholder,
    /// Frase conocida sin su marcador esperado alrededor
    PhraseWithoutMarker { phrase: String },
}

/// Hallazgo individual: siempre orientativo, nunca un error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    pub snippet: String,
}

impl Finding {
    pub fn new(kind: FindingKind, snippet: impl Into<String>) -> Self {
        Self {
            kind,
            snippet: snippet.into(),
        }
    }
}

/// Resultado de una verificación
#[derive(Debug, Clone)]
pub struct Report {
    pub title: String,
    pub findings: Vec<Finding>,
    /// Total de atributos de cada tipo presentes en el documento
    pub totals: Vec<(AttributeKind, usize)>,
    pub sample_limit: usize,
}

impl Report {
    pub fn passed(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn total(&self, kind: AttributeKind) -> usize {
        self.totals
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(0, |(_, n)| *n)
    }

    /// Hallazgos de una categoría, en orden de aparición
    pub fn of_kind<'a>(&'a self, kind: &'a FindingKind) -> impl Iterator<Item = &'a Finding> {
        self.findings.iter().filter(move |f| &f.kind == kind)
    }

    /// Categorías distintas en orden de primera aparición
    fn kinds(&self) -> Vec<&FindingKind> {
        let mut kinds: Vec<&FindingKind> = Vec::new();
        for finding in &self.findings {
            if !kinds.contains(&&finding.kind) {
                kinds.push(&finding.kind);
            }
        }
        kinds
    }

    fn write_group(&self, f: &mut fmt::Formatter<'_>, kind: &FindingKind) -> fmt::Result {
        let findings: Vec<&Finding> = self.of_kind(kind).collect();
        match kind {
            FindingKind::PhraseWithoutMarker { phrase } => {
                return writeln!(f, "⚠️  '{phrase}' sin atributo correcto");
            }
            FindingKind::UnmarkedElement { tag } => {
                writeln!(f, "❌ Elementos <{tag}> sin data-i18n: {}", findings.len())?
            }
            FindingKind::UnmarkedChip => {
                writeln!(f, "❌ Botones chip sin data-i18n: {}", findings.len())?
            }
            FindingKind::UnmarkedPlaceholder => writeln!(
                f,
                "⚠️  Placeholders sin data-i18n-placeholder: {}",
                findings.len()
            )?,
        }
        for finding in findings.iter().take(self.sample_limit) {
            writeln!(f, "   - {}", finding.snippet)?;
        }
        if findings.len() > self.sample_limit {
            writeln!(f, "   ... y {} más", findings.len() - self.sample_limit)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{RULE}")?;

        if self.passed() {
            writeln!(f, "✅ ¡PERFECTO! TODO está traducido correctamente")?;
            writeln!(f, "✅ Todas las etiquetas tienen data-i18n")?;
            writeln!(f, "✅ Todos los placeholders tienen data-i18n-placeholder")?;
            writeln!(f, "✅ Todos los botones tienen data-i18n")?;
        } else {
            writeln!(f, "⚠️  Se encontraron {} problemas:", self.findings.len())?;
            writeln!(f)?;
            for kind in self.kinds() {
                self.write_group(f, kind)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        for (kind, count) in &self.totals {
            writeln!(f, "Total de atributos {kind}: {count}")?;
        }
        write!(f, "{RULE}")
    }
}
