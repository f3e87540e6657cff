//! Motor de anotación
//!
//! Aplica una tabla ordenada de reglas sobre el texto completo del documento.

use std::path::Path;

use crate::document::Document;
use crate::error::{Result, RuleError};
use crate::rules::{builtin_rules, RuleSet};

/// Resultado de una regla dentro de una pasada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub key: String,
    pub replaced: usize,
    pub already_annotated: usize,
}

/// Texto anotado y resultado por regla
#[derive(Debug, Clone)]
pub struct Annotation {
    pub text: String,
    pub outcomes: Vec<RuleOutcome>,
}

impl Annotation {
    pub fn replaced(&self) -> usize {
        self.outcomes.iter().map(|o| o.replaced).sum()
    }

    pub fn already_annotated(&self) -> usize {
        self.outcomes.iter().map(|o| o.already_annotated).sum()
    }

    /// Reglas que no encontraron ningún objetivo
    pub fn unmatched(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.replaced == 0 && o.already_annotated == 0)
    }
}

/// Motor principal del anotador
pub struct Annotator {
    rules: RuleSet,
}

impl Annotator {
    pub fn new(rules: RuleSet) -> Self {
        if rules.enabled_rules().next().is_none() {
            tracing::warn!("la tabla de reglas no tiene reglas activas");
        }
        Self { rules }
    }

    /// Anotador con la tabla integrada de `info.html`
    pub fn with_builtin_rules() -> Result<Self, RuleError> {
        Ok(Self::new(builtin_rules()?))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Anota el texto proporcionado
    pub fn annotate(&self, text: &str) -> Annotation {
        let mut current = text.to_string();
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for rule in self.rules.enabled_rules() {
            let applied = rule.apply(&current);
            tracing::debug!(
                key = rule.key(),
                replaced = applied.replaced,
                already_annotated = applied.already_annotated,
                "regla aplicada"
            );
            if applied.replaced > 0 {
                current = applied.text;
            }
            outcomes.push(RuleOutcome {
                key: rule.key().to_string(),
                replaced: applied.replaced,
                already_annotated: applied.already_annotated,
            });
        }

        let annotation = Annotation {
            text: current,
            outcomes,
        };
        tracing::info!(
            replaced = annotation.replaced(),
            already_annotated = annotation.already_annotated(),
            unmatched = annotation.unmatched().count(),
            "anotación terminada"
        );
        annotation
    }

    /// Anota un documento y lo sobrescribe
    pub fn annotate_document(&self, document: &mut Document) -> Annotation {
        let annotation = self.annotate(document.text());
        document.set_text(annotation.text.clone());
        annotation
    }

    /// Lee el archivo, lo anota y lo sobrescribe entero
    pub fn annotate_file<P: AsRef<Path>>(&self, path: P) -> Result<Annotation> {
        let mut document = Document::load(path)?;
        let annotation = self.annotate_document(&mut document);
        document.save()?;
        Ok(annotation)
    }
}
