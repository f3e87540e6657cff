//! Anotador - Biblioteca de anotación i18n para HTML estático
//!
//! Inserta atributos `data-i18n` en documentos HTML mediante una tabla
//! ordenada de reglas de sustitución y verifica de forma aproximada que no
//! queden textos visibles sin anotar.

pub mod annotator;
pub mod config;
pub mod document;
pub mod error;
pub mod rules;
pub mod verifier;
pub mod vocabulary;

pub use annotator::{Annotation, Annotator, RuleOutcome};
pub use config::Config;
pub use document::Document;
pub use error::{Error, Result, RuleError};
pub use rules::{builtin_rules, RuleLoader, RuleSet, SubstitutionRule};
pub use verifier::{Finding, FindingKind, Report, Verifier};
pub use vocabulary::Vocabulary;
