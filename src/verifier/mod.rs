//! Verificador de anotaciones
//!
//! Heurísticas aproximadas e independientes sobre el texto del documento.
//! Nunca modifica el documento y sus hallazgos son solo orientativos.

pub mod report;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::VerifierConfig;
use crate::document::{window_around, window_before, Document};
use crate::error::{Result, RuleError};
use crate::rules::AttributeKind;

pub use report::{Finding, FindingKind, Report};

static CHIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<button[^>]*class="chip"[^>]*>([^<]+)</button>"#).expect("regex de chips válida")
});

const PLACEHOLDER_PREFIX: &str = "placeholder=\"";

// Atributo suelto: no la cola de `data-i18n-placeholder`.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\splaceholder="([^"]+)""#).expect("regex de placeholders válida")
});

pub struct Verifier {
    config: VerifierConfig,
    element_re: Regex,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Result<Self, RuleError> {
        let tag = regex::escape(&config.element);
        let pattern = format!(r"<{tag}\b([^>]*)>([^<]+)</{tag}>");
        let element_re = Regex::new(&pattern).map_err(|source| RuleError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        Ok(Self { config, element_re })
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verifica el texto y construye el informe
    pub fn verify(&self, text: &str) -> Report {
        self.verify_with_title(text, "VERIFICACIÓN DE TRADUCCIÓN")
    }

    /// Carga y verifica un archivo sin modificarlo
    pub fn verify_file<P: AsRef<Path>>(&self, path: P) -> Result<Report> {
        let document = Document::load(path)?;
        let title = format!("VERIFICACIÓN DE TRADUCCIÓN DE {}", document.display_name());
        Ok(self.verify_with_title(document.text(), &title))
    }

    fn verify_with_title(&self, text: &str, title: &str) -> Report {
        let mut findings = Vec::new();
        self.check_elements(text, &mut findings);
        self.check_chip_buttons(text, &mut findings);
        self.check_placeholders(text, &mut findings);
        self.check_phrases(text, &mut findings);

        tracing::info!(findings = findings.len(), "verificación terminada");

        Report {
            title: title.to_string(),
            findings,
            totals: AttributeKind::ALL
                .iter()
                .map(|&kind| (kind, kind.count_in(text)))
                .collect(),
            sample_limit: self.config.sample_limit,
        }
    }

    /// Elementos cuya etiqueta de apertura no lleva data-i18n
    fn check_elements(&self, text: &str, findings: &mut Vec<Finding>) {
        for caps in self.element_re.captures_iter(text) {
            if caps[1].contains(AttributeKind::Text.name()) {
                continue;
            }
            findings.push(Finding::new(
                FindingKind::UnmarkedElement {
                    tag: self.config.element.clone(),
                },
                caps[2].trim(),
            ));
        }
    }

    /// Botones chip sin data-i18n antes de su texto
    fn check_chip_buttons(&self, text: &str, findings: &mut Vec<Finding>) {
        for caps in CHIP_RE.captures_iter(text) {
            let Some(inner) = caps.get(1) else {
                continue;
            };
            // Posición del `>` que abre el texto del botón
            let gt = inner.start() - 1;
            let context = window_before(text, gt, self.config.chip_window);
            if !context.contains(AttributeKind::Text.name()) {
                findings.push(Finding::new(FindingKind::UnmarkedChip, inner.as_str().trim()));
            }
        }
    }

    /// Placeholders con texto real sin data-i18n-placeholder en la ventana previa
    fn check_placeholders(&self, text: &str, findings: &mut Vec<Finding>) {
        let marker = AttributeKind::Placeholder.name();
        let mut reported: Vec<&str> = Vec::new();

        for caps in PLACEHOLDER_RE.captures_iter(text) {
            let Some(value) = caps.get(1) else {
                continue;
            };
            let attr_start = value.start() - PLACEHOLDER_PREFIX.len();
            let value = value.as_str();
            if is_trivial_placeholder(value) || reported.contains(&value) {
                continue;
            }
            let context = window_before(text, attr_start, self.config.placeholder_window);
            if !context.contains(marker) {
                reported.push(value);
                findings.push(Finding::new(FindingKind::UnmarkedPlaceholder, value));
            }
        }
    }

    /// Frases conocidas que deben tener su marcador alrededor
    fn check_phrases(&self, text: &str, findings: &mut Vec<Finding>) {
        let window = self.config.phrase_window;
        for phrase in &self.config.phrases {
            if phrase.text.is_empty() {
                continue;
            }
            let expected = phrase.marker().render();
            let missing = text
                .match_indices(phrase.text.as_str())
                .any(|(pos, _)| !window_around(text, pos, window, window).contains(&expected));
            if missing {
                findings.push(Finding::new(
                    FindingKind::PhraseWithoutMarker {
                        phrase: phrase.text.clone(),
                    },
                    phrase.text.as_str(),
                ));
            }
        }
    }
}

/// Valores numéricos o URLs no necesitan traducción
fn is_trivial_placeholder(value: &str) -> bool {
    value.chars().all(char::is_numeric) || value.contains("http")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> Verifier {
        Verifier::new(VerifierConfig::default()).unwrap()
    }

    #[test]
    fn test_label_without_marker() {
        let report = verifier().verify(
            r#"<label>  💶 Tarifas </label><label data-i18n="info.rates">💶 Tarifas</label>"#,
        );
        assert_eq!(report.findings.len(), 1);
        assert_eq!(
            report.findings[0],
            Finding::new(
                FindingKind::UnmarkedElement {
                    tag: "label".to_string()
                },
                "💶 Tarifas"
            )
        );
    }

    #[test]
    fn test_label_prefix_does_not_match_other_tags() {
        let report = verifier().verify("<labelled>x</labelled>");
        assert!(report.passed());
    }

    #[test]
    fn test_configured_element() {
        let config = VerifierConfig {
            element: "h2".to_string(),
            ..VerifierConfig::default()
        };
        let report = Verifier::new(config)
            .unwrap()
            .verify("<h2>Política de Envíos</h2><label>libre</label>");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].snippet, "Política de Envíos");
    }

    #[test]
    fn test_chip_buttons() {
        let report = verifier().verify(
            r#"<button type="button" class="chip" data-value="Visa">Visa</button>
<button type="button" class="chip" data-value="Bizum" data-i18n="info.bizum">Bizum</button>"#,
        );
        assert_eq!(report.findings, vec![Finding::new(FindingKind::UnmarkedChip, "Visa")]);
    }

    #[test]
    fn test_trivial_placeholders_are_ignored() {
        let report = verifier().verify(
            r#"<input placeholder="7"><input placeholder="https://tutienda.com/envios (opcional)">"#,
        );
        assert!(report.passed());
    }

    #[test]
    fn test_placeholder_findings_are_deduplicated() {
        let report = verifier().verify(
            r#"<input placeholder="Condiciones / plazo"><textarea placeholder="Condiciones / plazo"></textarea>"#,
        );
        assert_eq!(report.findings.len(), 1);
    }

    #[test]
    fn test_marker_attribute_is_not_a_placeholder() {
        let report = verifier().verify(
            r#"<input data-i18n-placeholder="info.storeAddress" placeholder="Dirección de la tienda">"#,
        );
        assert!(report.passed(), "{report}");
    }

    #[test]
    fn test_phrase_window() {
        let far = format!(r#"<p data-i18n="info.weAre">x</p>{}<p>Estamos</p>"#, " ".repeat(120));
        let report = verifier().verify(&far);
        assert_eq!(
            report.findings,
            vec![Finding::new(
                FindingKind::PhraseWithoutMarker {
                    phrase: "Estamos".to_string()
                },
                "Estamos"
            )]
        );

        let near = r#"<p data-i18n="info.weAre">Estamos</p>"#;
        assert!(verifier().verify(near).passed());
    }

    #[test]
    fn test_totals() {
        let report = verifier().verify(
            r#"<p data-i18n="a">x</p><input data-i18n-placeholder="b" placeholder="7"><b data-i18n-aria-label="c" aria-label="d"></b>"#,
        );
        assert_eq!(report.total(AttributeKind::Text), 1);
        assert_eq!(report.total(AttributeKind::Placeholder), 1);
        assert_eq!(report.total(AttributeKind::AriaLabel), 1);
        assert_eq!(report.total(AttributeKind::Title), 0);
    }
}
