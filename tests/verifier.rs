//! Tests de integración del verificador.
//!
//! Ejecutar solo estos tests:  cargo test --test verifier

use std::fs;

use anotador::config::VerifierConfig;
use anotador::rules::AttributeKind;
use anotador::{Annotator, Finding, FindingKind, Verifier};
use pretty_assertions::assert_eq;

const FIXTURE: &str = include_str!("fixtures/info.html");

fn verifier() -> Verifier {
    Verifier::new(VerifierConfig::default()).expect("configuración por defecto válida")
}

#[test]
fn test_placeholder_without_marker_is_reported() {
    let html = r#"<input type="text" name="direccion_tienda" placeholder="Dirección de la tienda">"#;
    let report = verifier().verify(html);
    assert_eq!(
        report.findings,
        vec![Finding::new(FindingKind::UnmarkedPlaceholder, "Dirección de la tienda")]
    );
}

#[test]
fn test_placeholder_with_marker_immediately_before() {
    let html = r#"<input type="text" data-i18n-placeholder="info.storeAddress" placeholder="Dirección de la tienda">"#;
    assert!(verifier().verify(html).passed());
}

#[test]
fn test_placeholder_marker_outside_window() {
    // El marcador queda a más de 150 caracteres del atributo
    let html = format!(
        r#"<input data-i18n-placeholder="info.other" placeholder="Otro">{}<input placeholder="Dirección de la tienda">"#,
        "x".repeat(160)
    );
    let report = verifier().verify(&html);
    assert_eq!(report.findings.len(), 1);
    assert_eq!(report.findings[0].snippet, "Dirección de la tienda");
}

#[test]
fn test_guardar_phrase_before_and_after_annotation() {
    let html = r#"<form><button type="submit" class="send-button pf-submit">Guardar</button></form>"#;

    let before = verifier().verify(html);
    assert_eq!(
        before.findings,
        vec![Finding::new(
            FindingKind::PhraseWithoutMarker {
                phrase: "Guardar".to_string()
            },
            "Guardar"
        )]
    );
    assert!(before.to_string().contains("⚠️  'Guardar' sin atributo correcto"));

    let annotated = Annotator::with_builtin_rules().unwrap().annotate(html);
    assert!(verifier().verify(&annotated.text).passed());
}

#[test]
fn test_unannotated_fixture_has_findings() {
    let report = verifier().verify(FIXTURE);
    assert!(!report.passed());
    assert!(report
        .findings
        .iter()
        .any(|f| matches!(f.kind, FindingKind::UnmarkedElement { .. })));
    assert!(report.findings.iter().any(|f| f.kind == FindingKind::UnmarkedChip));
    assert!(report
        .findings
        .iter()
        .any(|f| f.kind == FindingKind::UnmarkedPlaceholder));
}

#[test]
fn test_annotated_fixture_has_no_findings() {
    let annotated = Annotator::with_builtin_rules().unwrap().annotate(FIXTURE);
    let report = verifier().verify(&annotated.text);
    assert!(report.passed(), "{report}");
    assert!(report.to_string().contains("¡PERFECTO!"));
    assert!(report.total(AttributeKind::Text) > 0);
    assert!(report.total(AttributeKind::Placeholder) > 0);
    assert_eq!(report.total(AttributeKind::AriaLabel), 1);
}

#[test]
fn test_verify_file_does_not_modify_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("info.html");
    fs::write(&path, FIXTURE).unwrap();

    let report = verifier().verify_file(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), FIXTURE);
    assert!(report.title.ends_with("DE INFO.HTML"));
    assert!(!report.passed());
}
