//! Tests de integración del anotador sobre el documento de ejemplo.
//!
//! Ejecutar solo estos tests:  cargo test --test annotator

use std::fs;

use anotador::{Annotator, RuleLoader, RuleSet, SubstitutionRule};
use pretty_assertions::assert_eq;
use regex::Regex;

const FIXTURE: &str = include_str!("fixtures/info.html");

fn annotator() -> Annotator {
    Annotator::with_builtin_rules().expect("la tabla integrada debe ser válida")
}

/// Quita los marcadores y los `<span>` que quedan sin atributos.
///
/// La cabecera de tarifas ya tenía `<span>` desnudos, así que se quitan en
/// ambos lados de la comparación.
fn strip_annotations(text: &str) -> String {
    let attr = Regex::new(r#"\sdata-i18n(?:-[a-z]+)*="[^"]*""#).unwrap();
    let bare_span = Regex::new(r"(?s)<span>(.*?)</span>").unwrap();
    let text = attr.replace_all(text, "");
    bare_span.replace_all(&text, "$1").into_owned()
}

#[test]
fn test_every_rule_finds_its_target() {
    let result = annotator().annotate(FIXTURE);
    let unmatched: Vec<&str> = result.unmatched().map(|o| o.key.as_str()).collect();
    assert!(unmatched.is_empty(), "reglas sin objetivo en el documento: {:?}", unmatched);
    // Solo la pista de cambio de dirección venía anotada en su etiqueta
    assert_eq!(result.already_annotated(), 1);
}

#[test]
fn test_attribute_values_are_never_annotated() {
    let result = annotator().annotate(FIXTURE);
    let markup_in_value = Regex::new(r#"\s[a-z-]+="[^"<]*<"#).unwrap();
    assert!(
        !markup_in_value.is_match(&result.text),
        "marcado dentro de un atributo: {:?}",
        markup_in_value.find(&result.text).map(|m| m.as_str())
    );
    assert!(result.text.contains(r#"title="Duración: en meses""#));
    assert_eq!(result.text.matches(r#"data-i18n="info.duration""#).count(), 1);
}

#[test]
fn test_text_marked_on_parent_keeps_one_marker() {
    let result = annotator().annotate(FIXTURE);
    assert_eq!(result.text.matches(r#"data-i18n="info.addressChangeConditions""#).count(), 1);
    assert!(result.text.contains(
        r#"<p class="field-hint" data-i18n="info.addressChangeConditions">¿Bajo qué"#
    ));
}

#[test]
fn test_idempotence_over_full_table() {
    let annotator = annotator();
    let once = annotator.annotate(FIXTURE);
    let twice = annotator.annotate(&once.text);
    assert_eq!(twice.text, once.text);
    assert_eq!(twice.replaced(), 0);
    assert!(twice.already_annotated() > 0);
}

#[test]
fn test_bounded_rules_annotate_both_notices() {
    let result = annotator().annotate(FIXTURE);
    assert_eq!(result.text.matches(r#"data-i18n="info.formDescription""#).count(), 2);
    assert_eq!(result.text.matches(r#"data-i18n="info.pastePolicyInstructions""#).count(), 2);
    assert_eq!(result.text.matches(r#"data-i18n="info.important""#).count(), 2);
    assert_eq!(result.text.matches(r#"data-i18n="info.save""#).count(), 4);
}

#[test]
fn test_non_corruption() {
    let result = annotator().annotate(FIXTURE);
    assert_eq!(strip_annotations(&result.text), strip_annotations(FIXTURE));
    // Las anotaciones previas del documento se conservan
    assert!(result
        .text
        .contains(r#"<h2 data-i18n="info.returnsPolicy">Política de Devoluciones</h2>"#));
}

#[test]
fn test_bounded_replacement_first_occurrence() {
    let rules = RuleSet::from(vec![SubstitutionRule::literal(
        "<button>Otro +</button>",
        r#"<button data-i18n="info.other">Otro +</button>"#,
    )
    .unwrap()
    .first(1)]);
    let html = "<div>\n<button>Otro +</button>\n<button>Otro +</button>\n<button>Otro +</button>\n</div>";
    let result = Annotator::new(rules).annotate(html);

    assert_eq!(
        result.text,
        "<div>\n<button data-i18n=\"info.other\">Otro +</button>\n<button>Otro +</button>\n<button>Otro +</button>\n</div>"
    );
    assert_eq!(result.replaced(), 1);
}

#[test]
fn test_annotate_file_overwrites_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("info.html");
    fs::write(&path, FIXTURE).unwrap();

    let annotator = annotator();
    let annotation = annotator.annotate_file(&path).unwrap();
    let written = fs::read_to_string(&path).unwrap();

    assert_eq!(written, annotation.text);
    assert_eq!(written, annotator.annotate(FIXTURE).text);

    // Segunda ejecución sobre el archivo ya anotado
    let again = annotator.annotate_file(&path).unwrap();
    assert_eq!(again.replaced(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), written);
}

#[test]
fn test_annotate_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = annotator().annotate_file(dir.path().join("no-existe.html")).unwrap_err();
    assert!(matches!(err, anotador::Error::Read { .. }), "{err}");
}

#[test]
fn test_external_rule_table() {
    let dir = tempfile::tempdir().unwrap();
    let rules_path = dir.path().join("reglas.toml");
    fs::write(
        &rules_path,
        r#"
[[rule]]
find = "<h2>Política de Envíos</h2>"
replace = '<h2 data-i18n="shipping.title">Política de Envíos</h2>'
description = "Título de envíos"

[[rule]]
pattern = '(<button[^>]*chip-other[^>]*data-other[^>]*)>Otro \+</button>'
replace = '${1} data-i18n="common.other">Otro +</button>'
count = 1
"#,
    )
    .unwrap();

    let rules = RuleLoader::load_from_file(&rules_path).unwrap();
    assert_eq!(rules.len(), 2);
    let result = Annotator::new(rules).annotate(FIXTURE);

    assert!(result
        .text
        .contains(r#"<h2 data-i18n="shipping.title">Política de Envíos</h2>"#));
    assert_eq!(result.text.matches(r#"data-i18n="common.other""#).count(), 1);
    assert_eq!(result.text.matches("data-other>Otro +</button>").count(), 1);
}
