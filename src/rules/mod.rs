//! Reglas de sustitución
//!
//! Una regla es un par (buscador, reemplazo). El buscador es un texto literal
//! o un patrón con grupos de captura. El reemplazo siempre inserta al menos un
//! marcador de i18n, lo que permite reconocer las apariciones ya anotadas.

pub mod info;
pub mod loader;
pub mod marker;

use regex::{Captures, Regex};

use crate::error::RuleError;

pub use info::builtin_rules;
pub use loader::RuleLoader;
pub use marker::{scan_markers, AttributeKind, Marker};

/// Cómo se localiza el objetivo de una regla
#[derive(Debug, Clone)]
pub enum Matcher {
    Literal(String),
    Pattern(Regex),
}

impl Matcher {
    /// Texto fuente del buscador (el patrón en crudo para `Pattern`)
    pub fn source(&self) -> &str {
        match self {
            Matcher::Literal(text) => text,
            Matcher::Pattern(regex) => regex.as_str(),
        }
    }
}

/// Cuántas apariciones considera una regla, en orden de documento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occurrences {
    #[default]
    All,
    First(usize),
}

impl Occurrences {
    fn allows(self, seen: usize) -> bool {
        match self {
            Occurrences::All => true,
            Occurrences::First(n) => seen < n,
        }
    }
}

/// Resultado de aplicar una regla sobre un texto
#[derive(Debug, Clone)]
pub struct Applied {
    pub text: String,
    /// Apariciones reemplazadas
    pub replaced: usize,
    /// Apariciones que ya llevaban el marcador
    pub already_annotated: usize,
}

/// Regla de sustitución
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pub matcher: Matcher,
    pub replacement: String,
    pub occurrences: Occurrences,
    pub description: String,
    pub enabled: bool,
    /// Marcadores que el reemplazo inserta y el buscador no contiene
    markers: Vec<Marker>,
    /// Marcadores ya renderizados, para las comprobaciones de guarda
    rendered: Vec<String>,
}

impl SubstitutionRule {
    /// Regla literal: reemplaza `find` por `replace`
    pub fn literal(find: &str, replace: &str) -> Result<Self, RuleError> {
        if find.is_empty() {
            return Err(RuleError::EmptyFind);
        }
        Self::build(Matcher::Literal(find.to_string()), replace)
    }

    /// Regla de patrón; `replace` puede referenciar capturas (`$1`, `${0}`)
    pub fn pattern(pattern: &str, replace: &str) -> Result<Self, RuleError> {
        if pattern.is_empty() {
            return Err(RuleError::EmptyFind);
        }
        let regex = Regex::new(pattern).map_err(|source| RuleError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Self::build(Matcher::Pattern(regex), replace)
    }

    fn build(matcher: Matcher, replace: &str) -> Result<Self, RuleError> {
        let existing = scan_markers(matcher.source());
        let mut markers: Vec<Marker> = Vec::new();
        for marker in scan_markers(replace) {
            if !existing.contains(&marker) && !markers.contains(&marker) {
                markers.push(marker);
            }
        }
        if markers.is_empty() {
            return Err(RuleError::NoMarker {
                find: matcher.source().to_string(),
            });
        }
        let rendered = markers.iter().map(Marker::render).collect();

        Ok(Self {
            matcher,
            replacement: replace.to_string(),
            occurrences: Occurrences::All,
            description: String::new(),
            enabled: true,
            markers,
            rendered,
        })
    }

    /// Limita la regla a las primeras `n` apariciones
    pub fn first(mut self, n: usize) -> Self {
        self.occurrences = Occurrences::First(n);
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Clave del primer marcador insertado
    pub fn key(&self) -> &str {
        &self.markers[0].key
    }

    pub fn inserts_key(&self, key: &str) -> bool {
        self.markers.iter().any(|m| m.key == key)
    }

    /// Aplica la regla sobre `text`.
    ///
    /// Las apariciones ya anotadas se conservan tal cual pero cuentan para el
    /// límite de `Occurrences::First`.
    pub fn apply(&self, text: &str) -> Applied {
        match &self.matcher {
            Matcher::Literal(find) => self.apply_literal(text, find),
            Matcher::Pattern(regex) => self.apply_pattern(text, regex),
        }
    }

    fn apply_literal(&self, text: &str, find: &str) -> Applied {
        // Posiciones de `find` dentro del reemplazo: si el documento contiene
        // el reemplazo completo alrededor de una aparición, ya está anotada.
        let embedded: Vec<usize> = self
            .replacement
            .match_indices(find)
            .map(|(i, _)| i)
            .collect();

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut seen = 0;
        let mut replaced = 0;
        let mut already_annotated = 0;

        for (pos, _) in text.match_indices(find) {
            if !self.occurrences.allows(seen) {
                break;
            }
            seen += 1;

            let annotated = self.opened_by_marked_tag(text, pos, find)
                || embedded.iter().any(|&offset| {
                    pos >= offset
                        && text
                            .get(pos - offset..)
                            .is_some_and(|rest| rest.starts_with(&self.replacement))
                });
            if annotated {
                already_annotated += 1;
                continue;
            }

            out.push_str(&text[last..pos]);
            out.push_str(&self.replacement);
            last = pos + find.len();
            replaced += 1;
        }
        out.push_str(&text[last..]);

        Applied {
            text: out,
            replaced,
            already_annotated,
        }
    }

    fn apply_pattern(&self, text: &str, regex: &Regex) -> Applied {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut seen = 0;
        let mut replaced = 0;
        let mut already_annotated = 0;

        for caps in regex.captures_iter(text) {
            if !self.occurrences.allows(seen) {
                break;
            }
            seen += 1;

            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            if self.is_annotated_match(text, &caps) {
                already_annotated += 1;
                continue;
            }

            out.push_str(&text[last..whole.start()]);
            caps.expand(&self.replacement, &mut out);
            last = whole.end();
            replaced += 1;
        }
        out.push_str(&text[last..]);

        Applied {
            text: out,
            replaced,
            already_annotated,
        }
    }

    /// Una coincidencia está anotada si ya contiene el marcador o si la
    /// envuelve directamente una etiqueta de apertura que lo lleva.
    fn is_annotated_match(&self, text: &str, caps: &Captures<'_>) -> bool {
        let Some(whole) = caps.get(0) else {
            return false;
        };
        self.rendered.iter().any(|m| whole.as_str().contains(m.as_str()))
            || self.opened_by_marked_tag(text, whole.start(), whole.as_str())
    }

    /// La aparición en `start` es el contenido de una etiqueta de apertura
    /// que ya lleva alguno de los marcadores de la regla. Si la aparición
    /// empieza por `>`, ese `>` cierra la etiqueta.
    fn opened_by_marked_tag(&self, text: &str, start: usize, matched: &str) -> bool {
        let head_end = if matched.starts_with('>') { start + 1 } else { start };
        let before = &text[..head_end];
        if !before.ends_with('>') {
            return false;
        }
        match before.rfind('<') {
            Some(open) => {
                let tag = &before[open..];
                !tag.starts_with("</") && self.rendered.iter().any(|m| tag.contains(m.as_str()))
            }
            None => false,
        }
    }
}

/// Conjunto ordenado de reglas
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<SubstitutionRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: SubstitutionRule) {
        self.rules.push(rule);
    }

    pub fn add_rules(&mut self, rules: Vec<SubstitutionRule>) {
        self.rules.extend(rules);
    }

    pub fn rules(&self) -> &[SubstitutionRule] {
        &self.rules
    }

    pub fn enabled_rules(&self) -> impl Iterator<Item = &SubstitutionRule> {
        self.rules.iter().filter(|r| r.enabled)
    }

    /// Activa todas las reglas que insertan `key`
    pub fn enable_key(&mut self, key: &str) {
        for rule in &mut self.rules {
            if rule.inserts_key(key) {
                rule.enabled = true;
            }
        }
    }

    /// Desactiva todas las reglas que insertan `key`
    pub fn disable_key(&mut self, key: &str) {
        for rule in &mut self.rules {
            if rule.inserts_key(key) {
                rule.enabled = false;
            }
        }
    }

    /// Claves distintas, en orden de primera aparición
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for marker in self.rules.iter().flat_map(|r| r.markers.iter()) {
            if !keys.contains(&marker.key.as_str()) {
                keys.push(&marker.key);
            }
        }
        keys
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<SubstitutionRule>> for RuleSet {
    fn from(rules: Vec<SubstitutionRule>) -> Self {
        Self { rules }
    }
}
