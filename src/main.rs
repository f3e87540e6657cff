use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use anotador::config::{Cli, Command};
use anotador::{builtin_rules, Annotator, Config, Document, RuleLoader, RuleSet, Verifier, Vocabulary};

/// Filtro por defecto cuando `RUST_LOG` no está definido
const DEFAULT_LOG_FILTER: &str = "anotador=info";

fn main() -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(rust_log.as_deref()))
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let config = Config::load(cli.config.as_deref()).context("Error cargando la configuración")?;

    match command {
        Command::Annotate { document, rules } => {
            let path = document.unwrap_or_else(|| config.document.clone());
            let rules = load_rules(rules.as_deref().or(config.rules.as_deref()))?;
            let annotation = Annotator::new(rules)
                .annotate_file(&path)
                .with_context(|| format!("Error anotando '{}'", path.display()))?;

            println!("✅ Archivo anotado: {}", path.display());
            println!(
                "✅ Anotación completa: {} reemplazos, {} ya anotados",
                annotation.replaced(),
                annotation.already_annotated()
            );
        }
        Command::Verify { document } => {
            let path = document.unwrap_or_else(|| config.document.clone());
            let verifier = Verifier::new(config.verifier.clone())?;
            let report = verifier
                .verify_file(&path)
                .with_context(|| format!("Error verificando '{}'", path.display()))?;
            // Los hallazgos son orientativos: el estado de salida no depende de ellos
            println!("{report}");
        }
        Command::Vocabulary { document, rules } => {
            let rules = load_rules(rules.as_deref().or(config.rules.as_deref()))?;
            let vocabulary = Vocabulary::from_rules(&rules);
            print_vocabulary(&vocabulary);

            if let Some(path) = vocabulary_document(document, &config) {
                let document = Document::load(&path)?;
                print_differences(&vocabulary, &document);
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` manda si es válido; si no, solo se registra `anotador=info`
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Tabla externa si se indicó, la integrada en caso contrario
fn load_rules(path: Option<&Path>) -> Result<RuleSet> {
    match path {
        Some(path) => Ok(RuleLoader::load_from_file(path)?),
        None => Ok(builtin_rules()?),
    }
}

/// Documento explícito, o el configurado solo si existe
fn vocabulary_document(document: Option<PathBuf>, config: &Config) -> Option<PathBuf> {
    if document.is_some() {
        return document;
    }
    if config.document.exists() {
        Some(config.document.clone())
    } else {
        tracing::warn!(path = %config.document.display(), "documento no encontrado, se omite la comparación");
        None
    }
}

fn print_vocabulary(vocabulary: &Vocabulary) {
    println!("Vocabulario ({} claves):", vocabulary.len());
    for (key, meaning) in vocabulary.iter() {
        println!("  {key:<40} {}", meaning.trim());
    }
}

fn print_differences(vocabulary: &Vocabulary, document: &Document) {
    let unknown = vocabulary.unknown_keys(document.text());
    let unused = vocabulary.unused_keys(document.text());

    println!();
    println!("Documento: {}", document.path().display());
    if unknown.is_empty() && unused.is_empty() {
        println!("✅ Todas las claves del documento están en el vocabulario y viceversa");
        return;
    }
    if !unknown.is_empty() {
        println!("⚠️  Claves del documento fuera del vocabulario: {}", unknown.len());
        for key in &unknown {
            println!("   - {key}");
        }
    }
    if !unused.is_empty() {
        println!("⚠️  Claves del vocabulario sin usar en el documento: {}", unused.len());
        for key in &unused {
            println!("   - {key}");
        }
    }
}
