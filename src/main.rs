//! Command-line interface for sbml-binding

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use indexmap::IndexMap;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use sbml_binding::binding::Node;
#[cfg(feature = "cli")]
use sbml_binding::{AnyDocument, Limits, Severity};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "sbml-binding")]
#[command(author, version, about = "SBML and SED-ML reading, checking and rewriting tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a document and report its diagnostics
    Check {
        /// Path to the SBML or SED-ML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output diagnostics as JSON
        #[arg(short, long)]
        json: bool,

        /// Reader limits: default, strict or permissive
        #[arg(short, long, default_value = "default")]
        limits: String,
    },

    /// Read a document and write it back out
    Roundtrip {
        /// Path to the SBML or SED-ML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarize a document
    Info {
        /// Path to the SBML or SED-ML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file, json, limits } => cmd_check(file, json, limits),
        Commands::Roundtrip { file, output } => cmd_roundtrip(file, output),
        Commands::Info { file, json } => cmd_info(file, json),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn has_errors(doc: &AnyDocument) -> bool {
    doc.error_log().errors_at_least(Severity::Error).next().is_some()
}

/// Returns `Ok(false)` when the document has errors
#[cfg(feature = "cli")]
fn cmd_check(file: PathBuf, json: bool, limits: String) -> Result<bool, Box<dyn std::error::Error>> {
    let limits = Limits::preset(&limits).ok_or_else(|| {
        format!("Unknown limits preset: {}. Use: default, strict, permissive", limits)
    })?;
    let doc = AnyDocument::read_from_file_with_limits(&file, &limits);

    if json {
        let output = serde_json::json!({
            "file": file.display().to_string(),
            "format": doc.format().as_str(),
            "level": doc.version().level(),
            "version": doc.version().version(),
            "diagnostics": doc.error_log(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if doc.error_log().is_empty() {
        println!("✓ {} ({}) has no diagnostics", file.display(), doc.version());
    } else {
        print!("{}", doc.error_log());
        println!();
        println!(
            "{} diagnostic(s): {} fatal, {} error, {} warning, {} info",
            doc.num_errors(None),
            doc.num_errors(Some(Severity::Fatal)),
            doc.num_errors(Some(Severity::Error)),
            doc.num_errors(Some(Severity::Warning)),
            doc.num_errors(Some(Severity::Info)),
        );
    }

    Ok(!has_errors(&doc))
}

#[cfg(feature = "cli")]
fn cmd_roundtrip(file: PathBuf, output: Option<PathBuf>) -> Result<bool, Box<dyn std::error::Error>> {
    let doc = AnyDocument::read_from_file(&file);
    if doc.error_log().has_fatal() {
        eprint!("{}", doc.error_log());
        return Ok(false);
    }
    for record in doc.error_log() {
        eprintln!("{}", record);
    }

    match output {
        Some(path) => doc.write_to_file(path)?,
        None => print!("{}", doc.write_to_string()?),
    }
    Ok(true)
}

#[cfg(feature = "cli")]
fn count_elements(node: &dyn Node, counts: &mut IndexMap<&'static str, usize>) {
    *counts.entry(node.name()).or_insert(0) += 1;
    for child in node.children() {
        count_elements(child, counts);
    }
}

#[cfg(feature = "cli")]
fn cmd_info(file: PathBuf, json: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let doc = AnyDocument::read_from_file(&file);
    if doc.error_log().has_fatal() {
        eprint!("{}", doc.error_log());
        return Ok(false);
    }

    let mut counts = IndexMap::new();
    count_elements(doc.root_node(), &mut counts);

    if json {
        let output = serde_json::json!({
            "format": doc.format().as_str(),
            "level": doc.version().level(),
            "version": doc.version().version(),
            "namespace": doc.version().namespace_uri(),
            "elements": counts,
            "hasRequiredAttributes": doc.has_required_attributes(),
            "hasRequiredElements": doc.has_required_elements(),
            "diagnostics": doc.num_errors(None),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("sbml-binding v{}", sbml_binding::VERSION);
        println!();
        println!("Document Information:");
        println!("  Format: {}", doc.format());
        println!("  Level: {}", doc.version().level());
        println!("  Version: {}", doc.version().version());
        println!("  Namespace: {}", doc.version().namespace_uri());
        println!();
        println!("Elements:");
        for (name, count) in &counts {
            println!("  {}: {}", name, count);
        }
        println!();
        println!("Required attributes present: {}", doc.has_required_attributes());
        println!("Required elements present: {}", doc.has_required_elements());
        println!("Diagnostics: {}", doc.num_errors(None));
    }

    Ok(true)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
