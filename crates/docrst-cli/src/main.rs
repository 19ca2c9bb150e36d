//! docrst CLI - Sphinx PHP-domain reStructuredText documentation writer

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docrst_core::writer::UNGROUPED;
use docrst_core::{ApiModel, SphinxWriter};

#[derive(Parser)]
#[command(name = "docrst")]
#[command(version = docrst_core::VERSION)]
#[command(about = "Generate Sphinx PHP-domain documentation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate reStructuredText files from a structure document
    Generate {
        /// Path to the structure XML document
        structure: PathBuf,

        /// Destination directory (defaults to `doc` beside the structure file)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Suppress per-file progress output
        #[arg(long)]
        quiet: bool,
    },

    /// Parse a structure document and report its contents
    Check {
        /// Path to the structure XML document
        structure: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            structure,
            output,
            quiet,
        } => generate(&structure, output, quiet),

        Commands::Check { structure } => check(&structure),
    }
}

/// Load and parse a structure document
fn load_model(structure: &Path) -> Result<ApiModel> {
    let xml = std::fs::read_to_string(structure)
        .map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", structure.display(), e))?;
    docrst_core::parse_structure(&xml)
        .map_err(|e| anyhow::anyhow!("Failed to parse '{}': {}", structure.display(), e))
}

/// Generate the documentation tree for a structure document
fn generate(structure: &Path, output: Option<PathBuf>, quiet: bool) -> Result<()> {
    let model = load_model(structure)?;

    let output_dir = output.unwrap_or_else(|| {
        structure
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("doc")
    });

    let written = SphinxWriter::transform(&model, &output_dir)?;

    if !quiet {
        for path in &written {
            println!("Generated: {}", path.display());
        }
    }

    println!("\nDocumentation generated in: {}", output_dir.display());

    Ok(())
}

/// Report per-package object counts without writing anything
fn check(structure: &Path) -> Result<()> {
    let model = load_model(structure)?;

    let mut packages: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for (file, _) in model.interfaces() {
        packages
            .entry(file.doc.tag_value("package").unwrap_or(UNGROUPED))
            .or_default()
            .0 += 1;
    }
    for (file, _) in model.classes() {
        packages
            .entry(file.doc.tag_value("package").unwrap_or(UNGROUPED))
            .or_default()
            .1 += 1;
    }

    if packages.is_empty() {
        println!("No documented classes or interfaces found");
        return Ok(());
    }

    for (package, (interfaces, classes)) in &packages {
        println!("{}: {} interface(s), {} class(es)", package, interfaces, classes);
    }

    Ok(())
}
