//! tscout: query-driven symbol and structure extraction.
//!
//! Parses a source file with the profile matching its extension and prints
//! the extracted view as JSON:
//! - `tscout symbols <file>` — flat, normalized symbol records
//! - `tscout structure <file>` — nested imports/types/traits/impls/functions
//! - `tscout profiles` — the bundled language profiles and their slots

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use treescout::{Engine, ExtractError, PatternSlot};

/// Exit codes for the CLI
///
/// - 0: Success
/// - 1: Unsupported file (no profile for the extension)
/// - 2: Error (invalid input, missing file, bad pattern)
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const UNSUPPORTED: u8 = 1;
    pub const ERROR: u8 = 2;
}

/// Query-driven symbol and structure extraction
#[derive(Parser)]
#[command(name = "tscout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use compact output (no pretty-printing)
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the flat symbol list from a source file
    Symbols {
        /// Source file to extract from
        file: PathBuf,
    },

    /// Extract the nested structure model from a source file
    Structure {
        /// Source file to extract from
        file: PathBuf,
    },

    /// List the bundled language profiles
    Profiles,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let engine = Engine::new();

    let value = match &cli.command {
        Commands::Symbols { file } => {
            if engine.registry().for_path(file).is_none() {
                eprintln!("No language profile for {}", file.display());
                return Ok(ExitCode::from(exit_codes::UNSUPPORTED));
            }
            symbols_json(&engine, file)?
        }
        Commands::Structure { file } => {
            if engine.registry().for_path(file).is_none() {
                eprintln!("No language profile for {}", file.display());
                return Ok(ExitCode::from(exit_codes::UNSUPPORTED));
            }
            structure_json(&engine, file)?
        }
        Commands::Profiles => profile_listing(&engine),
    };

    let rendered = if cli.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    println!("{rendered}");
    Ok(ExitCode::from(exit_codes::SUCCESS))
}

fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))
}

fn symbols_json(engine: &Engine, file: &Path) -> Result<serde_json::Value> {
    let source = read_source(file)?;
    let extraction = engine
        .extract_file(file, &source)
        .with_context(|| format!("failed to extract symbols from {}", file.display()))?;
    Ok(serde_json::json!({
        "file": file,
        "language": extraction.language,
        "symbols": extraction.symbols,
        "warnings": extraction.warnings,
    }))
}

fn structure_json(engine: &Engine, file: &Path) -> Result<serde_json::Value> {
    let source = read_source(file)?;
    let language = engine
        .registry()
        .for_path(file)
        .map(|p| p.language_id.to_string())
        .unwrap_or_default();
    let tree = engine.parse(&language, &source)?;
    let structure = match engine.extract_structure(&language, &tree, &source) {
        Ok(model) => model,
        Err(ExtractError::MissingPattern { .. }) => Default::default(),
        Err(e) => return Err(e).context("structure extraction failed"),
    };
    Ok(serde_json::json!({
        "file": file,
        "language": language,
        "structure": structure,
    }))
}

fn profile_listing(engine: &Engine) -> serde_json::Value {
    const SLOTS: [PatternSlot; 7] = [
        PatternSlot::Hoverable,
        PatternSlot::ClassLike,
        PatternSlot::MethodLike,
        PatternSlot::BlockComment,
        PatternSlot::MethodSignature,
        PatternSlot::Structure,
        PatternSlot::SymbolExtractor,
    ];

    let profiles: Vec<serde_json::Value> = engine
        .registry()
        .iter()
        .map(|profile| {
            let slots: Vec<&str> = SLOTS
                .into_iter()
                .filter(|slot| profile.pattern(*slot).is_some())
                .map(|slot| slot.name())
                .collect();
            serde_json::json!({
                "language": profile.language_id,
                "extensions": profile.file_extensions,
                "slots": slots,
                "builtInTypes": profile.built_in_types.len(),
            })
        })
        .collect();
    serde_json::json!({ "profiles": profiles })
}
