//! LocShots CLI
//!
//! Commands: generate, check
//! `generate` runs the full pipeline; `check` validates a manifest without
//! side effects and prints a JSON summary.

use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;

use locshots_core::{
    fs::OsFileStore,
    manifest::{Manifest, MANIFEST_FILE_NAME},
    notice::ConsoleNotice,
    pipeline::{Pipeline, RunOutcome},
    scene::{Document, PngExporter},
};

#[derive(Parser)]
#[command(name = "locshots-cli")]
#[command(version = locshots_core::ENGINE_VERSION)]
#[command(about = "LocShots CLI - Localized Screenshot Batch Pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full generation pipeline
    Generate {
        /// Scene document (JSON)
        #[arg(short, long, default_value = "document.json")]
        scene: PathBuf,

        /// Manifest path; defaults to the conventional file next to the
        /// scene document
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Validate a manifest without touching the file system
    Check {
        /// Manifest path
        #[arg(short, long, default_value = MANIFEST_FILE_NAME)]
        manifest: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { scene, manifest } => generate(scene, manifest),
        Commands::Check { manifest } => check(manifest),
    }
}

fn generate(scene_path: PathBuf, manifest: Option<PathBuf>) -> ExitCode {
    let manifest_path = match manifest {
        Some(path) => path,
        None => {
            let conventional = scene_path
                .parent()
                .unwrap_or_else(|| std::path::Path::new("."))
                .join(MANIFEST_FILE_NAME);
            if !conventional.is_file() {
                // No manifest at the conventional location and none chosen
                // explicitly: the run ends silently.
                debug!("no manifest at {}", conventional.display());
                return ExitCode::SUCCESS;
            }
            conventional
        }
    };

    let mut document = match Document::load_from_file(&scene_path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!(r#"{{"error": "Failed to load scene document: {e}"}}"#);
            return ExitCode::FAILURE;
        }
    };

    let files = OsFileStore;
    let exporter = PngExporter;
    let mut notices = ConsoleNotice;
    let mut pipeline = Pipeline::new(&mut document, &files, &exporter, &mut notices);

    match pipeline.run(&manifest_path) {
        Ok(RunOutcome::Completed { .. }) => ExitCode::SUCCESS,
        Ok(RunOutcome::Aborted) => ExitCode::from(2), // Configuration failure
        Err(e) => {
            eprintln!(r#"{{"error": "{e}"}}"#);
            ExitCode::FAILURE
        }
    }
}

fn check(manifest_path: PathBuf) -> ExitCode {
    let content = match std::fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) => {
            println!(r#"{{"valid": false, "error": "Failed to read manifest: {e}"}}"#);
            return ExitCode::FAILURE;
        }
    };

    match Manifest::parse(&content) {
        Ok(manifest) => {
            let summary = serde_json::json!({
                "valid": true,
                "output": manifest.output,
                "languages": manifest.languages.len(),
                "mirrors": manifest
                    .languages
                    .iter()
                    .map(|l| l.output.len().saturating_sub(1))
                    .sum::<usize>(),
            });
            match serde_json::to_string_pretty(&summary) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    println!(r#"{{"valid": false, "error": "{e}"}}"#);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!(r#"{{"valid": false, "error": "{e}"}}"#);
            ExitCode::from(2) // Validation failure
        }
    }
}
