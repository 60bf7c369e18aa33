//! Fsmerge CLI - fsmerge command
//!
//! Reconciles two FilmScribe XML exports of the same timeline: keeps the
//! plates export's camera-original clip names and fills in any VFX markers
//! that only exist in the original export.

use anyhow::{Context, Result};
use clap::Parser;
use fs_core::{Document, VfxIndex};
use std::path::{Path, PathBuf};

mod report;

/// Merge VFX markers from an original FilmScribe export into a plates export
#[derive(Parser)]
#[command(name = "fsmerge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Plates export (trusted camera-original clip names)
    plates: PathBuf,
    /// Original export (complete VFX marker set)
    original: PathBuf,
    /// Path for the merged XML
    output: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    run(&cli.plates, &cli.original, &cli.output)
}

fn run(plates_path: &Path, original_path: &Path, output_path: &Path) -> Result<()> {
    // 1. Load both documents in full before any processing
    let plates_doc = Document::load(plates_path)
        .context("Failed to load plates export")?;
    let original_doc = Document::load(original_path)
        .context("Failed to load original export")?;

    // 2. Index the VFX Locator markers on each side
    let plates = VfxIndex::build(&plates_doc)
        .with_context(|| format!("No event list in {}", plates_path.display()))?;
    let original = VfxIndex::build(&original_doc)
        .with_context(|| format!("No event list in {}", original_path.display()))?;

    // 3. Merge: copy plates, append the markers only the original has
    let outcome = fs_core::merge(&plates_doc, &plates, &original)?;

    // 4. Report what was found, missing, and added
    report::print(&plates, &original, &outcome);

    // 5. Write the merged document (only after the merge fully succeeded)
    outcome
        .merged
        .write_to(output_path)
        .with_context(|| format!("Failed to write merged XML to {}", output_path.display()))?;

    report::print_written(output_path, outcome.total);

    Ok(())
}
