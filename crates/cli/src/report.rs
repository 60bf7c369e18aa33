//! Console report for a reconciliation run
//!
//! Informational only; nothing downstream parses this output.

use fs_core::{MergeOutcome, VfxIndex};
use owo_colors::OwoColorize;
use std::path::Path;

/// Print the full merge report: counts, plates clip names, markers that
/// were missing from plates, and a confirmation line per appended marker.
pub fn print(plates: &VfxIndex<'_>, original: &VfxIndex<'_>, outcome: &MergeOutcome) {
    println!("{}", "VFX Marker Reconciliation".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("Plates export:   {} VFX markers", plates.len());
    println!("Original export: {} VFX markers", original.len());

    let missing: Vec<&str> = outcome.missing.iter().map(String::as_str).collect();
    println!("Missing from plates: {:?}", missing);
    println!();

    println!(
        "{} VFX shots with camera filenames (from plates):",
        "✓".green()
    );
    println!();
    for code in plates.sorted_codes() {
        if let Some(record) = plates.get(code) {
            let clip = record.clip_name.unwrap_or("(no camera filename)");
            println!("  {}: {}", code.yellow(), clip);
        }
    }

    if outcome.missing.is_empty() {
        println!();
        println!("{}", "Nothing to add; plates already has every marker.".dimmed());
        return;
    }

    println!();
    println!(
        "{} VFX shots missing from plates (added from original):",
        "✗".red()
    );
    println!();
    for code in &outcome.missing {
        if let Some(record) = original.get(code) {
            println!("  {}: {}", code.yellow(), record.note.unwrap_or("N/A"));
            println!("    Clip: {}", record.clip_name.unwrap_or("N/A"));
            println!("    TC: {}", record.timecode.unwrap_or("N/A"));
        }
    }

    println!();
    for code in &outcome.missing {
        println!("  → Added {} from original", code.yellow());
    }
}

/// Confirmation printed after the merged file hits disk.
pub fn print_written(output_path: &Path, total: usize) {
    println!();
    println!(
        "{} Merged XML written to {}",
        "✓".green(),
        output_path.display()
    );
    println!("{}", format!("  Total VFX shots: {}", total).dimmed());
}
