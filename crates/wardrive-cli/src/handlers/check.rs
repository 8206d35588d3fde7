use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use wardrive_ingest::parse_capture_file;

pub fn handle(file_path: &Path) -> Result<()> {
    let parsed = parse_capture_file(file_path)
        .with_context(|| format!("Failed to read capture file: {}", file_path.display()))?;

    let report = &parsed.report;

    println!("{}", file_path.display().to_string().bold());
    println!("  Rows:         {}", report.rows_read);
    println!("  Observations: {}", report.observations);
    println!("  Bluetooth:    {} (skipped)", report.skipped_bluetooth);
    println!("  Dropped:      {}", report.dropped());

    if let Some(session) = &parsed.session {
        println!(
            "  Session:      {} ({}, {} min)",
            session.id,
            session.date,
            session.duration_minutes()
        );
    }

    if report.data_errors.is_empty() {
        println!("\n{}", "No row-level problems found".green());
        return Ok(());
    }

    println!("\n{}", "Problems".yellow().bold());
    for error in &report.data_errors {
        println!("  {}", error);
    }

    Ok(())
}
