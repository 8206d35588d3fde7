use std::path::Path;

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use wardrive_ingest::{discover_captures, parse_capture_file};

pub fn handle(data_dir: &Path) -> Result<()> {
    let captures = discover_captures(data_dir)
        .with_context(|| format!("Failed to scan capture directory: {}", data_dir.display()))?;

    if captures.is_empty() {
        bail!("No capture files found in {}", data_dir.display());
    }

    println!("{}", "Sessions".bold());
    for path in &captures {
        match parse_capture_file(path) {
            Ok(parsed) => match parsed.session {
                Some(session) => println!(
                    "  {} ({}): {} observations, {} APs, {} min",
                    session.id,
                    session.date,
                    session.observation_count,
                    session.ap_count,
                    session.duration_minutes()
                ),
                None => println!(
                    "  {}: {}",
                    path.file_name().unwrap_or_default().to_string_lossy(),
                    "no usable observations".yellow()
                ),
            },
            Err(err) => println!(
                "  {}: {}",
                path.file_name().unwrap_or_default().to_string_lossy(),
                err.to_string().red()
            ),
        }
    }

    Ok(())
}
