use std::path::{Path, PathBuf};

use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use wardrive_runtime::{BuildOptions, BuildOutcome, BuildProgress, BuildService, Config};

pub fn handle(
    data_dir: &Path,
    config: &Config,
    output: Option<PathBuf>,
    oui: Option<PathBuf>,
    no_jitter: bool,
    verbose: bool,
) -> Result<()> {
    let output = output
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| data_dir.join("wardrive.geojson"));
    let oui_csv = oui.or_else(|| config.oui_csv.clone());
    let jitter = !no_jitter && config.jitter;

    let options = BuildOptions {
        data_dir: data_dir.to_path_buf(),
        output,
        oui_csv,
        jitter,
    };

    let outcome = BuildService::new(options).run(|progress| print_progress(&progress, verbose))?;
    print_summary(&outcome);

    Ok(())
}

fn print_progress(progress: &BuildProgress, verbose: bool) {
    match progress {
        BuildProgress::VendorDirectoryLoaded { entries } => {
            if verbose {
                println!("Loaded {} OUI entries", entries);
            }
        }
        BuildProgress::VendorDirectoryUnavailable { path } => match path {
            Some(path) => eprintln!(
                "Warning: vendor registry unreadable at {}; vendors will show Unknown",
                path.display()
            ),
            None => eprintln!("Warning: no vendor registry configured; vendors will show Unknown"),
        },
        BuildProgress::FileStarted { path, index, total } => {
            if verbose {
                println!(
                    "[{}/{}] Processing {}",
                    index,
                    total,
                    path.file_name().unwrap_or_default().to_string_lossy()
                );
            }
        }
        BuildProgress::FileCompleted {
            session_id,
            rows_read,
            observations,
            skipped_bluetooth,
            dropped,
        } => {
            if verbose {
                println!(
                    "  Session {}: {} rows, {} observations, {} bluetooth, {} dropped",
                    session_id, rows_read, observations, skipped_bluetooth, dropped
                );
            }
        }
        BuildProgress::FileFailed { path, message } => {
            eprintln!("Warning: skipping {}: {}", path.display(), message);
        }
        BuildProgress::Merged {
            access_points,
            routes,
        } => {
            if verbose {
                println!("Merged into {} access points, {} routes", access_points, routes);
            }
        }
    }
}

fn print_summary(outcome: &BuildOutcome) {
    // Plain text when piped, so the summary stays grep-friendly.
    let styled = std::io::stdout().is_terminal();

    if styled {
        println!("\n{}", "Build complete".green().bold());
    } else {
        println!("\nBuild complete");
    }
    println!(
        "  Files:        {} processed, {} failed",
        outcome.files_processed, outcome.files_failed
    );
    println!("  Rows:         {}", outcome.rows_read);
    println!(
        "  Skipped:      {} bluetooth, {} invalid",
        outcome.skipped_bluetooth, outcome.data_errors
    );
    println!(
        "  Access points: {} ({} open)",
        outcome.access_points, outcome.open_ap_count
    );
    println!("  Routes:       {}", outcome.routes);
    println!("  Output:       {}", outcome.output.display());

    if outcome.vendor_degraded {
        let note = "Vendor resolution ran without a registry (degraded)";
        if styled {
            println!("  {}", note.yellow());
        } else {
            println!("  {}", note);
        }
    }

    println!("\n{}", heading("Sessions", styled));
    for session in &outcome.sessions {
        println!(
            "  {} ({}): {} APs, {} min",
            session.id,
            session.date,
            session.ap_count,
            session.duration_minutes()
        );
    }

    if !outcome.vendor_counts.is_empty() {
        println!("\n{}", heading("Top vendors", styled));
        let total = outcome.access_points.max(1);
        for (vendor, count) in outcome.vendor_counts.iter().take(10) {
            let pct = *count as f64 / total as f64 * 100.0;
            println!("  {}: {} ({:.1}%)", vendor, count, pct);
        }
    }
}

fn heading(text: &str, styled: bool) -> String {
    if styled {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}
