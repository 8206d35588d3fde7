use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wardrive_engine::{
    apply_jitter, build_routes, emit_document, merge_observations, render_document,
    VendorDirectory,
};
use wardrive_ingest::{discover_captures, parse_capture_file};
use wardrive_types::Session;

/// Everything the build needs, resolved from config and CLI flags
/// before the service starts.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory holding the capture CSV files.
    pub data_dir: PathBuf,
    /// Where the output document is written.
    pub output: PathBuf,
    /// Cached IEEE OUI registry CSV, if configured.
    pub oui_csv: Option<PathBuf>,
    /// Whether colliding markers get the deterministic offset.
    pub jitter: bool,
}

/// Progress events emitted while the build runs. The CLI decides how to
/// present them; the service itself never prints.
#[derive(Debug, Clone)]
pub enum BuildProgress {
    VendorDirectoryLoaded {
        entries: usize,
    },
    /// Registry missing or unreadable; vendor resolution degrades to
    /// Unknown for every non-randomized MAC. Emitted once.
    VendorDirectoryUnavailable {
        path: Option<PathBuf>,
    },
    FileStarted {
        path: PathBuf,
        index: usize,
        total: usize,
    },
    FileCompleted {
        session_id: String,
        rows_read: usize,
        observations: usize,
        skipped_bluetooth: usize,
        dropped: usize,
    },
    /// File-level failure (unreadable, no header row). The run continues
    /// with the remaining files.
    FileFailed {
        path: PathBuf,
        message: String,
    },
    Merged {
        access_points: usize,
        routes: usize,
    },
}

/// End-of-run accounting, for the summary the CLI prints.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub output: PathBuf,
    pub sessions: Vec<Session>,
    pub access_points: usize,
    pub routes: usize,
    pub files_processed: usize,
    pub files_failed: usize,
    pub rows_read: usize,
    pub skipped_bluetooth: usize,
    pub data_errors: usize,
    /// (vendor name, AP count), descending by count then name.
    pub vendor_counts: Vec<(String, usize)>,
    pub open_ap_count: usize,
    pub vendor_degraded: bool,
}

/// The whole batch: discover captures, ingest each file, merge, build
/// routes, emit the document.
///
/// Stage outputs are append-only collections handed forward by value;
/// the merge is the single global join point and only starts once every
/// file has been ingested or recorded as failed.
pub struct BuildService {
    options: BuildOptions,
}

impl BuildService {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn run<F>(&self, mut on_progress: F) -> Result<BuildOutcome>
    where
        F: FnMut(BuildProgress),
    {
        let vendors = self.load_vendor_directory(&mut on_progress);
        let vendor_degraded = vendors.is_empty();

        let captures = discover_captures(&self.options.data_dir).with_context(|| {
            format!(
                "Failed to scan capture directory: {}",
                self.options.data_dir.display()
            )
        })?;

        if captures.is_empty() {
            anyhow::bail!(
                "No capture files found in {}",
                self.options.data_dir.display()
            );
        }

        let mut observations = Vec::new();
        let mut sessions = Vec::new();
        let mut files_processed = 0;
        let mut files_failed = 0;
        let mut rows_read = 0;
        let mut skipped_bluetooth = 0;
        let mut data_errors = 0;

        let total = captures.len();
        for (index, path) in captures.iter().enumerate() {
            on_progress(BuildProgress::FileStarted {
                path: path.clone(),
                index: index + 1,
                total,
            });

            let parsed = match parse_capture_file(path) {
                Ok(parsed) => parsed,
                Err(err) => {
                    files_failed += 1;
                    on_progress(BuildProgress::FileFailed {
                        path: path.clone(),
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            rows_read += parsed.report.rows_read;
            skipped_bluetooth += parsed.report.skipped_bluetooth;
            data_errors += parsed.report.dropped();
            files_processed += 1;

            let session_id = parsed
                .session
                .as_ref()
                .map(|s| s.id.clone())
                .unwrap_or_else(|| "(empty)".to_string());

            on_progress(BuildProgress::FileCompleted {
                session_id,
                rows_read: parsed.report.rows_read,
                observations: parsed.report.observations,
                skipped_bluetooth: parsed.report.skipped_bluetooth,
                dropped: parsed.report.dropped(),
            });

            observations.extend(parsed.observations);
            if let Some(session) = parsed.session {
                sessions.push(session);
            }
        }

        if observations.is_empty() {
            anyhow::bail!(
                "No usable observations in {} capture file(s); output would be empty",
                total
            );
        }

        let mut access_points = merge_observations(&observations, &vendors);
        if self.options.jitter {
            apply_jitter(&mut access_points);
        }
        let routes = build_routes(&observations);

        on_progress(BuildProgress::Merged {
            access_points: access_points.len(),
            routes: routes.len(),
        });

        let document = emit_document(&access_points, &routes, &sessions);
        let rendered = render_document(&document)?;
        if let Some(parent) = self.options.output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.options.output, rendered).with_context(|| {
            format!(
                "Failed to write output document: {}",
                self.options.output.display()
            )
        })?;

        let mut vendor_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut open_ap_count = 0;
        for ap in &access_points {
            *vendor_counts.entry(ap.vendor.clone()).or_default() += 1;
            if ap.is_open() {
                open_ap_count += 1;
            }
        }
        let mut vendor_counts: Vec<(String, usize)> = vendor_counts.into_iter().collect();
        vendor_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(BuildOutcome {
            output: self.options.output.clone(),
            sessions,
            access_points: access_points.len(),
            routes: routes.len(),
            files_processed,
            files_failed,
            rows_read,
            skipped_bluetooth,
            data_errors,
            vendor_counts,
            open_ap_count,
            vendor_degraded,
        })
    }

    /// Load the OUI table from the configured cache, degrading to an
    /// empty directory (everything Unknown) rather than failing the run.
    fn load_vendor_directory<F>(&self, on_progress: &mut F) -> VendorDirectory
    where
        F: FnMut(BuildProgress),
    {
        let Some(path) = &self.options.oui_csv else {
            on_progress(BuildProgress::VendorDirectoryUnavailable { path: None });
            return VendorDirectory::empty();
        };

        match VendorDirectory::from_oui_csv(path) {
            Ok(vendors) if !vendors.is_empty() => {
                on_progress(BuildProgress::VendorDirectoryLoaded {
                    entries: vendors.len(),
                });
                vendors
            }
            _ => {
                on_progress(BuildProgress::VendorDirectoryUnavailable {
                    path: Some(path.clone()),
                });
                VendorDirectory::empty()
            }
        }
    }
}
