use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use wardrive_types::{Observation, Session};
use walkdir::WalkDir;

use crate::normalize::normalize;
use crate::parser::parse_capture;
use crate::report::FileReport;
use crate::Result;

/// One fully ingested capture file: the session it defines, its
/// surviving observations, and the row-level accounting.
#[derive(Debug)]
pub struct ParsedCapture {
    /// None when no observation survived normalization (an empty session
    /// has no time bounds). Not an error by itself.
    pub session: Option<Session>,
    pub observations: Vec<Observation>,
    pub report: FileReport,
}

/// Derive the session id from the capture file name.
///
/// `2024-05-01_wardriving.csv` -> `2024-05-01`.
pub fn session_id_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    stem.strip_suffix("_wardriving").unwrap_or(&stem).to_string()
}

/// Find capture files (`*.csv`, case-insensitive) directly under `dir`,
/// sorted by path for deterministic session ordering.
pub fn discover_captures(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_csv = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Parse and normalize one capture file into a session.
///
/// Each capture file maps to exactly one session. Bluetooth sightings
/// are filtered before normalization (this is a Wi-Fi map); rows the
/// normalizer rejects are recorded in the report and skipped. The file
/// never aborts on a bad row.
pub fn parse_capture_file(path: &Path) -> Result<ParsedCapture> {
    let session_id = session_id_from_path(path);
    let raw_records = parse_capture(path)?;

    let mut report = FileReport::default();
    let mut observations = Vec::new();

    for raw in &raw_records {
        report.rows_read += 1;

        let radio = raw.radio_type.to_uppercase();
        if radio.contains("BLE") || radio.contains("BLUETOOTH") {
            report.skipped_bluetooth += 1;
            continue;
        }

        match normalize(raw, &session_id) {
            Ok(observation) => observations.push(observation),
            Err(data_error) => report.data_errors.push(data_error),
        }
    }

    report.observations = observations.len();
    let session = index_session(&session_id, &observations);

    Ok(ParsedCapture {
        session,
        observations,
        report,
    })
}

/// Derive session bounding metadata from its observations.
fn index_session(session_id: &str, observations: &[Observation]) -> Option<Session> {
    let start_time = observations.iter().map(|o| o.timestamp).min()?;
    let end_time = observations.iter().map(|o| o.timestamp).max()?;
    let distinct_aps: BTreeSet<_> = observations.iter().map(|o| &o.mac).collect();

    Some(Session {
        id: session_id.to_string(),
        date: start_time.date().format("%Y-%m-%d").to_string(),
        start_time,
        end_time,
        observation_count: observations.len(),
        ap_count: distinct_aps.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_capture(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    const HEADER: &str = "MAC,SSID,AuthMode,Channel,RSSI,CurrentLatitude,CurrentLongitude,FirstSeen,Type\n";

    #[test]
    fn test_session_id_strips_wardriving_suffix() {
        assert_eq!(
            session_id_from_path(Path::new("/data/2024-05-01_wardriving.csv")),
            "2024-05-01"
        );
        assert_eq!(
            session_id_from_path(Path::new("/data/downtown.csv")),
            "downtown"
        );
    }

    #[test]
    fn test_file_maps_to_one_session_with_time_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(
            dir.path(),
            "drive_wardriving.csv",
            &format!(
                "{HEADER}\
                 AA:BB:CC:DD:EE:01,a,,1,-50,45.1,7.1,2024-05-01 10:00:00,WIFI\n\
                 AA:BB:CC:DD:EE:02,b,,1,-50,45.2,7.2,2024-05-01 10:05:00,WIFI\n\
                 AA:BB:CC:DD:EE:01,a,,1,-40,45.3,7.3,2024-05-01 10:07:00,WIFI\n"
            ),
        );

        let parsed = parse_capture_file(&path).unwrap();
        let session = parsed.session.unwrap();
        assert_eq!(session.id, "drive");
        assert_eq!(session.date, "2024-05-01");
        assert_eq!(session.duration_minutes(), 7);
        assert_eq!(session.observation_count, 3);
        assert_eq!(session.ap_count, 2);
    }

    #[test]
    fn test_invalid_row_is_counted_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(
            dir.path(),
            "drive.csv",
            &format!(
                "{HEADER}\
                 not-a-mac,a,,1,-50,45.1,7.1,2024-05-01 10:00:00,WIFI\n\
                 AA:BB:CC:DD:EE:02,b,,1,-50,45.2,7.2,2024-05-01 10:05:00,WIFI\n"
            ),
        );

        let parsed = parse_capture_file(&path).unwrap();
        assert_eq!(parsed.observations.len(), 1);
        assert_eq!(parsed.report.dropped(), 1);
        assert_eq!(parsed.report.rows_read, 2);
    }

    #[test]
    fn test_bluetooth_rows_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(
            dir.path(),
            "drive.csv",
            &format!(
                "{HEADER}\
                 AA:BB:CC:DD:EE:01,buds,,0,-50,45.1,7.1,2024-05-01 10:00:00,BLE\n\
                 AA:BB:CC:DD:EE:02,ap,,1,-50,45.2,7.2,2024-05-01 10:05:00,WIFI\n"
            ),
        );

        let parsed = parse_capture_file(&path).unwrap();
        assert_eq!(parsed.observations.len(), 1);
        assert_eq!(parsed.report.skipped_bluetooth, 1);
        assert!(parsed.report.data_errors.is_empty());
    }

    #[test]
    fn test_empty_file_yields_no_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_capture(dir.path(), "drive.csv", HEADER);

        let parsed = parse_capture_file(&path).unwrap();
        assert!(parsed.session.is_none());
        assert!(parsed.observations.is_empty());
    }

    #[test]
    fn test_discover_captures_sorted_csv_only() {
        let dir = tempfile::tempdir().unwrap();
        write_capture(dir.path(), "b.csv", HEADER);
        write_capture(dir.path(), "a.CSV", HEADER);
        write_capture(dir.path(), "notes.txt", "hello");

        let paths = discover_captures(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }
}
