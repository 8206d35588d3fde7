use std::fmt;

/// Why a capture row was dropped during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataErrorKind {
    /// MAC text missing or not a 6-octet hex address
    InvalidMac,
    /// Timestamp column empty
    MissingTimestamp,
    /// Timestamp present but matched no known capture format
    UnparsableTimestamp,
    /// Latitude or longitude not a number
    UnparsableCoordinate,
    /// Coordinate outside +/-90 / +/-180
    CoordinateOutOfRange,
    /// Exact (0, 0) position: collector had no GPS fix
    NoGpsFix,
}

impl fmt::Display for DataErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DataErrorKind::InvalidMac => "invalid MAC",
            DataErrorKind::MissingTimestamp => "missing timestamp",
            DataErrorKind::UnparsableTimestamp => "unparsable timestamp",
            DataErrorKind::UnparsableCoordinate => "unparsable coordinate",
            DataErrorKind::CoordinateOutOfRange => "coordinate out of range",
            DataErrorKind::NoGpsFix => "no GPS fix",
        };
        f.write_str(label)
    }
}

/// One dropped row. Recoverable by construction: the run continues and
/// the error is counted, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataError {
    /// 1-based line number in the capture file.
    pub line: u64,
    pub kind: DataErrorKind,
    /// The offending value, for diagnostics.
    pub detail: String,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({:?})", self.line, self.kind, self.detail)
    }
}

/// Per-file ingest accounting, rolled up into the end-of-run summary so
/// data quality issues are visible without reading logs line by line.
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    /// Data rows read from the file (after the header).
    pub rows_read: usize,
    /// Rows that became observations.
    pub observations: usize,
    /// Bluetooth/BLE sightings, filtered before normalization.
    pub skipped_bluetooth: usize,
    /// Rows dropped by the normalizer.
    pub data_errors: Vec<DataError>,
}

impl FileReport {
    pub fn dropped(&self) -> usize {
        self.data_errors.len()
    }
}
