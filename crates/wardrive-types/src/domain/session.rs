use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One bounded wardriving capture run, derived from a single capture file.
///
/// Created once by the session indexer and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session id: capture file stem with any `_wardriving` suffix stripped.
    pub id: String,
    /// Calendar date of the first sighting (YYYY-MM-DD).
    pub date: String,
    /// Earliest observation timestamp in the session.
    pub start_time: NaiveDateTime,
    /// Latest observation timestamp in the session.
    pub end_time: NaiveDateTime,
    /// Number of observations that survived normalization.
    pub observation_count: usize,
    /// Number of distinct access points sighted in this session.
    pub ap_count: usize,
}

impl Session {
    /// Drive duration in whole minutes (end - start).
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_duration_minutes() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let session = Session {
            id: "drive-1".to_string(),
            date: "2024-05-01".to_string(),
            start_time: day.and_hms_opt(10, 0, 0).unwrap(),
            end_time: day.and_hms_opt(10, 7, 30).unwrap(),
            observation_count: 3,
            ap_count: 2,
        };
        assert_eq!(session.duration_minutes(), 7);
    }
}
