use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Mac;

/// Merged, deduplicated record for one physical access point across all
/// sessions. Exactly one aggregate exists per distinct MAC in the output.
///
/// Invariants maintained by the identity merger: `first_seen <= last_seen`,
/// `session_ids` non-empty, `encounter_count >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub mac: Mac,
    /// Most-recently-observed non-empty SSID; empty if every sighting
    /// was hidden.
    pub ssid: String,
    /// Security label from the chronologically last sighting.
    pub auth_mode: String,
    /// Channel from the chronologically last sighting that reported one.
    pub channel: Option<u16>,
    /// Resolved manufacturer name, "Randomized", or "Unknown".
    pub vendor: String,
    /// Strongest (maximum) RSSI across all sightings, in dBm.
    pub best_rssi: i32,
    /// Latitude of the strongest-signal sighting, possibly jittered.
    pub lat: f64,
    /// Longitude of the strongest-signal sighting, possibly jittered.
    pub lon: f64,
    pub first_seen: NaiveDateTime,
    pub last_seen: NaiveDateTime,
    /// Every session in which this AP was sighted at least once.
    pub session_ids: BTreeSet<String>,
    /// Number of observations merged into this aggregate.
    pub encounter_count: usize,
}

impl AccessPoint {
    pub fn is_open(&self) -> bool {
        let auth = self.auth_mode.trim();
        auth.is_empty() || auth.eq_ignore_ascii_case("OPEN") || auth.eq_ignore_ascii_case("ESS")
    }

    /// Whether the SSID was hidden in every merged sighting.
    pub fn is_hidden(&self) -> bool {
        self.ssid.is_empty()
    }
}
