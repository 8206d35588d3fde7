use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::Mac;

/// Canonical unit of sighting: one normalized capture row.
///
/// Produced by the record normalizer from a raw capture row and never
/// mutated afterwards. Invariants enforced at normalization time:
/// the MAC is syntactically valid, `rssi <= 0`, coordinates lie within
/// Earth bounds, and the timestamp parsed successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Normalized access point hardware address.
    pub mac: Mac,
    /// Broadcast network name. Empty means a hidden network.
    pub ssid: String,
    /// Security label as broadcast (brackets stripped). Empty is
    /// preserved and treated as equivalent to "OPEN" for classification,
    /// never silently upgraded.
    pub auth_mode: String,
    /// Wi-Fi channel 1..=196, or None when absent or out of range.
    pub channel: Option<u16>,
    /// Received signal strength in dBm. Always <= 0.
    pub rssi: i32,
    /// Collector latitude in degrees at sighting time.
    pub lat: f64,
    /// Collector longitude in degrees at sighting time.
    pub lon: f64,
    /// When the sighting happened (capture files carry no timezone).
    pub timestamp: NaiveDateTime,
    /// Id of the owning capture session.
    pub session_id: String,
}

impl Observation {
    /// Whether this sighting advertises no encryption.
    ///
    /// An empty auth label means the collector saw no security element,
    /// which is an open network in practice.
    pub fn is_open(&self) -> bool {
        let auth = self.auth_mode.trim();
        auth.is_empty() || auth.eq_ignore_ascii_case("OPEN") || auth.eq_ignore_ascii_case("ESS")
    }
}
