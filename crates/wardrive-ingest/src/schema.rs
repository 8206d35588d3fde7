use std::collections::HashMap;

use csv::StringRecord;

/// One raw capture row, untyped. Ephemeral: consumed immediately by the
/// normalizer, never stored.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub mac: String,
    pub ssid: String,
    pub auth_mode: String,
    pub channel: String,
    pub rssi: String,
    pub lat: String,
    pub lon: String,
    pub timestamp: String,
    /// Radio type column (WIFI, BLE, BT, ...), empty when absent.
    pub radio_type: String,
    /// 1-based line number in the capture file, for error reporting.
    pub line: u64,
}

/// Case-insensitive header lookup with per-field alias lists.
///
/// Capture files come from different collector firmwares that disagree on
/// column names (WiGLE exports say `CurrentLatitude`, ESP32 collectors say
/// `Latitude`), so each logical field is resolved through an alias chain.
#[derive(Debug)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn new(headers: &StringRecord) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .collect();
        Self { columns }
    }

    /// First non-empty value among the given aliases, or empty string.
    pub fn find<'a>(&self, record: &'a StringRecord, aliases: &[&str]) -> &'a str {
        for alias in aliases {
            if let Some(&idx) = self.columns.get(&alias.to_lowercase())
                && let Some(value) = record.get(idx)
            {
                let value = value.trim();
                if !value.is_empty() {
                    return value;
                }
            }
        }
        ""
    }

    /// Convert one CSV record into a RawRecord using alias resolution.
    pub fn extract(&self, record: &StringRecord, line: u64) -> RawRecord {
        RawRecord {
            mac: self.find(record, &["MAC", "BSSID"]).to_string(),
            ssid: self.find(record, &["SSID"]).to_string(),
            auth_mode: self.find(record, &["AuthMode", "Encryption"]).to_string(),
            channel: self.find(record, &["Channel"]).to_string(),
            rssi: self.find(record, &["RSSI", "Signal"]).to_string(),
            lat: self
                .find(record, &["CurrentLatitude", "Latitude", "lat"])
                .to_string(),
            lon: self
                .find(record, &["CurrentLongitude", "Longitude", "lon"])
                .to_string(),
            timestamp: self
                .find(record, &["FirstSeen", "Timestamp", "Time", "DateTime"])
                .to_string(),
            radio_type: self.find(record, &["Type"]).to_string(),
            line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let headers = StringRecord::from(vec!["mac", "ssid", "CURRENTLATITUDE"]);
        let map = HeaderMap::new(&headers);
        let record = StringRecord::from(vec!["AA:BB:CC:DD:EE:FF", "net", "45.5"]);

        assert_eq!(map.find(&record, &["MAC", "BSSID"]), "AA:BB:CC:DD:EE:FF");
        assert_eq!(
            map.find(&record, &["CurrentLatitude", "Latitude", "lat"]),
            "45.5"
        );
    }

    #[test]
    fn test_alias_chain_skips_empty_values() {
        let headers = StringRecord::from(vec!["MAC", "BSSID"]);
        let map = HeaderMap::new(&headers);
        let record = StringRecord::from(vec!["", "AA:BB:CC:DD:EE:FF"]);

        assert_eq!(map.find(&record, &["MAC", "BSSID"]), "AA:BB:CC:DD:EE:FF");
    }

    #[test]
    fn test_missing_column_yields_empty() {
        let headers = StringRecord::from(vec!["MAC"]);
        let map = HeaderMap::new(&headers);
        let record = StringRecord::from(vec!["AA:BB:CC:DD:EE:FF"]);

        assert_eq!(map.find(&record, &["Channel"]), "");
    }
}
