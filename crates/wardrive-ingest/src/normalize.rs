use chrono::NaiveDateTime;
use wardrive_types::{Mac, Observation};

use crate::report::{DataError, DataErrorKind};
use crate::schema::RawRecord;

/// Timestamp formats seen across collector firmwares, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Valid Wi-Fi channel numbers (2.4 GHz through 6 GHz).
const CHANNEL_RANGE: std::ops::RangeInclusive<u16> = 1..=196;

/// Convert one raw row into a canonical Observation.
///
/// Rules, in rejection order: the MAC must normalize to a valid 6-octet
/// address; the timestamp must parse (a row without a time cannot be
/// placed on a route or contribute first/last-seen); coordinates must be
/// numeric, within Earth bounds, and not the (0, 0) no-fix marker.
///
/// Channel and RSSI are lenient: an unusable channel becomes unknown and
/// an unusable RSSI falls back to the -100 dBm noise floor. Empty auth
/// text is preserved as-is, never upgraded to a named mode.
pub fn normalize(raw: &RawRecord, session_id: &str) -> Result<Observation, DataError> {
    let mac = Mac::parse(&raw.mac).map_err(|_| DataError {
        line: raw.line,
        kind: DataErrorKind::InvalidMac,
        detail: raw.mac.clone(),
    })?;

    let timestamp = parse_timestamp(&raw.timestamp).map_err(|kind| DataError {
        line: raw.line,
        kind,
        detail: raw.timestamp.clone(),
    })?;

    let (lat, lon) = parse_position(&raw.lat, &raw.lon).map_err(|kind| DataError {
        line: raw.line,
        kind,
        detail: format!("{},{}", raw.lat, raw.lon),
    })?;

    let channel = raw
        .channel
        .parse::<u16>()
        .ok()
        .filter(|ch| CHANNEL_RANGE.contains(ch));

    // Collector noise occasionally reports positive dBm; clamp rather
    // than drop, the sighting itself is real.
    let rssi = raw.rssi.parse::<i32>().unwrap_or(-100).min(0);

    Ok(Observation {
        mac,
        ssid: raw.ssid.trim_matches('"').to_string(),
        auth_mode: strip_brackets(&raw.auth_mode),
        channel,
        rssi,
        lat,
        lon,
        timestamp,
        session_id: session_id.to_string(),
    })
}

fn parse_timestamp(text: &str) -> Result<NaiveDateTime, DataErrorKind> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DataErrorKind::MissingTimestamp);
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .ok_or(DataErrorKind::UnparsableTimestamp)
}

fn parse_position(lat_text: &str, lon_text: &str) -> Result<(f64, f64), DataErrorKind> {
    let lat: f64 = lat_text
        .trim()
        .parse()
        .map_err(|_| DataErrorKind::UnparsableCoordinate)?;
    let lon: f64 = lon_text
        .trim()
        .parse()
        .map_err(|_| DataErrorKind::UnparsableCoordinate)?;

    if !lat.is_finite() || !lon.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
        return Err(DataErrorKind::CoordinateOutOfRange);
    }
    if lat == 0.0 && lon == 0.0 {
        return Err(DataErrorKind::NoGpsFix);
    }
    Ok((lat, lon))
}

/// `[WPA2-PSK-CCMP][ESS]` -> `WPA2-PSK-CCMP ESS` style cleanup.
fn strip_brackets(auth: &str) -> String {
    auth.trim()
        .replace("][", " ")
        .replace(['[', ']'], "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row() -> RawRecord {
        RawRecord {
            mac: "aa:bb:cc:dd:ee:ff".to_string(),
            ssid: "cafe".to_string(),
            auth_mode: "[WPA2-PSK-CCMP][ESS]".to_string(),
            channel: "11".to_string(),
            rssi: "-67".to_string(),
            lat: "45.4743".to_string(),
            lon: "7.8927".to_string(),
            timestamp: "2024-05-01 10:00:00".to_string(),
            radio_type: "WIFI".to_string(),
            line: 2,
        }
    }

    #[test]
    fn test_normalizes_valid_row() {
        let obs = normalize(&raw_row(), "drive-1").unwrap();
        assert_eq!(obs.mac.as_str(), "AA:BB:CC:DD:EE:FF");
        assert_eq!(obs.auth_mode, "WPA2-PSK-CCMP ESS");
        assert_eq!(obs.channel, Some(11));
        assert_eq!(obs.rssi, -67);
        assert_eq!(obs.session_id, "drive-1");
    }

    #[test]
    fn test_invalid_mac_is_data_error() {
        let mut raw = raw_row();
        raw.mac = "not-a-mac".to_string();
        let err = normalize(&raw, "drive-1").unwrap_err();
        assert_eq!(err.kind, DataErrorKind::InvalidMac);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unparsable_timestamp_is_data_error() {
        let mut raw = raw_row();
        raw.timestamp = "yesterday-ish".to_string();
        let err = normalize(&raw, "drive-1").unwrap_err();
        assert_eq!(err.kind, DataErrorKind::UnparsableTimestamp);
    }

    #[test]
    fn test_missing_timestamp_is_data_error() {
        let mut raw = raw_row();
        raw.timestamp = String::new();
        let err = normalize(&raw, "drive-1").unwrap_err();
        assert_eq!(err.kind, DataErrorKind::MissingTimestamp);
    }

    #[test]
    fn test_out_of_range_coordinate_is_data_error() {
        let mut raw = raw_row();
        raw.lat = "91.2".to_string();
        let err = normalize(&raw, "drive-1").unwrap_err();
        assert_eq!(err.kind, DataErrorKind::CoordinateOutOfRange);
    }

    #[test]
    fn test_null_island_is_data_error() {
        let mut raw = raw_row();
        raw.lat = "0".to_string();
        raw.lon = "0".to_string();
        let err = normalize(&raw, "drive-1").unwrap_err();
        assert_eq!(err.kind, DataErrorKind::NoGpsFix);
    }

    #[test]
    fn test_bad_channel_and_rssi_are_lenient() {
        let mut raw = raw_row();
        raw.channel = "999".to_string();
        raw.rssi = "strong".to_string();
        let obs = normalize(&raw, "drive-1").unwrap();
        assert_eq!(obs.channel, None);
        assert_eq!(obs.rssi, -100);
    }

    #[test]
    fn test_positive_rssi_clamped_to_zero() {
        let mut raw = raw_row();
        raw.rssi = "4".to_string();
        let obs = normalize(&raw, "drive-1").unwrap();
        assert_eq!(obs.rssi, 0);
    }

    #[test]
    fn test_empty_auth_preserved() {
        let mut raw = raw_row();
        raw.auth_mode = String::new();
        let obs = normalize(&raw, "drive-1").unwrap();
        assert_eq!(obs.auth_mode, "");
        assert!(obs.is_open());
    }

    #[test]
    fn test_timestamp_with_fraction() {
        let mut raw = raw_row();
        raw.timestamp = "2024-05-01 10:00:00.250".to_string();
        assert!(normalize(&raw, "drive-1").is_ok());
    }
}
