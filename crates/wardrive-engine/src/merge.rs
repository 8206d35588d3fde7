use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use wardrive_types::{AccessPoint, Mac, Observation};

use crate::vendor::VendorDirectory;

/// Maximum jitter magnitude per axis, in degrees. 3e-5 deg of latitude
/// is about 3.3 m, well below the positional uncertainty of a moving
/// GPS fix, so jittered markers never misrepresent location at map
/// zoom levels.
const JITTER_DEGREES: f64 = 3.0e-5;

/// Merge every observation across every session into one aggregate per
/// distinct MAC.
///
/// Per group: `best_rssi` is the maximum RSSI (the strongest-signal
/// sighting is the most geometrically accurate one) and the
/// representative point is that sighting's position; ties resolve to the
/// chronologically earliest sighting. SSID takes the chronologically
/// last non-empty value, auth mode the chronologically last value,
/// channel the last reported one. Output is ordered by MAC.
pub fn merge_observations(
    observations: &[Observation],
    vendors: &VendorDirectory,
) -> Vec<AccessPoint> {
    let mut groups: BTreeMap<&Mac, Vec<&Observation>> = BTreeMap::new();
    for observation in observations {
        groups.entry(&observation.mac).or_default().push(observation);
    }

    groups
        .into_iter()
        .map(|(mac, mut group)| {
            // Stable sort: equal timestamps keep input order, which makes
            // every later "last wins" rule deterministic.
            group.sort_by(|a, b| {
                a.timestamp
                    .cmp(&b.timestamp)
                    .then_with(|| a.session_id.cmp(&b.session_id))
            });

            let strongest = group
                .iter()
                .copied()
                .fold(group[0], |best, o| if o.rssi > best.rssi { o } else { best });

            let first = group.first().expect("group is non-empty");
            let last = group.last().expect("group is non-empty");

            let ssid = group
                .iter()
                .rev()
                .find(|o| !o.ssid.is_empty())
                .map(|o| o.ssid.clone())
                .unwrap_or_default();

            AccessPoint {
                mac: mac.clone(),
                ssid,
                auth_mode: last.auth_mode.clone(),
                channel: group.iter().rev().find_map(|o| o.channel),
                vendor: vendors.resolve(mac).to_string(),
                best_rssi: strongest.rssi,
                lat: strongest.lat,
                lon: strongest.lon,
                first_seen: first.timestamp,
                last_seen: last.timestamp,
                session_ids: group.iter().map(|o| o.session_id.clone()).collect(),
                encounter_count: group.len(),
            }
        })
        .collect()
}

/// Spread aggregates that share a bit-identical representative point.
///
/// GPS fixes coarsen to a fixed precision while many physically
/// co-located APs (one building, one pole) produce the same strongest
/// coordinate; without an offset their markers render perfectly stacked.
/// The offset is derived from a hash of the MAC, so it is the same on
/// every run. Aggregates with a unique point are left untouched.
pub fn apply_jitter(access_points: &mut [AccessPoint]) {
    let mut by_point: BTreeMap<(u64, u64), Vec<usize>> = BTreeMap::new();
    for (idx, ap) in access_points.iter().enumerate() {
        by_point
            .entry((ap.lat.to_bits(), ap.lon.to_bits()))
            .or_default()
            .push(idx);
    }

    for colliding in by_point.into_values().filter(|group| group.len() >= 2) {
        for idx in colliding {
            let ap = &mut access_points[idx];
            let (dlat, dlon) = jitter_offset(&ap.mac);
            ap.lat += dlat;
            ap.lon += dlon;
        }
    }
}

/// Deterministic per-MAC offset: SHA-256 of the canonical MAC string,
/// first 8 bytes as two u32 lanes mapped onto [-1, 1] and scaled.
fn jitter_offset(mac: &Mac) -> (f64, f64) {
    let digest = Sha256::digest(mac.as_str().as_bytes());

    let lat_lane = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let lon_lane = u32::from_be_bytes([digest[4], digest[5], digest[6], digest[7]]);

    let unit = |lane: u32| (lane as f64 / u32::MAX as f64) * 2.0 - 1.0;
    (unit(lat_lane) * JITTER_DEGREES, unit(lon_lane) * JITTER_DEGREES)
}
