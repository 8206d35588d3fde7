use chrono::NaiveDateTime;
use wardrive_types::{
    AccessPoint, ApProperties, Feature, FeatureCollection, FeatureProperties, Geometry, Metadata,
    RouteLine, RouteProperties, Session, SessionSummary, FORMAT_VERSION, LAYER_ACCESS_POINTS,
    LAYER_ROUTE,
};

use crate::Result;

/// Display form for first/last-seen timestamps, e.g. "May 01, 2024 10:00".
fn format_seen(timestamp: NaiveDateTime) -> String {
    timestamp.format("%b %d, %Y %H:%M").to_string()
}

/// Assemble the output document from aggregates, routes, and sessions.
///
/// Pure function of its inputs: features are ordered by MAC (points)
/// and session id (lines), session summaries by id, so identical inputs
/// always produce an identical document. No wall-clock fields.
pub fn emit_document(
    access_points: &[AccessPoint],
    routes: &[RouteLine],
    sessions: &[Session],
) -> FeatureCollection {
    let mut access_points: Vec<&AccessPoint> = access_points.iter().collect();
    access_points.sort_by(|a, b| a.mac.cmp(&b.mac));

    let mut routes: Vec<&RouteLine> = routes.iter().collect();
    routes.sort_by(|a, b| a.session_id.cmp(&b.session_id));

    let mut sessions: Vec<&Session> = sessions.iter().collect();
    sessions.sort_by(|a, b| a.id.cmp(&b.id));

    let mut features = Vec::with_capacity(access_points.len() + routes.len());

    for ap in &access_points {
        features.push(Feature {
            feature_type: "Feature".to_string(),
            geometry: Geometry::Point {
                coordinates: (ap.lon, ap.lat),
            },
            properties: FeatureProperties::AccessPoint(ApProperties {
                mac: ap.mac.as_str().to_string(),
                ssid: if ap.is_hidden() {
                    "(Hidden)".to_string()
                } else {
                    ap.ssid.clone()
                },
                auth_mode: ap.auth_mode.clone(),
                vendor: ap.vendor.clone(),
                channel: ap.channel.unwrap_or(0),
                best_rssi: ap.best_rssi,
                count: ap.encounter_count,
                first_seen: format_seen(ap.first_seen),
                last_seen: format_seen(ap.last_seen),
                sessions: ap
                    .session_ids
                    .iter()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(","),
                layer: LAYER_ACCESS_POINTS.to_string(),
            }),
        });
    }

    for route in &routes {
        features.push(Feature {
            feature_type: "Feature".to_string(),
            geometry: Geometry::LineString {
                coordinates: route.points.clone(),
            },
            properties: FeatureProperties::Route(RouteProperties {
                session: route.session_id.clone(),
                layer: LAYER_ROUTE.to_string(),
                point_count: route.point_count(),
            }),
        });
    }

    let session_summaries = sessions
        .iter()
        .map(|session| SessionSummary {
            name: session.id.clone(),
            date: session.date.clone(),
            ap_count: session.ap_count,
            duration_minutes: session.duration_minutes(),
        })
        .collect();

    FeatureCollection {
        collection_type: "FeatureCollection".to_string(),
        features,
        metadata: Metadata {
            sessions: session_summaries,
            total_aps: access_points.len(),
            total_routes: routes.len(),
            format_version: FORMAT_VERSION,
        },
    }
}

/// Serialize the document to its on-disk form (pretty JSON). Byte
/// layout is fixed by struct field order, so reruns are byte-identical.
pub fn render_document(document: &FeatureCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use wardrive_types::Mac;

    fn sample_ap(mac: &str, ssid: &str) -> AccessPoint {
        let seen = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        AccessPoint {
            mac: Mac::parse(mac).unwrap(),
            ssid: ssid.to_string(),
            auth_mode: "WPA2-PSK-CCMP".to_string(),
            channel: Some(6),
            vendor: "AcmeNet Devices".to_string(),
            best_rssi: -58,
            lat: 45.4743,
            lon: 7.8927,
            first_seen: seen,
            last_seen: seen,
            session_ids: BTreeSet::from(["drive-1".to_string()]),
            encounter_count: 2,
        }
    }

    fn sample_session() -> Session {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        Session {
            id: "drive-1".to_string(),
            date: "2024-05-01".to_string(),
            start_time: day.and_hms_opt(10, 0, 0).unwrap(),
            end_time: day.and_hms_opt(10, 7, 0).unwrap(),
            observation_count: 3,
            ap_count: 1,
        }
    }

    #[test]
    fn test_document_shape_and_layers() {
        let aps = vec![sample_ap("AA:BB:CC:DD:EE:FF", "cafe")];
        let routes = vec![RouteLine {
            session_id: "drive-1".to_string(),
            points: vec![(7.89, 45.47), (7.90, 45.48)],
        }];
        let sessions = vec![sample_session()];

        let doc = emit_document(&aps, &routes, &sessions);
        let value: serde_json::Value =
            serde_json::from_str(&render_document(&doc).unwrap()).unwrap();

        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"][0]["properties"]["layer"], "access_points");
        assert_eq!(value["features"][0]["properties"]["MAC"], "AA:BB:CC:DD:EE:FF");
        assert_eq!(value["features"][0]["properties"]["Vendor"], "AcmeNet Devices");
        assert_eq!(value["features"][0]["properties"]["count"], 2);
        assert_eq!(value["features"][0]["properties"]["first_seen"], "May 01, 2024 10:00");
        assert_eq!(value["features"][0]["geometry"]["type"], "Point");
        assert_eq!(value["features"][1]["properties"]["layer"], "route");
        assert_eq!(value["features"][1]["properties"]["session"], "drive-1");
        assert_eq!(value["features"][1]["geometry"]["type"], "LineString");
        assert_eq!(value["features"][1]["properties"]["point_count"], 2);
        assert_eq!(value["metadata"]["sessions"][0]["name"], "drive-1");
        assert_eq!(value["metadata"]["sessions"][0]["duration_minutes"], 7);
        assert_eq!(value["metadata"]["total_aps"], 1);
        assert_eq!(value["metadata"]["total_routes"], 1);
    }

    #[test]
    fn test_hidden_ssid_serializes_as_placeholder() {
        let aps = vec![sample_ap("AA:BB:CC:DD:EE:FF", "")];
        let doc = emit_document(&aps, &[], &[sample_session()]);
        let value: serde_json::Value =
            serde_json::from_str(&render_document(&doc).unwrap()).unwrap();
        assert_eq!(value["features"][0]["properties"]["SSID"], "(Hidden)");
    }

    #[test]
    fn test_features_ordered_regardless_of_input_order() {
        let aps = vec![
            sample_ap("CC:CC:CC:DD:EE:FF", "late"),
            sample_ap("AA:BB:CC:DD:EE:FF", "early"),
        ];
        let doc = emit_document(&aps, &[], &[]);
        let value: serde_json::Value =
            serde_json::from_str(&render_document(&doc).unwrap()).unwrap();
        assert_eq!(value["features"][0]["properties"]["MAC"], "AA:BB:CC:DD:EE:FF");
        assert_eq!(value["features"][1]["properties"]["MAC"], "CC:CC:CC:DD:EE:FF");
    }

    #[test]
    fn test_emit_is_byte_identical_across_runs() {
        let aps = vec![sample_ap("AA:BB:CC:DD:EE:FF", "cafe")];
        let routes = vec![RouteLine {
            session_id: "drive-1".to_string(),
            points: vec![(7.89, 45.47), (7.90, 45.48)],
        }];
        let sessions = vec![sample_session()];

        let first = render_document(&emit_document(&aps, &routes, &sessions)).unwrap();
        let second = render_document(&emit_document(&aps, &routes, &sessions)).unwrap();
        assert_eq!(first, second);
    }
}
