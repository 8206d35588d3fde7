use serde::{Deserialize, Serialize};

/// Layer discriminator for access point features.
pub const LAYER_ACCESS_POINTS: &str = "access_points";
/// Layer discriminator for route features.
pub const LAYER_ROUTE: &str = "route";

/// Output document format version.
///
/// The feature property names and `metadata.sessions` shape are a
/// compatibility contract with the map and stats front ends; renaming
/// any field requires bumping this.
pub const FORMAT_VERSION: u32 = 2;

/// The emitted artifact: a GeoJSON FeatureCollection with a
/// `metadata` extension block. Regenerated wholesale on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<Feature>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: (f64, f64) },
    LineString { coordinates: Vec<(f64, f64)> },
}

/// Consumers filter on the `layer` property, so both variants carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureProperties {
    AccessPoint(ApProperties),
    Route(RouteProperties),
}

/// Point feature properties: the AccessPoint aggregate fields under the
/// names the front ends expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApProperties {
    #[serde(rename = "MAC")]
    pub mac: String,
    /// Display SSID; hidden networks serialize as "(Hidden)".
    #[serde(rename = "SSID")]
    pub ssid: String,
    #[serde(rename = "AuthMode")]
    pub auth_mode: String,
    #[serde(rename = "Vendor")]
    pub vendor: String,
    /// 0 when the channel was never reported.
    #[serde(rename = "Channel")]
    pub channel: u16,
    pub best_rssi: i32,
    /// Encounter count: observations merged into this aggregate.
    pub count: usize,
    pub first_seen: String,
    pub last_seen: String,
    /// Comma-joined session ids in which this AP was sighted.
    pub sessions: String,
    pub layer: String,
}

/// Line feature properties for one session's driven path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteProperties {
    pub session: String,
    pub layer: String,
    pub point_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub sessions: Vec<SessionSummary>,
    pub total_aps: usize,
    pub total_routes: usize,
    pub format_version: u32,
}

/// Per-session entry in `metadata.sessions`, read by the session
/// selection UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub name: String,
    pub date: String,
    pub ap_count: usize,
    pub duration_minutes: i64,
}
