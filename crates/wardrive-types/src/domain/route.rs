use serde::{Deserialize, Serialize};

/// Driven path for one session: collector positions in ascending
/// timestamp order. Purely positional, never deduplicated against AP
/// identity. Always holds at least two points; a session with fewer
/// usable coordinates produces no route at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLine {
    pub session_id: String,
    /// Ordered (lon, lat) pairs, GeoJSON axis order.
    pub points: Vec<(f64, f64)>,
}

impl RouteLine {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }
}
