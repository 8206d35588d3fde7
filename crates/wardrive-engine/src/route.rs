use std::collections::BTreeMap;

use wardrive_types::{Observation, RouteLine};

/// Build one driven path per session from the full observation set.
///
/// Observations are grouped by session and ordered by timestamp; the
/// collector positions become a connected line. A session with fewer
/// than two usable coordinates produces no route (a single point cannot
/// form a line) - that is an empty result, not an error. No smoothing
/// or simplification: this is a faithful positional trace.
pub fn build_routes(observations: &[Observation]) -> Vec<RouteLine> {
    let mut by_session: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for observation in observations {
        by_session
            .entry(observation.session_id.as_str())
            .or_default()
            .push(observation);
    }

    by_session
        .into_iter()
        .filter_map(|(session_id, mut group)| {
            group.sort_by_key(|o| o.timestamp);
            if group.len() < 2 {
                return None;
            }
            Some(RouteLine {
                session_id: session_id.to_string(),
                points: group.iter().map(|o| (o.lon, o.lat)).collect(),
            })
        })
        .collect()
}
