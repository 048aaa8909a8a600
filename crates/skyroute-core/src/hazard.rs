//! Hazard-zone index for route segment queries.

use crate::models::HazardZone;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INDEX_VERSION: AtomicU64 = AtomicU64::new(1);

/// Result of testing a segment against the hazard index.
#[derive(Debug, Clone, Default)]
pub struct HazardCrossing {
    pub intersects: bool,
    /// Names of every zone the segment touches, in sorted order.
    pub names: BTreeSet<String>,
}

/// An immutable collection of named hazard polygons.
///
/// Built once from caller-owned zones and passed explicitly into every
/// graph build. Queries are pure and safe to run concurrently from
/// multiple readers.
#[derive(Debug, Clone)]
pub struct HazardIndex {
    zones: Vec<HazardZone>,
    version: u64,
}

impl HazardIndex {
    pub fn new(zones: Vec<HazardZone>) -> Self {
        Self {
            zones,
            version: NEXT_INDEX_VERSION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// An index with no zones; every query reports clear.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn zones(&self) -> &[HazardZone] {
        &self.zones
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Test a segment against every zone, unioning the names of all
    /// zones it touches.
    pub fn query(&self, start: [f64; 2], end: [f64; 2]) -> HazardCrossing {
        let mut crossing = HazardCrossing::default();
        for zone in &self.zones {
            if zone.crossed_by(start, end) {
                crossing.intersects = true;
                crossing.names.insert(zone.name.clone());
            }
        }
        crossing
    }

    /// Boolean-only probe used on the hot path of graph construction.
    pub fn crosses_any(&self, start: [f64; 2], end: [f64; 2]) -> bool {
        self.zones.iter().any(|zone| zone.crossed_by(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: &str, lat: f64, lon: f64, half: f64) -> HazardZone {
        HazardZone {
            name: name.to_string(),
            color: None,
            polygon: vec![
                [lat - half, lon - half],
                [lat - half, lon + half],
                [lat + half, lon + half],
                [lat + half, lon - half],
            ],
        }
    }

    #[test]
    fn query_unions_names_of_overlapping_zones() {
        let index = HazardIndex::new(vec![
            square("alpha", 5.0, 5.0, 1.0),
            square("bravo", 5.0, 6.0, 1.0),
            square("charlie", 50.0, 50.0, 1.0),
        ]);

        let crossing = index.query([5.0, 0.0], [5.0, 10.0]);
        assert!(crossing.intersects);
        let names: Vec<&str> = crossing.names.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["alpha", "bravo"]);
    }

    #[test]
    fn clear_segment_reports_no_crossing() {
        let index = HazardIndex::new(vec![square("alpha", 5.0, 5.0, 1.0)]);
        let crossing = index.query([20.0, 0.0], [20.0, 10.0]);
        assert!(!crossing.intersects);
        assert!(crossing.names.is_empty());
    }

    #[test]
    fn empty_index_is_always_clear() {
        let index = HazardIndex::empty();
        assert!(!index.crosses_any([0.0, 0.0], [90.0, 90.0]));
    }

    #[test]
    fn degenerate_polygon_never_matches() {
        let index = HazardIndex::new(vec![HazardZone {
            name: "line".to_string(),
            color: None,
            polygon: vec![[0.0, 0.0], [10.0, 10.0]],
        }]);
        assert!(!index.crosses_any([0.0, 10.0], [10.0, 0.0]));
    }
}
