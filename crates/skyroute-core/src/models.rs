//! Core data models for the routing engine.

use crate::spatial::haversine_distance_km;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SNAPSHOT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Allocate a unique snapshot version for a freshly loaded input set.
fn next_snapshot_version() -> u64 {
    NEXT_SNAPSHOT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// A named airport with geographic coordinates.
///
/// Immutable once loaded; referenced everywhere by its index in the
/// owning [`AirportCatalog`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    /// Position as [latitude, longitude] in decimal degrees.
    pub coords: [f64; 2],
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub icao: Option<String>,
}

impl Airport {
    /// Create an airport with only the required fields.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            coords: [lat, lon],
            city: None,
            country: None,
            iata: None,
            icao: None,
        }
    }

    pub fn lat(&self) -> f64 {
        self.coords[0]
    }

    pub fn lon(&self) -> f64 {
        self.coords[1]
    }

    /// Great-circle distance to another airport in kilometers.
    pub fn distance_to(&self, other: &Airport) -> f64 {
        haversine_distance_km(self.lat(), self.lon(), other.lat(), other.lon())
    }
}

/// An immutable, versioned snapshot of the caller's ordered airport list.
///
/// The version keys memoized graph builds: two catalogs loaded from the
/// same data still get distinct versions, so a reload never aliases a
/// stale graph.
#[derive(Debug, Clone)]
pub struct AirportCatalog {
    airports: Vec<Airport>,
    version: u64,
}

impl AirportCatalog {
    pub fn new(airports: Vec<Airport>) -> Self {
        Self {
            airports,
            version: next_snapshot_version(),
        }
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn get(&self, index: usize) -> Option<&Airport> {
        self.airports.get(index)
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// A named, closed polygon over which routes are discouraged or avoided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardZone {
    pub name: String,
    /// Display color for map layers, cosmetic only.
    #[serde(default)]
    pub color: Option<String>,
    /// Polygon vertices as [lat, lon] pairs (implicitly closed).
    pub polygon: Vec<[f64; 2]>,
}

impl HazardZone {
    /// Check if the segment start-end touches this zone's polygon.
    pub fn crossed_by(&self, start: [f64; 2], end: [f64; 2]) -> bool {
        crate::spatial::segment_intersects_polygon(start, end, &self.polygon)
    }
}

/// A computed route between two airports.
///
/// Distances and hazard data here are recomputed from the actual airport
/// sequence, free of any routing penalties. Paths are computed on demand
/// and not persisted.
#[derive(Debug, Clone, Serialize)]
pub struct FlightPath {
    /// Ordered airports, source first, destination last.
    pub airports: Vec<Airport>,
    /// True great-circle distance in kilometers.
    pub total_distance_km: f64,
    /// Whether any leg crosses a hazard zone.
    pub intersects_hazard: bool,
    /// Names of the hazard zones actually crossed, sorted.
    pub hazard_names: Vec<String>,
    /// Intermediate stops between source and destination.
    pub stops: usize,
}

impl FlightPath {
    /// Number of edge traversals along the route.
    pub fn hops(&self) -> usize {
        self.airports.len().saturating_sub(1)
    }
}
