//! Weighted route graph construction over an airport catalog.

use crate::hazard::HazardIndex;
use crate::models::{Airport, AirportCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Flat penalty in km carried by emergency edges added during
/// connectivity repair.
const EMERGENCY_LINK_PENALTY_KM: f64 = 100.0;

/// Tunables for graph construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphOptions {
    /// Longest direct flight considered for a normal edge.
    pub max_edge_distance_km: f64,
    /// Shortest hop worth modelling as its own flight segment.
    pub min_edge_distance_km: f64,
    /// Per-edge overhead favouring fewer, longer hops.
    pub connection_penalty_km: f64,
    /// Weight added to an edge crossing a hazard zone when avoidance is on.
    /// Large enough to dominate any legal edge, so hazardous edges are a
    /// last resort rather than forbidden.
    pub hazard_penalty_km: f64,
    /// Whether hazard crossings are penalized at all.
    pub avoid_hazards: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            max_edge_distance_km: 3000.0,
            min_edge_distance_km: 50.0,
            connection_penalty_km: 30.0,
            hazard_penalty_km: 25_000.0,
            avoid_hazards: true,
        }
    }
}

/// One outgoing half of an undirected connection between two airports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: usize,
    /// Routing weight in km: base distance plus penalties.
    pub weight_km: f64,
    /// Whether the segment crosses at least one hazard zone.
    pub crosses_hazard: bool,
}

/// Normalized airport-name pairs of edges already claimed by accepted
/// routes. Keyed by name rather than index so the same connection is
/// recognised across rebuilt graphs.
pub type UsedEdgeSet = HashSet<(String, String)>;

/// Normalize an unordered airport-name pair into a [`UsedEdgeSet`] key.
pub fn edge_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Undirected weighted adjacency structure over airport indices.
///
/// Invariants after a build: no self-loops, at most one edge per airport
/// pair, and (given at least 2 airports) no isolated nodes.
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl RouteGraph {
    /// Build the routing graph for a catalog against a hazard index.
    ///
    /// With fewer than 2 airports the graph is empty and no path exists.
    pub fn build(catalog: &AirportCatalog, hazards: &HazardIndex, options: &GraphOptions) -> Self {
        Self::build_inner(catalog, hazards, options, None)
    }

    /// Rebuild with the base distance of previously used edges multiplied,
    /// steering the next search toward connections no accepted route has
    /// claimed yet.
    pub fn build_with_penalized_edges(
        catalog: &AirportCatalog,
        hazards: &HazardIndex,
        options: &GraphOptions,
        used_edges: &UsedEdgeSet,
        multiplier: f64,
    ) -> Self {
        Self::build_inner(catalog, hazards, options, Some((used_edges, multiplier)))
    }

    fn build_inner(
        catalog: &AirportCatalog,
        hazards: &HazardIndex,
        options: &GraphOptions,
        penalized: Option<(&UsedEdgeSet, f64)>,
    ) -> Self {
        let airports = catalog.airports();
        if airports.len() < 2 {
            return Self::default();
        }

        tracing::debug!(airports = airports.len(), "building route graph");

        let mut graph = Self {
            adjacency: vec![Vec::new(); airports.len()],
            edge_count: 0,
        };

        for i in 0..airports.len() {
            for j in (i + 1)..airports.len() {
                let distance = airports[i].distance_to(&airports[j]);
                if distance < options.min_edge_distance_km
                    || distance > options.max_edge_distance_km
                {
                    continue;
                }

                let mut base = distance;
                if let Some((used, multiplier)) = penalized {
                    if used.contains(&edge_key(&airports[i].name, &airports[j].name)) {
                        base *= multiplier;
                    }
                }

                let mut weight = base + options.connection_penalty_km;
                let mut crosses = false;
                if options.avoid_hazards {
                    crosses = hazards.crosses_any(airports[i].coords, airports[j].coords);
                    if crosses {
                        weight += options.hazard_penalty_km;
                    }
                }

                graph.add_edge(i, j, weight, crosses);
            }
        }

        graph.repair_connectivity(airports);
        tracing::debug!(edges = graph.edge_count, "route graph built");
        graph
    }

    /// Connect every airport left isolated by the distance filters to its
    /// nearest already-connected airport, with a flat penalty. These
    /// emergency edges bypass the distance and hazard checks so that no
    /// node is ever unroutable.
    fn repair_connectivity(&mut self, airports: &[Airport]) {
        for i in 0..airports.len() {
            if !self.adjacency[i].is_empty() {
                continue;
            }

            let mut nearest: Option<(usize, f64)> = None;
            let mut nearest_connected: Option<(usize, f64)> = None;
            for (j, other) in airports.iter().enumerate() {
                if i == j {
                    continue;
                }
                let distance = airports[i].distance_to(other);
                if nearest.map_or(true, |(_, best)| distance < best) {
                    nearest = Some((j, distance));
                }
                if !self.adjacency[j].is_empty()
                    && nearest_connected.map_or(true, |(_, best)| distance < best)
                {
                    nearest_connected = Some((j, distance));
                }
            }

            // When nothing in the graph has an edge yet, the nearest
            // neighbour bootstraps the first component.
            if let Some((j, distance)) = nearest_connected.or(nearest) {
                self.add_edge(i, j, distance + EMERGENCY_LINK_PENALTY_KM, false);
                tracing::debug!(
                    airport = %airports[i].name,
                    linked_to = %airports[j].name,
                    "emergency link added for isolated airport"
                );
            }
        }
    }

    fn add_edge(&mut self, a: usize, b: usize, weight_km: f64, crosses_hazard: bool) {
        debug_assert_ne!(a, b);
        self.adjacency[a].push(Edge {
            to: b,
            weight_km,
            crosses_hazard,
        });
        self.adjacency[b].push(Edge {
            to: a,
            weight_km,
            crosses_hazard,
        });
        self.edge_count += 1;
    }

    pub fn neighbors(&self, index: usize) -> &[Edge] {
        self.adjacency.get(index).map_or(&[], Vec::as_slice)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
