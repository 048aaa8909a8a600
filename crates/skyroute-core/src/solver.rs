//! Hop-bounded shortest-path search over a route graph.

use crate::graph::RouteGraph;
use crate::hazard::HazardIndex;
use crate::models::{Airport, AirportCatalog, FlightPath};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, BTreeSet};

/// Default bound on edge traversals per route.
pub const DEFAULT_MAX_HOPS: usize = 8;

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Heap entry ordered by tentative distance, then ascending airport
/// index. The index component is the explicit tie-break that keeps node
/// selection deterministic regardless of container internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    distance: FloatOrd,
    index: usize,
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Find the cheapest path from `source` to `dest` using at most
/// `max_hops` edge traversals.
///
/// Graph weights (with their penalties) steer the search, but the
/// returned distance and hazard data are recomputed from the actual
/// airport sequence, so user-facing numbers reflect reality even when
/// the search was forced through a penalized edge.
///
/// Returns `None` when the destination is unreachable within the hop
/// bound, when indices are out of range, or when source equals
/// destination (not a route).
pub fn shortest_path(
    graph: &RouteGraph,
    catalog: &AirportCatalog,
    hazards: &HazardIndex,
    source: usize,
    dest: usize,
    max_hops: usize,
) -> Option<FlightPath> {
    let n = graph.node_count();
    if n < 2 || source >= n || dest >= n || source == dest || max_hops == 0 {
        return None;
    }

    let mut distances = vec![f64::INFINITY; n];
    let mut previous: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut open: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();

    distances[source] = 0.0;
    open.push(Reverse(OpenNode {
        distance: FloatOrd(0.0),
        index: source,
    }));

    while let Some(Reverse(current)) = open.pop() {
        let u = current.index;
        if visited[u] {
            continue;
        }
        visited[u] = true;

        if u == dest {
            break;
        }

        // Relaxations out of `u` are only allowed while the path to `u`
        // still has room for one more hop.
        if hop_count(&previous, u) >= max_hops {
            continue;
        }

        for edge in graph.neighbors(u) {
            if visited[edge.to] {
                continue;
            }
            let candidate = distances[u] + edge.weight_km;
            if candidate < distances[edge.to] {
                distances[edge.to] = candidate;
                previous[edge.to] = Some(u);
                open.push(Reverse(OpenNode {
                    distance: FloatOrd(candidate),
                    index: edge.to,
                }));
            }
        }
    }

    if !distances[dest].is_finite() {
        return None;
    }

    let indices = reconstruct(&previous, source, dest)?;
    Some(realize_path(catalog, hazards, &indices))
}

/// Edges from the source to `node`, counted by walking the predecessor
/// chain.
fn hop_count(previous: &[Option<usize>], node: usize) -> usize {
    let mut hops = 0;
    let mut current = node;
    while let Some(prev) = previous[current] {
        hops += 1;
        current = prev;
    }
    hops
}

/// Walk predecessors back from the destination. A chain that does not
/// terminate at the source means the destination was never reached.
fn reconstruct(previous: &[Option<usize>], source: usize, dest: usize) -> Option<Vec<usize>> {
    let mut indices = vec![dest];
    let mut current = dest;
    while let Some(prev) = previous[current] {
        indices.push(prev);
        current = prev;
    }
    if current != source {
        return None;
    }
    indices.reverse();
    Some(indices)
}

/// Materialize the airport sequence and recompute its true distance and
/// hazard crossings from raw coordinates.
fn realize_path(catalog: &AirportCatalog, hazards: &HazardIndex, indices: &[usize]) -> FlightPath {
    let airports: Vec<Airport> = indices
        .iter()
        .filter_map(|&i| catalog.get(i).cloned())
        .collect();

    let mut total_distance_km = 0.0;
    let mut intersects_hazard = false;
    let mut names: BTreeSet<String> = BTreeSet::new();

    for pair in airports.windows(2) {
        total_distance_km += pair[0].distance_to(&pair[1]);
        let crossing = hazards.query(pair[0].coords, pair[1].coords);
        if crossing.intersects {
            intersects_hazard = true;
            names.extend(crossing.names);
        }
    }

    let stops = airports.len().saturating_sub(2);
    FlightPath {
        airports,
        total_distance_km,
        intersects_hazard,
        hazard_names: names.into_iter().collect(),
        stops,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphOptions;

    fn catalog(points: &[(&str, f64, f64)]) -> AirportCatalog {
        AirportCatalog::new(
            points
                .iter()
                .map(|(name, lat, lon)| Airport::new(*name, *lat, *lon))
                .collect(),
        )
    }

    fn names(path: &FlightPath) -> Vec<&str> {
        path.airports.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn direct_edge_beats_multi_hop_detour() {
        let catalog = catalog(&[
            ("SW", 0.0, 0.0),
            ("NW", 0.0, 10.0),
            ("NE", 10.0, 10.0),
            ("SE", 10.0, 0.0),
        ]);
        let options = GraphOptions {
            max_edge_distance_km: 2000.0,
            ..GraphOptions::default()
        };
        let hazards = HazardIndex::empty();
        let graph = RouteGraph::build(&catalog, &hazards, &options);

        let path = shortest_path(&graph, &catalog, &hazards, 0, 2, DEFAULT_MAX_HOPS).unwrap();
        assert_eq!(names(&path), vec!["SW", "NE"]);
        assert_eq!(path.hops(), 1);
        // Great-circle diagonal is roughly 1570km.
        assert!((path.total_distance_km - 1570.0).abs() < 15.0);
        assert!(!path.intersects_hazard);
    }

    #[test]
    fn equal_cost_paths_resolve_to_lowest_index() {
        // A diamond mirrored across the equator: the detours via North
        // (index 1) and South (index 3) cost exactly the same, so the
        // index tie-break decides.
        let catalog = catalog(&[
            ("West", 0.0, 0.0),
            ("North", 5.0, 5.0),
            ("East", 0.0, 10.0),
            ("South", -5.0, 5.0),
        ]);
        let options = GraphOptions {
            // Exclude the direct West-East edge so both detours tie.
            max_edge_distance_km: 1000.0,
            ..GraphOptions::default()
        };
        let hazards = HazardIndex::empty();
        let graph = RouteGraph::build(&catalog, &hazards, &options);

        for _ in 0..5 {
            let path = shortest_path(&graph, &catalog, &hazards, 0, 2, DEFAULT_MAX_HOPS).unwrap();
            assert_eq!(names(&path), vec!["West", "North", "East"]);
        }
    }

    #[test]
    fn solving_twice_is_idempotent() {
        let catalog = catalog(&[("A", 0.0, 0.0), ("B", 0.0, 10.0), ("C", 0.0, 20.0)]);
        let hazards = HazardIndex::empty();
        let graph = RouteGraph::build(&catalog, &hazards, &GraphOptions::default());

        let first = shortest_path(&graph, &catalog, &hazards, 0, 2, DEFAULT_MAX_HOPS).unwrap();
        let second = shortest_path(&graph, &catalog, &hazards, 0, 2, DEFAULT_MAX_HOPS).unwrap();
        assert_eq!(names(&first), names(&second));
        assert!((first.total_distance_km - second.total_distance_km).abs() < 1e-12);
    }

    #[test]
    fn forward_and_reverse_distances_match() {
        let catalog = catalog(&[
            ("A", 0.0, 0.0),
            ("B", 0.0, 10.0),
            ("C", 10.0, 10.0),
            ("D", 10.0, 0.0),
        ]);
        let hazards = HazardIndex::empty();
        let graph = RouteGraph::build(&catalog, &hazards, &GraphOptions::default());

        let forward = shortest_path(&graph, &catalog, &hazards, 0, 2, DEFAULT_MAX_HOPS).unwrap();
        let reverse = shortest_path(&graph, &catalog, &hazards, 2, 0, DEFAULT_MAX_HOPS).unwrap();
        assert!((forward.total_distance_km - reverse.total_distance_km).abs() < 1e-9);
    }

    #[test]
    fn hop_bound_rejects_long_chains() {
        // Direct legs exceed the edge limit, so A -> C needs two hops.
        let catalog = catalog(&[("A", 0.0, 0.0), ("B", 0.0, 10.0), ("C", 0.0, 20.0)]);
        let options = GraphOptions {
            max_edge_distance_km: 1500.0,
            ..GraphOptions::default()
        };
        let hazards = HazardIndex::empty();
        let graph = RouteGraph::build(&catalog, &hazards, &options);

        assert!(shortest_path(&graph, &catalog, &hazards, 0, 2, 1).is_none());
        let path = shortest_path(&graph, &catalog, &hazards, 0, 2, 2).unwrap();
        assert_eq!(path.hops(), 2);
    }

    #[test]
    fn reported_distance_ignores_penalties() {
        let catalog = catalog(&[("A", 0.0, 0.0), ("B", 0.0, 10.0)]);
        let zone = crate::models::HazardZone {
            name: "mid".to_string(),
            color: None,
            polygon: vec![[-1.0, 4.0], [-1.0, 6.0], [1.0, 6.0], [1.0, 4.0]],
        };
        let hazards = HazardIndex::new(vec![zone]);
        let graph = RouteGraph::build(&catalog, &hazards, &GraphOptions::default());

        // The only edge carries the hazard penalty, but the reported
        // distance is the bare great-circle length.
        let path = shortest_path(&graph, &catalog, &hazards, 0, 1, DEFAULT_MAX_HOPS).unwrap();
        assert!((path.total_distance_km - 1111.95).abs() < 1.0);
        assert!(path.intersects_hazard);
        assert_eq!(path.hazard_names, vec!["mid".to_string()]);
    }

    #[test]
    fn same_source_and_destination_is_not_a_route() {
        let catalog = catalog(&[("A", 0.0, 0.0), ("B", 0.0, 10.0)]);
        let hazards = HazardIndex::empty();
        let graph = RouteGraph::build(&catalog, &hazards, &GraphOptions::default());
        assert!(shortest_path(&graph, &catalog, &hazards, 0, 0, DEFAULT_MAX_HOPS).is_none());
    }

    #[test]
    fn out_of_range_indices_yield_none() {
        let catalog = catalog(&[("A", 0.0, 0.0), ("B", 0.0, 10.0)]);
        let hazards = HazardIndex::empty();
        let graph = RouteGraph::build(&catalog, &hazards, &GraphOptions::default());
        assert!(shortest_path(&graph, &catalog, &hazards, 0, 7, DEFAULT_MAX_HOPS).is_none());
    }
}
