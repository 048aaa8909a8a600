//! Iterative alternative-route generation.
//!
//! Approximates k-shortest loopless alternatives by re-running the
//! shortest-path search over graphs in which already-used edges carry an
//! inflated base distance. Cheap enough for interactive use on graphs of
//! a few hundred airports, where a full k-shortest-paths algorithm would
//! be overkill.

use crate::cache::GraphCache;
use crate::graph::{edge_key, GraphOptions, RouteGraph, UsedEdgeSet};
use crate::hazard::HazardIndex;
use crate::models::{AirportCatalog, FlightPath};
use crate::solver::shortest_path;

/// Base-distance multipliers applied to used edges on successive passes.
const PENALTY_MULTIPLIERS: [f64; 4] = [2.0, 3.0, 4.0, 5.0];

/// Generate up to `k` diverse routes from `source` to `dest`, ascending
/// by true distance.
///
/// The primary route comes from a hazard-avoiding graph; if even that
/// graph routes through a hazard, a hazard-unaware solve supplies the
/// honest baseline instead. Subsequent passes inflate edges already used
/// by accepted routes, and candidates repeating an accepted airport
/// sequence are dropped.
pub fn generate_routes(
    catalog: &AirportCatalog,
    hazards: &HazardIndex,
    source: usize,
    dest: usize,
    k: usize,
    options: &GraphOptions,
    max_hops: usize,
    cache: &GraphCache,
) -> Vec<FlightPath> {
    if k == 0 {
        return Vec::new();
    }

    let avoiding = GraphOptions {
        avoid_hazards: true,
        ..options.clone()
    };

    let safe_graph = cache.get_or_build(catalog, hazards, &avoiding);
    let safe = shortest_path(&safe_graph, catalog, hazards, source, dest, max_hops);

    let primary = match safe {
        Some(path) if !path.intersects_hazard => path,
        safe => {
            let unaware = GraphOptions {
                avoid_hazards: false,
                ..options.clone()
            };
            let graph = cache.get_or_build(catalog, hazards, &unaware);
            match shortest_path(&graph, catalog, hazards, source, dest, max_hops).or(safe) {
                Some(path) => path,
                None => return Vec::new(),
            }
        }
    };

    let mut used = UsedEdgeSet::new();
    record_edges(&primary, &mut used);
    let mut routes = vec![primary];

    for multiplier in PENALTY_MULTIPLIERS {
        if routes.len() >= k {
            break;
        }

        let graph =
            RouteGraph::build_with_penalized_edges(catalog, hazards, &avoiding, &used, multiplier);
        let Some(candidate) = shortest_path(&graph, catalog, hazards, source, dest, max_hops)
        else {
            continue;
        };

        if routes
            .iter()
            .any(|accepted| same_airport_sequence(accepted, &candidate))
        {
            tracing::debug!(multiplier, "skipping duplicate alternative route");
            continue;
        }

        record_edges(&candidate, &mut used);
        routes.push(candidate);
    }

    routes.sort_by(|a, b| a.total_distance_km.total_cmp(&b.total_distance_km));
    tracing::debug!(
        routes = routes.len(),
        requested = k,
        "alternative route generation complete"
    );
    routes
}

fn record_edges(path: &FlightPath, used: &mut UsedEdgeSet) {
    for pair in path.airports.windows(2) {
        used.insert(edge_key(&pair[0].name, &pair[1].name));
    }
}

fn same_airport_sequence(a: &FlightPath, b: &FlightPath) -> bool {
    a.airports.len() == b.airports.len()
        && a.airports
            .iter()
            .zip(&b.airports)
            .all(|(x, y)| x.name == y.name)
}
