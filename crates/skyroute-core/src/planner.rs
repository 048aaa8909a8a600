//! Planning facade: input validation, graph memoization, and route
//! generation in one call.

use crate::alternatives::generate_routes;
use crate::cache::GraphCache;
use crate::error::PlanError;
use crate::graph::GraphOptions;
use crate::hazard::HazardIndex;
use crate::models::{AirportCatalog, FlightPath};
use crate::solver::DEFAULT_MAX_HOPS;

/// Entry point for presentation layers.
///
/// Holds the routing tunables and the memoized graph snapshots; create
/// one planner per options profile and reuse it across queries.
#[derive(Debug)]
pub struct RoutePlanner {
    options: GraphOptions,
    max_hops: usize,
    cache: GraphCache,
}

impl Default for RoutePlanner {
    fn default() -> Self {
        Self::new(GraphOptions::default(), DEFAULT_MAX_HOPS)
    }
}

impl RoutePlanner {
    pub fn new(options: GraphOptions, max_hops: usize) -> Self {
        Self {
            options,
            max_hops,
            cache: GraphCache::default(),
        }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Plan a primary route and up to `k - 1` alternatives, ascending by
    /// true distance.
    ///
    /// Deterministic for unchanged inputs; re-invoking with the same
    /// catalog and hazard snapshot reuses the memoized graphs.
    pub fn plan(
        &self,
        catalog: &AirportCatalog,
        hazards: &HazardIndex,
        source: usize,
        dest: usize,
        k: usize,
    ) -> Result<Vec<FlightPath>, PlanError> {
        if catalog.len() < 2 {
            return Err(PlanError::InsufficientData {
                count: catalog.len(),
            });
        }
        if source >= catalog.len() || dest >= catalog.len() {
            return Err(PlanError::InvalidSelection {
                reason: format!(
                    "airport index out of range (have {} airports)",
                    catalog.len()
                ),
            });
        }
        if source == dest {
            return Err(PlanError::InvalidSelection {
                reason: "source and destination are the same airport".to_string(),
            });
        }

        let routes = generate_routes(
            catalog,
            hazards,
            source,
            dest,
            k.max(1),
            &self.options,
            self.max_hops,
            &self.cache,
        );

        if routes.is_empty() {
            return Err(PlanError::NoPath {
                src: catalog.airports()[source].name.clone(),
                dest: catalog.airports()[dest].name.clone(),
            });
        }

        tracing::info!(
            routes = routes.len(),
            source = %catalog.airports()[source].name,
            dest = %catalog.airports()[dest].name,
            "route planning complete"
        );
        Ok(routes)
    }
}
