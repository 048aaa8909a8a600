//! Memoized route-graph snapshots.
//!
//! Graph construction is O(n²) in airport count and independent of the
//! source and destination, so route queries over the same catalog and
//! hazard snapshot share one immutable build.

use crate::graph::{GraphOptions, RouteGraph};
use crate::hazard::HazardIndex;
use crate::models::AirportCatalog;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_MAX_ENTRIES: usize = 16;
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(600);

/// The inputs a base graph build is a pure function of.
///
/// Numeric options are fixed per planner, so the avoidance flag is the
/// only option dimension that varies between cached builds. Penalized
/// rebuilds for alternative routes change per iteration and are never
/// cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GraphKey {
    catalog_version: u64,
    hazard_version: u64,
    avoid_hazards: bool,
}

#[derive(Debug, Clone)]
struct CachedGraph {
    graph: Arc<RouteGraph>,
    built_at: Instant,
}

/// Concurrent store of immutable graph snapshots keyed by input versions.
#[derive(Debug)]
pub struct GraphCache {
    graphs: DashMap<GraphKey, CachedGraph>,
    max_entries: usize,
    max_age: Duration,
}

impl Default for GraphCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_MAX_AGE)
    }
}

impl GraphCache {
    pub fn new(max_entries: usize, max_age: Duration) -> Self {
        Self {
            graphs: DashMap::new(),
            max_entries,
            max_age,
        }
    }

    /// Return the shared graph for these inputs, building it on a miss.
    pub fn get_or_build(
        &self,
        catalog: &AirportCatalog,
        hazards: &HazardIndex,
        options: &GraphOptions,
    ) -> Arc<RouteGraph> {
        let key = GraphKey {
            catalog_version: catalog.version(),
            hazard_version: hazards.version(),
            avoid_hazards: options.avoid_hazards,
        };

        if let Some(entry) = self.graphs.get(&key) {
            return entry.graph.clone();
        }

        let graph = Arc::new(RouteGraph::build(catalog, hazards, options));
        self.graphs.insert(
            key,
            CachedGraph {
                graph: graph.clone(),
                built_at: Instant::now(),
            },
        );
        self.prune();
        graph
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    /// Drop entries past the age limit, then the oldest entries beyond
    /// the size cap.
    fn prune(&self) {
        let now = Instant::now();
        let mut entries: Vec<(GraphKey, Instant)> = self
            .graphs
            .iter()
            .map(|entry| (*entry.key(), entry.value().built_at))
            .collect();

        for (key, built_at) in &entries {
            if now.duration_since(*built_at) > self.max_age {
                self.graphs.remove(key);
            }
        }

        if self.graphs.len() <= self.max_entries {
            return;
        }

        entries.sort_by_key(|(_, built_at)| *built_at);
        for (key, _) in entries {
            if self.graphs.len() <= self.max_entries {
                break;
            }
            self.graphs.remove(&key);
        }
    }
}
