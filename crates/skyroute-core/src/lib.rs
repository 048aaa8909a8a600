pub mod alternatives;
pub mod cache;
pub mod error;
pub mod graph;
pub mod hazard;
pub mod models;
pub mod planner;
pub mod solver;
pub mod spatial;

pub use alternatives::generate_routes;
pub use cache::GraphCache;
pub use error::PlanError;
pub use graph::{edge_key, Edge, GraphOptions, RouteGraph, UsedEdgeSet};
pub use hazard::{HazardCrossing, HazardIndex};
pub use models::{Airport, AirportCatalog, FlightPath, HazardZone};
pub use planner::RoutePlanner;
pub use solver::{shortest_path, DEFAULT_MAX_HOPS};
pub use spatial::haversine_distance_km;
