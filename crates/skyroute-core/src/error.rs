//! Error taxonomy for route planning.

use thiserror::Error;

/// Failures surfaced by the planning facade.
///
/// The engine itself never throws for a missing route: the solver
/// returns `None` and the generator an empty list. Only the facade
/// converts an empty generation into [`PlanError::NoPath`] so callers
/// have a single place to branch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanError {
    /// Routing needs at least two airports.
    #[error("at least 2 airports are required, got {count}")]
    InsufficientData { count: usize },

    /// Source and destination must differ and be valid catalog indices.
    #[error("invalid airport selection: {reason}")]
    InvalidSelection { reason: String },

    /// No route exists within the hop bound, even after connectivity
    /// repair.
    #[error("no route found from {src} to {dest}")]
    NoPath { src: String, dest: String },
}
