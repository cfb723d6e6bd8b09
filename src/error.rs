//! Error types shared across the crate.

use crate::graph::VertexId;
use thiserror::Error;

/// Failures reported by the layout algorithms.
///
/// Geometry and crossing computations are total over well-formed input;
/// everything that can go wrong is either a precondition violation caught
/// before any work starts, or a typed assignment failure the caller can
/// react to (e.g. retry matching with a larger radius).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError<V: VertexId> {
    /// A vertex in the graph has no entry in the position map.
    #[error("vertex {0:?} has no position")]
    MissingPosition(V),

    /// Board dimensions must be non-negative.
    #[error("board dimensions must be non-negative, got {width}x{height}")]
    BoardDimensions { width: i32, height: i32 },

    /// An input position lies outside the board's admissible range.
    #[error("vertex {vertex:?} lies outside the board at ({x}, {y})")]
    OutsideBoard { vertex: V, x: i32, y: i32 },

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Minimum-weight matching could not place every vertex on a unique
    /// grid cell within the configured radius. Carries the vertices that
    /// could not be matched; retrying with a larger radius may succeed.
    #[error("no legal assignment within radius {radius}: {} vertices unmatched", unmatched.len())]
    AssignmentInfeasible { radius: i32, unmatched: Vec<V> },
}
