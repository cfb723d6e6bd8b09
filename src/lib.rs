//! Graph layout refinement on a bounded integer grid.
//!
//! Places graph vertices onto integer cells of a `[0, width] x [0, height]`
//! board so that the straight-line drawing has as few edge crossings as
//! possible, subject to grid-occupancy and edge-collinearity constraints.
//! Three tightly-coupled pieces form the refinement core:
//!
//! - **Crossing engine** ([`compute_crossings`]): exact pairwise
//!   segment-crossing counts per edge and the worst-offending edge.
//! - **Grid assignment** ([`assign_nearest`], [`assign_matching`],
//!   [`assign_repair`]): continuous positions to unique, legal integer
//!   cells, under three interchangeable strategies.
//! - **Annealing optimizer** ([`Annealer`]): a resumable Metropolis loop
//!   that perturbs endpoints of the worst-crossing edge and cools a
//!   temperature over time. The crossing engine is its energy function;
//!   the grid is its move space.
//!
//! Initial position estimates (spring, Kamada-Kawai, ...), rendering, and
//! persistence are out of scope: callers supply a topology, one position
//! per vertex, and board dimensions, and get back integer positions plus
//! crossing statistics.
//!
//! # Example
//!
//! ```
//! use crossgrid::{AnnealConfig, Annealer, Board, Graph, GridPoint, GridPositions};
//!
//! let graph = Graph::from_edges([(0u32, 1), (2, 3)]);
//! let positions: GridPositions<u32> = [
//!     (0, GridPoint::new(0, 0)),
//!     (1, GridPoint::new(4, 4)),
//!     (2, GridPoint::new(0, 4)),
//!     (3, GridPoint::new(4, 0)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let config = AnnealConfig::default().with_seed(42);
//! let result = Annealer::new(&graph, positions, Board::new(5, 5), config)
//!     .unwrap()
//!     .run();
//! assert!(result.best_crossings <= 1);
//! ```

pub mod anneal;
pub mod crossings;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod grid;

pub use anneal::{AnnealConfig, AnnealResult, Annealer, Step, StopReason};
pub use crossings::{compute_crossings, CrossingReport};
pub use error::LayoutError;
pub use geometry::{manhattan, point_on_segment, segments_intersect, GridPoint, Point};
pub use graph::{Edge, Graph, GridPositions, Positions, VertexId};
pub use grid::{
    assign_matching, assign_nearest, assign_repair, assign_repair_ordered, Board, NearestOutcome,
    Occupancy, RepairOutcome, DEFAULT_MATCHING_RADIUS,
};
