//! Annealer step and result types.

use crate::graph::{GridPositions, VertexId};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Temperature reached zero.
    Cooled,
    /// The iteration budget was exhausted (best-effort result, not an
    /// error).
    IterationBudget,
    /// The worst-crossing count reached the early-success threshold
    /// (at most one crossing on any edge — cheap stopping heuristic,
    /// not a global-optimality claim).
    EarlySuccess,
    /// The graph has no edges, so no worst edge exists.
    NoWorstEdge,
    /// The caller cancelled the run.
    Cancelled,
}

/// Outcome of one [`Annealer::step`](super::Annealer::step) call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// One Metropolis iteration was performed.
    Continued {
        /// Iterations completed so far.
        iteration: usize,
        /// Temperature after cooling.
        temperature: f64,
        /// Worst-crossing count of the accepted state.
        current_crossings: usize,
        /// Whether the proposed move was accepted.
        accepted: bool,
    },
    /// A terminal condition was hit; further calls return the same value.
    Finished(StopReason),
}

/// Final state of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealResult<V: VertexId> {
    /// The position map at termination.
    pub positions: GridPositions<V>,

    /// The best position map seen across all accepted states.
    pub best_positions: GridPositions<V>,

    /// Worst-crossing count of `positions`.
    pub final_crossings: usize,

    /// Worst-crossing count of `best_positions`. Never exceeds the value
    /// at iteration 0.
    pub best_crossings: usize,

    /// Iterations actually run.
    pub iterations: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Accepted moves, improvements included.
    pub accepted_moves: usize,

    /// Strictly improving moves.
    pub improving_moves: usize,

    /// Why the run stopped.
    pub stop_reason: StopReason,

    /// Best worst-crossing value sampled at regular intervals.
    pub crossing_history: Vec<usize>,
}
