//! The annealing loop.

use super::config::AnnealConfig;
use super::types::{AnnealResult, Step, StopReason};
use crate::crossings::{compute_crossings, CrossingReport};
use crate::error::LayoutError;
use crate::geometry::GridPoint;
use crate::graph::{Graph, GridPositions, VertexId};
use crate::grid::Board;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

const HISTORY_INTERVAL: usize = 100;

/// Resumable simulated-annealing optimizer over one position map.
///
/// The graph topology is never mutated; each iteration rewrites the
/// position of at most one vertex. Construction validates every
/// precondition (config, board, position totality and containment), so
/// stepping cannot fail.
#[derive(Debug)]
pub struct Annealer<'g, V: VertexId> {
    graph: &'g Graph<V>,
    board: Board,
    config: AnnealConfig,
    positions: GridPositions<V>,
    best_positions: GridPositions<V>,
    current_crossings: usize,
    best_crossings: usize,
    temperature: f64,
    iteration: usize,
    accepted_moves: usize,
    improving_moves: usize,
    crossing_history: Vec<usize>,
    rng: StdRng,
    finished: Option<StopReason>,
}

impl<'g, V: VertexId> Annealer<'g, V> {
    /// Builds an annealer over already-on-grid positions.
    ///
    /// # Errors
    ///
    /// [`LayoutError::InvalidConfig`], [`LayoutError::BoardDimensions`],
    /// [`LayoutError::MissingPosition`] if any graph vertex lacks a
    /// position, or [`LayoutError::OutsideBoard`] if one lies outside the
    /// board.
    pub fn new(
        graph: &'g Graph<V>,
        positions: GridPositions<V>,
        board: Board,
        config: AnnealConfig,
    ) -> Result<Self, LayoutError<V>> {
        config.validate().map_err(LayoutError::InvalidConfig)?;
        board.validate()?;
        for v in graph.vertices() {
            match positions.get(&v) {
                None => return Err(LayoutError::MissingPosition(v)),
                Some(&p) if !board.contains(p) => {
                    return Err(LayoutError::OutsideBoard {
                        vertex: v,
                        x: p.x,
                        y: p.y,
                    })
                }
                Some(_) => {}
            }
        }

        let report = compute_crossings(graph, &positions)?;
        let current = report.max_crossings();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        Ok(Self {
            graph,
            board,
            temperature: config.initial_temperature,
            config,
            best_positions: positions.clone(),
            positions,
            current_crossings: current,
            best_crossings: current,
            iteration: 0,
            accepted_moves: 0,
            improving_moves: 0,
            crossing_history: vec![current],
            rng,
            finished: None,
        })
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Worst-crossing count of the current (accepted) state.
    pub fn current_crossings(&self) -> usize {
        self.current_crossings
    }

    pub fn positions(&self) -> &GridPositions<V> {
        &self.positions
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    fn report(&self) -> CrossingReport<V> {
        compute_crossings(self.graph, &self.positions)
            .expect("positions cover every vertex, validated at construction")
    }

    fn finish(&mut self, reason: StopReason) -> Step {
        self.finished = Some(reason);
        Step::Finished(reason)
    }

    /// Performs one Metropolis iteration, or reports the terminal
    /// condition. Once finished, further calls return the same value.
    pub fn step(&mut self) -> Step {
        if let Some(reason) = self.finished {
            return Step::Finished(reason);
        }
        if self.temperature <= 0.0 {
            return self.finish(StopReason::Cooled);
        }
        if self.iteration >= self.config.max_iterations {
            return self.finish(StopReason::IterationBudget);
        }
        if self.graph.edge_count() == 0 {
            return self.finish(StopReason::NoWorstEdge);
        }
        if self.current_crossings <= 1 {
            return self.finish(StopReason::EarlySuccess);
        }

        let report = self.report();
        let Some(worst_edge) = report.worst_edge() else {
            return self.finish(StopReason::NoWorstEdge);
        };

        // Move one endpoint of the worst edge, chosen uniformly.
        let (u, v) = worst_edge.endpoints();
        let node = if self.rng.random_range(0..2) == 0 { u } else { v };
        let original = self.positions[&node];
        let candidate = self.propose_move(node, original);
        self.positions.insert(node, candidate);

        let test_crossings = self.report().max_crossings();
        let accepted = if test_crossings < self.current_crossings {
            self.improving_moves += 1;
            true
        } else {
            // Metropolis: worsening (or equal) moves pass with
            // probability exp(-delta / T).
            let delta = test_crossings as f64 - self.current_crossings as f64;
            self.rng.random_range(0.0..1.0) < (-delta / self.temperature).exp()
        };

        if accepted {
            self.current_crossings = test_crossings;
            self.accepted_moves += 1;
            if test_crossings < self.best_crossings {
                self.best_crossings = test_crossings;
                self.best_positions = self.positions.clone();
            }
        } else {
            self.positions.insert(node, original);
        }

        self.temperature *= self.config.cooling_rate;
        self.iteration += 1;
        if self.iteration % HISTORY_INTERVAL == 0 {
            self.crossing_history.push(self.best_crossings);
        }
        trace!(
            iteration = self.iteration,
            temperature = self.temperature,
            current_crossings = self.current_crossings,
            accepted,
            "anneal step"
        );

        Step::Continued {
            iteration: self.iteration,
            temperature: self.temperature,
            current_crossings: self.current_crossings,
            accepted,
        }
    }

    /// Draws random offsets in `[-move_radius, move_radius]^2`, clamps
    /// into the board, and returns the first candidate keeping
    /// `min_separation` from every other vertex. Exhausting the attempt
    /// budget yields the current position (a no-op move, locally
    /// recovered).
    fn propose_move(&mut self, node: V, current: GridPoint) -> GridPoint {
        let radius = self.config.move_radius;
        for _ in 0..self.config.move_attempts {
            let dx = self.rng.random_range(-radius..=radius);
            let dy = self.rng.random_range(-radius..=radius);
            let candidate = self.board.clamp(current.offset(dx, dy));
            let clear = self
                .positions
                .iter()
                .filter(|&(&other, _)| other != node)
                .all(|(_, &p)| candidate.distance(p) > self.config.min_separation);
            if clear {
                return candidate;
            }
        }
        debug!(node = ?node, "no clear candidate within move budget, keeping position");
        current
    }

    /// Runs to completion.
    pub fn run(self) -> AnnealResult<V> {
        self.run_with_cancel(None)
    }

    /// Runs to completion, checking the cancellation flag each iteration.
    pub fn run_with_cancel(mut self, cancel: Option<Arc<AtomicBool>>) -> AnnealResult<V> {
        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    self.finished = Some(StopReason::Cancelled);
                }
            }
            if let Step::Finished(_) = self.step() {
                return self.into_result();
            }
        }
    }

    /// Surrenders the final state. For callers driving [`Annealer::step`]
    /// themselves; a run abandoned before any terminal condition reports
    /// [`StopReason::Cancelled`].
    pub fn into_result(mut self) -> AnnealResult<V> {
        let stop_reason = self.finished.unwrap_or(StopReason::Cancelled);
        if self.crossing_history.last() != Some(&self.best_crossings) {
            self.crossing_history.push(self.best_crossings);
        }
        AnnealResult {
            positions: self.positions,
            best_positions: self.best_positions,
            final_crossings: self.current_crossings,
            best_crossings: self.best_crossings,
            iterations: self.iteration,
            final_temperature: self.temperature,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            stop_reason,
            crossing_history: self.crossing_history,
        }
    }
}
