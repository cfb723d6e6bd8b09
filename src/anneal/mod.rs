//! Simulated-annealing crossing minimization.
//!
//! A single-solution trajectory optimizer over one mutable position map:
//! each iteration perturbs an endpoint of the current worst-crossing edge,
//! accepts or rejects the move by the Metropolis criterion, and cools the
//! temperature geometrically. The crossing engine is the energy function;
//! the board is the move generator's legality oracle.
//!
//! The optimizer is structured as a resumable step function
//! ([`Annealer::step`]) so callers can interleave their own cancellation
//! or progress logic; [`Annealer::run`] drives it to completion.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;
mod types;

pub use config::AnnealConfig;
pub use runner::Annealer;
pub use types::{AnnealResult, Step, StopReason};
