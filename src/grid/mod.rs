//! Grid assignment engine.
//!
//! Converts continuous layout positions into unique integer cells on a
//! bounded board, using one of three interchangeable strategies:
//!
//! - [`assign_nearest`]: round to the nearest cell; a vertex snaps only if
//!   it is the sole claimant of its cell. Deterministic, no search, may
//!   leave vertices un-snapped (reported, never dropped).
//! - [`assign_matching`]: minimum-weight bipartite matching between
//!   vertices and candidate cells within a Manhattan radius. Guarantees a
//!   bijection at minimum total displacement or fails explicitly with the
//!   unmatched vertex set.
//! - [`assign_repair`]: nearest-cell placement repaired by a spiral search
//!   over Manhattan rings, honoring both occupancy and edge-collinearity
//!   legality. Order-dependent; the visitation order is an explicit input.
//!
//! All real-to-integer coercion goes through [`Board::round`], the single
//! named rounding step (round-half-up, clamped into the board).

mod matching;
mod nearest;
mod repair;
mod types;

pub use matching::{assign_matching, DEFAULT_MATCHING_RADIUS};
pub use nearest::assign_nearest;
pub use repair::{assign_repair, assign_repair_ordered};
pub use types::{Board, NearestOutcome, Occupancy, RepairOutcome};
