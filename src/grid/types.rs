//! Board, rounding, occupancy, and assignment outcomes.

use crate::error::LayoutError;
use crate::geometry::{GridPoint, Point};
use crate::graph::{GridPositions, VertexId};
use std::collections::HashSet;

/// The bounded integer grid: admissible cells are `[0, width] x [0, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pub width: i32,
    pub height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Board { width, height }
    }

    pub(crate) fn validate<V: VertexId>(&self) -> Result<(), LayoutError<V>> {
        if self.width < 0 || self.height < 0 {
            return Err(LayoutError::BoardDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn contains(&self, p: GridPoint) -> bool {
        (0..=self.width).contains(&p.x) && (0..=self.height).contains(&p.y)
    }

    pub fn clamp(&self, p: GridPoint) -> GridPoint {
        GridPoint {
            x: p.x.clamp(0, self.width),
            y: p.y.clamp(0, self.height),
        }
    }

    /// The single named rounding step at the board boundary: round-half-up
    /// per axis (`floor(v + 0.5)`), then clamp into the board.
    pub fn round(&self, p: Point) -> GridPoint {
        self.clamp(GridPoint {
            x: (p.x + 0.5).floor() as i32,
            y: (p.y + 0.5).floor() as i32,
        })
    }

    /// Largest board dimension, the spiral search's ring limit.
    pub fn max_extent(&self) -> i32 {
        self.width.max(self.height)
    }
}

/// Cells claimed during one assignment pass.
///
/// Always scoped to a single assignment call and passed by reference into
/// the legality checks, never shared process-wide.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    cells: HashSet<GridPoint>,
}

impl Occupancy {
    pub fn new() -> Self {
        Occupancy::default()
    }

    pub fn is_free(&self, cell: GridPoint) -> bool {
        !self.cells.contains(&cell)
    }

    /// Claims a cell; returns `false` if it was already taken.
    pub fn claim(&mut self, cell: GridPoint) -> bool {
        self.cells.insert(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Result of nearest-cell assignment. Vertices in `unresolved` lost a cell
/// contest and keep their original (continuous) positions; this is a
/// normal reported outcome, not an error.
#[derive(Clone, Debug)]
pub struct NearestOutcome<V: VertexId> {
    pub assigned: GridPositions<V>,
    pub unresolved: Vec<V>,
}

impl<V: VertexId> NearestOutcome<V> {
    /// Whether every vertex snapped.
    pub fn is_total(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Result of legality-repair assignment. Every vertex gets a cell;
/// vertices in `fallbacks` could not be given a legal one and kept their
/// desired (possibly illegal) cell — the documented failure mode.
#[derive(Clone, Debug)]
pub struct RepairOutcome<V: VertexId> {
    pub assigned: GridPositions<V>,
    pub fallbacks: Vec<V>,
}

impl<V: VertexId> RepairOutcome<V> {
    /// Whether every vertex landed on a legal cell.
    pub fn is_legal(&self) -> bool {
        self.fallbacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        let board = Board::new(10, 10);
        assert_eq!(board.round(Point::new(0.5, 0.49)), GridPoint::new(1, 0));
        assert_eq!(board.round(Point::new(2.4, 2.5)), GridPoint::new(2, 3));
        assert_eq!(board.round(Point::new(-0.4, -0.5)), GridPoint::new(0, 0));
    }

    #[test]
    fn test_round_clamps_into_board() {
        let board = Board::new(5, 5);
        assert_eq!(board.round(Point::new(7.3, -2.0)), GridPoint::new(5, 0));
    }

    #[test]
    fn test_contains() {
        let board = Board::new(3, 2);
        assert!(board.contains(GridPoint::new(0, 0)));
        assert!(board.contains(GridPoint::new(3, 2)));
        assert!(!board.contains(GridPoint::new(4, 2)));
        assert!(!board.contains(GridPoint::new(-1, 0)));
    }

    #[test]
    fn test_negative_board_is_rejected() {
        let err = Board::new(-1, 4).validate::<u32>().unwrap_err();
        assert_eq!(
            err,
            LayoutError::BoardDimensions {
                width: -1,
                height: 4
            }
        );
    }

    #[test]
    fn test_occupancy_claim() {
        let mut occ = Occupancy::new();
        let cell = GridPoint::new(1, 1);
        assert!(occ.is_free(cell));
        assert!(occ.claim(cell));
        assert!(!occ.claim(cell));
        assert!(!occ.is_free(cell));
        assert_eq!(occ.len(), 1);
    }
}
