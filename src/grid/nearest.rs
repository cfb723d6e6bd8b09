//! Strategy (a): nearest cell with conflict rejection.

use super::types::{Board, NearestOutcome};
use crate::error::LayoutError;
use crate::geometry::GridPoint;
use crate::graph::{Graph, GridPositions, Positions, VertexId};
use indexmap::IndexMap;
use tracing::debug;

/// Rounds every vertex to its nearest cell; a vertex snaps only if it is
/// the sole claimant of that cell. All vertices sharing a cell are left
/// un-snapped and reported in `unresolved` (vertex insertion order). No
/// search for alternatives is performed.
///
/// Re-running on an already-integer, collision-free map returns the same
/// map unchanged.
///
/// # Errors
///
/// [`LayoutError::BoardDimensions`] for a negative board,
/// [`LayoutError::MissingPosition`] if a graph vertex has no position.
pub fn assign_nearest<V: VertexId>(
    graph: &Graph<V>,
    positions: &Positions<V>,
    board: Board,
) -> Result<NearestOutcome<V>, LayoutError<V>> {
    board.validate()?;

    let mut desired: GridPositions<V> = IndexMap::with_capacity(graph.vertex_count());
    let mut claimants: IndexMap<GridPoint, usize> = IndexMap::new();
    for v in graph.vertices() {
        let p = positions
            .get(&v)
            .copied()
            .ok_or(LayoutError::MissingPosition(v))?;
        let cell = board.round(p);
        desired.insert(v, cell);
        *claimants.entry(cell).or_insert(0) += 1;
    }

    let mut assigned = GridPositions::new();
    let mut unresolved = Vec::new();
    for (&v, &cell) in &desired {
        if claimants[&cell] == 1 {
            assigned.insert(v, cell);
        } else {
            debug!(vertex = ?v, ?cell, contenders = claimants[&cell], "cell contested, vertex left unsnapped");
            unresolved.push(v);
        }
    }

    Ok(NearestOutcome {
        assigned,
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn positions(entries: &[(u32, f64, f64)]) -> Positions<u32> {
        entries
            .iter()
            .map(|&(v, x, y)| (v, Point::new(x, y)))
            .collect()
    }

    #[test]
    fn test_distinct_cells_all_snap() {
        let graph = Graph::from_edges([(0u32, 1), (1, 2)]);
        let pos = positions(&[(0, 0.2, 0.1), (1, 2.6, 2.9), (2, 4.4, 0.6)]);
        let board = Board::new(5, 5);

        let outcome = assign_nearest(&graph, &pos, board).unwrap();
        assert!(outcome.is_total());
        assert_eq!(outcome.assigned[&0], GridPoint::new(0, 0));
        assert_eq!(outcome.assigned[&1], GridPoint::new(3, 3));
        assert_eq!(outcome.assigned[&2], GridPoint::new(4, 1));
    }

    #[test]
    fn test_contested_cell_leaves_both_unsnapped() {
        // Both round to (0, 0); neither may snap.
        let mut graph: Graph<u32> = Graph::new();
        graph.add_vertex(0);
        graph.add_vertex(1);
        let pos = positions(&[(0, 0.4, 0.4), (1, 0.49, 0.49)]);
        let board = Board::new(5, 5);

        let outcome = assign_nearest(&graph, &pos, board).unwrap();
        assert!(outcome.assigned.is_empty());
        assert_eq!(outcome.unresolved, vec![0, 1]);
    }

    #[test]
    fn test_idempotent_on_integer_positions() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_vertex(0);
        graph.add_vertex(1);
        let pos = positions(&[(0, 1.0, 2.0), (1, 3.0, 4.0)]);
        let board = Board::new(5, 5);

        let once = assign_nearest(&graph, &pos, board).unwrap();
        let again_input: Positions<u32> = once
            .assigned
            .iter()
            .map(|(&v, &c)| (v, Point::from(c)))
            .collect();
        let twice = assign_nearest(&graph, &again_input, board).unwrap();
        assert_eq!(once.assigned, twice.assigned);
        assert!(twice.is_total());
    }

    #[test]
    fn test_missing_position_is_fatal() {
        let graph = Graph::from_edges([(0u32, 1)]);
        let pos = positions(&[(0, 0.0, 0.0)]);
        let err = assign_nearest(&graph, &pos, Board::new(5, 5)).unwrap_err();
        assert_eq!(err, LayoutError::MissingPosition(1));
    }
}
