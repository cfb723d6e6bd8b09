//! Strategy (c): legality repair with spiral search.

use super::types::{Board, Occupancy, RepairOutcome};
use crate::error::LayoutError;
use crate::geometry::{point_on_segment, GridPoint};
use crate::graph::{Graph, GridPositions, Positions, VertexId};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

/// Legality-repair assignment using the graph's vertex insertion order as
/// the visitation order. See [`assign_repair_ordered`] for the semantics
/// and for supplying an explicit order.
pub fn assign_repair<V: VertexId>(
    graph: &Graph<V>,
    positions: &Positions<V>,
    board: Board,
) -> Result<RepairOutcome<V>, LayoutError<V>> {
    let order: Vec<V> = graph.vertices().collect();
    assign_repair_ordered(graph, positions, board, &order)
}

/// Assigns every vertex a cell, repairing conflicts and collinearity
/// violations with a spiral search.
///
/// A vertex snaps directly to its rounded cell only if it is the sole
/// claimant of that cell, the cell is unoccupied, and the cell does not
/// lie exactly on any edge segment not incident to the vertex. Everyone
/// else is routed through the spiral search: Manhattan rings of increasing
/// distance (1 up to `max(width, height)`), first legal in-board cell
/// wins. If no ring yields a legal cell the vertex keeps its desired cell
/// and is recorded in [`RepairOutcome::fallbacks`] — an accepted,
/// surfaced failure mode.
///
/// Accepted cells are claimed immediately, so the outcome depends on
/// `order`; callers wanting reproducible results across runs must supply
/// the same order. Edge segments are taken over the working integer map:
/// already-assigned cells for placed vertices, rounded desired cells for
/// the rest.
///
/// # Errors
///
/// [`LayoutError::BoardDimensions`] for a negative board,
/// [`LayoutError::MissingPosition`] for an unpositioned vertex, and
/// [`LayoutError::InvalidConfig`] if `order` does not list every graph
/// vertex exactly once.
pub fn assign_repair_ordered<V: VertexId>(
    graph: &Graph<V>,
    positions: &Positions<V>,
    board: Board,
    order: &[V],
) -> Result<RepairOutcome<V>, LayoutError<V>> {
    board.validate()?;

    let distinct: IndexSet<V> = order.iter().copied().collect();
    if distinct.len() != order.len()
        || distinct.len() != graph.vertex_count()
        || order.iter().any(|&v| !graph.contains_vertex(v))
    {
        return Err(LayoutError::InvalidConfig(
            "visitation order must list every graph vertex exactly once".into(),
        ));
    }

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

    // Working map for the collinearity check: placed vertices at their
    // accepted cells, the rest at their rounded desired cells.
    let mut working = desired.clone();
    let mut occupancy = Occupancy::new();
    let mut assigned = GridPositions::with_capacity(graph.vertex_count());
    let mut fallbacks = Vec::new();

    for &v in order {
        let cell = desired[&v];
        let uncontested = claimants[&cell] == 1;
        let chosen = if uncontested && occupancy.is_free(cell) && clear_of_edges(graph, &working, v, cell)
        {
            cell
        } else if let Some(found) = find_nearest_legal(graph, &working, &occupancy, board, v, cell)
        {
            debug!(vertex = ?v, desired = ?cell, ?found, "repaired to nearest legal cell");
            found
        } else {
            warn!(vertex = ?v, desired = ?cell, "no legal cell in any ring, keeping desired cell");
            fallbacks.push(v);
            cell
        };
        occupancy.claim(chosen);
        working.insert(v, chosen);
        assigned.insert(v, chosen);
    }

    Ok(RepairOutcome {
        assigned,
        fallbacks,
    })
}

/// A cell is clear for `v` if it does not lie exactly on any edge segment
/// not incident to `v`.
fn clear_of_edges<V: VertexId>(
    graph: &Graph<V>,
    working: &GridPositions<V>,
    v: V,
    cell: GridPoint,
) -> bool {
    graph.edges().all(|edge| {
        if edge.is_incident(v) {
            return true;
        }
        let (a, b) = edge.endpoints();
        !point_on_segment(cell, working[&a], working[&b])
    })
}

/// Scans Manhattan rings of increasing distance around `desired` for the
/// first unoccupied, edge-clear, in-board cell. Ring offsets are
/// enumerated `dx = -d ..= d` with `dy = +(d - |dx|)` before `-(d - |dx|)`.
fn find_nearest_legal<V: VertexId>(
    graph: &Graph<V>,
    working: &GridPositions<V>,
    occupancy: &Occupancy,
    board: Board,
    v: V,
    desired: GridPoint,
) -> Option<GridPoint> {
    for d in 1..=board.max_extent() {
        for dx in -d..=d {
            let rem = d - dx.abs();
            let ring = if rem == 0 {
                [Some(desired.offset(dx, 0)), None]
            } else {
                [
                    Some(desired.offset(dx, rem)),
                    Some(desired.offset(dx, -rem)),
                ]
            };
            for cell in ring.into_iter().flatten() {
                if board.contains(cell)
                    && occupancy.is_free(cell)
                    && clear_of_edges(graph, working, v, cell)
                {
                    return Some(cell);
                }
            }
        }
    }
    None
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
    fn test_legal_map_is_unchanged() {
        let graph = Graph::from_edges([(0u32, 1), (1, 2)]);
        let pos = positions(&[(0, 0.0, 0.0), (1, 2.0, 1.0), (2, 4.0, 0.0)]);
        let board = Board::new(5, 5);

        let outcome = assign_repair(&graph, &pos, board).unwrap();
        assert!(outcome.is_legal());
        assert_eq!(outcome.assigned[&0], GridPoint::new(0, 0));
        assert_eq!(outcome.assigned[&1], GridPoint::new(2, 1));
        assert_eq!(outcome.assigned[&2], GridPoint::new(4, 0));
    }

    #[test]
    fn test_contested_cell_is_repaired() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_vertex(0);
        graph.add_vertex(1);
        let pos = positions(&[(0, 1.0, 1.0), (1, 1.2, 1.1)]);
        let board = Board::new(5, 5);

        let outcome = assign_repair(&graph, &pos, board).unwrap();
        assert!(outcome.is_legal());
        assert_ne!(outcome.assigned[&0], outcome.assigned[&1]);
        // Both land within one ring of the contested cell.
        for cell in outcome.assigned.values() {
            assert!(cell.manhattan(GridPoint::new(1, 1)) <= 1);
        }
    }

    #[test]
    fn test_vertex_on_foreign_edge_is_moved_off() {
        // Vertex 2 rounds onto the midpoint of edge (0, 1).
        let mut graph = Graph::from_edges([(0u32, 1)]);
        graph.add_vertex(2);
        let pos = positions(&[(0, 0.0, 0.0), (1, 4.0, 0.0), (2, 2.0, 0.0)]);
        let board = Board::new(5, 5);

        let outcome = assign_repair(&graph, &pos, board).unwrap();
        assert!(outcome.is_legal());
        let moved = outcome.assigned[&2];
        assert_ne!(moved, GridPoint::new(2, 0));
        assert!(!point_on_segment(
            moved,
            outcome.assigned[&0],
            outcome.assigned[&1]
        ));
        // The repair picked a ring-1 cell.
        assert_eq!(moved.manhattan(GridPoint::new(2, 0)), 1);
    }

    #[test]
    fn test_endpoints_may_sit_on_their_own_edge() {
        // Incident edges are skipped by the legality check.
        let graph = Graph::from_edges([(0u32, 1)]);
        let pos = positions(&[(0, 0.0, 0.0), (1, 3.0, 0.0)]);
        let board = Board::new(5, 5);

        let outcome = assign_repair(&graph, &pos, board).unwrap();
        assert!(outcome.is_legal());
        assert_eq!(outcome.assigned[&0], GridPoint::new(0, 0));
        assert_eq!(outcome.assigned[&1], GridPoint::new(3, 0));
    }

    #[test]
    fn test_fallback_when_no_cell_is_legal() {
        // A 0x0 board has a single cell; the second vertex has nowhere to
        // go and falls back to the desired cell.
        let mut graph: Graph<u32> = Graph::new();
        graph.add_vertex(0);
        graph.add_vertex(1);
        let pos = positions(&[(0, 0.0, 0.0), (1, 0.0, 0.0)]);
        let board = Board::new(0, 0);

        let outcome = assign_repair(&graph, &pos, board).unwrap();
        assert_eq!(outcome.fallbacks, vec![0, 1]);
        assert_eq!(outcome.assigned[&0], GridPoint::new(0, 0));
        assert_eq!(outcome.assigned[&1], GridPoint::new(0, 0));
    }

    #[test]
    fn test_visitation_order_decides_repair_cells() {
        // Both contend for (2, 2), so both spiral; whoever is visited
        // first takes the first ring cell.
        let mut graph: Graph<u32> = Graph::new();
        graph.add_vertex(0);
        graph.add_vertex(1);
        let pos = positions(&[(0, 2.0, 2.0), (1, 2.1, 2.0)]);
        let board = Board::new(5, 5);

        let forward = assign_repair_ordered(&graph, &pos, board, &[0, 1]).unwrap();
        let backward = assign_repair_ordered(&graph, &pos, board, &[1, 0]).unwrap();
        assert_eq!(forward.assigned[&0], backward.assigned[&1]);
        assert_eq!(forward.assigned[&1], backward.assigned[&0]);
        assert_ne!(forward.assigned[&0], forward.assigned[&1]);
    }

    #[test]
    fn test_incomplete_order_is_rejected() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_vertex(0);
        graph.add_vertex(1);
        let pos = positions(&[(0, 0.0, 0.0), (1, 1.0, 1.0)]);

        let err = assign_repair_ordered(&graph, &pos, Board::new(5, 5), &[0]).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfig(_)));
        let err = assign_repair_ordered(&graph, &pos, Board::new(5, 5), &[0, 0]).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidConfig(_)));
    }
}
