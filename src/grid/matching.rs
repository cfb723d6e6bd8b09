//! Strategy (b): minimum-weight bipartite matching.

use super::types::Board;
use crate::error::LayoutError;
use crate::geometry::{manhattan, GridPoint, Point};
use crate::graph::{Graph, GridPositions, Positions, VertexId};
use indexmap::IndexMap;

/// Default Manhattan radius for candidate cell generation.
pub const DEFAULT_MATCHING_RADIUS: i32 = 3;

/// Assigns every vertex a unique board cell at minimum total displacement.
///
/// Candidate cells for a vertex are the board cells within Manhattan
/// distance `radius` of its rounded position; the weight of a
/// (vertex, cell) pair is the Manhattan distance from the vertex's real
/// position to the cell. A minimum-weight matching over the bipartite
/// graph of vertices versus the candidate pool is computed with
/// successive shortest augmenting paths.
///
/// On success the result is a bijection: no two vertices share a cell.
///
/// # Errors
///
/// [`LayoutError::AssignmentInfeasible`] when some vertices cannot be
/// matched — more vertices request overlapping neighborhoods than those
/// neighborhoods contain cells. The error carries the unmatched vertices;
/// retrying with a larger radius may succeed. Nothing is silently
/// truncated.
pub fn assign_matching<V: VertexId>(
    graph: &Graph<V>,
    positions: &Positions<V>,
    board: Board,
    radius: i32,
) -> Result<GridPositions<V>, LayoutError<V>> {
    board.validate()?;
    if radius < 0 {
        return Err(LayoutError::InvalidConfig(format!(
            "matching radius must be non-negative, got {radius}"
        )));
    }

    let mut vertices: Vec<V> = Vec::with_capacity(graph.vertex_count());
    let mut real: Vec<Point> = Vec::with_capacity(graph.vertex_count());
    for v in graph.vertices() {
        let p = positions
            .get(&v)
            .copied()
            .ok_or(LayoutError::MissingPosition(v))?;
        vertices.push(v);
        real.push(p);
    }

    // Candidate pool: the union of every vertex's radius neighborhood,
    // with per-vertex (cell, weight) adjacency.
    let mut column_of: IndexMap<GridPoint, usize> = IndexMap::new();
    let mut cells: Vec<GridPoint> = Vec::new();
    let mut adjacency: Vec<Vec<(usize, f64)>> = Vec::with_capacity(vertices.len());
    for &p in &real {
        let center = board.round(p);
        let mut row = Vec::new();
        for dx in -radius..=radius {
            let rem = radius - dx.abs();
            for dy in -rem..=rem {
                let cell = center.offset(dx, dy);
                if !board.contains(cell) {
                    continue;
                }
                let column = *column_of.entry(cell).or_insert_with(|| {
                    cells.push(cell);
                    cells.len() - 1
                });
                row.push((column, manhattan(p, cell.into())));
            }
        }
        adjacency.push(row);
    }

    match min_weight_matching(&adjacency, cells.len()) {
        Ok(column_of_row) => Ok(vertices
            .iter()
            .zip(column_of_row)
            .map(|(&v, column)| (v, cells[column]))
            .collect()),
        Err(unmatched_rows) => Err(LayoutError::AssignmentInfeasible {
            radius,
            unmatched: unmatched_rows.into_iter().map(|r| vertices[r]).collect(),
        }),
    }
}

fn edge_cost(adjacency: &[Vec<(usize, f64)>], row: usize, column: usize) -> f64 {
    adjacency[row]
        .iter()
        .find(|&&(c, _)| c == column)
        .map_or(f64::INFINITY, |&(_, w)| w)
}

/// Minimum-weight bipartite matching by successive shortest augmenting
/// paths. Rows are augmented one at a time along the cheapest alternating
/// path to a free column, which keeps the partial matching extreme, so a
/// plain label-correcting relaxation suffices. Rows with no reachable free
/// column are collected and returned as the infeasible set.
fn min_weight_matching(
    adjacency: &[Vec<(usize, f64)>],
    num_columns: usize,
) -> Result<Vec<usize>, Vec<usize>> {
    const EPS: f64 = 1e-9;

    let num_rows = adjacency.len();
    let mut row_of_column: Vec<Option<usize>> = vec![None; num_columns];
    let mut column_of_row: Vec<Option<usize>> = vec![None; num_rows];
    let mut unmatched: Vec<usize> = Vec::new();

    for start in 0..num_rows {
        // Shortest alternating-path distances over columns.
        let mut dist = vec![f64::INFINITY; num_columns];
        let mut pred: Vec<Option<usize>> = vec![None; num_columns];
        for &(c, w) in &adjacency[start] {
            if w < dist[c] {
                dist[c] = w;
                pred[c] = None;
            }
        }

        loop {
            let mut relaxed = false;
            for c in 0..num_columns {
                if !dist[c].is_finite() {
                    continue;
                }
                let Some(r) = row_of_column[c] else { continue };
                let through = dist[c] - edge_cost(adjacency, r, c);
                for &(c2, w2) in &adjacency[r] {
                    if c2 == c {
                        continue;
                    }
                    let candidate = through + w2;
                    if candidate + EPS < dist[c2] {
                        dist[c2] = candidate;
                        pred[c2] = Some(c);
                        relaxed = true;
                    }
                }
            }
            if !relaxed {
                break;
            }
        }

        // Cheapest reachable free column.
        let mut end: Option<usize> = None;
        for c in 0..num_columns {
            if row_of_column[c].is_none() && dist[c].is_finite() {
                if end.is_none_or(|e| dist[c] < dist[e]) {
                    end = Some(c);
                }
            }
        }
        let Some(mut c) = end else {
            unmatched.push(start);
            continue;
        };

        // Augment: walk the predecessor chain, flipping assignments.
        loop {
            let previous = pred[c];
            let r = match previous {
                None => start,
                Some(pc) => match row_of_column[pc] {
                    Some(r) => r,
                    None => break, // unreachable by construction
                },
            };
            row_of_column[c] = Some(r);
            column_of_row[r] = Some(c);
            match previous {
                None => break,
                Some(pc) => c = pc,
            }
        }
    }

    if unmatched.is_empty() {
        Ok(column_of_row.into_iter().flatten().collect())
    } else {
        Err(unmatched)
    }
}
