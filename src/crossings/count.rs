//! Pairwise crossing counting.

use super::report::CrossingReport;
use crate::error::LayoutError;
use crate::geometry::{segments_intersect, Point};
use crate::graph::{Edge, Graph, VertexId};
use indexmap::IndexMap;

/// Computes the crossing count for every edge of `graph` under `positions`.
///
/// Accepts either continuous or grid positions (anything convertible to
/// [`Point`]). Every unordered pair of edges that do not share an endpoint
/// is tested once; a hit increments both edges' counters.
///
/// # Errors
///
/// [`LayoutError::MissingPosition`] if an edge endpoint has no position.
pub fn compute_crossings<V, P>(
    graph: &Graph<V>,
    positions: &IndexMap<V, P>,
) -> Result<CrossingReport<V>, LayoutError<V>>
where
    V: VertexId,
    P: Copy + Into<Point>,
{
    let mut segments: Vec<(Edge<V>, Point, Point)> = Vec::with_capacity(graph.edge_count());
    for edge in graph.edges() {
        let (a, b) = edge.endpoints();
        let pa = positions
            .get(&a)
            .copied()
            .ok_or(LayoutError::MissingPosition(a))?
            .into();
        let pb = positions
            .get(&b)
            .copied()
            .ok_or(LayoutError::MissingPosition(b))?
            .into();
        segments.push((edge, pa, pb));
    }

    let counts = pair_counts(&segments);
    let table = segments
        .iter()
        .zip(counts)
        .map(|(&(edge, _, _), count)| (edge, count))
        .collect();
    Ok(CrossingReport::new(table))
}

fn hit<V: VertexId>(a: &(Edge<V>, Point, Point), b: &(Edge<V>, Point, Point)) -> bool {
    !a.0.shares_endpoint(&b.0) && segments_intersect(a.1, a.2, b.1, b.2)
}

#[cfg(not(feature = "parallel"))]
fn pair_counts<V: VertexId>(segments: &[(Edge<V>, Point, Point)]) -> Vec<usize> {
    let mut counts = vec![0usize; segments.len()];
    for i in 0..segments.len() {
        for j in i + 1..segments.len() {
            if hit(&segments[i], &segments[j]) {
                counts[i] += 1;
                counts[j] += 1;
            }
        }
    }
    counts
}

/// Each worker counts the pairs whose first index it owns into a private
/// vector; partials are merged by element-wise addition.
#[cfg(feature = "parallel")]
fn pair_counts<V: VertexId>(segments: &[(Edge<V>, Point, Point)]) -> Vec<usize> {
    use rayon::prelude::*;

    let n = segments.len();
    (0..n)
        .into_par_iter()
        .map(|i| {
            let mut partial = vec![0usize; n];
            for j in i + 1..n {
                if hit(&segments[i], &segments[j]) {
                    partial[i] += 1;
                    partial[j] += 1;
                }
            }
            partial
        })
        .reduce(
            || vec![0usize; n],
            |mut acc, partial| {
                for (a, p) in acc.iter_mut().zip(partial) {
                    *a += p;
                }
                acc
            },
        )
}
