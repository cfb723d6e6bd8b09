//! Per-edge crossing counts and the worst edge.

use crate::graph::{Edge, VertexId};
use indexmap::IndexMap;

/// Crossing counts for every edge of a graph, plus the edge with the most
/// crossings. Derived from a graph and a position map; never persisted
/// independently of them.
#[derive(Clone, Debug)]
pub struct CrossingReport<V: VertexId> {
    counts: IndexMap<Edge<V>, usize>,
    worst: Option<(Edge<V>, usize)>,
}

impl<V: VertexId> CrossingReport<V> {
    /// Ties on the maximum count are broken in favor of the first edge in
    /// graph insertion order, so optimization runs are reproducible.
    pub(crate) fn new(counts: IndexMap<Edge<V>, usize>) -> Self {
        let mut worst: Option<(Edge<V>, usize)> = None;
        for (edge, &count) in &counts {
            match worst {
                Some((_, best)) if count <= best => {}
                _ => worst = Some((*edge, count)),
            }
        }
        CrossingReport { counts, worst }
    }

    /// The crossing count for an edge; zero for edges not in the graph.
    pub fn count(&self, edge: Edge<V>) -> usize {
        self.counts.get(&edge).copied().unwrap_or(0)
    }

    /// All counts, keyed by edge in graph insertion order.
    pub fn counts(&self) -> &IndexMap<Edge<V>, usize> {
        &self.counts
    }

    /// The edge with the most crossings and its count. `None` when the
    /// graph has no edges.
    pub fn worst(&self) -> Option<(Edge<V>, usize)> {
        self.worst
    }

    pub fn worst_edge(&self) -> Option<Edge<V>> {
        self.worst.map(|(edge, _)| edge)
    }

    /// The maximum per-edge count; zero when the graph has no edges.
    pub fn max_crossings(&self) -> usize {
        self.worst.map_or(0, |(_, count)| count)
    }

    /// Total number of crossing pairs (each pair counted once).
    pub fn total_crossings(&self) -> usize {
        self.counts.values().sum::<usize>() / 2
    }
}
