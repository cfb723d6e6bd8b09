//! Graph topology and position maps.
//!
//! Vertex identifiers are opaque to the crate: anything `Copy + Eq + Hash +
//! Ord + Debug` works. Vertex and edge sets are kept in insertion order
//! (`IndexSet`), which is the canonical order used for deterministic
//! tie-breaking and for grid-assignment visitation.

use crate::geometry::{GridPoint, Point};
use indexmap::{IndexMap, IndexSet};
use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for vertex identifiers. Blanket-implemented.
pub trait VertexId: Copy + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T: Copy + Eq + Hash + Ord + Debug + Send + Sync> VertexId for T {}

/// Continuous positions, one per vertex.
pub type Positions<V> = IndexMap<V, Point>;

/// Integer grid positions, one per vertex.
pub type GridPositions<V> = IndexMap<V, GridPoint>;

/// An undirected edge, stored with its endpoints in canonical (sorted)
/// order so that `Edge::new(a, b) == Edge::new(b, a)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge<V: VertexId> {
    a: V,
    b: V,
}

impl<V: VertexId> Edge<V> {
    /// Builds a canonical edge. Returns `None` for self-loops.
    pub fn new(a: V, b: V) -> Option<Self> {
        if a == b {
            None
        } else if a < b {
            Some(Edge { a, b })
        } else {
            Some(Edge { a: b, b: a })
        }
    }

    pub fn endpoints(&self) -> (V, V) {
        (self.a, self.b)
    }

    pub fn is_incident(&self, v: V) -> bool {
        self.a == v || self.b == v
    }

    pub fn shares_endpoint(&self, other: &Edge<V>) -> bool {
        other.is_incident(self.a) || other.is_incident(self.b)
    }
}

/// An undirected simple graph: no self-loops, no duplicate edges.
/// Topology is immutable for the duration of an optimization run.
#[derive(Clone, Debug)]
pub struct Graph<V: VertexId> {
    vertices: IndexSet<V>,
    edges: IndexSet<Edge<V>>,
}

impl<V: VertexId> Graph<V> {
    pub fn new() -> Self {
        Graph {
            vertices: IndexSet::new(),
            edges: IndexSet::new(),
        }
    }

    /// Builds a graph from an edge list; endpoints are added as vertices
    /// in order of first appearance.
    pub fn from_edges<I: IntoIterator<Item = (V, V)>>(edges: I) -> Self {
        let mut graph = Graph::new();
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    /// Returns `true` if the vertex was not already present.
    pub fn add_vertex(&mut self, v: V) -> bool {
        self.vertices.insert(v)
    }

    /// Adds an undirected edge, inserting missing endpoints. Returns
    /// `false` for self-loops and duplicate edges.
    pub fn add_edge(&mut self, a: V, b: V) -> bool {
        let Some(edge) = Edge::new(a, b) else {
            return false;
        };
        self.vertices.insert(a);
        self.vertices.insert(b);
        self.edges.insert(edge)
    }

    pub fn contains_vertex(&self, v: V) -> bool {
        self.vertices.contains(&v)
    }

    pub fn contains_edge(&self, a: V, b: V) -> bool {
        Edge::new(a, b).is_some_and(|e| self.edges.contains(&e))
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.vertices.iter().copied()
    }

    /// Edges in insertion order (the canonical topological order).
    pub fn edges(&self) -> impl Iterator<Item = Edge<V>> + '_ {
        self.edges.iter().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl<V: VertexId> Default for Graph<V> {
    fn default() -> Self {
        Graph::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_canonical_order() {
        let e1 = Edge::new(3, 1).unwrap();
        let e2 = Edge::new(1, 3).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(e1.endpoints(), (1, 3));
    }

    #[test]
    fn test_edge_rejects_self_loop() {
        assert!(Edge::<u32>::new(2, 2).is_none());
    }

    #[test]
    fn test_graph_deduplicates_edges() {
        let mut g = Graph::new();
        assert!(g.add_edge(1, 2));
        assert!(!g.add_edge(2, 1));
        assert!(!g.add_edge(1, 1));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn test_from_edges_preserves_insertion_order() {
        let g = Graph::from_edges([(5, 2), (2, 9), (9, 5)]);
        let vertices: Vec<_> = g.vertices().collect();
        assert_eq!(vertices, vec![5, 2, 9]);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_shares_endpoint() {
        let e1 = Edge::new(1, 2).unwrap();
        let e2 = Edge::new(2, 3).unwrap();
        let e3 = Edge::new(3, 4).unwrap();
        assert!(e1.shares_endpoint(&e2));
        assert!(!e1.shares_endpoint(&e3));
    }
}
