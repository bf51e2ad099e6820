//! Read-only graph access for the propagation engine.
//!
//! The engine never mutates a graph. It reads node count, directedness,
//! adjacency and edge weights through [`GraphAccessor`], then works on a
//! dense [`Neighborhoods`] snapshot for the rest of the run.
//!
//! Nodes are dense indices `0..node_count()`. That index order is also the
//! canonical node order used by the iteration history and by export.
//!
//! Parallel edges are not merged: each one is a separate neighbor entry and
//! adds to the degree, so a neighbor joined by two edges votes twice.

use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::EdgeType;

/// Numeric weight carried by an edge.
///
/// `None` means the edge has no weight attribute; the engine substitutes 1.
pub trait EdgeWeight {
    /// Weight of this edge, if it has one.
    fn weight(&self) -> Option<f64>;
}

impl EdgeWeight for () {
    fn weight(&self) -> Option<f64> {
        None
    }
}

impl EdgeWeight for f64 {
    fn weight(&self) -> Option<f64> {
        Some(*self)
    }
}

impl EdgeWeight for f32 {
    fn weight(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl EdgeWeight for u32 {
    fn weight(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl EdgeWeight for Option<f64> {
    fn weight(&self) -> Option<f64> {
        *self
    }
}

impl EdgeWeight for Option<f32> {
    fn weight(&self) -> Option<f64> {
        self.map(f64::from)
    }
}

/// Read-only view of a graph.
pub trait GraphAccessor {
    /// Number of nodes. Nodes are `0..node_count()`.
    fn node_count(&self) -> usize;

    /// Whether edges are directed.
    fn is_directed(&self) -> bool;

    /// Neighbors of `node`, one entry per incident edge. A neighbor joined by
    /// parallel edges appears once per edge.
    fn neighbors(&self, node: usize) -> Vec<usize>;

    /// Number of edges incident to `node`.
    fn degree(&self, node: usize) -> usize;

    /// Weight of the edge between `a` and `b`, `None` when absent or unweighted.
    fn edge_weight(&self, a: usize, b: usize) -> Option<f64>;

    /// Neighbors of `node` paired with the weight of the connecting edge
    /// (1.0 when the edge has no weight).
    fn weighted_neighbors(&self, node: usize) -> Vec<(usize, f64)> {
        self.neighbors(node)
            .into_iter()
            .map(|u| (u, self.edge_weight(node, u).unwrap_or(1.0)))
            .collect()
    }
}

impl<N, E, Ty, Ix> GraphAccessor for Graph<N, E, Ty, Ix>
where
    E: EdgeWeight,
    Ty: EdgeType,
    Ix: IndexType,
{
    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }

    fn is_directed(&self) -> bool {
        Graph::is_directed(self)
    }

    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.edges(NodeIndex::new(node))
            .map(|edge| edge.target().index())
            .collect()
    }

    fn degree(&self, node: usize) -> usize {
        self.edges(NodeIndex::new(node)).count()
    }

    fn edge_weight(&self, a: usize, b: usize) -> Option<f64> {
        self.find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .and_then(|e| EdgeWeight::weight(&self[e]))
    }

    fn weighted_neighbors(&self, node: usize) -> Vec<(usize, f64)> {
        self.edges(NodeIndex::new(node))
            .map(|edge| {
                let w = EdgeWeight::weight(edge.weight()).unwrap_or(1.0);
                (edge.target().index(), w)
            })
            .collect()
    }
}

/// Dense adjacency snapshot taken once per run.
#[derive(Debug, Clone)]
pub struct Neighborhoods {
    /// Adjacency: node -> [(neighbor, weight)]
    adj: Vec<Vec<(usize, f64)>>,
    /// Degree of each node as reported by the accessor.
    degrees: Vec<usize>,
}

impl Neighborhoods {
    /// Snapshot adjacency, weights and degrees of `graph`.
    pub fn from_accessor<G: GraphAccessor + ?Sized>(graph: &G) -> Self {
        let n = graph.node_count();
        let adj = (0..n).map(|v| graph.weighted_neighbors(v)).collect();
        let degrees = (0..n).map(|v| graph.degree(v)).collect();
        Self { adj, degrees }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adj.len()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Neighbors of `node` with edge weights.
    pub fn of(&self, node: usize) -> &[(usize, f64)] {
        &self.adj[node]
    }

    /// Degree of `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.degrees[node]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::{DiGraph, UnGraph};

    #[test]
    fn test_undirected_neighbors_are_symmetric() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        let _ = graph.add_edge(a, b, ());
        let _ = graph.add_edge(b, c, ());

        assert!(!GraphAccessor::is_directed(&graph));
        assert_eq!(GraphAccessor::neighbors(&graph, 0), vec![1]);
        let mut mid = GraphAccessor::neighbors(&graph, 1);
        mid.sort_unstable();
        assert_eq!(mid, vec![0, 2]);
        assert_eq!(GraphAccessor::degree(&graph, 1), 2);
        assert_eq!(GraphAccessor::neighbors(&graph, 2), vec![1]);
    }

    #[test]
    fn test_missing_weight_defaults_to_one() {
        let mut graph = UnGraph::<(), Option<f64>>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        let _ = graph.add_edge(a, b, Some(2.5));
        let _ = graph.add_edge(b, c, None);

        assert_eq!(GraphAccessor::edge_weight(&graph, 0, 1), Some(2.5));
        assert_eq!(GraphAccessor::edge_weight(&graph, 2, 1), None);
        assert_eq!(GraphAccessor::edge_weight(&graph, 0, 2), None);

        let hood = Neighborhoods::from_accessor(&graph);
        assert_eq!(hood.of(0), &[(1, 2.5)]);
        assert_eq!(hood.of(2), &[(1, 1.0)]);
    }

    #[test]
    fn test_directed_graph_reports_directed() {
        let mut graph = DiGraph::<(), f32>::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let _ = graph.add_edge(a, b, 1.0);
        assert!(GraphAccessor::is_directed(&graph));
    }

    #[test]
    fn test_parallel_edges_are_separate_entries() {
        let mut graph = UnGraph::<(), f64>::new_undirected();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let _ = graph.add_edge(a, b, 1.0);
        let _ = graph.add_edge(a, b, 3.0);

        let hood = Neighborhoods::from_accessor(&graph);
        let mut entries = hood.of(0).to_vec();
        entries.sort_by(|x, y| x.1.total_cmp(&y.1));
        assert_eq!(entries, vec![(1, 1.0), (1, 3.0)]);
        assert_eq!(hood.degree(0), 2);
        assert_eq!(hood.degree(1), 2);
    }

    #[test]
    fn test_isolated_node_has_empty_neighborhood() {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let _ = graph.add_node(());
        let hood = Neighborhoods::from_accessor(&graph);
        assert_eq!(hood.len(), 1);
        assert!(hood.of(0).is_empty());
        assert_eq!(hood.degree(0), 0);
    }
}
