use serde::{Deserialize, Serialize};

use super::{
    edge::{TaillessEdge, WeightedEdge},
    Graph, Vertex,
};

/// Adjacency list indexed by tail vertex. Parallel edges and self-loops are
/// kept, each tail's edges stay in insertion order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VecVecGraph {
    edges: Vec<Vec<TaillessEdge>>,
}

impl VecVecGraph {
    pub fn with_vertices(number_of_vertices: u32) -> VecVecGraph {
        VecVecGraph {
            edges: vec![Vec::new(); number_of_vertices as usize],
        }
    }

    pub fn from_edges(number_of_vertices: u32, edges: &[WeightedEdge]) -> VecVecGraph {
        let mut graph = VecVecGraph::with_vertices(number_of_vertices);
        edges.iter().for_each(|edge| graph.add_edge(edge));
        graph
    }

    pub fn add_edge(&mut self, edge: &WeightedEdge) {
        // Ensure the edge endpoints are within the bounds of self.edges.
        let max_edge_endpoint = std::cmp::max(edge.tail, edge.head) as usize;
        if max_edge_endpoint >= self.edges.len() {
            self.edges.resize(max_edge_endpoint + 1, Vec::new());
        }

        self.edges[edge.tail as usize].push(edge.remove_tail());
    }
}

impl Graph for VecVecGraph {
    fn number_of_vertices(&self) -> u32 {
        self.edges.len() as u32
    }

    fn edges(&self, tail: Vertex) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_> {
        // Define a struct for iterating over edges with the same tail. Struct is needed
        // as tail would otherwise not live enough.
        struct EdgeIterator<'a> {
            edge_iter: std::slice::Iter<'a, TaillessEdge>,
            tail: Vertex,
        }

        impl<'a> Iterator for EdgeIterator<'a> {
            type Item = WeightedEdge;

            // Returns the next edge in the iterator, setting the tail vertex.
            fn next(&mut self) -> Option<Self::Item> {
                self.edge_iter
                    .next()
                    .map(|tailless_edge| tailless_edge.set_tail(self.tail))
            }
        }

        impl<'a> ExactSizeIterator for EdgeIterator<'a> {
            fn len(&self) -> usize {
                self.edge_iter.len()
            }
        }

        let edges_sharing_tail = self
            .edges
            .get(tail as usize)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[]);

        Box::new(EdgeIterator {
            edge_iter: edges_sharing_tail.iter(),
            tail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::VecVecGraph;
    use crate::graphs::{edge::WeightedEdge, Graph};

    #[test]
    fn keeps_insertion_order_and_parallel_edges() {
        let graph = VecVecGraph::from_edges(
            3,
            &[
                WeightedEdge::new(0, 2, 5.0),
                WeightedEdge::new(0, 1, 1.0),
                WeightedEdge::new(0, 2, 4.0),
            ],
        );

        let heads: Vec<_> = graph.edges(0).map(|edge| edge.head).collect();
        assert_eq!(heads, vec![2, 1, 2]);
        assert_eq!(graph.edges(0).len(), 3);
        assert_eq!(graph.edges(2).len(), 0);
        assert_eq!(graph.number_of_edges(), 3);
    }

    #[test]
    fn path_distance_uses_lightest_parallel_edge() {
        let graph = VecVecGraph::from_edges(
            3,
            &[
                WeightedEdge::new(0, 1, 3.0),
                WeightedEdge::new(0, 1, 2.0),
                WeightedEdge::new(1, 2, 1.5),
            ],
        );

        assert_eq!(graph.get_path_distance(&[0, 1, 2]), Some(3.5));
        assert_eq!(graph.get_path_distance(&[0]), Some(0.0));
        assert_eq!(graph.get_path_distance(&[2, 0]), None);
    }
}
