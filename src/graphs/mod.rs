use edge::WeightedEdge;

pub mod edge;
pub mod graph_factory;
pub mod labeled_graph;
pub mod node;
pub mod vec_vec_graph;

/// Dense index of a node inside a single graph.
pub type Vertex = u32;

/// Edge weights and path distances. `Distance::INFINITY` marks unreached
/// vertices.
pub type Distance = f64;

/// Read-only adjacency of a weighted graph.
pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    fn number_of_edges(&self) -> u32 {
        (0..self.number_of_vertices())
            .map(|vertex| self.edges(vertex).len() as u32)
            .sum::<u32>()
    }

    /// Outgoing edges of `tail`, in the order they were added.
    fn edges(&self, tail: Vertex) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_>;

    /// Sums the weights along `vertices`, taking the lightest edge between
    /// consecutive vertices. Returns `None` if two consecutive vertices are
    /// not connected.
    fn get_path_distance(&self, vertices: &[Vertex]) -> Option<Distance> {
        vertices
            .windows(2)
            .map(|pair| {
                self.edges(pair[0])
                    .filter(|edge| edge.head == pair[1])
                    .map(|edge| edge.weight)
                    .min_by(|a, b| a.total_cmp(b))
            })
            .sum()
    }
}
