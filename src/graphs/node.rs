use ahash::{HashMap, HashMapExt};

use super::{Distance, Vertex};
use crate::search::collections::dijkstra_data::DijkstraData;

/// A named vertex together with the state of the last shortest-path run.
///
/// `predecessor` is a vertex index into the same [`NodeTable`], never a
/// reference to another node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub distance: Distance,
    pub predecessor: Option<Vertex>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Node {
        Node {
            id: id.into(),
            distance: Distance::INFINITY,
            predecessor: None,
        }
    }

    pub fn reset(&mut self) {
        self.distance = Distance::INFINITY;
        self.predecessor = None;
    }
}

/// Nodes of a graph, addressable by vertex index and by id.
#[derive(Clone, Debug, Default)]
pub struct NodeTable {
    nodes: Vec<Node>,
    index: HashMap<String, Vertex>,
}

impl NodeTable {
    pub fn with_capacity(capacity: usize) -> NodeTable {
        NodeTable {
            nodes: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Appends a node and returns its vertex, or `None` if the id is already
    /// taken.
    pub fn push(&mut self, id: &str) -> Option<Vertex> {
        if self.index.contains_key(id) {
            return None;
        }

        let vertex = self.nodes.len() as Vertex;
        self.index.insert(id.to_string(), vertex);
        self.nodes.push(Node::new(id));
        Some(vertex)
    }

    pub fn vertex(&self, id: &str) -> Option<Vertex> {
        self.index.get(id).copied()
    }

    pub fn node(&self, vertex: Vertex) -> &Node {
        &self.nodes[vertex as usize]
    }

    pub fn id(&self, vertex: Vertex) -> &str {
        &self.nodes[vertex as usize].id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }
}

impl DijkstraData for NodeTable {
    fn clear(&mut self) {
        self.nodes.iter_mut().for_each(Node::reset);
    }

    fn get_predecessor(&self, vertex: Vertex) -> Option<Vertex> {
        self.nodes[vertex as usize].predecessor
    }

    fn set_predecessor(&mut self, vertex: Vertex, predecessor: Vertex) {
        self.nodes[vertex as usize].predecessor = Some(predecessor);
    }

    fn get_distance(&self, vertex: Vertex) -> Distance {
        self.nodes[vertex as usize].distance
    }

    fn set_distance(&mut self, vertex: Vertex, distance: Distance) {
        self.nodes[vertex as usize].distance = distance;
    }
}
