use std::{fs::File, io::BufReader, path::Path};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    edge::WeightedEdge, labeled_graph::LabeledGraph, node::NodeTable,
    vec_vec_graph::VecVecGraph, Distance,
};
use crate::error::GraphError;

pub const DEFAULT_MAX_NODES: usize = 100_000;
pub const DEFAULT_MAX_EDGES: usize = 1_000_000;

/// A node record, either a bare id or an object with an `id` field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeDescription {
    Id(String),
    Object { id: String },
}

impl NodeDescription {
    pub fn id(&self) -> &str {
        match self {
            NodeDescription::Id(id) => id,
            NodeDescription::Object { id } => id,
        }
    }
}

impl From<&str> for NodeDescription {
    fn from(id: &str) -> Self {
        NodeDescription::Id(id.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub from: String,
    pub to: String,
    pub weight: Distance,
}

impl EdgeDescription {
    pub fn new(from: &str, to: &str, weight: Distance) -> EdgeDescription {
        EdgeDescription {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        }
    }
}

/// The JSON document accepted by [`GraphFactory::from_json_slice`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    /// `false` adds every edge in both directions.
    #[serde(default = "default_directed")]
    pub directed: bool,
    pub nodes: Vec<NodeDescription>,
    pub edges: Vec<EdgeDescription>,
}

fn default_directed() -> bool {
    true
}

/// Upper bounds on the size of a graph, checked before anything is
/// allocated for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphLimits {
    pub max_nodes: usize,
    /// Counted after undirected edges were doubled.
    pub max_edges: usize,
}

impl Default for GraphLimits {
    fn default() -> Self {
        GraphLimits {
            max_nodes: DEFAULT_MAX_NODES,
            max_edges: DEFAULT_MAX_EDGES,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GraphFactory {
    limits: GraphLimits,
}

impl GraphFactory {
    pub fn new(limits: GraphLimits) -> GraphFactory {
        GraphFactory { limits }
    }

    pub fn from_file(&self, path: &Path) -> Result<LabeledGraph, GraphError> {
        let reader = BufReader::new(File::open(path)?);
        let description: GraphDescription = serde_json::from_reader(reader)?;
        self.from_description(&description)
    }

    pub fn from_json_slice(&self, bytes: &[u8]) -> Result<LabeledGraph, GraphError> {
        let description: GraphDescription = serde_json::from_slice(bytes)?;
        self.from_description(&description)
    }

    pub fn from_description(
        &self,
        description: &GraphDescription,
    ) -> Result<LabeledGraph, GraphError> {
        self.build(&description.nodes, &description.edges, description.directed)
    }

    /// Validates `nodes` and `edges` and builds a graph from them.
    ///
    /// Fails on empty or duplicate node ids, edges with unknown endpoints,
    /// negative or non-finite weights, a non-finite sum of all weights and
    /// graphs larger than the limits.
    pub fn build(
        &self,
        nodes: &[NodeDescription],
        edges: &[EdgeDescription],
        directed: bool,
    ) -> Result<LabeledGraph, GraphError> {
        if nodes.len() > self.limits.max_nodes {
            return Err(GraphError::TooManyNodes {
                count: nodes.len(),
                limit: self.limits.max_nodes,
            });
        }
        let number_of_edges = if directed {
            edges.len()
        } else {
            edges.len().saturating_mul(2)
        };
        if number_of_edges > self.limits.max_edges {
            return Err(GraphError::TooManyEdges {
                count: number_of_edges,
                limit: self.limits.max_edges,
            });
        }

        if nodes.iter().any(|node| node.id().is_empty()) {
            return Err(GraphError::EmptyNodeId);
        }
        if let Some(duplicate) = nodes.iter().map(NodeDescription::id).duplicates().next() {
            return Err(GraphError::DuplicateNode(duplicate.to_string()));
        }

        let mut node_table = NodeTable::with_capacity(nodes.len());
        for node in nodes {
            node_table.push(node.id());
        }

        // A finite total bounds every simple path, so no search can overflow
        // to infinity on a reachable vertex.
        let mut total_weight: Distance = 0.0;
        let mut graph = VecVecGraph::with_vertices(node_table.len() as u32);
        for edge in edges {
            let edge = resolve_edge(&node_table, edge)?;
            graph.add_edge(&edge);
            total_weight += edge.weight;
            if !directed {
                graph.add_edge(&edge.reversed());
                total_weight += edge.weight;
            }
        }
        if !total_weight.is_finite() {
            return Err(GraphError::TotalWeightOverflow);
        }

        debug!(
            nodes = node_table.len(),
            edges = number_of_edges,
            directed,
            "built graph"
        );

        Ok(LabeledGraph::new(node_table, graph))
    }
}

fn resolve_edge(nodes: &NodeTable, edge: &EdgeDescription) -> Result<WeightedEdge, GraphError> {
    let lookup = |id: &str| {
        nodes.vertex(id).ok_or_else(|| GraphError::UnknownNode {
            from: edge.from.clone(),
            to: edge.to.clone(),
            unknown: id.to_string(),
        })
    };
    let tail = lookup(&edge.from)?;
    let head = lookup(&edge.to)?;

    if !edge.weight.is_finite() || edge.weight < 0.0 {
        return Err(GraphError::InvalidWeight {
            from: edge.from.clone(),
            to: edge.to.clone(),
            weight: edge.weight,
        });
    }

    Ok(WeightedEdge::new(tail, head, edge.weight))
}

/// Builds a graph with the default limits.
pub fn build_graph(
    nodes: &[NodeDescription],
    edges: &[EdgeDescription],
) -> Result<LabeledGraph, GraphError> {
    GraphFactory::default().build(nodes, edges, true)
}

#[cfg(test)]
mod tests {
    use super::{GraphDescription, GraphFactory, GraphLimits, NodeDescription};
    use crate::{error::GraphError, graphs::Graph};

    #[test]
    fn parses_both_node_forms() {
        let json = br#"{
            "nodes": ["A", {"id": "B", "label": "ignored"}],
            "edges": [{"from": "A", "to": "B", "weight": 2}]
        }"#;
        let description: GraphDescription = serde_json::from_slice(json).unwrap();

        assert!(description.directed);
        assert_eq!(
            description.nodes,
            vec![
                NodeDescription::Id("A".to_string()),
                NodeDescription::Object {
                    id: "B".to_string()
                }
            ]
        );
        assert_eq!(description.edges[0].weight, 2.0);
    }

    #[test]
    fn undirected_edges_are_doubled() {
        let json = br#"{
            "directed": false,
            "nodes": ["A", "B"],
            "edges": [{"from": "A", "to": "B", "weight": 1.5}]
        }"#;
        let graph = GraphFactory::default().from_json_slice(json).unwrap();

        assert_eq!(graph.out_graph().number_of_edges(), 2);
        assert_eq!(graph.out_graph().get_path_distance(&[1, 0]), Some(1.5));
    }

    #[test]
    fn missing_edge_list_is_malformed() {
        let json = br#"{"nodes": ["A"]}"#;
        let result = GraphFactory::default().from_json_slice(json);
        assert!(matches!(result, Err(GraphError::Json(_))));
    }

    #[test]
    fn missing_field_is_malformed() {
        let json = br#"{"nodes": ["A"], "edges": [{"from": "A", "weight": 1}]}"#;
        let result = GraphFactory::default().from_json_slice(json);
        assert!(matches!(result, Err(GraphError::Json(_))));
    }

    #[test]
    fn string_weight_is_malformed() {
        let json = br#"{"nodes": ["A"], "edges": [{"from": "A", "to": "A", "weight": "1"}]}"#;
        let result = GraphFactory::default().from_json_slice(json);
        assert!(matches!(result, Err(GraphError::Json(_))));
    }

    #[test]
    fn overflowing_total_weight_is_malformed() {
        let json = br#"{
            "nodes": ["A", "B", "C"],
            "edges": [
                {"from": "A", "to": "B", "weight": 1e308},
                {"from": "B", "to": "C", "weight": 1e308}
            ]
        }"#;
        let result = GraphFactory::default().from_json_slice(json);
        assert!(matches!(result, Err(GraphError::TotalWeightOverflow)));

        let undirected = br#"{
            "directed": false,
            "nodes": ["A", "B"],
            "edges": [{"from": "A", "to": "B", "weight": 1e308}]
        }"#;
        let result = GraphFactory::default().from_json_slice(undirected);
        assert!(matches!(result, Err(GraphError::TotalWeightOverflow)));
    }

    #[test]
    fn large_finite_weights_stay_reachable() {
        let json = br#"{
            "nodes": ["A", "B", "C"],
            "edges": [
                {"from": "A", "to": "B", "weight": 8e307},
                {"from": "B", "to": "C", "weight": 8e307}
            ]
        }"#;
        let mut graph = GraphFactory::default().from_json_slice(json).unwrap();
        graph.dijkstra(0);

        let path = graph.get_path(2).unwrap();
        assert_eq!(path.vertices, vec![0, 1, 2]);
        assert_eq!(path.distance, 8e307 + 8e307);
    }

    #[test]
    fn limits_are_enforced() {
        let factory = GraphFactory::new(GraphLimits {
            max_nodes: 2,
            max_edges: 1,
        });

        let too_many_nodes = br#"{"nodes": ["A", "B", "C"], "edges": []}"#;
        assert!(matches!(
            factory.from_json_slice(too_many_nodes),
            Err(GraphError::TooManyNodes { count: 3, limit: 2 })
        ));

        let too_many_edges = br#"{
            "directed": false,
            "nodes": ["A", "B"],
            "edges": [{"from": "A", "to": "B", "weight": 1}]
        }"#;
        assert!(matches!(
            factory.from_json_slice(too_many_edges),
            Err(GraphError::TooManyEdges { count: 2, limit: 1 })
        ));
    }
}
