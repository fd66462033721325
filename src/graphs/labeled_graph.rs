use super::{
    node::{Node, NodeTable},
    vec_vec_graph::VecVecGraph,
    Graph, Vertex,
};
use crate::{
    error::QueryError,
    search::{
        collections::{
            dijkstra_data::{DijkstraData, Path},
            vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
            vertex_expanded_data::{VertexExpandedData, VertexExpandedDataBitSet},
        },
        dijkstra::{dijkstra_single_pair, dijkstra_single_source},
        path::{ShortestPathRequest, ShortestPathResult},
        PathFindingWithInternalState,
    },
};

/// A graph with named nodes that is searched in place.
///
/// Every node carries the distance and predecessor of the last search. The
/// priority queue and the expanded set are kept between searches and reused.
/// All of this state is reset at the start of every search, so repeated
/// queries are independent of each other.
pub struct LabeledGraph {
    nodes: NodeTable,
    graph: VecVecGraph,
    expanded: VertexExpandedDataBitSet,
    queue: VertexDistanceQueueBinaryHeap,
}

impl LabeledGraph {
    /// Every edge of `graph` must point to a vertex of `nodes`.
    pub fn new(nodes: NodeTable, graph: VecVecGraph) -> LabeledGraph {
        debug_assert!(graph.number_of_vertices() as usize <= nodes.len());
        let number_of_vertices = nodes.len() as u32;

        LabeledGraph {
            nodes,
            graph,
            expanded: VertexExpandedDataBitSet::new(number_of_vertices),
            queue: VertexDistanceQueueBinaryHeap::new(),
        }
    }

    pub fn out_graph(&self) -> &VecVecGraph {
        &self.graph
    }

    pub fn nodes(&self) -> &NodeTable {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.vertex(id).map(|vertex| self.nodes.node(vertex))
    }

    pub fn vertex(&self, id: &str) -> Result<Vertex, QueryError> {
        self.nodes
            .vertex(id)
            .ok_or_else(|| QueryError::UnknownNode(id.to_string()))
    }

    /// Restores every node to distance infinity and no predecessor.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.expanded.clear();
        self.queue.clear();
    }

    /// Computes distances and predecessors of all nodes reachable from
    /// `source`.
    pub fn dijkstra(&mut self, source: Vertex) {
        dijkstra_single_source(
            &self.graph,
            &mut self.nodes,
            &mut self.expanded,
            &mut self.queue,
            source,
        );
    }

    /// Searches from `source` until `target` is settled. Only the distance
    /// and predecessor chain of `target` are final afterwards.
    pub fn dijkstra_to(&mut self, source: Vertex, target: Vertex) {
        dijkstra_single_pair(
            &self.graph,
            &mut self.nodes,
            &mut self.expanded,
            &mut self.queue,
            source,
            target,
        );
    }

    /// Path to `target` according to the last search.
    pub fn get_path(&self, target: Vertex) -> Option<Path> {
        self.nodes.get_path(target)
    }

    /// Path to `target` according to the last search, as node ids.
    pub fn get_result(&self, target: Vertex) -> ShortestPathResult {
        match self.get_path(target) {
            Some(path) => ShortestPathResult {
                path: Some(
                    path.vertices
                        .iter()
                        .map(|&vertex| self.nodes.id(vertex).to_string())
                        .collect(),
                ),
                total_distance: Some(path.distance),
            },
            None => ShortestPathResult::unreachable(),
        }
    }
}

impl PathFindingWithInternalState for LabeledGraph {
    fn shortest_path(
        &mut self,
        request: &ShortestPathRequest,
    ) -> Result<ShortestPathResult, QueryError> {
        let source = self.vertex(&request.source)?;
        let target = self.vertex(&request.target)?;

        self.dijkstra_to(source, target);

        Ok(self.get_result(target))
    }

    fn number_of_vertices(&self) -> u32 {
        self.nodes.len() as u32
    }
}
