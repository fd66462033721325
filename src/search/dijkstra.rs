use super::collections::{
    dijkstra_data::{DijkstraData, DijkstraDataVec, Path},
    vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
    vertex_expanded_data::{VertexExpandedData, VertexExpandedDataBitSet},
};
use crate::graphs::{Graph, Vertex};

/// Settles every vertex reachable from `source`.
///
/// All three collections are cleared first, so the same buffers can be reused
/// for independent searches. Edge weights must be non-negative.
pub fn dijkstra_single_source(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
) {
    search(graph, data, expanded, queue, source, None);
}

/// Like [`dijkstra_single_source`] but stops as soon as `target` is settled.
/// Vertices that were not settled may hold tentative distances.
pub fn dijkstra_single_pair(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
    target: Vertex,
) {
    search(graph, data, expanded, queue, source, Some(target));
}

fn search(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
    target: Option<Vertex>,
) {
    data.clear();
    expanded.clear();
    queue.clear();

    data.set_distance(source, 0.0);
    queue.insert(source, 0.0);

    while let Some(tail) = queue.pop() {
        if expanded.expand(tail) {
            continue;
        }
        if Some(tail) == target {
            break;
        }

        let distance_tail = data.get_distance(tail);

        for edge in graph.edges(tail) {
            let current_distance_head = data.get_distance(edge.head);
            let alternative_distance_head = distance_tail + edge.weight;
            if alternative_distance_head < current_distance_head {
                data.set_distance(edge.head, alternative_distance_head);
                data.set_predecessor(edge.head, tail);
                queue.insert(edge.head, alternative_distance_head);
            }
        }
    }
}

/// One-off search with freshly allocated collections.
pub fn dijkstra_one_to_one_wrapped(graph: &dyn Graph, source: Vertex, target: Vertex) -> Option<Path> {
    let mut data = DijkstraDataVec::new(graph.number_of_vertices());
    let mut expanded = VertexExpandedDataBitSet::new(graph.number_of_vertices());
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    dijkstra_single_pair(graph, &mut data, &mut expanded, &mut queue, source, target);

    data.get_path(target)
}

/// Distances from `source` to every vertex, `Distance::INFINITY` where
/// unreachable.
pub fn dijkstra_one_to_all_wrapped(graph: &dyn Graph, source: Vertex) -> DijkstraDataVec {
    let mut data = DijkstraDataVec::new(graph.number_of_vertices());
    let mut expanded = VertexExpandedDataBitSet::new(graph.number_of_vertices());
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    dijkstra_single_source(graph, &mut data, &mut expanded, &mut queue, source);

    data
}
