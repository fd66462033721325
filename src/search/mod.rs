use path::{ShortestPathRequest, ShortestPathResult};

use crate::error::QueryError;

pub mod collections;
pub mod dijkstra;
pub mod path;

/// Path finding over a graph that keeps its search state inside itself, so
/// every query needs exclusive access.
pub trait PathFindingWithInternalState {
    fn shortest_path(
        &mut self,
        request: &ShortestPathRequest,
    ) -> Result<ShortestPathResult, QueryError>;

    fn number_of_vertices(&self) -> u32;
}
