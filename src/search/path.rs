use serde::{Deserialize, Serialize};

use crate::graphs::Distance;

/// Represents a request for finding a shortest path between two named nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    pub source: String,
    pub target: String,
}

impl ShortestPathRequest {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> ShortestPathRequest {
        ShortestPathRequest {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Answer to a [`ShortestPathRequest`].
///
/// An unreachable target is not an error: both fields are `None`, which is
/// distinct from the single-node path `[source]` with distance zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShortestPathResult {
    #[serde(rename = "shortest_path")]
    pub path: Option<Vec<String>>,
    pub total_distance: Option<Distance>,
}

impl ShortestPathResult {
    pub fn unreachable() -> ShortestPathResult {
        ShortestPathResult {
            path: None,
            total_distance: None,
        }
    }
}
