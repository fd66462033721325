//! Error types for building graphs, uploading them and answering queries.

use thiserror::Error;

/// The graph description could not be turned into a graph. Nothing is
/// installed when this is returned.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Input is not JSON or does not have the expected shape.
    #[error("malformed graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unable to read graph: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed graph: empty node id")]
    EmptyNodeId,

    #[error("malformed graph: duplicate node id {0:?}")]
    DuplicateNode(String),

    /// An edge endpoint is not in the node list.
    #[error("malformed graph: edge {from:?} -> {to:?} references unknown node {unknown:?}")]
    UnknownNode {
        from: String,
        to: String,
        unknown: String,
    },

    /// Weights must be finite and non-negative.
    #[error("malformed graph: edge {from:?} -> {to:?} has invalid weight {weight}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// The sum of all edge weights does not fit into a finite distance.
    #[error("malformed graph: total edge weight is not finite")]
    TotalWeightOverflow,

    #[error("malformed graph: {count} nodes exceed the limit of {limit}")]
    TooManyNodes { count: usize, limit: usize },

    #[error("malformed graph: {count} edges exceed the limit of {limit}")]
    TooManyEdges { count: usize, limit: usize },
}

/// Why an uploaded file was not installed as the active graph.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("invalid file type: {0:?}")]
    InvalidFileType(String),

    #[error("no file in upload")]
    NoFile,

    #[error("upload exceeds the limit of {limit} bytes")]
    TooLarge { limit: usize },

    #[error(transparent)]
    Malformed(#[from] GraphError),
}

/// Query-time errors, reported to the caller as structured results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("no active graph")]
    NoActiveGraph,

    #[error("unknown node {0:?}")]
    UnknownNode(String),
}
