use std::sync::{Mutex, MutexGuard, PoisonError};

use clap::ValueEnum;
use tracing::{debug, info, warn};

use crate::{
    error::{QueryError, UploadError},
    graphs::{graph_factory::GraphFactory, labeled_graph::LabeledGraph},
    search::{
        path::{ShortestPathRequest, ShortestPathResult},
        PathFindingWithInternalState,
    },
};

/// What happens to the active graph when an upload is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum UploadFailurePolicy {
    /// Keep serving the previously installed graph.
    #[default]
    Preserve,
    /// Drop the previously installed graph.
    Clear,
}

/// Holds the single graph that queries run against.
///
/// One mutex guards both the graph and every search on it, since searches
/// write their state into the graph's nodes. Uploads and queries therefore
/// never overlap.
pub struct GraphSession {
    active: Mutex<Option<LabeledGraph>>,
    factory: GraphFactory,
    policy: UploadFailurePolicy,
}

impl Default for GraphSession {
    fn default() -> Self {
        GraphSession::new(GraphFactory::default(), UploadFailurePolicy::default())
    }
}

impl GraphSession {
    pub fn new(factory: GraphFactory, policy: UploadFailurePolicy) -> GraphSession {
        GraphSession {
            active: Mutex::new(None),
            factory,
            policy,
        }
    }

    // Poisoning is ignored, every search resets all node state first.
    fn lock(&self) -> MutexGuard<'_, Option<LabeledGraph>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the active graph, discarding the previous one.
    pub fn install(&self, graph: LabeledGraph) {
        let number_of_vertices = graph.number_of_vertices();
        *self.lock() = Some(graph);
        info!(vertices = number_of_vertices, "installed active graph");
    }

    pub fn clear(&self) {
        *self.lock() = None;
        info!("cleared active graph");
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    /// Builds a graph from an uploaded `.json` file and installs it.
    ///
    /// The graph is built before the lock is taken, so queries on the old
    /// graph are not blocked while a large upload is parsed. On failure the
    /// configured [`UploadFailurePolicy`] decides whether the old graph stays.
    pub fn upload(&self, filename: &str, content: &[u8]) -> Result<(), UploadError> {
        let result = if has_json_extension(filename) {
            self.factory.from_json_slice(content).map_err(UploadError::from)
        } else {
            Err(UploadError::InvalidFileType(filename.to_string()))
        };

        match result {
            Ok(graph) => {
                info!(filename, "accepted graph upload");
                self.install(graph);
                Ok(())
            }
            Err(error) => Err(self.reject(filename, error)),
        }
    }

    /// Records a rejected upload and applies the configured
    /// [`UploadFailurePolicy`]. Returns `error` for the caller to report.
    pub fn reject(&self, filename: &str, error: UploadError) -> UploadError {
        warn!(filename, %error, policy = ?self.policy, "rejected graph upload");
        if self.policy == UploadFailurePolicy::Clear {
            self.clear();
        }
        error
    }

    /// Answers a query against the active graph.
    pub fn shortest_path(
        &self,
        request: &ShortestPathRequest,
    ) -> Result<ShortestPathResult, QueryError> {
        let mut active = self.lock();
        let graph = active.as_mut().ok_or(QueryError::NoActiveGraph)?;

        let result = graph.shortest_path(request)?;
        debug!(
            source = %request.source,
            target = %request.target,
            distance = ?result.total_distance,
            "answered shortest path query"
        );

        Ok(result)
    }
}

pub fn has_json_extension(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".json")
}

#[cfg(test)]
mod tests {
    use super::{has_json_extension, GraphSession, UploadFailurePolicy};
    use crate::{
        error::{QueryError, UploadError},
        graphs::graph_factory::GraphFactory,
        search::path::ShortestPathRequest,
    };

    const TWO_NODES: &[u8] = br#"{"nodes": ["A", "B"], "edges": [{"from": "A", "to": "B", "weight": 4}]}"#;

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_json_extension("graph.json"));
        assert!(has_json_extension("GRAPH.JSON"));
        assert!(!has_json_extension("graph.json.txt"));
        assert!(!has_json_extension("json"));
        assert!(!has_json_extension(""));
    }

    #[test]
    fn query_before_upload_has_no_active_graph() {
        let session = GraphSession::default();
        assert!(!session.is_active());
        assert_eq!(
            session.shortest_path(&ShortestPathRequest::new("A", "B")),
            Err(QueryError::NoActiveGraph)
        );
    }

    #[test]
    fn preserve_policy_keeps_previous_graph() {
        let session = GraphSession::default();
        session.upload("graph.json", TWO_NODES).unwrap();

        let rejected = session.upload("graph.txt", TWO_NODES);
        assert!(matches!(rejected, Err(UploadError::InvalidFileType(_))));
        let rejected = session.upload("graph.json", b"{not json");
        assert!(matches!(rejected, Err(UploadError::Malformed(_))));

        let result = session
            .shortest_path(&ShortestPathRequest::new("A", "B"))
            .unwrap();
        assert_eq!(result.total_distance, Some(4.0));
    }

    #[test]
    fn clear_policy_drops_previous_graph() {
        let session = GraphSession::new(GraphFactory::default(), UploadFailurePolicy::Clear);
        session.upload("graph.json", TWO_NODES).unwrap();

        assert!(session.upload("graph.json", b"[]").is_err());

        assert!(!session.is_active());
        assert_eq!(
            session.shortest_path(&ShortestPathRequest::new("A", "B")),
            Err(QueryError::NoActiveGraph)
        );
    }

    #[test]
    fn reject_follows_policy() {
        let preserving = GraphSession::default();
        preserving.upload("graph.json", TWO_NODES).unwrap();
        let error = preserving.reject("big.json", UploadError::TooLarge { limit: 1 });
        assert!(matches!(error, UploadError::TooLarge { limit: 1 }));
        assert!(preserving.is_active());

        let clearing = GraphSession::new(GraphFactory::default(), UploadFailurePolicy::Clear);
        clearing.upload("graph.json", TWO_NODES).unwrap();
        clearing.reject("", UploadError::NoFile);
        assert!(!clearing.is_active());
    }
}
