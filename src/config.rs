//! Command line and environment configuration of the solver service.
//!
//! Every flag can also be set through the environment variable named next
//! to it, e.g. `SOLVER_PORT=9000`.

use clap::Parser;

use crate::{
    graphs::graph_factory::{GraphLimits, DEFAULT_MAX_EDGES, DEFAULT_MAX_NODES},
    session::UploadFailurePolicy,
};

pub const DEFAULT_LOG_FILTER: &str = "shortest_path_solver=info,actix_web=info";

/// Serve shortest path queries over HTTP against an uploaded JSON graph.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address to bind to
    #[arg(long, env = "SOLVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SOLVER_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Largest accepted upload in bytes
    #[arg(long, env = "SOLVER_MAX_UPLOAD_BYTES", default_value_t = 50 * 1024 * 1024)]
    pub max_upload_bytes: usize,

    /// Largest accepted number of nodes
    #[arg(long, env = "SOLVER_MAX_NODES", default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Largest accepted number of directed edges, undirected edges count twice
    #[arg(long, env = "SOLVER_MAX_EDGES", default_value_t = DEFAULT_MAX_EDGES)]
    pub max_edges: usize,

    /// Whether a rejected upload keeps or drops the active graph
    #[arg(long, env = "SOLVER_ON_FAILED_UPLOAD", value_enum, default_value_t = UploadFailurePolicy::Preserve)]
    pub on_failed_upload: UploadFailurePolicy,
}

impl ServerConfig {
    pub fn limits(&self) -> GraphLimits {
        GraphLimits {
            max_nodes: self.max_nodes,
            max_edges: self.max_edges,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_bytes: 50 * 1024 * 1024,
            max_nodes: DEFAULT_MAX_NODES,
            max_edges: DEFAULT_MAX_EDGES,
            on_failed_upload: UploadFailurePolicy::Preserve,
        }
    }
}

/// Installs the global `tracing` subscriber. `RUST_LOG` overrides
/// [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
