use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use shortest_path_solver::{
    config::init_tracing,
    graphs::graph_factory::{GraphFactory, GraphLimits},
    search::{path::ShortestPathRequest, PathFindingWithInternalState},
};
use tracing::error;

/// Answer a single shortest path query against a JSON graph file and print
/// the result as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph in JSON format
    #[arg(short, long)]
    graph: PathBuf,

    /// Id of the start node
    #[arg(short, long)]
    source: String,

    /// Id of the end node
    #[arg(short, long)]
    target: String,

    /// Largest accepted number of nodes
    #[arg(long, default_value_t = GraphLimits::default().max_nodes)]
    max_nodes: usize,

    /// Largest accepted number of directed edges
    #[arg(long, default_value_t = GraphLimits::default().max_edges)]
    max_edges: usize,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let factory = GraphFactory::new(GraphLimits {
        max_nodes: args.max_nodes,
        max_edges: args.max_edges,
    });
    let mut graph = match factory.from_file(&args.graph) {
        Ok(graph) => graph,
        Err(err) => {
            error!(graph = %args.graph.display(), "{}", err);
            return ExitCode::FAILURE;
        }
    };

    let request = ShortestPathRequest::new(args.source, args.target);
    match graph.shortest_path(&request) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("{}", err);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
