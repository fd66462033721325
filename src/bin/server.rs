use clap::Parser;
use shortest_path_solver::{
    config::{init_tracing, ServerConfig},
    server,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_tracing();
    let config = ServerConfig::parse();

    server::run(config).await
}
