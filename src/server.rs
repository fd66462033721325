//! HTTP endpoints of the solver.
//!
//! Every answer is a `200 OK` JSON body. Failures are reported in the body
//! under an `"Upload Error"` or `"Solver Error"` key.

use actix_multipart::Multipart;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    config::ServerConfig,
    error::{QueryError, UploadError},
    graphs::graph_factory::GraphFactory,
    search::path::ShortestPathRequest,
    session::GraphSession,
};

pub const WELCOME_MESSAGE: &str = "Welcome to the Shortest Path Solver!";
pub const NO_FILE: &str = "No file provided";
pub const FILE_TOO_LARGE: &str = "File too large";

#[derive(Serialize)]
struct Message {
    message: &'static str,
}

#[derive(Serialize)]
enum UploadResponse {
    #[serde(rename = "Upload Success")]
    Success(String),
    #[serde(rename = "Upload Error")]
    Error(&'static str),
}

#[derive(Serialize)]
struct SolverError {
    #[serde(rename = "Solver Error")]
    message: &'static str,
}

#[derive(Deserialize)]
struct SolveParams {
    start_node_id: String,
    end_node_id: String,
}

pub fn upload_error_message(error: &UploadError) -> &'static str {
    match error {
        UploadError::InvalidFileType(_) => "Invalid file type",
        UploadError::Malformed(_) => "Invalid JSON content",
        UploadError::NoFile => NO_FILE,
        UploadError::TooLarge { .. } => FILE_TOO_LARGE,
    }
}

pub fn query_error_message(error: &QueryError) -> &'static str {
    match error {
        QueryError::NoActiveGraph => "No active graph, please upload a graph first.",
        QueryError::UnknownNode(_) => "Invalid start or end node ID.",
    }
}

async fn root() -> HttpResponse {
    HttpResponse::Ok().json(Message {
        message: WELCOME_MESSAGE,
    })
}

// Only the first part that carries a filename is read, further parts are
// ignored.
async fn upload_graph_json(
    session: web::Data<GraphSession>,
    config: web::Data<ServerConfig>,
    mut payload: Multipart,
) -> actix_web::Result<HttpResponse> {
    while let Some(field) = payload.next().await {
        let mut field = field?;
        let filename = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_string);
        let Some(filename) = filename else {
            while let Some(chunk) = field.next().await {
                chunk?;
            }
            continue;
        };

        let mut content = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if content.len() + chunk.len() > config.max_upload_bytes {
                let error = session.reject(
                    &filename,
                    UploadError::TooLarge {
                        limit: config.max_upload_bytes,
                    },
                );
                return Ok(
                    HttpResponse::Ok().json(UploadResponse::Error(upload_error_message(&error)))
                );
            }
            content.extend_from_slice(&chunk);
        }

        let uploaded = filename.clone();
        let result = web::block(move || session.upload(&uploaded, &content)).await?;

        let response = match result {
            Ok(()) => UploadResponse::Success(filename),
            Err(error) => UploadResponse::Error(upload_error_message(&error)),
        };
        return Ok(HttpResponse::Ok().json(response));
    }

    let error = session.reject("", UploadError::NoFile);
    Ok(HttpResponse::Ok().json(UploadResponse::Error(upload_error_message(&error))))
}

async fn solve_shortest_path(
    session: web::Data<GraphSession>,
    params: web::Path<SolveParams>,
) -> actix_web::Result<HttpResponse> {
    let SolveParams {
        start_node_id,
        end_node_id,
    } = params.into_inner();
    let request = ShortestPathRequest::new(start_node_id, end_node_id);

    let result = web::block(move || session.shortest_path(&request)).await?;

    Ok(match result {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(error) => HttpResponse::Ok().json(SolverError {
            message: query_error_message(&error),
        }),
    })
}

/// Registers all routes. The caller provides `web::Data<GraphSession>` and
/// `web::Data<ServerConfig>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/upload_graph_json/", web::post().to(upload_graph_json))
        .route(
            "/solve_shortest_path/start_node_id={start_node_id}&end_node_id={end_node_id}",
            web::get().to(solve_shortest_path),
        );
}

pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let session = web::Data::new(GraphSession::new(
        GraphFactory::new(config.limits()),
        config.on_failed_upload,
    ));
    let address = (config.host.clone(), config.port);
    let config = web::Data::new(config);

    info!(
        host = %address.0,
        port = address.1,
        policy = ?config.on_failed_upload,
        "starting shortest path solver"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(session.clone())
            .app_data(config.clone())
            .configure(configure)
    })
    .bind(address)?
    .run()
    .await
}
