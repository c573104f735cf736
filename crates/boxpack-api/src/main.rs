use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use boxpack_core::{
    ErrorCategory, InstanceParams, PackError, Packer, PackingRequest, PackingResult,
    SelectionStrategy, TestInstance,
};
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Rectangle Bin Packer</title>
</head>
<body>
    <h1>Rectangle Bin Packer API</h1>
    <h2>API Endpoints:</h2>
    <ul>
        <li>GET /api/health - Health check</li>
        <li>POST /api/pack - Pack rectangles into boxes</li>
        <li>POST /api/instances - Generate a random packing request</li>
    </ul>
</body>
</html>"#;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Rectangle Bin Packer API");

    let addr = std::env::var("BOXPACK_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind to {}: {}", addr, err);
            std::process::exit(1);
        }
    };

    info!("API server listening on http://{}", addr);
    info!("Try: curl http://localhost:3000/api/health");

    if let Err(err) = axum::serve(listener, app()).await {
        error!("Server error: {}", err);
    }
}

fn app() -> Router {
    Router::new()
        .route("/", get(serve_ui))
        .route("/api/health", get(health_check))
        .route("/api/pack", post(pack))
        .route("/api/instances", post(generate_instance))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "boxpack-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Main packing endpoint
async fn pack(Json(request): Json<PackingRequest>) -> Result<Json<PackingResult>, AppError> {
    info!(
        "Received packing request with {} rectangle specs, box length {}",
        request.rectangles.len(),
        request.edge_length
    );

    // Packing is CPU bound and synchronous
    let result = tokio::task::spawn_blocking(move || Packer::new(request)?.pack())
        .await
        .map_err(anyhow::Error::from)??;

    info!(
        "Packing complete: {} boxes required, {:.2}% waste",
        result.summary.total_containers, result.summary.waste_percentage
    );

    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct InstanceRequest {
    #[serde(flatten)]
    params: InstanceParams,
    #[serde(default)]
    strategy: SelectionStrategy,
}

/// Generates a reproducible random instance and returns it as a packing request
async fn generate_instance(
    Json(request): Json<InstanceRequest>,
) -> Result<Json<PackingRequest>, AppError> {
    info!(
        "Generating instance {} with {} rectangles",
        request.params.instance_id, request.params.num_rectangles
    );

    let instance = TestInstance::generate(request.params)?;
    Ok(Json(instance.to_request(request.strategy)))
}

/// Application error type
#[derive(Debug)]
enum AppError {
    Pack(PackError),
    Internal(anyhow::Error),
}

impl From<PackError> for AppError {
    fn from(err: PackError) -> Self {
        AppError::Pack(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Pack(err) => match err.category() {
                ErrorCategory::Configuration
                | ErrorCategory::Validation
                | ErrorCategory::Infeasibility => StatusCode::BAD_REQUEST,
                ErrorCategory::InvariantViolation => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Pack(err) => err.to_string(),
            AppError::Internal(err) => err.to_string(),
        };
        error!("Request error: {}", message);

        (
            status,
            Json(json!({
                "error": message,
            })),
        )
            .into_response()
    }
}

async fn serve_ui() -> Html<&'static str> {
    Html(INDEX_HTML)
}
