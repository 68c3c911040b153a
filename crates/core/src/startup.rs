use std::{net::SocketAddr, path::Path, sync::Arc, time::Instant};

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode},
    middleware,
    middleware::Next,
    response::Response,
    routing::get,
    Json, Router,
};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info};

use crate::{
    api::create_gate_routes,
    app_state::AppState,
    credential::Credential,
    environment::load_env_from_project_path,
    gate::AuthGate,
    logger::setup_info_logger,
    shared::HttpError,
    yaml::{read, ReadYamlError, SetupConfig},
};

#[derive(Error, Debug)]
pub enum StartError {
    #[error("Failed to find the yaml file")]
    NoYamlFileFound,

    #[error("{0}")]
    ReadYamlError(#[from] ReadYamlError),

    #[error("Failed to start the API: {0}")]
    ApiStartupError(#[from] std::io::Error),
}

/// Health check endpoint
async fn health_check() -> Result<Json<String>, HttpError> {
    Ok(Json("healthy".to_string()))
}

/// Middleware that logs all HTTP requests and responses with timing
/// information.
async fn activity_logger(req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let duration = start.elapsed();

    if status.is_client_error() || status.is_server_error() {
        error!("{} {} responded with {} after {:?}", method, uri, status, duration);
    } else {
        info!("{} {} responded with {} after {:?}", method, uri, status, duration);
    }

    Ok(response)
}

async fn start_api(config: SetupConfig) -> Result<(), StartError> {
    let credential =
        Credential::new(config.auth.username.clone(), config.auth.password.clone());
    let app_state = Arc::new(AppState { gate: Arc::new(AuthGate::new(credential)) });

    let cors = CorsLayer::new()
        .allow_origin(
            if config.api.allowed_origins.as_ref().is_none_or(|origins| origins.is_empty()) {
                AllowOrigin::any()
            } else {
                AllowOrigin::list(
                    config
                        .api
                        .allowed_origins
                        .clone()
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|origin| HeaderValue::from_str(&origin).ok())
                        .collect::<Vec<HeaderValue>>(),
                )
            },
        )
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/gate", create_gate_routes())
        .layer(middleware::from_fn(activity_logger))
        .layer(cors)
        .with_state(app_state)
        .into_make_service_with_connect_info::<SocketAddr>();

    let address = format!(
        "{}:{}",
        config.api.host.clone().unwrap_or("localhost".to_string()),
        config.api.port
    );

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("{} is up on http://{}", config.name, address);
    axum::serve(listener, app).await?;

    Ok(())
}

pub async fn start(project_path: &Path) -> Result<(), StartError> {
    setup_info_logger();
    load_env_from_project_path(project_path);

    info!("Starting up the gate");

    let yaml_path = project_path.join("edgegate.yaml");
    if !yaml_path.exists() {
        error!("Could not find edgegate.yaml in {}", project_path.display());
        return Err(StartError::NoYamlFileFound);
    }

    let config = read(&yaml_path)?;

    start_api(config).await
}
