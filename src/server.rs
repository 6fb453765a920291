/// Server setup and initialization
///
/// Builds the workflow service (seeded or empty), wraps it in the shared app
/// state, and mounts the HTTP routes.

use crate::{
    api::{create_project_routes, create_user_routes, AppState},
    config::Config,
    project::{seed::demo_repository, WorkflowRepository},
    stage::StageCatalog,
    workflow::WorkflowService,
};
use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;

/// Build the workflow service described by the configuration
pub fn build_service(config: &Config) -> Result<WorkflowService> {
    let repository = if config.seed.demo_data {
        tracing::info!("Seeding demo users and projects");
        demo_repository()
            .map_err(|e| anyhow::anyhow!("Failed to seed demo data: {}", e))?
    } else {
        tracing::info!("Starting with an empty repository");
        WorkflowRepository::new(StageCatalog::standard())
    };
    Ok(WorkflowService::new(repository))
}

/// Create the router over an existing service
pub fn create_router(service: WorkflowService) -> Router {
    let state = AppState::new(service);
    Router::new()
        .route("/healthz", get(health_check))
        .merge(create_user_routes())
        .merge(create_project_routes())
        .with_state(state)
}

/// Create the main Axum application with all routes
pub fn create_app(config: &Config) -> Result<Router> {
    let service = build_service(config)?;
    let app = create_router(service);
    tracing::info!("Application initialized successfully");
    Ok(app)
}

/// Start the HTTP server with the given configuration
pub async fn start_server(config: Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting Lift4M server...");

    let app = create_app(&config)?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "ok"
}
