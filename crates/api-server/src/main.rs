use application::ProjectApp;
use config::Config;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod auth;
mod error;
mod routes;

use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env(None)?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .init();

    info!("Starting project API server");
    info!("Using database: {}", config.database_path);
    info!(
        owner_gated_enrichment = config.owner_gated_enrichment,
        "enrichment policy"
    );

    let project_app = Arc::new(ProjectApp::from_config(&config)?);
    let app = routes::router(AppState { project_app });

    // Run the server
    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API Server listening on http://{}", bind_address);
    info!("   GET    /projects/get-project/:project_id");
    info!("   POST   /projects/create/");
    info!("   PUT    /projects/update/:project_id");
    info!("   DELETE /projects/delete/:project_id");
    info!("   GET    /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
