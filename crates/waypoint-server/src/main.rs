//! Waypoint Manager server - REST backend for map waypoints

use anyhow::Result;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waypoint_server::{api, config::Config, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("waypoint_server=debug".parse()?))
        .init();

    tracing::info!("Starting Waypoint Manager server...");

    let config = Config::from_env();
    tracing::info!("Waypoints file: {}", config.waypoints_file.display());
    tracing::info!("Map metadata file: {}", config.map_metadata_file.display());

    let state = Arc::new(AppState::load(&config).await);
    tracing::info!("Loaded {} waypoints", state.store().count().await);

    // Build the app
    let app = api::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Run server
    let addr = config.socket_addr();
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
