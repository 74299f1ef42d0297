//! REST API routes.

use axum::{
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::{error, waypoints};
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/waypoints",
            get(waypoints::list_waypoints).post(waypoints::add_waypoint),
        )
        // Static segments win over `:id`, so "clear" and "export" are never ids.
        .route("/api/waypoints/clear", delete(waypoints::clear_waypoints))
        .route("/api/waypoints/export", get(waypoints::export_waypoints))
        .route(
            "/api/waypoints/:id",
            put(waypoints::update_waypoint).delete(waypoints::remove_waypoint),
        )
        .route("/api/map/metadata", get(waypoints::get_map_metadata))
        .route("/api/health", get(waypoints::health))
        .layer(CatchPanicLayer::custom(error::panic_response))
}
