//! API routes for the waypoint server.

pub mod error;
mod routes;
pub mod waypoints;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

pub use error::ApiError;

pub fn routes() -> Router<Arc<AppState>> {
    routes::create_router()
}
