//! Waypoint, map metadata and health endpoints.
//!
//! Every response is an envelope: `{"success": true, ...}` on success or
//! `{"success": false, "error": "..."}` with a 4xx/5xx status.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::ApiError;
use crate::state::AppState;
use waypoint_core::{NavigationExport, NewWaypoint, WaypointId};

const REQUIRED_FIELDS: [&str; 3] = ["name", "x", "y"];

type ApiResult = Result<Json<Value>, ApiError>;

/// List all waypoints.
pub async fn list_waypoints(State(state): State<Arc<AppState>>) -> Json<Value> {
    let waypoints = state.store().list().await;
    Json(json!({
        "success": true,
        "count": waypoints.len(),
        "waypoints": waypoints,
    }))
}

/// Add a waypoint. The body must carry `name`, `x` and `y`.
pub async fn add_waypoint(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResult {
    let missing_fields = || ApiError::BadRequest("Missing required fields".to_string());
    // A non-object payload has no fields at all.
    let Value::Object(fields) = parse_payload(&body)? else {
        return Err(missing_fields());
    };
    if !REQUIRED_FIELDS.iter().all(|f| fields.contains_key(*f)) {
        return Err(missing_fields());
    }

    let new: NewWaypoint = serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::BadRequest(format!("Invalid waypoint: {e}")))?;
    let waypoint = state.store().add(new).await;
    tracing::info!("Added waypoint '{}' ({})", waypoint.name, waypoint.id);

    Ok(Json(json!({
        "success": true,
        "waypoint": waypoint,
        "message": "Waypoint added successfully",
    })))
}

/// Shallow-merge the body into an existing waypoint.
pub async fn update_waypoint(
    State(state): State<Arc<AppState>>,
    id: Result<Path<WaypointId>, PathRejection>,
    body: Bytes,
) -> ApiResult {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let Value::Object(patch) = parse_payload(&body)? else {
        return Err(ApiError::BadRequest("Expected a JSON object".to_string()));
    };

    let waypoint = state
        .store()
        .update(id, &patch)
        .await?
        .ok_or_else(|| ApiError::NotFound("Waypoint not found".to_string()))?;
    tracing::info!("Updated waypoint {}", id);

    Ok(Json(json!({
        "success": true,
        "waypoint": waypoint,
        "message": "Waypoint updated successfully",
    })))
}

/// Delete a waypoint. Unknown ids still succeed.
pub async fn remove_waypoint(
    State(state): State<Arc<AppState>>,
    id: Result<Path<WaypointId>, PathRejection>,
) -> ApiResult {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let removed = state.store().remove(id).await;
    tracing::info!("Removed waypoint {} ({} matched)", id, removed);

    Ok(Json(json!({
        "success": true,
        "message": "Waypoint removed successfully",
    })))
}

pub async fn clear_waypoints(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.store().clear().await;
    tracing::info!("Cleared all waypoints");

    Json(json!({
        "success": true,
        "message": "All waypoints cleared successfully",
    }))
}

/// Map sidecar as parsed at startup, or `null`.
pub async fn get_map_metadata(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "metadata": state.map_metadata(),
    }))
}

/// Waypoints as stamped poses in the `map` frame.
pub async fn export_waypoints(State(state): State<Arc<AppState>>) -> Json<Value> {
    let waypoints = state.store().list().await;
    let export = NavigationExport::from_waypoints(&waypoints, Utc::now());

    Json(json!({
        "success": true,
        "data": export,
    }))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "status": "healthy",
        "timestamp": Utc::now(),
        "waypoint_count": state.store().count().await,
    }))
}

/// Parse a request body into a non-empty JSON value.
///
/// An absent body, or a JSON value that is empty (`null`, `{}`, `""`, `0`,
/// `false`, `[]`), counts as "No data provided".
fn parse_payload(body: &Bytes) -> Result<Value, ApiError> {
    let no_data = || ApiError::BadRequest("No data provided".to_string());

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(no_data());
    }
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {e}")))?;

    if is_empty_value(&value) {
        return Err(no_data());
    }
    Ok(value)
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
