//! Core data models for waypoint storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::timestamp;

/// Waypoint identifier: creation time in milliseconds since the Unix epoch.
pub type WaypointId = i64;

/// Format tag written into every persisted waypoint file.
pub const FILE_FORMAT: &str = "xavier-waypoint-manager-v1.0";

/// Keys owned by the store. Callers can never set them.
const STORE_OWNED_KEYS: [&str; 3] = ["id", "created", "updated"];

/// A named 2D navigation waypoint.
///
/// `name`, `x` and `y` are typed; any other caller-supplied field is kept in
/// `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub created: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub updated: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Waypoint {
    /// Shallow-merge `patch` over this waypoint and stamp `updated`.
    ///
    /// `id` and `created` in the patch are ignored. Fails without touching
    /// `self` if the merged record no longer has a valid `name`, `x` or `y`.
    pub fn merged_with(
        &self,
        patch: &Map<String, Value>,
        updated: DateTime<Utc>,
    ) -> Result<Waypoint, serde_json::Error> {
        let mut fields = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        for (key, value) in patch {
            if key == "id" || key == "created" {
                continue;
            }
            fields.insert(key.clone(), value.clone());
        }
        fields.insert("updated".to_string(), serde_json::to_value(updated)?);

        let mut merged: Waypoint = serde_json::from_value(Value::Object(fields))?;
        merged.id = self.id;
        merged.created = self.created;
        Ok(merged)
    }
}

/// Caller-supplied fields for a waypoint that does not exist yet.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWaypoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewWaypoint {
    /// Turn the request into a stored waypoint with store-assigned identity.
    pub fn into_waypoint(self, id: WaypointId, created: DateTime<Utc>) -> Waypoint {
        let mut extra = self.extra;
        for key in STORE_OWNED_KEYS {
            extra.remove(key);
        }

        Waypoint {
            id,
            name: self.name,
            x: self.x,
            y: self.y,
            created: Some(created),
            updated: None,
            extra,
        }
    }
}

/// On-disk layout of the waypoint file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointFile {
    #[serde(default)]
    pub waypoints: Vec<Waypoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FileMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub updated: DateTime<Utc>,
    pub count: usize,
    pub format: String,
}

impl WaypointFile {
    /// Wrap a collection with a freshly stamped metadata block.
    pub fn new(waypoints: Vec<Waypoint>, updated: DateTime<Utc>) -> Self {
        let count = waypoints.len();
        Self {
            waypoints,
            metadata: Some(FileMetadata {
                updated,
                count,
                format: FILE_FORMAT.to_string(),
            }),
        }
    }
}
