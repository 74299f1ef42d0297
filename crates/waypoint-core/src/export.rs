//! Navigation export: waypoints reshaped as stamped poses in the map frame.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Waypoint, WaypointId};

pub const EXPORT_FORMAT: &str = "ros2_navigation_waypoints";
pub const MAP_FRAME_ID: &str = "map";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationExport {
    pub waypoints: Vec<PoseWaypoint>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub format: String,
    pub frame_id: String,
    pub exported: DateTime<Utc>,
    pub count: usize,
}

/// One waypoint as a stamped pose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseWaypoint {
    pub header: Header,
    pub pose: Pose,
    pub name: String,
    pub id: WaypointId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub frame_id: String,
    pub stamp: Stamp,
}

/// Always zero: the export is a static plan, not a timed message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub sec: i32,
    pub nanosec: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    pub orientation: Quaternion,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };
}

impl From<&Waypoint> for PoseWaypoint {
    fn from(waypoint: &Waypoint) -> Self {
        Self {
            header: Header {
                frame_id: MAP_FRAME_ID.to_string(),
                stamp: Stamp::default(),
            },
            pose: Pose {
                position: Point {
                    x: waypoint.x,
                    y: waypoint.y,
                    z: 0.0,
                },
                orientation: Quaternion::IDENTITY,
            },
            name: waypoint.name.clone(),
            id: waypoint.id,
        }
    }
}

impl NavigationExport {
    pub fn from_waypoints(waypoints: &[Waypoint], exported: DateTime<Utc>) -> Self {
        let waypoints: Vec<PoseWaypoint> = waypoints.iter().map(PoseWaypoint::from).collect();
        let count = waypoints.len();

        Self {
            waypoints,
            metadata: ExportMetadata {
                format: EXPORT_FORMAT.to_string(),
                frame_id: MAP_FRAME_ID.to_string(),
                exported,
                count,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn single_waypoint_becomes_identity_pose() {
        let waypoint = Waypoint {
            id: 1,
            name: "A".to_string(),
            x: 2.0,
            y: 3.0,
            created: None,
            updated: None,
            extra: Map::new(),
        };

        let export = NavigationExport::from_waypoints(&[waypoint], Utc::now());
        assert_eq!(export.metadata.count, 1);
        assert_eq!(export.metadata.format, EXPORT_FORMAT);

        let value = serde_json::to_value(&export.waypoints[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "header": { "frame_id": "map", "stamp": { "sec": 0, "nanosec": 0 } },
                "pose": {
                    "position": { "x": 2.0, "y": 3.0, "z": 0.0 },
                    "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 }
                },
                "name": "A",
                "id": 1
            })
        );
    }

    #[test]
    fn empty_collection_exports_nothing() {
        let export = NavigationExport::from_waypoints(&[], Utc::now());
        assert!(export.waypoints.is_empty());
        assert_eq!(export.metadata.count, 0);
        assert_eq!(export.metadata.frame_id, MAP_FRAME_ID);
    }
}
