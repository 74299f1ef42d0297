pub mod export;
pub mod map_info;
pub mod models;
pub mod occupancy;
pub mod timestamp;

pub use export::{NavigationExport, PoseWaypoint};
pub use map_info::MapInfo;
pub use models::{FileMetadata, NewWaypoint, Waypoint, WaypointFile, WaypointId};
pub use occupancy::OccupancyGrid;
