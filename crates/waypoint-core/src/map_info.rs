//! Map sidecar description, in the layout map servers expect next to the image.

use serde::{Deserialize, Serialize};

use crate::occupancy::OccupancyGrid;

/// Metres per cell of the sample map.
pub const DEFAULT_RESOLUTION: f64 = 0.05;
pub const DEFAULT_OCCUPIED_THRESH: f64 = 0.65;
pub const DEFAULT_FREE_THRESH: f64 = 0.196;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    /// Image file name, relative to the sidecar.
    pub image: String,
    pub resolution: f64,
    /// World pose of the lower-left cell: `[x, y, yaw]`.
    pub origin: [f64; 3],
    pub negate: u8,
    pub occupied_thresh: f64,
    pub free_thresh: f64,
}

impl MapInfo {
    /// Describe `grid` so that the world origin sits at its centre.
    pub fn centered(image: impl Into<String>, grid: &OccupancyGrid, resolution: f64) -> Self {
        let half_width = f64::from(grid.width()) * resolution / 2.0;
        let half_height = f64::from(grid.height()) * resolution / 2.0;

        Self {
            image: image.into(),
            resolution,
            origin: [-half_width, -half_height, 0.0],
            negate: 0,
            occupied_thresh: DEFAULT_OCCUPIED_THRESH,
            free_thresh: DEFAULT_FREE_THRESH,
        }
    }
}
