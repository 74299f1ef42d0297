//! Occupancy grid raster and the fixed sample floor plan.

use std::ops::Range;

/// Cell value for free space.
pub const FREE: u8 = 255;
/// Cell value for an obstacle.
pub const OCCUPIED: u8 = 0;
/// Cell value for unexplored space.
pub const UNKNOWN: u8 = 128;

pub const SAMPLE_WIDTH: u32 = 400;
pub const SAMPLE_HEIGHT: u32 = 300;
const WALL_THICKNESS: u32 = 5;

/// Row-major grid of occupancy bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width as usize * height as usize],
        }
    }

    /// The 400x300 sample floor plan: a walled area with two rooms,
    /// furniture and a few unexplored patches.
    pub fn sample() -> Self {
        let (w, h) = (SAMPLE_WIDTH, SAMPLE_HEIGHT);
        let mut grid = Self::new(w, h, FREE);

        // Outer walls
        grid.fill_region(0..WALL_THICKNESS, 0..w, OCCUPIED);
        grid.fill_region(h - WALL_THICKNESS..h, 0..w, OCCUPIED);
        grid.fill_region(0..h, 0..WALL_THICKNESS, OCCUPIED);
        grid.fill_region(0..h, w - WALL_THICKNESS..w, OCCUPIED);

        // Interior walls
        grid.fill_region(50..150, 75..80, OCCUPIED);
        grid.fill_region(75..80, 75..150, OCCUPIED);
        grid.fill_region(25..125, 200..205, OCCUPIED);

        // Table and chair
        grid.fill_region(180..220, 100..140, OCCUPIED);
        grid.fill_region(250..280, 250..280, OCCUPIED);

        grid.fill_region(30..60, 30..60, UNKNOWN);
        grid.fill_region(200..230, 300..330, UNKNOWN);
        grid.fill_region(120..150, 180..210, UNKNOWN);

        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.cells.get(self.index(row, col)).copied()
    }

    /// Overwrite every cell in `rows` x `cols`. Ranges are clipped to the grid.
    pub fn fill_region(&mut self, rows: Range<u32>, cols: Range<u32>, value: u8) {
        let rows = rows.start.min(self.height)..rows.end.min(self.height);
        let cols = cols.start.min(self.width)..cols.end.min(self.width);
        if cols.is_empty() {
            return;
        }

        for row in rows {
            let start = self.index(row, cols.start);
            let end = self.index(row, cols.end - 1) + 1;
            self.cells[start..end].fill(value);
        }
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<u8> {
        self.cells
    }

    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_fixed_dimensions() {
        let grid = OccupancyGrid::sample();
        assert_eq!(grid.width(), 400);
        assert_eq!(grid.height(), 300);
        assert_eq!(grid.cells().len(), 400 * 300);
    }

    #[test]
    fn sample_only_uses_known_values() {
        let grid = OccupancyGrid::sample();
        assert!(grid
            .cells()
            .iter()
            .all(|&v| v == FREE || v == OCCUPIED || v == UNKNOWN));
    }

    #[test]
    fn sample_layout_spot_checks() {
        let grid = OccupancyGrid::sample();
        // Corners are wall.
        assert_eq!(grid.get(0, 0), Some(OCCUPIED));
        assert_eq!(grid.get(299, 399), Some(OCCUPIED));
        assert_eq!(grid.get(4, 200), Some(OCCUPIED));
        assert_eq!(grid.get(5, 200), Some(FREE));
        assert_eq!(grid.get(25, 200), Some(OCCUPIED));
        assert_eq!(grid.get(100, 77), Some(OCCUPIED));
        assert_eq!(grid.get(77, 120), Some(OCCUPIED));
        assert_eq!(grid.get(200, 120), Some(OCCUPIED));
        assert_eq!(grid.get(265, 265), Some(OCCUPIED));
        assert_eq!(grid.get(45, 45), Some(UNKNOWN));
        assert_eq!(grid.get(215, 315), Some(UNKNOWN));
        // Unknown patch painted over the divider.
        assert_eq!(grid.get(121, 201), Some(UNKNOWN));
        assert_eq!(grid.get(150, 300), Some(FREE));
        assert_eq!(grid.get(300, 0), None);
    }

    #[test]
    fn sample_is_deterministic() {
        assert_eq!(OccupancyGrid::sample(), OccupancyGrid::sample());
    }

    #[test]
    fn fill_region_clips_to_bounds() {
        let mut grid = OccupancyGrid::new(4, 3, FREE);
        grid.fill_region(2..10, 3..10, OCCUPIED);
        assert_eq!(grid.get(2, 3), Some(OCCUPIED));
        assert_eq!(grid.get(1, 3), Some(FREE));
        assert_eq!(grid.cells().iter().filter(|&&v| v == OCCUPIED).count(), 1);
    }
}
