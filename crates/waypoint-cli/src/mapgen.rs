//! Occupancy grid encoding and sidecar output.

use anyhow::{Context, Result};
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder};
use std::path::{Path, PathBuf};

use waypoint_core::map_info::DEFAULT_RESOLUTION;
use waypoint_core::{MapInfo, OccupancyGrid};

/// Encode `grid` as a binary (P5) PGM image.
pub fn encode_pgm(grid: &OccupancyGrid) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PnmEncoder::new(&mut buf)
        .with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary))
        .write_image(grid.cells(), grid.width(), grid.height(), ExtendedColorType::L8)
        .context("encode pgm")?;
    Ok(buf)
}

/// Write `grid` to `image_path`, plus a `.yaml` sidecar next to it when
/// `with_sidecar` is set. Returns the sidecar path if one was written.
pub fn write_map(grid: &OccupancyGrid, image_path: &Path, with_sidecar: bool) -> Result<Option<PathBuf>> {
    let pgm = encode_pgm(grid)?;
    std::fs::write(image_path, pgm)
        .with_context(|| format!("Failed to save {}", image_path.display()))?;

    if !with_sidecar {
        return Ok(None);
    }

    let image_name = image_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let info = MapInfo::centered(image_name, grid, DEFAULT_RESOLUTION);
    let yaml = serde_yaml::to_string(&info).context("encode map sidecar")?;

    let sidecar = image_path.with_extension("yaml");
    std::fs::write(&sidecar, yaml)
        .with_context(|| format!("Failed to save {}", sidecar.display()))?;
    Ok(Some(sidecar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::occupancy::{FREE, OCCUPIED};

    #[test]
    fn pgm_header_and_payload() {
        let grid = OccupancyGrid::sample();
        let pgm = encode_pgm(&grid).unwrap();

        assert!(pgm.starts_with(b"P5"));
        // Header is followed by exactly one byte per cell.
        assert!(pgm.ends_with(grid.cells()));
        assert!(pgm.len() > grid.cells().len());
    }

    #[test]
    fn encoding_is_byte_identical_across_runs() {
        let first = encode_pgm(&OccupancyGrid::sample()).unwrap();
        let second = encode_pgm(&OccupancyGrid::sample()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn small_grid_round_trips_through_decoder() {
        let mut grid = OccupancyGrid::new(3, 2, FREE);
        grid.fill_region(0..1, 1..2, OCCUPIED);

        let pgm = encode_pgm(&grid).unwrap();
        let decoded = image::load_from_memory(&pgm).unwrap().to_luma8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.as_raw().as_slice(), grid.cells());
    }

    #[test]
    fn writes_image_and_sidecar() {
        let dir = std::env::temp_dir().join(format!("mapgen-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let image_path = dir.join("sample-map.pgm");

        let sidecar = write_map(&OccupancyGrid::sample(), &image_path, true)
            .unwrap()
            .expect("sidecar written");
        assert_eq!(sidecar, dir.join("sample-map.yaml"));

        let info: MapInfo = serde_yaml::from_str(&std::fs::read_to_string(&sidecar).unwrap()).unwrap();
        assert_eq!(info.image, "sample-map.pgm");
        assert_eq!(info.resolution, DEFAULT_RESOLUTION);
        assert!(image_path.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
