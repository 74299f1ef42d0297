//! Generate the sample occupancy map used by the waypoint manager frontend.
//!
//! The floor plan is fixed; only the output location can be chosen.

use clap::Parser;
use std::path::PathBuf;
use waypoint_cli::write_map;
use waypoint_core::occupancy::{FREE, OCCUPIED, UNKNOWN};
use waypoint_core::OccupancyGrid;

/// Write the sample occupancy grid as a PGM image (and YAML sidecar)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Output image path
    #[arg(long, default_value = "public/sample-map.pgm")]
    output: PathBuf,

    /// Skip writing the YAML sidecar next to the image
    #[arg(long)]
    no_yaml: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let grid = OccupancyGrid::sample();
    let sidecar = write_map(&grid, &args.output, !args.no_yaml)?;

    println!("Sample occupancy map created: {}", args.output.display());
    if let Some(sidecar) = sidecar {
        println!("Map metadata written: {}", sidecar.display());
    }
    println!("Map dimensions: {}x{}", grid.width(), grid.height());
    println!("Values: {OCCUPIED}=occupied, {UNKNOWN}=unknown, {FREE}=free");

    Ok(())
}
