//! Waypoint manager CLI library.
//!
//! Map generation helpers shared by the binaries.

pub mod mapgen;

pub use mapgen::{encode_pgm, write_map};
