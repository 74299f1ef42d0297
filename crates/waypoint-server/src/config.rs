//! Server configuration from environment.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub server_port: u16,
    /// JSON file the waypoint collection is mirrored to.
    pub waypoints_file: PathBuf,
    /// YAML sidecar served by `/api/map/metadata`.
    pub map_metadata_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            server_port: 5000,
            waypoints_file: PathBuf::from("waypoints.json"),
            map_metadata_file: PathBuf::from("../public/sample-map.yaml"),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("WAYPOINT_BIND_ADDR")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.bind_addr),
            server_port: env::var("WAYPOINT_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            waypoints_file: env::var("WAYPOINTS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.waypoints_file),
            map_metadata_file: env::var("MAP_METADATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.map_metadata_file),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.server_port)
    }
}
