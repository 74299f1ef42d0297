//! Shared application state.

pub mod store;

use serde_json::Value;

use crate::config::Config;
use crate::map_metadata::load_map_metadata;
pub use store::{LoadStatus, StoreError, WaypointStore};

/// Everything the request handlers share.
pub struct AppState {
    store: WaypointStore,
    /// Immutable after startup.
    map_metadata: Option<Value>,
}

impl AppState {
    pub fn new(store: WaypointStore, map_metadata: Option<Value>) -> Self {
        Self { store, map_metadata }
    }

    /// Open the waypoint file and read the map sidecar named in `config`.
    pub async fn load(config: &Config) -> Self {
        let store = WaypointStore::open(&config.waypoints_file).await;
        let map_metadata = load_map_metadata(&config.map_metadata_file).await;
        Self::new(store, map_metadata)
    }

    pub fn store(&self) -> &WaypointStore {
        &self.store
    }

    pub fn map_metadata(&self) -> Option<&Value> {
        self.map_metadata.as_ref()
    }
}
