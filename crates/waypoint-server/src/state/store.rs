//! Waypoint collection mirrored to a JSON file.
//!
//! The whole collection lives in memory and is rewritten to disk after every
//! mutation. Mutations hold the lock until the write has finished, so two
//! requests can never interleave their read-modify-write cycles.

use chrono::Utc;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use waypoint_core::{NewWaypoint, Waypoint, WaypointFile, WaypointId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("waypoint file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("waypoint file encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid waypoint update: {0}")]
    InvalidPatch(serde_json::Error),
}

/// What happened when the store read its file at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded(usize),
    /// No file yet; starts empty.
    Missing,
    /// File unreadable or corrupt; starts empty.
    Degraded(String),
}

pub struct WaypointStore {
    path: PathBuf,
    waypoints: Mutex<Vec<Waypoint>>,
    load_status: LoadStatus,
}

impl WaypointStore {
    /// Load the collection from `path`. Never fails: an absent or broken file
    /// gives an empty collection and a non-`Loaded` status.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (waypoints, load_status) = load(&path).await;

        match &load_status {
            LoadStatus::Loaded(count) => {
                info!("Loaded {} waypoints from {}", count, path.display());
            }
            LoadStatus::Missing => {
                info!("No waypoint file at {}, starting empty", path.display());
            }
            LoadStatus::Degraded(reason) => {
                warn!("Error loading waypoints from {}: {}", path.display(), reason);
            }
        }

        Self {
            path,
            waypoints: Mutex::new(waypoints),
            load_status,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    /// Current in-memory collection, in insertion order.
    pub async fn list(&self) -> Vec<Waypoint> {
        self.waypoints.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.waypoints.lock().await.len()
    }

    /// Append a waypoint with a fresh id and creation time.
    pub async fn add(&self, new: NewWaypoint) -> Waypoint {
        let now = Utc::now();
        // Millisecond timestamps can collide under rapid adds.
        let waypoint = new.into_waypoint(now.timestamp_millis(), now);

        let mut waypoints = self.waypoints.lock().await;
        waypoints.push(waypoint.clone());
        self.persist(&waypoints).await;
        waypoint
    }

    /// Merge `patch` into the first waypoint with `id`.
    ///
    /// Returns `Ok(None)` when no such waypoint exists.
    pub async fn update(
        &self,
        id: WaypointId,
        patch: &Map<String, Value>,
    ) -> Result<Option<Waypoint>, StoreError> {
        let mut waypoints = self.waypoints.lock().await;
        let Some(slot) = waypoints.iter_mut().find(|wp| wp.id == id) else {
            return Ok(None);
        };

        let merged = slot
            .merged_with(patch, Utc::now())
            .map_err(StoreError::InvalidPatch)?;
        *slot = merged.clone();

        self.persist(&waypoints).await;
        Ok(Some(merged))
    }

    /// Drop every waypoint with `id`. Returns how many were removed; zero is
    /// not an error.
    pub async fn remove(&self, id: WaypointId) -> usize {
        let mut waypoints = self.waypoints.lock().await;
        let before = waypoints.len();
        waypoints.retain(|wp| wp.id != id);
        let removed = before - waypoints.len();

        self.persist(&waypoints).await;
        removed
    }

    pub async fn clear(&self) {
        let mut waypoints = self.waypoints.lock().await;
        waypoints.clear();
        self.persist(&waypoints).await;
    }

    /// Write the collection; a failure is logged and the in-memory state kept.
    async fn persist(&self, waypoints: &[Waypoint]) {
        match save(&self.path, waypoints).await {
            Ok(()) => {
                debug!("Saved {} waypoints to {}", waypoints.len(), self.path.display());
            }
            Err(e) => {
                warn!(
                    "Error saving waypoints to {}: {} (memory now ahead of disk)",
                    self.path.display(),
                    e
                );
            }
        }
    }
}

async fn load(path: &Path) -> (Vec<Waypoint>, LoadStatus) {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return (Vec::new(), LoadStatus::Missing),
        Err(e) => return (Vec::new(), LoadStatus::Degraded(e.to_string())),
    };

    match serde_json::from_slice::<WaypointFile>(&raw) {
        Ok(file) => {
            let count = file.waypoints.len();
            (file.waypoints, LoadStatus::Loaded(count))
        }
        Err(e) => (Vec::new(), LoadStatus::Degraded(e.to_string())),
    }
}

/// Serialize `waypoints` with a metadata block and replace the file at `path`.
///
/// Writes to a sibling temp file first and renames it over the target, so a
/// crash mid-write leaves the previous file intact.
pub async fn save(path: &Path, waypoints: &[Waypoint]) -> Result<(), StoreError> {
    let file = WaypointFile::new(waypoints.to_vec(), Utc::now());
    let json = serde_json::to_vec_pretty(&file)?;

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &json).await?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(e.into());
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "waypoints.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
