//! Map metadata sidecar, read once at startup.

use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Parse the YAML file at `path` into an opaque JSON value.
///
/// Any read or parse failure yields `None`; the server keeps running and
/// reports `metadata: null`.
pub async fn load_map_metadata(path: &Path) -> Option<Value> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Error loading map metadata from {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_yaml::from_str::<Value>(&raw) {
        Ok(metadata) => {
            info!("Loaded map metadata from {}", path.display());
            Some(metadata)
        }
        Err(e) => {
            warn!("Error parsing map metadata {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("waypoint-meta-{}-{}", uuid::Uuid::new_v4(), name))
    }

    #[tokio::test]
    async fn parses_map_server_sidecar() {
        let path = temp_file("map.yaml");
        tokio::fs::write(
            &path,
            "image: sample-map.pgm\nresolution: 0.05\norigin: [-10.0, -7.5, 0.0]\nnegate: 0\n",
        )
        .await
        .unwrap();

        let metadata = load_map_metadata(&path).await.expect("metadata");
        assert_eq!(metadata["image"], "sample-map.pgm");
        assert_eq!(metadata["resolution"], 0.05);
        assert_eq!(metadata["origin"][1], -7.5);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_file_is_none() {
        assert!(load_map_metadata(&temp_file("absent.yaml")).await.is_none());
    }

    #[tokio::test]
    async fn malformed_yaml_is_none() {
        let path = temp_file("bad.yaml");
        tokio::fs::write(&path, "origin: [1, 2\n").await.unwrap();
        assert!(load_map_metadata(&path).await.is_none());
        let _ = tokio::fs::remove_file(&path).await;
    }
}
