//! Loading fleet snapshots from JSON.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;
use vitals_primitives::NodeSnapshot;

/// Errors reading a fleet snapshot document.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    #[error("failed to read snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not a node list.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// A snapshot document: a bare node list, or an object wrapping one.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Nodes(Vec<NodeSnapshot>),
    Wrapped {
        #[serde(alias = "pods")]
        nodes: Vec<NodeSnapshot>,
    },
}

/// A fleet snapshot as read from disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}

impl FleetSnapshot {
    pub fn from_json_str(s: &str) -> Result<Self, SnapshotError> {
        let nodes = match serde_json::from_str(s)? {
            Document::Nodes(nodes) | Document::Wrapped { nodes } => nodes,
        };
        Ok(Self { nodes })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), nodes = snapshot.nodes.len(), "loaded snapshot");
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
