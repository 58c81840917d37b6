//! JSON snapshot of a brain on disk.
//!
//! The CLI loads the snapshot, applies one command to the in-memory store,
//! and writes the snapshot back.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use super::share::ShareState;
use super::store::ContentStore;
use crate::domain::ContentItem;

/// Current snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything the CLI keeps between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Next auto-assigned id
    #[serde(default = "default_next_id")]
    pub next_id: u64,

    /// All stored items, insertion order
    #[serde(default)]
    pub items: Vec<ContentItem>,

    #[serde(default)]
    pub share: ShareState,
}

fn default_next_id() -> u64 {
    1
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl Snapshot {
    /// Create a new empty snapshot
    pub fn new() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            next_id: 1,
            items: Vec::new(),
            share: ShareState::new(),
        }
    }

    /// Capture a store and its share state
    pub fn from_store(store: &ContentStore, share: ShareState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            next_id: store.next_id(),
            items: store.list().to_vec(),
            share,
        }
    }

    /// Rebuild the store, re-validating every item
    pub fn into_store(self) -> Result<(ContentStore, ShareState)> {
        let store = ContentStore::from_items(self.items, Some(self.next_id))
            .context("Snapshot contains invalid content")?;
        Ok((store, self.share))
    }

    /// Load a snapshot; a missing file is an empty brain
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No snapshot yet, starting empty");
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;

        let snapshot: Snapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse snapshot JSON: {}", path.display()))?;

        if snapshot.version > SNAPSHOT_VERSION {
            anyhow::bail!(
                "Snapshot version {} is newer than supported version {}",
                snapshot.version,
                SNAPSHOT_VERSION
            );
        }

        Ok(snapshot)
    }

    /// Save the snapshot, holding an exclusive lock on the file while
    /// writing
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize snapshot")?;
        let path: PathBuf = path.to_path_buf();

        tokio::task::spawn_blocking(move || write_locked(&path, &json))
            .await
            .context("Snapshot writer task failed")?
    }
}

fn write_locked(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Failed to open snapshot: {}", path.display()))?;

    file.lock_exclusive()
        .context("Failed to acquire file lock on snapshot")?;

    // Truncate only once the lock is held
    file.set_len(0).context("Failed to truncate snapshot")?;
    file.write_all(content.as_bytes())
        .context("Failed to write snapshot")?;
    file.flush().context("Failed to flush snapshot")?;

    // Lock is released when file is dropped
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentType, NewContent};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let snapshot = Snapshot::load(&temp.path().join("brain.json")).await.unwrap();
        assert_eq!(snapshot, Snapshot::new());
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("brain.json");

        let mut store = ContentStore::new();
        store
            .add(
                NewContent::new(ContentType::Document, "Notes")
                    .with_body("body")
                    .with_tag("x"),
            )
            .unwrap();
        let mut share = ShareState::new();
        share.enable("https://brainly.app/shared");

        let snapshot = Snapshot::from_store(&store, share.clone());
        snapshot.save(&path).await.unwrap();

        let loaded = Snapshot::load(&path).await.unwrap();
        assert_eq!(loaded, snapshot);

        let (restored, restored_share) = loaded.into_store().unwrap();
        assert_eq!(restored.list(), store.list());
        assert_eq!(restored.next_id(), 2);
        assert_eq!(restored_share, share);
    }

    #[tokio::test]
    async fn test_save_overwrites_longer_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("brain.json");

        let mut store = ContentStore::new();
        for i in 0..5 {
            store
                .add(
                    NewContent::new(ContentType::Link, format!("Link {}", i))
                        .with_link("https://example.com"),
                )
                .unwrap();
        }
        Snapshot::from_store(&store, ShareState::new())
            .save(&path)
            .await
            .unwrap();

        Snapshot::new().save(&path).await.unwrap();

        let loaded = Snapshot::load(&path).await.unwrap();
        assert!(loaded.items.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_newer_version() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("brain.json");
        std::fs::write(&path, r#"{"version": 99, "items": []}"#).unwrap();

        assert!(Snapshot::load(&path).await.is_err());
    }

    #[test]
    fn test_into_store_rejects_invalid_items() {
        let json = r#"{
            "version": 1,
            "next_id": 2,
            "items": [
                {"id": 1, "type": "tweet", "link": "", "title": "Empty",
                 "tags": [], "added_at": "2024-01-01T00:00:00Z"}
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.into_store().is_err());
    }
}
