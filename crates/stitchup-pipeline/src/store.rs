//! On-disk JSON persistence for intermediate artifacts.
//!
//! Each stage writes its output batch as a JSON array so stages can also be
//! run as separate CLI invocations against the previous stage's file.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::error::PipelineResult;

pub const SCENES_FILE: &str = "scenes.json";
pub const IMAGES_FILE: &str = "images.json";
pub const VIDEOS_FILE: &str = "videos.json";
pub const LYRICS_FILE: &str = "lyrics.json";
pub const MUSIC_FILE: &str = "music.json";

/// Persists artifact batches under one output directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Write a batch as a pretty-printed JSON array.
    pub fn save<T: Serialize>(&self, filename: &str, items: &[T]) -> PipelineResult<PathBuf> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.path_of(filename);
        let json = serde_json::to_string_pretty(items)?;
        std::fs::write(&path, json)?;
        info!(file = %path.display(), count = items.len(), "Persisted artifacts");
        Ok(path)
    }

    /// Read a batch back from a JSON array file.
    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> PipelineResult<Vec<T>> {
        load_batch(&self.path_of(filename))
    }
}

/// Read a JSON array file from an arbitrary path.
pub fn load_batch<T: DeserializeOwned>(path: &Path) -> PipelineResult<Vec<T>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
