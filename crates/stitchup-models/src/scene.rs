//! Scene description models.

use serde::{Deserialize, Serialize};

/// A visual scene description generated from one headline image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub title: String,
    pub description: String,
    pub mood: String,
    pub source_title: String,
}

impl Scene {
    /// Derive the deterministic scene id from a source image filename.
    ///
    /// The extension is stripped, the stem is lower-cased, spaces and
    /// hyphens become underscores, and the result is prefixed `scene_`.
    pub fn derive_id(source_filename: &str) -> String {
        let stem = match source_filename.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem,
            _ => source_filename,
        };
        let normalized: String = stem
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        format!("scene_{}", normalized)
    }
}
