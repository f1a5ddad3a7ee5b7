//! Pipeline error types.

use std::path::PathBuf;

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Every item in a stage's batch failed. The only batch-level error
    /// that aborts the whole run; individual item failures are skipped.
    #[error("Stage '{stage}' produced no artifacts")]
    NoArtifactsProduced { stage: &'static str },

    #[error("No input images found in {0}")]
    NoInputImages(PathBuf),

    #[error("Converter script not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("Converter script failed: {0}")]
    ScriptFailed(String),

    #[error(transparent)]
    Generation(#[from] stitchup_providers::GenerationError),

    #[error(transparent)]
    Media(#[from] stitchup_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
