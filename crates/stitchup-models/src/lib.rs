//! Shared data models for the StitchUp pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Pipeline artifacts (scenes, images, videos, lyrics, music)
//! - Source news content
//! - Asynchronous generation jobs and their status state machine

pub mod content;
pub mod job;
pub mod lyrics;
pub mod media;
pub mod scene;

// Re-export common types
pub use content::{Article, Content};
pub use job::{GenerationJob, JobStatus};
pub use lyrics::Lyrics;
pub use media::{Image, Music, Video};
pub use scene::Scene;
