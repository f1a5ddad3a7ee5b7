//! Stage orchestration for the StitchUp pipeline.
//!
//! Seven stages run strictly sequentially: content, scene generation,
//! image creation, video conversion, lyric creation, music generation and
//! final assembly. Each batch stage applies its generation client to every
//! input item independently, skipping items that fail; a stage only fails
//! the run when it produces nothing at all.

pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod pipeline;
pub mod placeholder;
pub mod stages;
pub mod store;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use pipeline::Pipeline;
