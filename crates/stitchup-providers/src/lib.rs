//! Generation provider clients for the StitchUp pipeline.
//!
//! Every stage that delegates work to an external generative service goes
//! through this crate: one adapter per provider builds the submission
//! payload and interprets the response, and [`poller::JobPoller`] drives
//! the shared asynchronous-completion protocol (submit, poll status until
//! terminal, download the result).

pub mod claude;
pub mod error;
pub mod extract;
pub mod huggingface;
pub mod payload;
pub mod poller;
pub mod runway;
pub mod suno;

pub use claude::{ClaudeClient, ClaudeConfig};
pub use error::{GenerationError, GenerationResult};
pub use huggingface::{HuggingFaceClient, HuggingFaceConfig, ModelFamily};
pub use poller::{JobPoller, PollRequest, PollerConfig};
pub use runway::{RunwayClient, RunwayConfig};
pub use suno::{SunoClient, SunoConfig};
