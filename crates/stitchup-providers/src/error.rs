//! Generation error types.

use thiserror::Error;

pub type GenerationResult<T> = Result<T, GenerationError>;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Non-success HTTP response or in-band error field from a provider.
    #[error("Provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// Response shape did not match any known schema variant.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Submission response carried none of the known job-id fields.
    #[error("No job identifier in submission response")]
    MissingJobIdentifier,

    /// Completed-job response carried none of the known result locations.
    #[error("No result location in completed-job response")]
    MissingResultLocation,

    /// Provider explicitly reported a failed job.
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Terminal status never observed within the attempt ceiling.
    #[error("Timed out waiting for job completion after {attempts} attempts")]
    PollTimeout { attempts: u32 },

    /// Result fetch failed after a successful completion signal.
    #[error("Result download failed: {0}")]
    Download(String),

    /// Cancellation signal observed mid-poll.
    #[error("Generation cancelled")]
    Cancelled,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerationError {
    pub fn provider(status: u16, body: impl Into<String>) -> Self {
        Self::Provider {
            status,
            body: body.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn generation_failed(msg: impl Into<String>) -> Self {
        Self::GenerationFailed(msg.into())
    }

    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }
}
