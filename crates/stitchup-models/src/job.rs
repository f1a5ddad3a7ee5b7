//! Asynchronous generation job state.
//!
//! A `GenerationJob` tracks one provider-side unit of work from submission
//! to resolution. It is transient: created when a submission response
//! yields a job identifier, mutated only by the poller re-reading status,
//! and discarded once resolved or abandoned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider-side job status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job accepted by the provider, no status observed yet
    #[default]
    Submitted,
    /// Job waiting for provider capacity
    Queued,
    /// Job actively generating
    Running,
    /// Job finished with a result location
    Completed,
    /// Provider reported failure
    Failed,
}

impl JobStatus {
    /// Parse a provider status string.
    ///
    /// Unrecognized vocabulary maps to `Running` so that provider wording
    /// drift keeps the poll loop alive instead of failing the item.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "queued" | "pending" => JobStatus::Queued,
            "running" | "processing" | "in_progress" => JobStatus::Running,
            "completed" | "succeeded" | "success" => JobStatus::Completed,
            "failed" | "error" | "cancelled" => JobStatus::Failed,
            _ => JobStatus::Running,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Submitted => "submitted",
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no further transition occurs).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    fn rank(&self) -> u8 {
        match self {
            JobStatus::Submitted => 0,
            JobStatus::Queued => 1,
            JobStatus::Running => 2,
            JobStatus::Completed | JobStatus::Failed => 3,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One provider-side asynchronous generation job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationJob {
    /// Provider-assigned opaque job identifier
    pub job_id: String,
    /// Status endpoint the job is polled against
    pub provider_endpoint: String,
    /// When the submission was accepted
    pub submitted_at: DateTime<Utc>,
    /// Last observed status
    pub status: JobStatus,
    /// Result URL, present once `Completed` is observed
    pub result_location: Option<String>,
}

impl GenerationJob {
    /// Create a job from a successful submission.
    pub fn new(job_id: impl Into<String>, provider_endpoint: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            provider_endpoint: provider_endpoint.into(),
            submitted_at: Utc::now(),
            status: JobStatus::Submitted,
            result_location: None,
        }
    }

    /// Advance to a newly observed status.
    ///
    /// Status only moves forward; an observation that would regress the
    /// job (e.g. `queued` after `running`) is ignored.
    pub fn advance(&mut self, observed: JobStatus) {
        if observed.rank() >= self.status.rank() && !self.status.is_terminal() {
            self.status = observed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_known_vocabulary() {
        assert_eq!(JobStatus::parse("QUEUED"), JobStatus::Queued);
        assert_eq!(JobStatus::parse("running"), JobStatus::Running);
        assert_eq!(JobStatus::parse("completed"), JobStatus::Completed);
        assert_eq!(JobStatus::parse("failed"), JobStatus::Failed);
    }

    #[test]
    fn test_status_parse_unknown_maps_to_running() {
        assert_eq!(JobStatus::parse("warming_up"), JobStatus::Running);
        assert_eq!(JobStatus::parse(""), JobStatus::Running);
    }

    #[test]
    fn test_terminal_states() {
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(!JobStatus::Submitted.is_terminal());
    }

    #[test]
    fn test_job_only_advances_forward() {
        let mut job = GenerationJob::new("job-1", "https://provider/v1/jobs/job-1");
        assert_eq!(job.status, JobStatus::Submitted);

        job.advance(JobStatus::Running);
        assert_eq!(job.status, JobStatus::Running);

        // A regressing observation is ignored
        job.advance(JobStatus::Queued);
        assert_eq!(job.status, JobStatus::Running);

        job.advance(JobStatus::Completed);
        assert_eq!(job.status, JobStatus::Completed);

        // Terminal states never change
        job.advance(JobStatus::Failed);
        assert_eq!(job.status, JobStatus::Completed);
    }
}
