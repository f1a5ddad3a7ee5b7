//! Asynchronous job-completion polling.
//!
//! Every provider that returns a job identifier instead of an immediate
//! result is driven by the same protocol: query the status endpoint on a
//! constant interval until a terminal status appears or the attempt
//! ceiling is exhausted, then download the result bytes. There is no
//! exponential backoff; the ceiling is the only bound.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use stitchup_models::{GenerationJob, JobStatus};

use crate::error::{GenerationError, GenerationResult};
use crate::extract::{self, ExtractRule};

/// Polling tunables.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Fixed wait between status queries
    pub interval: Duration,
    /// Hard ceiling on status queries per job
    pub max_attempts: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

/// One job's status-query parameters.
#[derive(Debug, Clone)]
pub struct PollRequest {
    /// Primary status endpoint
    pub status_url: String,
    /// Alternate endpoint pattern, tried once if the very first query 404s.
    /// Best-effort recovery against provider API versioning drift.
    pub fallback_status_url: Option<String>,
    /// Provider auth/version headers sent with every status query
    pub headers: HeaderMap,
    /// Ordered result-location extraction rules
    pub result_rules: &'static [ExtractRule],
}

/// Driver for the poll-until-terminal protocol.
pub struct JobPoller {
    http: Client,
    config: PollerConfig,
    cancel_rx: Option<watch::Receiver<bool>>,
}

impl JobPoller {
    pub fn new(http: Client, config: PollerConfig) -> Self {
        Self {
            http,
            config,
            cancel_rx: None,
        }
    }

    /// Set a cooperative cancellation signal, observed between attempts
    /// and while waiting out the interval.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.cancel_rx = Some(cancel_rx);
        self
    }

    /// Poll the job to a terminal state and return the downloaded result.
    ///
    /// The job's status is advanced as observations come in; unrecognized
    /// provider vocabulary keeps the loop alive as `Running`.
    pub async fn wait_for_result(
        &self,
        job: &mut GenerationJob,
        request: &PollRequest,
    ) -> GenerationResult<Vec<u8>> {
        let mut status_url = request.status_url.clone();

        for attempt in 1..=self.config.max_attempts {
            self.check_cancelled()?;

            let response = self
                .http
                .get(&status_url)
                .headers(request.headers.clone())
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                debug!(
                    attempt,
                    status = status.as_u16(),
                    "Status query returned non-success: {}",
                    body
                );

                if status == StatusCode::NOT_FOUND && attempt == 1 {
                    if let Some(fallback) = &request.fallback_status_url {
                        warn!("Status endpoint 404 on first attempt, trying {}", fallback);
                        status_url = fallback.clone();
                        job.provider_endpoint = fallback.clone();
                    }
                }

                self.wait_interval().await?;
                continue;
            }

            let body: Value = response
                .json()
                .await
                .map_err(|e| GenerationError::malformed(format!("status body not JSON: {e}")))?;

            let Some(raw_status) = body.get("status").and_then(Value::as_str) else {
                debug!(attempt, "No status field in response");
                self.wait_interval().await?;
                continue;
            };

            let observed = JobStatus::parse(raw_status);
            job.advance(observed);
            debug!(attempt, job_id = %job.job_id, status = %observed, "Polled job");

            match observed {
                JobStatus::Completed => {
                    let location = extract::first_match(request.result_rules, &body)
                        .ok_or(GenerationError::MissingResultLocation)?;
                    job.result_location = Some(location.clone());
                    return self.download(&location).await;
                }
                JobStatus::Failed => {
                    let message = extract::error_message(&body)
                        .unwrap_or_else(|| "unknown error".to_string());
                    return Err(GenerationError::generation_failed(message));
                }
                _ => {
                    self.wait_interval().await?;
                }
            }
        }

        Err(GenerationError::PollTimeout {
            attempts: self.config.max_attempts,
        })
    }

    /// Plain HTTP download of the result bytes. Not retried.
    async fn download(&self, url: &str) -> GenerationResult<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GenerationError::download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GenerationError::download(format!(
                "unexpected status code {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::download(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn check_cancelled(&self) -> GenerationResult<()> {
        match &self.cancel_rx {
            Some(rx) if *rx.borrow() => Err(GenerationError::Cancelled),
            _ => Ok(()),
        }
    }

    /// Wait out the poll interval, aborting promptly on cancellation.
    async fn wait_interval(&self) -> GenerationResult<()> {
        match self.cancel_rx.clone() {
            Some(mut rx) => {
                tokio::select! {
                    _ = tokio::time::sleep(self.config.interval) => Ok(()),
                    changed = rx.changed() => {
                        if changed.is_ok() && *rx.borrow() {
                            Err(GenerationError::Cancelled)
                        } else {
                            Ok(())
                        }
                    }
                }
            }
            None => {
                tokio::time::sleep(self.config.interval).await;
                Ok(())
            }
        }
    }
}
