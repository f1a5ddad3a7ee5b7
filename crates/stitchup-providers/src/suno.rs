//! Suno music-generation client, the second job-poller target.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info};

use stitchup_models::{GenerationJob, Lyrics};

use crate::error::{GenerationError, GenerationResult};
use crate::extract;
use crate::poller::{JobPoller, PollRequest, PollerConfig};

/// Suno client configuration.
#[derive(Debug, Clone)]
pub struct SunoConfig {
    pub api_key: String,
    pub api_base: String,
    pub poller: PollerConfig,
}

impl Default for SunoConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://studio-api.suno.ai".to_string(),
            // Music jobs are slower to start; poll less aggressively.
            poller: PollerConfig {
                interval: Duration::from_secs(10),
                max_attempts: 60,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct SongRequest<'a> {
    prompt: &'a str,
    title: &'a str,
}

/// Client for the Suno song-generation API.
pub struct SunoClient {
    config: SunoConfig,
    http: Client,
    poller: JobPoller,
}

impl SunoClient {
    pub fn new(config: SunoConfig) -> GenerationResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;
        let poller = JobPoller::new(http.clone(), config.poller.clone());
        Ok(Self {
            config,
            http,
            poller,
        })
    }

    /// Thread a cancellation signal through the poll loop.
    pub fn with_cancel(mut self, cancel_rx: watch::Receiver<bool>) -> Self {
        self.poller = JobPoller::new(self.http.clone(), self.config.poller.clone())
            .with_cancel(cancel_rx);
        self
    }

    /// Generate a music track from lyrics and return the audio bytes.
    pub async fn generate_music(&self, lyrics: &Lyrics) -> GenerationResult<Vec<u8>> {
        let mut job = self.submit(lyrics).await?;
        info!(job_id = %job.job_id, "Submitted song-generation job");

        let request = PollRequest {
            status_url: job.provider_endpoint.clone(),
            fallback_status_url: Some(format!(
                "{}/v1/jobs/{}",
                self.config.api_base, job.job_id
            )),
            headers: self.headers(),
            result_rules: extract::AUDIO_RESULT_RULES,
        };

        self.poller.wait_for_result(&mut job, &request).await
    }

    async fn submit(&self, lyrics: &Lyrics) -> GenerationResult<GenerationJob> {
        let url = format!("{}/v1/songs", self.config.api_base);
        let request = SongRequest {
            prompt: &lyrics.content,
            title: &lyrics.title,
        };

        debug!(title = %lyrics.title, "Submitting song-generation request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::ACCEPTED {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::provider(status.as_u16(), body));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::malformed(format!("submission response: {e}")))?;

        if let Some(message) = extract::error_message(&body) {
            return Err(GenerationError::provider(status.as_u16(), message));
        }

        let job_id = extract::job_id(&body).ok_or(GenerationError::MissingJobIdentifier)?;
        let status_url = format!("{}/v1/songs/{}", self.config.api_base, job_id);
        Ok(GenerationJob::new(job_id, status_url))
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(auth) = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key)) {
            headers.insert(AUTHORIZATION, auth);
        }
        headers
    }
}
