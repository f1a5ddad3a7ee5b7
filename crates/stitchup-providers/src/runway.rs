//! Runway image-to-video client, the canonical job-poller target.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info};

use stitchup_models::GenerationJob;

use crate::error::{GenerationError, GenerationResult};
use crate::extract;
use crate::payload;
use crate::poller::{JobPoller, PollRequest, PollerConfig};

const RUNWAY_VERSION_HEADER: &str = "X-Runway-Version";

/// Runway client configuration.
#[derive(Debug, Clone)]
pub struct RunwayConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub api_version: String,
    pub poller: PollerConfig,
}

impl Default for RunwayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://api.dev.runwayml.com".to_string(),
            model: "gen3a_turbo".to_string(),
            api_version: "2024-11-06".to_string(),
            poller: PollerConfig {
                interval: Duration::from_secs(5),
                max_attempts: 60,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageToVideoRequest<'a> {
    #[serde(rename = "promptImage")]
    prompt_image: String,
    #[serde(rename = "promptText")]
    prompt_text: &'a str,
    model: &'a str,
}

/// Client for the Runway image-to-video API.
pub struct RunwayClient {
    config: RunwayConfig,
    http: Client,
    poller: JobPoller,
}

impl RunwayClient {
    pub fn new(config: RunwayConfig) -> GenerationResult<Self> {
        // Submission itself is quick; the long wait happens in the poller.
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

    /// Convert one image to a video clip, polling the job to completion,
    /// and return the downloaded video bytes.
    pub async fn generate_video(&self, image: &[u8], prompt: &str) -> GenerationResult<Vec<u8>> {
        let mut job = self.submit(image, prompt).await?;
        info!(job_id = %job.job_id, "Submitted image-to-video job");

        let request = PollRequest {
            status_url: job.provider_endpoint.clone(),
            fallback_status_url: Some(format!(
                "{}/v1/jobs/{}",
                self.config.api_base, job.job_id
            )),
            headers: self.headers(),
            result_rules: extract::VIDEO_RESULT_RULES,
        };

        self.poller.wait_for_result(&mut job, &request).await
    }

    /// Submit the generation request and extract the job identifier.
    async fn submit(&self, image: &[u8], prompt: &str) -> GenerationResult<GenerationJob> {
        let url = format!("{}/v1/image_to_video", self.config.api_base);
        let request = ImageToVideoRequest {
            prompt_image: payload::image_data_uri(image),
            prompt_text: prompt,
            model: &self.config.model,
        };

        debug!(model = %self.config.model, "Submitting image-to-video request");

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
        let status_url = format!("{}/v1/image_to_video/{}", self.config.api_base, job_id);
        Ok(GenerationJob::new(job_id, status_url))
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(auth) = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key)) {
            headers.insert(AUTHORIZATION, auth);
        }
        if let Ok(version) = HeaderValue::from_str(&self.config.api_version) {
            headers.insert(RUNWAY_VERSION_HEADER, version);
        }
        headers
    }
}
