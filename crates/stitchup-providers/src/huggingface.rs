//! Hugging Face inference client for image synthesis.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{GenerationError, GenerationResult};
use crate::extract;

/// Hugging Face client configuration.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: "https://api-inference.huggingface.co".to_string(),
            model: "stabilityai/stable-diffusion-xl-base-1.0".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Model family, driving which generation parameters are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    /// Diffusion models take negative prompt, step count and guidance scale
    Diffusion,
    /// Everything else receives only the bare prompt
    Generic,
}

impl ModelFamily {
    pub fn of(model: &str) -> Self {
        if model.contains("stable-diffusion") {
            ModelFamily::Diffusion
        } else {
            ModelFamily::Generic
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<DiffusionParameters>,
}

#[derive(Debug, Serialize)]
struct DiffusionParameters {
    negative_prompt: &'static str,
    num_inference_steps: u32,
    guidance_scale: f32,
}

impl DiffusionParameters {
    fn for_family(family: ModelFamily) -> Option<Self> {
        match family {
            ModelFamily::Diffusion => Some(Self {
                negative_prompt: "blurry, low quality, distorted, deformed, disfigured",
                num_inference_steps: 50,
                guidance_scale: 7.5,
            }),
            ModelFamily::Generic => None,
        }
    }
}

/// Client for the Hugging Face inference API.
pub struct HuggingFaceClient {
    config: HuggingFaceConfig,
    http: Client,
}

impl HuggingFaceClient {
    pub fn new(config: HuggingFaceConfig) -> GenerationResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    /// The family of the configured model.
    pub fn model_family(&self) -> ModelFamily {
        ModelFamily::of(&self.config.model)
    }

    /// Generate one image and return the raw bytes.
    ///
    /// Most image models answer with the image body directly; a JSON
    /// content-type means an error envelope instead.
    pub async fn generate_image(&self, prompt: &str) -> GenerationResult<Vec<u8>> {
        let url = format!("{}/models/{}", self.config.api_base, self.config.model);
        let request = InferenceRequest {
            inputs: prompt,
            parameters: DiffusionParameters::for_family(self.model_family()),
        };

        debug!(model = %self.config.model, "Sending image inference request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::provider(status.as_u16(), body));
        }

        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        let bytes = response.bytes().await?;

        if is_json {
            if let Ok(envelope) = serde_json::from_slice::<Value>(&bytes) {
                if let Some(message) = extract::error_message(&envelope) {
                    return Err(GenerationError::provider(status.as_u16(), message));
                }
            }
            return Err(GenerationError::malformed(
                "unexpected JSON response from image generation API",
            ));
        }

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_family_table() {
        assert_eq!(
            ModelFamily::of("stabilityai/stable-diffusion-xl-base-1.0"),
            ModelFamily::Diffusion
        );
        assert_eq!(
            ModelFamily::of("black-forest-labs/FLUX.1-dev"),
            ModelFamily::Generic
        );
    }

    #[test]
    fn test_diffusion_parameters_only_for_diffusion() {
        assert!(DiffusionParameters::for_family(ModelFamily::Diffusion).is_some());
        assert!(DiffusionParameters::for_family(ModelFamily::Generic).is_none());
    }

    #[test]
    fn test_generic_request_has_no_parameters_key() {
        let request = InferenceRequest {
            inputs: "a scene",
            parameters: DiffusionParameters::for_family(ModelFamily::Generic),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("parameters").is_none());
    }

    #[test]
    fn test_diffusion_request_parameter_values() {
        let request = InferenceRequest {
            inputs: "a scene",
            parameters: DiffusionParameters::for_family(ModelFamily::Diffusion),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["parameters"]["num_inference_steps"], 50);
        assert_eq!(json["parameters"]["guidance_scale"], 7.5);
    }
}
