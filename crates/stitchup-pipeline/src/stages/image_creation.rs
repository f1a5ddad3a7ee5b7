//! Image creation: one synthesized still per scene description.

use std::path::PathBuf;

use tracing::{info, warn};
use uuid::Uuid;

use stitchup_models::{Image, Scene};
use stitchup_providers::{HuggingFaceClient, ModelFamily};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::orchestrator::{run_batch, BatchOptions, GenerationMode};
use crate::placeholder;

const DIFFUSION_STYLE: &str =
    " Photorealistic, high detail, dramatic lighting, 8k, cinematic, professional photography.";

/// Drives image synthesis over a batch of scenes.
pub struct ImageStage {
    output_dir: PathBuf,
    client: Option<HuggingFaceClient>,
    options: BatchOptions,
}

impl ImageStage {
    pub fn new(config: &PipelineConfig) -> PipelineResult<Self> {
        let client = if config.huggingface_api_key.is_empty() {
            None
        } else {
            Some(HuggingFaceClient::new(config.huggingface_config())?)
        };
        let mode = if client.is_some() {
            GenerationMode::Real
        } else {
            GenerationMode::Placeholder
        };
        Ok(Self {
            output_dir: config.images_dir(),
            client,
            options: BatchOptions {
                stage: "image_creation",
                mode,
                item_delay: match mode {
                    GenerationMode::Real => config.item_delay,
                    GenerationMode::Placeholder => config.placeholder_item_delay,
                },
                deadline: config.stage_deadline,
            },
        })
    }

    pub async fn run(&self, scenes: Vec<Scene>) -> PipelineResult<Vec<Image>> {
        match &self.client {
            Some(client) => {
                run_batch(&self.options, scenes, |scene| async move {
                    let prompt = build_prompt(&scene, client.model_family());
                    let bytes = client.generate_image(&prompt).await?;
                    let path = self.image_path(&scene);
                    tokio::fs::create_dir_all(&self.output_dir).await?;
                    tokio::fs::write(&path, &bytes).await?;
                    info!(image = %path.display(), scene = %scene.id, "Created image");
                    Ok(Image {
                        path,
                        scene_id: scene.id,
                        description: scene.description,
                    })
                })
                .await
            }
            None => {
                warn!("No Hugging Face API key configured, generating placeholder images");
                run_batch(&self.options, scenes, |scene| async move {
                    placeholder::image(&self.output_dir, &scene)
                })
                .await
            }
        }
    }

    fn image_path(&self, scene: &Scene) -> PathBuf {
        let filename = format!(
            "image_{}_{}.png",
            placeholder::sanitize(&scene.title),
            &Uuid::new_v4().to_string()[..8]
        );
        self.output_dir.join(filename)
    }
}

/// Build the synthesis prompt from the scene, with diffusion-specific style
/// guidance appended for that model family.
fn build_prompt(scene: &Scene, family: ModelFamily) -> String {
    let mut prompt = scene.description.clone();
    if !scene.mood.is_empty() {
        prompt.push_str(&format!(" The mood is {}.", scene.mood));
    }
    if family == ModelFamily::Diffusion {
        prompt.push_str(DIFFUSION_STYLE);
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene {
            id: "scene_summit".to_string(),
            title: "Summit".to_string(),
            description: "Leaders gather at a podium.".to_string(),
            mood: "tense".to_string(),
            source_title: "summit.png".to_string(),
        }
    }

    #[test]
    fn test_prompt_carries_mood_and_style() {
        let prompt = build_prompt(&scene(), ModelFamily::Diffusion);
        assert!(prompt.starts_with("Leaders gather at a podium. The mood is tense."));
        assert!(prompt.contains("Photorealistic"));
    }

    #[test]
    fn test_generic_prompt_has_no_style_suffix() {
        let prompt = build_prompt(&scene(), ModelFamily::Generic);
        assert_eq!(prompt, "Leaders gather at a podium. The mood is tense.");
    }

    #[test]
    fn test_empty_mood_is_omitted() {
        let mut s = scene();
        s.mood = String::new();
        let prompt = build_prompt(&s, ModelFamily::Generic);
        assert_eq!(prompt, "Leaders gather at a podium.");
    }
}
