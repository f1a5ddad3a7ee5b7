//! Scene generation: one visual scene description per headline image.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use stitchup_models::Scene;
use stitchup_providers::ClaudeClient;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::orchestrator::{run_batch, BatchOptions, GenerationMode};
use crate::placeholder;

const SCENE_PROMPT: &str = "You are an expert visual director. I'm showing you a screenshot of a news headline.\n\n\
Please analyze this news headline image and generate a single detailed scene description that visually represents this story.\n\n\
Provide:\n\
1. A title that captures the essence of the news story\n\
2. A detailed visual description (150-200 words) that a text-to-image AI could use to generate a compelling image\n\
3. The mood or atmosphere of the scene (e.g., tense, hopeful, somber)\n\n\
Make the scene visually rich and emotionally impactful. Focus on creating imagery that tells the story without text.\n\n\
Format your response as a JSON object with \"title\", \"description\", and \"mood\" fields.";

/// Drives scene generation over a directory of headline images.
pub struct SceneStage {
    input_dir: PathBuf,
    max_scenes: usize,
    client: Option<ClaudeClient>,
    options: BatchOptions,
}

impl SceneStage {
    pub fn new(config: &PipelineConfig) -> PipelineResult<Self> {
        let client = if config.claude_api_key.is_empty() {
            None
        } else {
            Some(ClaudeClient::new(config.claude_config())?)
        };
        let mode = if client.is_some() {
            GenerationMode::Real
        } else {
            GenerationMode::Placeholder
        };
        Ok(Self {
            input_dir: config.input_dir.clone(),
            max_scenes: config.max_scenes,
            client,
            options: BatchOptions {
                stage: "scene_generation",
                mode,
                item_delay: match mode {
                    GenerationMode::Real => config.item_delay,
                    GenerationMode::Placeholder => config.placeholder_item_delay,
                },
                deadline: config.stage_deadline,
            },
        })
    }

    /// Generate scene descriptions for every headline image in the input
    /// directory, capped at the configured maximum.
    pub async fn run(&self) -> PipelineResult<Vec<Scene>> {
        let mut files = list_image_files(&self.input_dir)?;
        if files.is_empty() {
            return Err(PipelineError::NoInputImages(self.input_dir.clone()));
        }
        files.truncate(self.max_scenes);
        info!(count = files.len(), dir = %self.input_dir.display(), "Found headline images");

        match &self.client {
            Some(client) => {
                run_batch(&self.options, files, |path| async move {
                    let image = tokio::fs::read(&path).await?;
                    let name = file_name_of(&path);
                    let response = client.describe_image(SCENE_PROMPT, &image).await?;
                    Ok(parse_scene_response(&response, &name))
                })
                .await
            }
            None => {
                warn!("No Claude API key configured, generating placeholder scenes");
                run_batch(&self.options, files, |path| async move {
                    Ok(placeholder::scene(&file_name_of(&path)))
                })
                .await
            }
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_image_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref(),
        Some("jpg" | "jpeg" | "png" | "gif" | "webp")
    )
}

fn list_image_files(dir: &Path) -> PipelineResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image_file(path))
        .collect();
    files.sort();
    Ok(files)
}

#[derive(Debug, Default, Deserialize)]
struct SceneFields {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    mood: String,
}

/// Parse the model's free-text answer into a scene.
///
/// The response is expected to contain a JSON object; when none parses, a
/// manual-extraction fallback scans for literal section markers, and the
/// whole response degrades to the description as a last resort.
pub(crate) fn parse_scene_response(response: &str, image_name: &str) -> Scene {
    let json_start = response.find('{');
    let json_end = response.rfind('}');

    if let (Some(start), Some(end)) = (json_start, json_end) {
        if end > start {
            if let Ok(fields) = serde_json::from_str::<SceneFields>(&response[start..=end]) {
                return Scene {
                    id: Scene::derive_id(image_name),
                    title: fields.title,
                    description: fields.description,
                    mood: fields.mood,
                    source_title: image_name.to_string(),
                };
            }
        }
    }

    extract_scene_manually(response, image_name)
}

fn extract_scene_manually(response: &str, image_name: &str) -> Scene {
    let default_title = format!("News Scene: {image_name}");
    let default_description = "A visual representation of a news story.";

    let mut title = default_title.clone();
    let mut description = default_description.to_string();
    let mut mood = "neutral".to_string();

    if let Some(start) = response.find("Title:") {
        let rest = &response[start + 6..];
        if let Some(end) = rest.find('\n') {
            title = rest[..end].trim().to_string();
        }
    }

    if let Some(start) = response.find("Description:") {
        let rest = &response[start + 12..];
        if let Some(end) = rest.find("Mood:") {
            description = rest[..end].trim().to_string();
        }
    }

    if let Some(start) = response.find("Mood:") {
        let rest = &response[start + 5..];
        mood = match rest.find('\n') {
            Some(end) => rest[..end].trim().to_string(),
            None => rest.trim().to_string(),
        };
    }

    // Nothing recognizable, keep the whole answer as the description
    if title == default_title && description == default_description {
        description = response.trim().to_string();
    }

    Scene {
        id: Scene::derive_id(image_name),
        title,
        description,
        mood,
        source_title: image_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_response() {
        let response = r#"Here is the scene:
{"title": "Summit", "description": "Leaders gather.", "mood": "tense"}
Hope that helps."#;

        let scene = parse_scene_response(response, "summit.png");
        assert_eq!(scene.id, "scene_summit");
        assert_eq!(scene.title, "Summit");
        assert_eq!(scene.description, "Leaders gather.");
        assert_eq!(scene.mood, "tense");
        assert_eq!(scene.source_title, "summit.png");
    }

    #[test]
    fn test_parse_marker_fallback() {
        let response = "Title: Flood Warning\nDescription: A river bursting its banks. Mood: somber";
        let scene = parse_scene_response(response, "flood.png");
        assert_eq!(scene.title, "Flood Warning");
        assert_eq!(scene.description, "A river bursting its banks.");
        assert_eq!(scene.mood, "somber");
    }

    #[test]
    fn test_parse_unstructured_response_becomes_description() {
        let response = "A dramatic shot of a rocket launch at dawn.";
        let scene = parse_scene_response(response, "launch.png");
        assert_eq!(scene.title, "News Scene: launch.png");
        assert_eq!(scene.description, response);
        assert_eq!(scene.mood, "neutral");
    }

    #[test]
    fn test_malformed_json_falls_back_to_markers() {
        let response = "{not json at all} Title: Rescue\nDescription: Crews at work. Mood: urgent";
        let scene = parse_scene_response(response, "rescue.png");
        assert_eq!(scene.title, "Rescue");
        assert_eq!(scene.mood, "urgent");
    }

    #[test]
    fn test_is_image_file_extensions() {
        assert!(is_image_file(Path::new("a.PNG")));
        assert!(is_image_file(Path::new("b.jpeg")));
        assert!(!is_image_file(Path::new("c.txt")));
        assert!(!is_image_file(Path::new("no_extension")));
    }

    #[test]
    fn test_list_image_files_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.jpg", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let files = list_image_files(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }
}
