//! Video conversion: one short clip per still image.
//!
//! Three interchangeable converter strategies sit behind one trait: the
//! in-process client, an external script wrapper kept for parity with older
//! deployments, and the offline placeholder generator.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use stitchup_models::{Image, Video};
use stitchup_providers::RunwayClient;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::orchestrator::{run_batch, BatchOptions, GenerationMode};
use crate::placeholder;
use crate::store;

/// A strategy that turns a batch of stills into a batch of clips.
#[async_trait]
pub trait ImageToVideo: Send + Sync {
    async fn convert(&self, images: Vec<Image>) -> PipelineResult<Vec<Video>>;
}

/// Drives image-to-video conversion with the configured strategy.
pub struct VideoStage {
    converter: Box<dyn ImageToVideo>,
}

impl VideoStage {
    pub fn new(config: &PipelineConfig) -> PipelineResult<Self> {
        let converter: Box<dyn ImageToVideo> = if config.use_script_converter {
            Box::new(ScriptConverter::new(config))
        } else if config.runway_api_key.is_empty() {
            Box::new(PlaceholderConverter::new(config))
        } else {
            Box::new(RunwayConverter::new(config)?)
        };
        Ok(Self { converter })
    }

    pub async fn run(&self, images: Vec<Image>) -> PipelineResult<Vec<Video>> {
        if images.is_empty() {
            return Err(PipelineError::NoArtifactsProduced {
                stage: "video_conversion",
            });
        }
        self.converter.convert(images).await
    }
}

/// In-process converter over the asynchronous provider job API.
pub struct RunwayConverter {
    client: RunwayClient,
    output_dir: PathBuf,
    video_length: u32,
    options: BatchOptions,
}

impl RunwayConverter {
    pub fn new(config: &PipelineConfig) -> PipelineResult<Self> {
        Ok(Self {
            client: RunwayClient::new(config.runway_config())?,
            output_dir: config.videos_dir(),
            video_length: config.video_length_seconds,
            options: BatchOptions {
                stage: "video_conversion",
                mode: GenerationMode::Real,
                item_delay: config.item_delay,
                deadline: config.stage_deadline,
            },
        })
    }

    fn video_path(&self, image: &Image) -> PathBuf {
        let stem = image
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let filename = format!("video_{}_{}.mp4", stem, &Uuid::new_v4().to_string()[..8]);
        self.output_dir.join(filename)
    }
}

#[async_trait]
impl ImageToVideo for RunwayConverter {
    async fn convert(&self, images: Vec<Image>) -> PipelineResult<Vec<Video>> {
        run_batch(&self.options, images, |image| async move {
            let bytes = tokio::fs::read(&image.path).await?;
            let video_bytes = self.client.generate_video(&bytes, &image.description).await?;
            let path = self.video_path(&image);
            tokio::fs::create_dir_all(&self.output_dir).await?;
            tokio::fs::write(&path, &video_bytes).await?;
            info!(video = %path.display(), image = %image.scene_id, "Created video");
            Ok(Video {
                path,
                image_id: image.scene_id,
                length_seconds: self.video_length,
            })
        })
        .await
    }
}

/// Wrapper around the legacy external converter script.
///
/// The script converts the whole directory in one invocation and writes its
/// results to `videos.json` in the output directory.
pub struct ScriptConverter {
    command: String,
    script: PathBuf,
    output_dir: PathBuf,
    video_length: u32,
    api_key: String,
}

impl ScriptConverter {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            command: config.converter_command.clone(),
            script: config.converter_script.clone(),
            output_dir: config.videos_dir(),
            video_length: config.video_length_seconds,
            api_key: config.runway_api_key.clone(),
        }
    }
}

#[async_trait]
impl ImageToVideo for ScriptConverter {
    async fn convert(&self, images: Vec<Image>) -> PipelineResult<Vec<Video>> {
        which::which(&self.command)
            .map_err(|_| PipelineError::ScriptFailed(format!("{} not installed", self.command)))?;
        if !self.script.exists() {
            return Err(PipelineError::ScriptNotFound(self.script.clone()));
        }

        // The script scans one directory; all images of a batch live there
        let input_dir = images[0]
            .path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut command = tokio::process::Command::new(&self.command);
        command
            .arg(&self.script)
            .arg("--input-dir")
            .arg(&input_dir)
            .arg("--output-dir")
            .arg(&self.output_dir)
            .arg("--video-length")
            .arg(self.video_length.to_string())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if !self.api_key.is_empty() {
            command.arg("--api-key").arg(&self.api_key);
        }

        info!(script = %self.script.display(), "Running external converter script");
        let status = command.status().await?;
        if !status.success() {
            return Err(PipelineError::ScriptFailed(format!(
                "exit status {}",
                status.code().unwrap_or(-1)
            )));
        }

        let videos: Vec<Video> = store::load_batch(&self.output_dir.join(store::VIDEOS_FILE))?;
        if videos.is_empty() {
            return Err(PipelineError::NoArtifactsProduced {
                stage: "video_conversion",
            });
        }
        info!(count = videos.len(), "Converter script produced videos");
        Ok(videos)
    }
}

/// Offline fallback used when no video credential is configured.
pub struct PlaceholderConverter {
    output_dir: PathBuf,
    video_length: u32,
    options: BatchOptions,
}

impl PlaceholderConverter {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            output_dir: config.videos_dir(),
            video_length: config.video_length_seconds,
            options: BatchOptions {
                stage: "video_conversion",
                mode: GenerationMode::Placeholder,
                item_delay: config.placeholder_item_delay,
                deadline: config.stage_deadline,
            },
        }
    }
}

#[async_trait]
impl ImageToVideo for PlaceholderConverter {
    async fn convert(&self, images: Vec<Image>) -> PipelineResult<Vec<Video>> {
        warn!("No video API key configured, generating placeholder videos");
        run_batch(&self.options, images, |image| async move {
            placeholder::video(&self.output_dir, &image, self.video_length)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(dir: &std::path::Path) -> PipelineConfig {
        PipelineConfig {
            output_dir: dir.to_path_buf(),
            placeholder_item_delay: Duration::from_millis(1),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_placeholder_converter_mirrors_batch() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let images: Vec<Image> = (0..3)
            .map(|i| Image {
                path: dir.path().join(format!("image_{i}.png")),
                scene_id: format!("scene_{i}"),
                description: String::new(),
            })
            .collect();

        let converter = PlaceholderConverter::new(&config);
        let videos = converter.convert(images).await.unwrap();

        assert_eq!(videos.len(), 3);
        for (i, video) in videos.iter().enumerate() {
            assert_eq!(video.image_id, format!("scene_{i}"));
            assert_eq!(video.length_seconds, 10);
            assert!(placeholder::is_placeholder(&video.path));
        }
    }

    #[tokio::test]
    async fn test_stage_rejects_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let stage = VideoStage::new(&test_config(dir.path())).unwrap();
        let err = stage.run(Vec::new()).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::NoArtifactsProduced {
                stage: "video_conversion"
            }
        ));
    }

    #[tokio::test]
    async fn test_script_converter_requires_script() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            use_script_converter: true,
            converter_command: "sh".to_string(),
            converter_script: dir.path().join("missing.js"),
            ..test_config(dir.path())
        };
        let converter = ScriptConverter::new(&config);
        let images = vec![Image {
            path: dir.path().join("a.png"),
            scene_id: "scene_a".to_string(),
            description: String::new(),
        }];

        let err = converter.convert(images).await.unwrap_err();
        assert!(matches!(err, PipelineError::ScriptNotFound(_)));
    }
}
