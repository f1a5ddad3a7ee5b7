//! The seven-step pipeline driver.

use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use stitchup_media::Assembler;
use stitchup_models::Content;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::stages::{ImageStage, LyricStage, MusicStage, SceneStage, VideoStage};
use crate::store::{self, ArtifactStore};

/// Runs the seven stages strictly in order, threading the output of each
/// into the next and persisting every intermediate batch.
pub struct Pipeline {
    config: PipelineConfig,
    store: ArtifactStore,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let store = ArtifactStore::new(config.output_dir.clone());
        Self { config, store }
    }

    /// Run the whole pipeline and return the final output path.
    pub async fn run(&self) -> PipelineResult<PathBuf> {
        info!("Step 1: Extracting content");
        let content = self.extract_content();

        info!("Step 2: Generating scene descriptions");
        let scenes = SceneStage::new(&self.config)?.run().await?;
        self.store.save(store::SCENES_FILE, &scenes)?;

        info!("Step 3: Creating images");
        let images = ImageStage::new(&self.config)?.run(scenes).await?;
        self.store.save(store::IMAGES_FILE, &images)?;

        info!("Step 4: Converting images to videos");
        let videos = VideoStage::new(&self.config)?.run(images).await?;
        self.store.save(store::VIDEOS_FILE, &videos)?;

        info!("Step 5: Creating lyrics");
        let lyrics = LyricStage::new(&self.config)?.run(&content).await?;
        self.store.save(store::LYRICS_FILE, std::slice::from_ref(&lyrics))?;

        info!("Step 6: Generating music");
        let music = MusicStage::new(&self.config)?.run(&lyrics).await?;
        self.store.save(store::MUSIC_FILE, std::slice::from_ref(&music))?;

        info!("Step 7: Assembling final output");
        let assembler = Assembler::new(self.config.assembler_config());
        let output_path = assembler.assemble(&videos, &music).await?;

        info!(output = %output_path.display(), "Pipeline completed");
        Ok(output_path)
    }

    /// The headline-image flow carries no scraped articles; the content
    /// record only anchors the run's title and date.
    fn extract_content(&self) -> Content {
        let date = Utc::now().format("%Y-%m-%d").to_string();
        let title = format!("News Headlines {date}");
        Content::for_headlines(title, date)
    }
}
