//! Standalone video-conversion binary: `images.json` to `videos.json`.

use tracing::{error, info};

use stitchup_models::Image;
use stitchup_pipeline::stages::VideoStage;
use stitchup_pipeline::store::{ArtifactStore, IMAGES_FILE, VIDEOS_FILE};
use stitchup_pipeline::{logging, PipelineConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let config = PipelineConfig::from_env();
    let store = ArtifactStore::new(config.output_dir.clone());

    let images: Vec<Image> = match store.load(IMAGES_FILE) {
        Ok(images) => images,
        Err(e) => {
            error!("Failed to load images: {}", e);
            std::process::exit(1);
        }
    };
    info!(count = images.len(), "Loaded images");

    let stage = match VideoStage::new(&config) {
        Ok(stage) => stage,
        Err(e) => {
            error!("Failed to create video stage: {}", e);
            std::process::exit(1);
        }
    };

    let videos = match stage.run(images).await {
        Ok(videos) => videos,
        Err(e) => {
            error!("Video conversion failed: {}", e);
            std::process::exit(1);
        }
    };

    match store.save(VIDEOS_FILE, &videos) {
        Ok(path) => info!(count = videos.len(), file = %path.display(), "Saved videos"),
        Err(e) => {
            error!("Failed to save videos: {}", e);
            std::process::exit(1);
        }
    }
}
