//! Standalone image-creation binary: `scenes.json` to `images.json`.

use tracing::{error, info};

use stitchup_models::Scene;
use stitchup_pipeline::stages::ImageStage;
use stitchup_pipeline::store::{ArtifactStore, IMAGES_FILE, SCENES_FILE};
use stitchup_pipeline::{logging, PipelineConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let config = PipelineConfig::from_env();
    let store = ArtifactStore::new(config.output_dir.clone());

    let scenes: Vec<Scene> = match store.load(SCENES_FILE) {
        Ok(scenes) => scenes,
        Err(e) => {
            error!("Failed to load scenes: {}", e);
            std::process::exit(1);
        }
    };
    info!(count = scenes.len(), "Loaded scenes");

    let stage = match ImageStage::new(&config) {
        Ok(stage) => stage,
        Err(e) => {
            error!("Failed to create image stage: {}", e);
            std::process::exit(1);
        }
    };

    let images = match stage.run(scenes).await {
        Ok(images) => images,
        Err(e) => {
            error!("Image creation failed: {}", e);
            std::process::exit(1);
        }
    };

    match store.save(IMAGES_FILE, &images) {
        Ok(path) => info!(count = images.len(), file = %path.display(), "Saved images"),
        Err(e) => {
            error!("Failed to save images: {}", e);
            std::process::exit(1);
        }
    }
}
