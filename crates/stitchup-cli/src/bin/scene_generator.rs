//! Standalone scene-generation binary: input images to `scenes.json`.

use tracing::{error, info};

use stitchup_pipeline::stages::SceneStage;
use stitchup_pipeline::store::{ArtifactStore, SCENES_FILE};
use stitchup_pipeline::{logging, PipelineConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    let config = PipelineConfig::from_env();
    let store = ArtifactStore::new(config.output_dir.clone());

    let stage = match SceneStage::new(&config) {
        Ok(stage) => stage,
        Err(e) => {
            error!("Failed to create scene stage: {}", e);
            std::process::exit(1);
        }
    };

    let scenes = match stage.run().await {
        Ok(scenes) => scenes,
        Err(e) => {
            error!("Scene generation failed: {}", e);
            std::process::exit(1);
        }
    };

    match store.save(SCENES_FILE, &scenes) {
        Ok(path) => info!(count = scenes.len(), file = %path.display(), "Saved scenes"),
        Err(e) => {
            error!("Failed to save scenes: {}", e);
            std::process::exit(1);
        }
    }
}
