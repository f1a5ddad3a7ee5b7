//! Full-pipeline binary.

use tracing::{error, info};

use stitchup_pipeline::{logging, Pipeline, PipelineConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    logging::init();

    info!("Starting stitchup");

    let config = PipelineConfig::from_env();
    let pipeline = Pipeline::new(config);

    match pipeline.run().await {
        Ok(output) => {
            info!(output = %output.display(), "Process completed successfully");
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            std::process::exit(1);
        }
    }
}
