//! Music generation: one track composed from the lyrics.

use std::path::PathBuf;

use tracing::{info, warn};
use uuid::Uuid;

use stitchup_models::{Lyrics, Music};
use stitchup_providers::SunoClient;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::placeholder;

/// Drives music generation for the run's single lyrics artifact.
///
/// Track length follows the video length so the final mux does not trail
/// off into silence.
pub struct MusicStage {
    output_dir: PathBuf,
    length_seconds: u32,
    client: Option<SunoClient>,
}

impl MusicStage {
    pub fn new(config: &PipelineConfig) -> PipelineResult<Self> {
        let client = if config.suno_api_key.is_empty() {
            None
        } else {
            Some(SunoClient::new(config.suno_config())?)
        };
        Ok(Self {
            output_dir: config.music_dir(),
            length_seconds: config.video_length_seconds,
            client,
        })
    }

    pub async fn run(&self, lyrics: &Lyrics) -> PipelineResult<Music> {
        let Some(client) = &self.client else {
            warn!("No music API key configured, generating placeholder music");
            return placeholder::music(&self.output_dir, lyrics, self.length_seconds);
        };

        let bytes = client.generate_music(lyrics).await?;
        let path = self
            .output_dir
            .join(format!("music_{}.mp3", &Uuid::new_v4().to_string()[..8]));
        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(&path, &bytes).await?;
        info!(music = %path.display(), title = %lyrics.title, "Created music track");
        Ok(Music {
            path,
            lyrics_id: lyrics.derive_id(),
            length_seconds: self.length_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_placeholder_music_when_no_credential() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let lyrics = Lyrics {
            title: "Quiet Hours".to_string(),
            content: "VERSE:\nstill\n".to_string(),
        };

        let stage = MusicStage::new(&config).unwrap();
        let music = stage.run(&lyrics).await.unwrap();

        assert_eq!(music.lyrics_id, "lyrics_quiet_hours");
        assert_eq!(music.length_seconds, 10);
        assert!(placeholder::is_placeholder(&music.path));
        assert!(music.path.exists());
    }
}
