//! Pipeline configuration.
//!
//! One explicit value constructed at process start and passed into every
//! component constructor; no component reads environment state directly.

use std::path::PathBuf;
use std::time::Duration;

use stitchup_media::AssemblerConfig;
use stitchup_providers::{
    ClaudeConfig, HuggingFaceConfig, PollerConfig, RunwayConfig, SunoConfig,
};

/// Full pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory of source headline images
    pub input_dir: PathBuf,
    /// Root output directory; per-stage subdirectories derive from it
    pub output_dir: PathBuf,
    /// Cap on scenes carried past scene generation
    pub max_scenes: usize,
    /// Requested clip length in seconds
    pub video_length_seconds: u32,
    /// Pacing delay between real provider calls
    pub item_delay: Duration,
    /// Pacing delay between placeholder generations
    pub placeholder_item_delay: Duration,
    /// Overall deadline per batch stage
    pub stage_deadline: Duration,

    /// Claude credential and model (scene + lyric stages)
    pub claude_api_key: String,
    pub claude_model: String,
    /// Hugging Face credential and model (image stage)
    pub huggingface_api_key: String,
    pub huggingface_model: String,
    /// Runway credential and model (video stage)
    pub runway_api_key: String,
    pub runway_model: String,
    /// Suno credential (music stage)
    pub suno_api_key: String,

    /// Status-poll interval for video jobs
    pub poll_interval: Duration,
    /// Status-poll interval for music jobs
    pub music_poll_interval: Duration,
    /// Status-poll attempt ceiling
    pub poll_max_attempts: u32,

    /// Use the external converter script instead of the in-process client
    pub use_script_converter: bool,
    /// Interpreter for the converter script
    pub converter_command: String,
    /// Path to the converter script
    pub converter_script: PathBuf,

    /// FFmpeg executable for final assembly
    pub ffmpeg_path: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("stitchup-output"),
            max_scenes: 5,
            video_length_seconds: 10,
            item_delay: Duration::from_secs(2),
            placeholder_item_delay: Duration::from_millis(100),
            stage_deadline: Duration::from_secs(300),
            claude_api_key: String::new(),
            claude_model: "claude-3-opus-20240229".to_string(),
            huggingface_api_key: String::new(),
            huggingface_model: "stabilityai/stable-diffusion-xl-base-1.0".to_string(),
            runway_api_key: String::new(),
            runway_model: "gen3a_turbo".to_string(),
            suno_api_key: String::new(),
            poll_interval: Duration::from_secs(5),
            music_poll_interval: Duration::from_secs(10),
            poll_max_attempts: 60,
            use_script_converter: false,
            converter_command: "node".to_string(),
            converter_script: PathBuf::from("scripts/video-converter.js"),
            ffmpeg_path: "ffmpeg".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables, defaulting every field.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            input_dir: env_path("INPUT_DIR", defaults.input_dir),
            output_dir: env_path("OUTPUT_DIR", defaults.output_dir),
            max_scenes: env_parse("MAX_SCENES", defaults.max_scenes),
            video_length_seconds: env_parse("VIDEO_LENGTH_SECS", defaults.video_length_seconds),
            item_delay: Duration::from_millis(env_parse("ITEM_DELAY_MS", 2000)),
            placeholder_item_delay: Duration::from_millis(env_parse(
                "PLACEHOLDER_ITEM_DELAY_MS",
                100,
            )),
            stage_deadline: Duration::from_secs(env_parse("STAGE_DEADLINE_SECS", 300)),
            claude_api_key: env_string("CLAUDE_API_KEY", defaults.claude_api_key),
            claude_model: env_string("CLAUDE_MODEL", defaults.claude_model),
            huggingface_api_key: env_string("HUGGINGFACE_API_KEY", defaults.huggingface_api_key),
            huggingface_model: env_string("HUGGINGFACE_MODEL", defaults.huggingface_model),
            runway_api_key: env_string("RUNWAY_API_KEY", defaults.runway_api_key),
            runway_model: env_string("RUNWAY_MODEL", defaults.runway_model),
            suno_api_key: env_string("SUNO_API_KEY", defaults.suno_api_key),
            poll_interval: Duration::from_secs(env_parse("POLL_INTERVAL_SECS", 5)),
            music_poll_interval: Duration::from_secs(env_parse("MUSIC_POLL_INTERVAL_SECS", 10)),
            poll_max_attempts: env_parse("POLL_MAX_ATTEMPTS", defaults.poll_max_attempts),
            use_script_converter: std::env::var("USE_SCRIPT_CONVERTER")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            converter_command: env_string("CONVERTER_COMMAND", defaults.converter_command),
            converter_script: env_path("CONVERTER_SCRIPT", defaults.converter_script),
            ffmpeg_path: env_string("FFMPEG_PATH", defaults.ffmpeg_path),
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.output_dir.join("images")
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.output_dir.join("videos")
    }

    pub fn music_dir(&self) -> PathBuf {
        self.output_dir.join("music")
    }

    pub fn final_dir(&self) -> PathBuf {
        self.output_dir.join("final")
    }

    pub fn claude_config(&self) -> ClaudeConfig {
        ClaudeConfig {
            api_key: self.claude_api_key.clone(),
            model: self.claude_model.clone(),
            ..Default::default()
        }
    }

    pub fn huggingface_config(&self) -> HuggingFaceConfig {
        HuggingFaceConfig {
            api_key: self.huggingface_api_key.clone(),
            model: self.huggingface_model.clone(),
            ..Default::default()
        }
    }

    pub fn runway_config(&self) -> RunwayConfig {
        RunwayConfig {
            api_key: self.runway_api_key.clone(),
            model: self.runway_model.clone(),
            poller: PollerConfig {
                interval: self.poll_interval,
                max_attempts: self.poll_max_attempts,
            },
            ..Default::default()
        }
    }

    pub fn suno_config(&self) -> SunoConfig {
        SunoConfig {
            api_key: self.suno_api_key.clone(),
            poller: PollerConfig {
                interval: self.music_poll_interval,
                max_attempts: self.poll_max_attempts,
            },
            ..Default::default()
        }
    }

    pub fn assembler_config(&self) -> AssemblerConfig {
        AssemblerConfig {
            ffmpeg_path: self.ffmpeg_path.clone(),
            output_dir: self.final_dir(),
            ..Default::default()
        }
    }
}

fn env_string(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn env_path(key: &str, default: PathBuf) -> PathBuf {
    std::env::var(key).map(PathBuf::from).unwrap_or(default)
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_scenes, 5);
        assert_eq!(config.video_length_seconds, 10);
        assert_eq!(config.poll_max_attempts, 60);
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.music_poll_interval, Duration::from_secs(10));
        assert!(!config.use_script_converter);
    }

    #[test]
    fn test_derived_directories() {
        let config = PipelineConfig {
            output_dir: PathBuf::from("/out"),
            ..Default::default()
        };
        assert_eq!(config.images_dir(), PathBuf::from("/out/images"));
        assert_eq!(config.videos_dir(), PathBuf::from("/out/videos"));
        assert_eq!(config.music_dir(), PathBuf::from("/out/music"));
        assert_eq!(config.final_dir(), PathBuf::from("/out/final"));
    }

    #[test]
    fn test_provider_configs_carry_poller_tunables() {
        let config = PipelineConfig {
            poll_interval: Duration::from_secs(7),
            poll_max_attempts: 12,
            ..Default::default()
        };
        let runway = config.runway_config();
        assert_eq!(runway.poller.interval, Duration::from_secs(7));
        assert_eq!(runway.poller.max_attempts, 12);
    }
}
