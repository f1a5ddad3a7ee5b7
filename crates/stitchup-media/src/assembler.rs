//! Final assembly: concatenate video clips and mux the music track.

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use stitchup_models::{Music, Video};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Assembly configuration.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// FFmpeg executable name or path
    pub ffmpeg_path: String,
    /// Directory for the final output file
    pub output_dir: PathBuf,
    /// Per-invocation ffmpeg timeout
    pub ffmpeg_timeout_secs: u64,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            output_dir: PathBuf::from("final"),
            ffmpeg_timeout_secs: 300,
        }
    }
}

/// Combines generated clips and a music track into one output file.
pub struct Assembler {
    config: AssemblerConfig,
}

impl Assembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Concatenate `videos` in order and mux `music` underneath.
    ///
    /// Returns the path of the final output file. FFmpeg must be present
    /// on the search path; its absence is a hard failure, never a silent
    /// placeholder.
    pub async fn assemble(&self, videos: &[Video], music: &Music) -> MediaResult<PathBuf> {
        if videos.is_empty() {
            return Err(MediaError::NoInput);
        }

        which::which(&self.config.ffmpeg_path).map_err(|_| MediaError::FfmpegNotFound)?;
        std::fs::create_dir_all(&self.config.output_dir)?;

        let workdir = tempfile::tempdir()?;
        let list_path = workdir.path().join("concat.txt");
        write_concat_list(&list_path, videos)?;

        let runner = FfmpegRunner::new()
            .with_ffmpeg_path(&self.config.ffmpeg_path)
            .with_timeout(self.config.ffmpeg_timeout_secs);

        // Pass 1: concat demuxer, stream copy
        let concat_path = workdir.path().join("concat.mp4");
        let concat_cmd = FfmpegCommand::new(&concat_path)
            .input_with_args(["-f", "concat", "-safe", "0"], &list_path)
            .output_args(["-c", "copy"]);
        runner.run(&concat_cmd).await?;

        // Pass 2: mux the music track under the concatenated video
        let output_path = self.output_path();
        let mux_cmd = FfmpegCommand::new(&output_path)
            .input(&concat_path)
            .input(&music.path)
            .map("0:v:0")
            .map("1:a:0")
            .video_codec("copy")
            .audio_codec("aac")
            .shortest();
        runner.run(&mux_cmd).await?;

        info!(
            clips = videos.len(),
            output = %output_path.display(),
            "Assembled final output"
        );
        Ok(output_path)
    }

    fn output_path(&self) -> PathBuf {
        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let suffix = &Uuid::new_v4().to_string()[..8];
        self.config
            .output_dir
            .join(format!("final_output_{timestamp}_{suffix}.mp4"))
    }
}

/// Write an ffmpeg concat-demuxer list file.
fn write_concat_list(path: &std::path::Path, videos: &[Video]) -> MediaResult<()> {
    let mut file = std::fs::File::create(path)?;
    for video in videos {
        // Single quotes in paths must be escaped for the concat demuxer
        let escaped = video.path.to_string_lossy().replace('\'', r"'\''");
        writeln!(file, "file '{escaped}'")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_list_format() {
        let dir = tempfile::tempdir().unwrap();
        let list = dir.path().join("concat.txt");
        let videos = vec![
            Video {
                path: PathBuf::from("/out/videos/a.mp4"),
                image_id: "scene_a".to_string(),
                length_seconds: 10,
            },
            Video {
                path: PathBuf::from("/out/videos/b.mp4"),
                image_id: "scene_b".to_string(),
                length_seconds: 10,
            },
        ];

        write_concat_list(&list, &videos).unwrap();
        let contents = std::fs::read_to_string(&list).unwrap();
        assert_eq!(contents, "file '/out/videos/a.mp4'\nfile '/out/videos/b.mp4'\n");
    }

    #[tokio::test]
    async fn test_assemble_rejects_empty_batch() {
        let assembler = Assembler::new(AssemblerConfig::default());
        let music = Music::default();
        let err = assembler.assemble(&[], &music).await.unwrap_err();
        assert!(matches!(err, MediaError::NoInput));
    }
}
