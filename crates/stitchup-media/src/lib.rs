//! FFmpeg wrapper for the final assembly stage.

pub mod assembler;
pub mod command;
pub mod error;

pub use assembler::{Assembler, AssemblerConfig};
pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
