//! The five generation stages between content extraction and assembly.

pub mod image_creation;
pub mod lyric_creation;
pub mod music_generation;
pub mod scene_generation;
pub mod video_conversion;

pub use image_creation::ImageStage;
pub use lyric_creation::LyricStage;
pub use music_generation::MusicStage;
pub use scene_generation::SceneStage;
pub use video_conversion::{ImageToVideo, VideoStage};
