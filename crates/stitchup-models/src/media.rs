//! Generated media artifact models.
//!
//! Each derived artifact carries a weak back-reference to the upstream
//! artifact it was generated from. A back-reference that no longer matches
//! anything upstream degrades to a default description downstream, it is
//! never a hard failure.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A generated still image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub path: PathBuf,
    pub scene_id: String,
    pub description: String,
}

/// A generated video clip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub path: PathBuf,
    pub image_id: String,
    pub length_seconds: u32,
}

/// A generated music track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Music {
    pub path: PathBuf,
    pub lyrics_id: String,
    pub length_seconds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_json_round_trip() {
        let video = Video {
            path: PathBuf::from("/out/videos/video_headline_a1b2c3d4.mp4"),
            image_id: "scene_headline".to_string(),
            length_seconds: 10,
        };

        let json = serde_json::to_string(&video).unwrap();
        let back: Video = serde_json::from_str(&json).unwrap();
        assert_eq!(video, back);
    }

    #[test]
    fn test_snake_case_field_names() {
        let json = serde_json::to_value(Image::default()).unwrap();
        assert!(json.get("scene_id").is_some());
        let json = serde_json::to_value(Music::default()).unwrap();
        assert!(json.get("lyrics_id").is_some());
        assert!(json.get("length_seconds").is_some());
    }
}
