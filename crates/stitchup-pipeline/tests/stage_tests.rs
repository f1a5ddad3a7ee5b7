//! End-to-end stage tests in offline placeholder mode.

use std::time::Duration;

use stitchup_models::{Content, Scene};
use stitchup_pipeline::stages::{ImageStage, LyricStage, MusicStage, SceneStage, VideoStage};
use stitchup_pipeline::{PipelineConfig, PipelineError};

fn offline_config(input: &std::path::Path, output: &std::path::Path) -> PipelineConfig {
    PipelineConfig {
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        placeholder_item_delay: Duration::from_millis(1),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_three_images_no_credentials_yield_three_placeholder_videos() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    for name in ["alpha.png", "beta story.jpg", "gamma-news.png"] {
        std::fs::write(input.path().join(name), b"not really an image").unwrap();
    }
    let config = offline_config(input.path(), output.path());

    let scenes = SceneStage::new(&config).unwrap().run().await.unwrap();
    assert_eq!(scenes.len(), 3);

    let images = ImageStage::new(&config).unwrap().run(scenes).await.unwrap();
    assert_eq!(images.len(), 3);

    let videos = VideoStage::new(&config)
        .unwrap()
        .run(images)
        .await
        .unwrap();
    assert_eq!(videos.len(), 3);

    // Each video references its source image's derived scene id; files are
    // sorted, so the order is deterministic.
    let ids: Vec<&str> = videos.iter().map(|v| v.image_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["scene_alpha", "scene_beta_story", "scene_gamma_news"]
    );
    for video in &videos {
        assert!(video
            .path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("placeholder_"));
        assert!(video.path.exists());
    }
}

#[tokio::test]
async fn test_scene_stage_respects_max_scenes() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    for i in 0..8 {
        std::fs::write(input.path().join(format!("img_{i}.png")), b"x").unwrap();
    }
    let config = PipelineConfig {
        max_scenes: 3,
        ..offline_config(input.path(), output.path())
    };

    let scenes = SceneStage::new(&config).unwrap().run().await.unwrap();
    assert_eq!(scenes.len(), 3);
}

#[tokio::test]
async fn test_scene_stage_fails_on_empty_input_dir() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let config = offline_config(input.path(), output.path());

    let err = SceneStage::new(&config).unwrap().run().await.unwrap_err();
    assert!(matches!(err, PipelineError::NoInputImages(_)));
}

#[tokio::test]
async fn test_offline_lyrics_and_music_are_marked_placeholder() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    let config = offline_config(input.path(), output.path());
    let content = Content::for_headlines("News Headlines 2025-03-12", "2025-03-12");

    let lyrics = LyricStage::new(&config)
        .unwrap()
        .run(&content)
        .await
        .unwrap();
    assert_eq!(lyrics.title, "News of the Day: 2025-03-12");
    assert!(lyrics.content.contains("CHORUS:"));

    let music = MusicStage::new(&config).unwrap().run(&lyrics).await.unwrap();
    assert_eq!(music.lyrics_id, lyrics.derive_id());
    assert!(music
        .path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("placeholder_"));
}

#[tokio::test]
async fn test_image_stage_preserves_scene_back_references() {
    let output = tempfile::tempdir().unwrap();
    let input = tempfile::tempdir().unwrap();
    let config = offline_config(input.path(), output.path());
    let scenes = vec![
        Scene {
            id: "scene_one".to_string(),
            title: "One".to_string(),
            description: "First scene.".to_string(),
            mood: "calm".to_string(),
            source_title: "one.png".to_string(),
        },
        Scene {
            id: "scene_two".to_string(),
            title: "Two".to_string(),
            description: "Second scene.".to_string(),
            mood: "tense".to_string(),
            source_title: "two.png".to_string(),
        },
    ];

    let images = ImageStage::new(&config).unwrap().run(scenes).await.unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].scene_id, "scene_one");
    assert_eq!(images[0].description, "First scene.");
    assert_eq!(images[1].scene_id, "scene_two");
}
