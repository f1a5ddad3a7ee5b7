//! Local placeholder-artifact generators.
//!
//! Used for the whole batch when a stage's provider credential is absent.
//! Placeholder files are clearly named as such so synthetic output is never
//! mistaken for real generation.

use std::path::Path;

use uuid::Uuid;

use stitchup_models::{Content, Image, Lyrics, Music, Scene, Video};

use crate::error::PipelineResult;

/// Lowercase a name for filenames, capped at 20 characters.
pub fn sanitize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .take(20)
        .collect()
}

fn short_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

fn write_marker(path: &Path, kind: &str, detail: &str) -> PipelineResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("placeholder {kind}: {detail}\n"))?;
    Ok(())
}

/// A scene synthesized from the source filename alone.
pub fn scene(source_filename: &str) -> Scene {
    let stem = source_filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(source_filename);
    Scene {
        id: Scene::derive_id(source_filename),
        title: format!("News Scene: {stem}"),
        description: "A visual representation of a news story.".to_string(),
        mood: "neutral".to_string(),
        source_title: source_filename.to_string(),
    }
}

pub fn image(images_dir: &Path, scene: &Scene) -> PipelineResult<Image> {
    let filename = format!(
        "placeholder_image_{}_{}.png",
        sanitize(&scene.title),
        short_id()
    );
    let path = images_dir.join(filename);
    write_marker(&path, "image", &scene.title)?;
    Ok(Image {
        path,
        scene_id: scene.id.clone(),
        description: scene.description.clone(),
    })
}

pub fn video(videos_dir: &Path, image: &Image, length_seconds: u32) -> PipelineResult<Video> {
    let filename = format!(
        "placeholder_video_{}_{}.mp4",
        sanitize(&image.scene_id),
        short_id()
    );
    let path = videos_dir.join(filename);
    write_marker(&path, "video", &image.scene_id)?;
    Ok(Video {
        path,
        image_id: image.scene_id.clone(),
        length_seconds,
    })
}

/// Template lyrics following the VERSE/CHORUS/BRIDGE convention.
pub fn lyrics(content: &Content) -> Lyrics {
    let mut body = String::new();
    body.push_str(
        "VERSE 1:\n\
         Headlines flash across the screen\n\
         Stories of a world unseen\n\
         Truth and fiction intertwine\n\
         In this modern paradigm\n\n",
    );
    body.push_str(
        "CHORUS:\n\
         This is the news of today\n\
         Moments that will fade away\n\
         But in these words we find our way\n\
         Through the stories of today\n\n",
    );
    if let Some(article) = content.articles.first() {
        body.push_str(&format!(
            "VERSE 2:\n\
             From {}\n\
             To the stories yet untold\n\
             We navigate this sea of information\n\
             As the future will unfold\n\n",
            article.title
        ));
    }
    body.push_str(
        "BRIDGE:\n\
         In a world that's changing fast\n\
         Some things are meant to last\n\
         The truth behind the words we say\n\
         Will guide us through another day\n",
    );

    Lyrics {
        title: format!("News of the Day: {}", content.date),
        content: body,
    }
}

pub fn music(music_dir: &Path, lyrics: &Lyrics, length_seconds: u32) -> PipelineResult<Music> {
    let filename = format!("placeholder_music_{}.mp3", short_id());
    let path = music_dir.join(filename);
    write_marker(&path, "music", &lyrics.title)?;
    Ok(Music {
        path,
        lyrics_id: lyrics.derive_id(),
        length_seconds,
    })
}

pub fn is_placeholder(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("placeholder_"))
        .unwrap_or(false)
}
