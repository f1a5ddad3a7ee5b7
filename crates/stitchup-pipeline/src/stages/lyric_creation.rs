//! Lyric creation: one original song text for the day's content.

use tracing::{info, warn};

use stitchup_models::{Content, Lyrics};
use stitchup_providers::ClaudeClient;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::placeholder;

/// Drives lyric composition for the whole run (a single artifact, not a
/// batch). A failed composition degrades to template lyrics rather than
/// failing the run.
pub struct LyricStage {
    client: Option<ClaudeClient>,
}

impl LyricStage {
    pub fn new(config: &PipelineConfig) -> PipelineResult<Self> {
        let client = if config.claude_api_key.is_empty() {
            None
        } else {
            Some(ClaudeClient::new(config.claude_config())?)
        };
        Ok(Self { client })
    }

    pub async fn run(&self, content: &Content) -> PipelineResult<Lyrics> {
        let Some(client) = &self.client else {
            warn!("No Claude API key configured, using template lyrics");
            return Ok(placeholder::lyrics(content));
        };

        let prompt = build_prompt(content);
        match client.compose_text(&prompt).await {
            Ok(response) => {
                let lyrics = parse_lyrics_response(&response, content);
                info!(title = %lyrics.title, "Created lyrics");
                Ok(lyrics)
            }
            Err(e) => {
                warn!("Lyric composition failed, using template lyrics: {}", e);
                Ok(placeholder::lyrics(content))
            }
        }
    }
}

fn build_prompt(content: &Content) -> String {
    let mut prompt = format!(
        "You are a songwriter. Write original song lyrics capturing the mood of today's news \
         ({}: {}).\n\n",
        content.date, content.title
    );
    for article in content.articles.iter().take(5) {
        prompt.push_str(&format!("- {}: {}\n", article.title, article.summary));
    }
    prompt.push_str(
        "\nThe lyrics must be entirely original and must not quote or imitate any existing song.\n\
         Structure them with VERSE:, CHORUS: and BRIDGE: section headers.\n\
         Start your response with a single line `TITLE: <song title>` followed by the lyrics.",
    );
    prompt
}

/// Split the model's answer into title and body. Without a recognizable
/// title line the whole response becomes the body under a default title.
fn parse_lyrics_response(response: &str, content: &Content) -> Lyrics {
    let trimmed = response.trim();
    if let Some(rest) = trimmed.strip_prefix("TITLE:") {
        if let Some((title_line, body)) = rest.split_once('\n') {
            let title = title_line.trim();
            if !title.is_empty() {
                return Lyrics {
                    title: title.to_string(),
                    content: body.trim().to_string(),
                };
            }
        }
    }

    Lyrics {
        title: format!("News of the Day: {}", content.date),
        content: trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> Content {
        Content::for_headlines("Daily Brief", "2025-03-12")
    }

    #[test]
    fn test_parse_titled_response() {
        let response = "TITLE: Morning Light\nVERSE:\nLines of the day\n";
        let lyrics = parse_lyrics_response(response, &content());
        assert_eq!(lyrics.title, "Morning Light");
        assert!(lyrics.content.starts_with("VERSE:"));
    }

    #[test]
    fn test_parse_untitled_response_gets_default_title() {
        let response = "VERSE:\nJust the words\n";
        let lyrics = parse_lyrics_response(response, &content());
        assert_eq!(lyrics.title, "News of the Day: 2025-03-12");
        assert_eq!(lyrics.content, "VERSE:\nJust the words");
    }

    #[test]
    fn test_prompt_mentions_structure_and_date() {
        let prompt = build_prompt(&content());
        assert!(prompt.contains("2025-03-12"));
        assert!(prompt.contains("VERSE:"));
        assert!(prompt.contains("TITLE:"));
    }
}
