//! Song lyrics model.

use serde::{Deserialize, Serialize};

/// Generated song lyrics.
///
/// `content` is free text that follows the VERSE/CHORUS/BRIDGE section
/// header convention. The headers are a structural convention for the
/// music provider, not a parsed grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyrics {
    pub title: String,
    pub content: String,
}

impl Lyrics {
    /// Derive the identifier used by `Music.lyrics_id` back-references.
    pub fn derive_id(&self) -> String {
        let normalized: String = self
            .title
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!("lyrics_{}", normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_id() {
        let lyrics = Lyrics {
            title: "News of the Day: 2025-03-12".to_string(),
            content: String::new(),
        };
        assert_eq!(lyrics.derive_id(), "lyrics_news_of_the_day__2025_03_12");
    }
}
