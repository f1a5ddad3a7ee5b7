//! Source news content models.

use serde::{Deserialize, Serialize};

/// Extracted news content the pipeline is driven by.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub articles: Vec<Article>,
    pub date: String,
}

/// A single news article within the day's content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub url: String,
    pub published_at: String,
}

impl Content {
    /// Build a minimal content record for a headline-image batch.
    pub fn for_headlines(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            articles: Vec::new(),
            date: date.into(),
        }
    }
}
