use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single headline as the rest of the crate sees it.
///
/// Only `title` is mandatory; everything else may be missing upstream and is
/// carried as `None` rather than a placeholder string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub source_name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Identity used for every dedup and lookup: exact title plus exact source name.
///
/// Matching is case-sensitive and nothing is trimmed. Two articles without a
/// source name share a key when their titles match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleKey {
    pub title: String,
    pub source_name: Option<String>,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            url: None,
            image_url: None,
            source_name: None,
            published_at: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_name = Some(source.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }

    pub fn key(&self) -> ArticleKey {
        ArticleKey {
            title: self.title.clone(),
            source_name: self.source_name.clone(),
        }
    }

    /// Cheaper than comparing two `key()` results; used in list scans.
    pub fn same_key(&self, other: &Article) -> bool {
        self.title == other.title && self.source_name == other.source_name
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSource {
    pub name: Option<String>,
}

/// Article record exactly as the headlines provider ships it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(alias = "image")]
    pub url_to_image: Option<String>,
    pub source: Option<RawSource>,
    pub published_at: Option<String>,
}

impl RawArticle {
    /// Turns a provider record into an [`Article`], dropping records without a title.
    pub fn validate(self) -> Option<Article> {
        let title = self.title.filter(|t| !t.is_empty())?;

        let published_at = self
            .published_at
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Some(Article {
            title,
            description: self.description,
            url: self.url,
            image_url: self.url_to_image,
            source_name: self.source.and_then(|s| s.name),
            published_at,
        })
    }
}
