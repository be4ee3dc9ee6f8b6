use chrono::{DateTime, Utc};

use crate::article::Article;
use crate::classify::{classify, icon_for, reading_time_minutes};
use crate::feed::Category;
use crate::lists::ArticleList;
use crate::view::ViewMode;

/// Load more is only offered once the feed shows at least this many cards.
const LOAD_MORE_THRESHOLD: usize = 6;

/// Everything a renderer needs for one article.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub article: Article,
    pub category: Category,
    pub icon: &'static str,
    pub bookmarked: bool,
    pub reading_minutes: u32,
    pub published_label: String,
    pub description: String,
    pub source: String,
}

impl ArticleCard {
    pub fn new(article: &Article, bookmarks: &ArticleList, now: DateTime<Utc>) -> Self {
        let category = classify(&article.title);
        let description = article.description.as_deref().unwrap_or_default();
        Self {
            article: article.clone(),
            category,
            icon: icon_for(category),
            bookmarked: bookmarks.contains(article),
            reading_minutes: reading_time_minutes(description),
            published_label: format_published(article.published_at, now),
            description: if description.is_empty() {
                "No description available".to_owned()
            } else {
                description.to_owned()
            },
            source: article
                .source_name
                .clone()
                .unwrap_or_else(|| "Unknown source".to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub mode: ViewMode,
    pub cards: Vec<ArticleCard>,
    pub reading: Option<ArticleCard>,
    pub dark_mode: bool,
    pub bookmarks_count: usize,
    pub show_load_more: bool,
    pub loading: bool,
    pub notifications_enabled: bool,
}

impl RenderModel {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

pub(crate) fn show_load_more(mode: ViewMode, displayed: usize) -> bool {
    mode == ViewMode::Feed && displayed >= LOAD_MORE_THRESHOLD
}

/// Relative label for recent articles, calendar date for older ones.
pub fn format_published(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(published) = published else {
        return "Unknown date".to_owned();
    };
    let hours = (now - published).num_hours();
    if hours < 1 {
        "Just now".to_owned()
    } else if hours < 24 {
        format!("{hours} hours ago")
    } else {
        published.format("%b %-d, %Y").to_string()
    }
}
