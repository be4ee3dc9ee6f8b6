//! Query state for the headline feed.
//!
//! Search term and category are mutually exclusive, and either one pins the
//! country back to its default. Any change to the query resets the page to 1
//! and bumps a generation counter so that responses to superseded requests can
//! be recognised and dropped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::FeedConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Whether a setter actually changed the effective query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    Changed,
    Unchanged,
}

impl QueryChange {
    pub fn is_changed(self) -> bool {
        matches!(self, QueryChange::Changed)
    }
}

/// The single query dimension sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFilter {
    Search(String),
    Category(Category),
    Country(String),
}

/// Snapshot of the query taken when a fetch starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub generation: u64,
    pub page: u32,
    pub page_size: u32,
    pub filter: QueryFilter,
}

impl FeedRequest {
    /// A one-off first-page request outside any [`FeedState`], as used by the watcher.
    pub fn country(country: impl Into<String>, page_size: u32) -> Self {
        Self {
            generation: 0,
            page: 1,
            page_size,
            filter: QueryFilter::Country(country.into()),
        }
    }

    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        match &self.filter {
            QueryFilter::Search(term) => params.push(("q", term.clone())),
            QueryFilter::Category(category) => params.push(("category", category.to_string())),
            QueryFilter::Country(country) => params.push(("country", country.clone())),
        }
        params
    }
}

#[derive(Debug, Clone)]
pub struct FeedState {
    search_term: String,
    category: Option<Category>,
    country: String,
    default_country: String,
    page: u32,
    page_size: u32,
    in_flight: bool,
    generation: u64,
}

impl FeedState {
    pub fn new(config: &FeedConfig, page_size: u32) -> Self {
        Self {
            search_term: String::new(),
            category: None,
            country: config.default_country.clone(),
            default_country: config.default_country.clone(),
            page: 1,
            page_size,
            in_flight: false,
            generation: 0,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Sets the search term (trimmed), clearing the category and restoring the default country.
    pub fn set_search(&mut self, term: &str) -> QueryChange {
        let term = term.trim();
        if term == self.search_term {
            debug!(term, "search unchanged");
            return QueryChange::Unchanged;
        }
        self.search_term = term.to_owned();
        self.category = None;
        self.country = self.default_country.clone();
        self.restart();
        QueryChange::Changed
    }

    pub fn set_category(&mut self, category: Option<Category>) -> QueryChange {
        if category == self.category {
            debug!(?category, "category unchanged");
            return QueryChange::Unchanged;
        }
        self.category = category;
        self.search_term.clear();
        self.country = self.default_country.clone();
        self.restart();
        QueryChange::Changed
    }

    pub fn set_country(&mut self, country: &str) -> QueryChange {
        if country == self.country {
            debug!(country, "country unchanged");
            return QueryChange::Unchanged;
        }
        self.country = country.to_owned();
        self.search_term.clear();
        self.category = None;
        self.restart();
        QueryChange::Changed
    }

    /// Back to page 1 with the current query; outstanding responses become stale.
    pub fn restart(&mut self) {
        self.page = 1;
        self.generation += 1;
        self.in_flight = false;
    }

    /// Advances to the next page, or returns `None` while a fetch is outstanding.
    pub fn next_page(&mut self) -> Option<u32> {
        if self.in_flight {
            debug!(page = self.page, "load more rejected, request in flight");
            return None;
        }
        self.page += 1;
        Some(self.page)
    }

    fn filter(&self) -> QueryFilter {
        if !self.search_term.is_empty() {
            QueryFilter::Search(self.search_term.clone())
        } else if let Some(category) = self.category {
            QueryFilter::Category(category)
        } else {
            QueryFilter::Country(self.country.clone())
        }
    }

    pub fn to_request(&self) -> FeedRequest {
        FeedRequest {
            generation: self.generation,
            page: self.page,
            page_size: self.page_size,
            filter: self.filter(),
        }
    }

    /// Exactly one of `q`, `category` or `country`, plus `page` and `pageSize`.
    pub fn to_request_params(&self) -> Vec<(&'static str, String)> {
        self.to_request().params()
    }

    /// Marks a fetch as outstanding and returns the request to run.
    pub fn begin_request(&mut self) -> FeedRequest {
        self.in_flight = true;
        self.to_request()
    }

    /// True when nothing has changed the query or page since `request` was taken.
    pub fn is_current(&self, request: &FeedRequest) -> bool {
        request.generation == self.generation && request.page == self.page
    }

    /// Clears the in-flight flag if `request` is still the live one.
    pub fn complete(&mut self, request: &FeedRequest) {
        if self.is_current(request) {
            self.in_flight = false;
        }
    }
}
