#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsdesk_core::{Article, FeedRequest, HeadlinesProvider, ProviderError};

pub fn article(title: &str, source: &str) -> Article {
    Article::new(title).with_source(source)
}

pub fn headlines(prefix: &str, count: usize) -> Vec<Article> {
    (0..count)
        .map(|i| article(&format!("{prefix} {i}"), "Wire"))
        .collect()
}

/// Provider returning a fixed set of articles (or failing) and recording every request.
pub struct ScriptedProvider {
    articles: Mutex<Option<Vec<Article>>>,
    requests: Mutex<Vec<FeedRequest>>,
}

impl ScriptedProvider {
    pub fn ok(articles: Vec<Article>) -> Self {
        Self {
            articles: Mutex::new(Some(articles)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            articles: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_articles(&self, articles: Option<Vec<Article>>) {
        *self.articles.lock().unwrap() = articles;
    }

    pub fn requests(&self) -> Vec<FeedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<FeedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HeadlinesProvider for ScriptedProvider {
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Article>, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.articles.lock().unwrap().clone() {
            Some(articles) => Ok(articles),
            None => Err(ProviderError::Api {
                code: "rateLimited".into(),
                message: "too many requests".into(),
            }),
        }
    }
}

pub fn temp_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "newsdesk_{label}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    dir
}

pub fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap()
        .with_timezone(&Utc)
}
