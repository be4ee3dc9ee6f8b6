use async_trait::async_trait;
use reqwest::{redirect, Client, ClientBuilder};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::article::{Article, RawArticle};
use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::feed::FeedRequest;

/// Source of headlines for a [`FeedRequest`].
#[async_trait]
pub trait HeadlinesProvider: Send + Sync {
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Article>, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    status: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
    code: Option<String>,
    message: Option<String>,
    errors: Option<serde_json::Value>,
}

impl HeadlinesResponse {
    fn is_error(&self) -> bool {
        self.status.as_deref() == Some("error") || self.errors.is_some()
    }

    fn into_error(self) -> ProviderError {
        let message = self
            .message
            .or_else(|| self.errors.map(|e| e.to_string()))
            .unwrap_or_default();
        ProviderError::Api {
            code: self.code.unwrap_or_else(|| "unknown".to_owned()),
            message,
        }
    }
}

/// Decodes a headlines payload, turning error-shaped payloads into [`ProviderError::Api`].
pub fn parse_headlines(bytes: &[u8]) -> Result<Vec<Article>, ProviderError> {
    let response: HeadlinesResponse = serde_json::from_slice(bytes)?;
    if response.is_error() {
        return Err(response.into_error());
    }

    let total = response.articles.len();
    let articles: Vec<Article> = response
        .articles
        .into_iter()
        .filter_map(RawArticle::validate)
        .collect();
    if articles.len() != total {
        debug!(dropped = total - articles.len(), "dropped untitled records");
    }
    Ok(articles)
}

/// NewsAPI-style `top-headlines` client.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl NewsApiClient {
    pub fn new(client: Client, config: &ProviderConfig) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(&format!(
            "{}{}",
            config.base_url.trim_end_matches('/'),
            config.endpoint
        ))?;
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = ClientBuilder::new()
            .redirect(redirect::Policy::limited(5))
            .timeout(config.request_timeout())
            .user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::new(client, config)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl HeadlinesProvider for NewsApiClient {
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<Article>, ProviderError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("apiKey", self.api_key.as_str())])
            .query(&request.params())
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            // Quota and auth failures still carry an error-shaped JSON body.
            return match serde_json::from_slice::<HeadlinesResponse>(&bytes) {
                Ok(body) if body.is_error() => Err(body.into_error()),
                _ => Err(ProviderError::Status(status.as_u16())),
            };
        }

        let articles = parse_headlines(&bytes)?;
        debug!(page = request.page, count = articles.len(), "headlines fetched");
        Ok(articles)
    }
}
