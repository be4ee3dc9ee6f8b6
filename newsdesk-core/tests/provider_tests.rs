use newsdesk_core::config::ProviderConfig;
use newsdesk_core::{parse_headlines, Category, FeedRequest, HeadlinesProvider, NewsApiClient, ProviderError, QueryFilter};
use reqwest::Client;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_payload() -> &'static str {
    r#"{
      "status": "ok",
      "totalResults": 3,
      "articles": [
        {
          "source": { "id": null, "name": "Tech Daily" },
          "title": "Breaking: Major Tech Innovation Announced",
          "description": "A revolutionary new technology.",
          "url": "https://example.com/tech",
          "urlToImage": "https://example.com/tech.jpg",
          "publishedAt": "2024-01-15T10:30:00Z"
        },
        {
          "source": { "name": "Wire" },
          "title": null,
          "description": "untitled record"
        },
        {
          "source": { "name": "Wire" },
          "title": "Odd date",
          "publishedAt": "yesterday"
        }
      ]
    }"#
}

fn client_for(server: &MockServer) -> NewsApiClient {
    let config = ProviderConfig {
        base_url: server.uri(),
        api_key: "test-key".into(),
        ..ProviderConfig::default()
    };
    NewsApiClient::new(Client::new(), &config).unwrap()
}

fn category_request(page: u32) -> FeedRequest {
    FeedRequest {
        generation: 1,
        page,
        page_size: 12,
        filter: QueryFilter::Category(Category::Science),
    }
}

#[test]
fn payload_is_validated_at_the_boundary() {
    let articles = parse_headlines(sample_payload().as_bytes()).unwrap();
    assert_eq!(articles.len(), 2, "untitled record is dropped");

    let first = &articles[0];
    assert_eq!(first.source_name.as_deref(), Some("Tech Daily"));
    assert_eq!(first.image_url.as_deref(), Some("https://example.com/tech.jpg"));
    assert!(first.published_at.is_some());
    assert!(articles[1].published_at.is_none());
}

#[test]
fn error_shaped_payloads_are_errors() {
    let err = parse_headlines(
        br#"{"status":"error","code":"rateLimited","message":"You have made too many requests"}"#,
    )
    .unwrap_err();
    assert!(matches!(err, ProviderError::Api { ref code, .. } if code == "rateLimited"));

    let err = parse_headlines(br#"{"errors":["You did not provide an API key."]}"#).unwrap_err();
    assert!(matches!(err, ProviderError::Api { .. }));

    assert!(matches!(parse_headlines(b"<html>"), Err(ProviderError::Decode(_))));
}

#[tokio::test]
async fn fetch_sends_query_and_parses_articles() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .and(query_param("apiKey", "test-key"))
        .and(query_param("category", "science"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "12"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(sample_payload()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let articles = client_for(&server).fetch(&category_request(2)).await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Breaking: Major Tech Innovation Announced");
}

#[tokio::test]
async fn rate_limit_response_is_reported_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(429).set_body_string(
            r#"{"status":"error","code":"rateLimited","message":"slow down"}"#,
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch(&category_request(1)).await.unwrap_err();
    assert!(matches!(err, ProviderError::Api { ref message, .. } if message == "slow down"));
}

#[tokio::test]
async fn non_json_failure_is_reported_as_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch(&category_request(1)).await.unwrap_err();
    assert!(matches!(err, ProviderError::Status(503)));
}

#[test]
fn endpoint_joins_base_url_and_path() {
    let config = ProviderConfig {
        base_url: "https://news.example.com/v2/".into(),
        ..ProviderConfig::default()
    };
    let client = NewsApiClient::from_config(&config).unwrap();
    assert_eq!(client.endpoint().as_str(), "https://news.example.com/v2/top-headlines");

    let bad = ProviderConfig {
        base_url: "not a url".into(),
        ..ProviderConfig::default()
    };
    assert!(matches!(NewsApiClient::new(Client::new(), &bad), Err(ProviderError::Url(_))));
}
