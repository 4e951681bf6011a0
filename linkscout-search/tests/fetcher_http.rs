//! `HttpFetcher` against a local mock server: status handling, headers, and
//! timeouts.

use linkscout_search::{Fetcher, HttpFetcher, SearchConfig, SearchError};
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config() -> SearchConfig {
    SearchConfig {
        timeout_seconds: 2,
        ..Default::default()
    }
}

#[tokio::test]
async fn ok_response_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust async"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>results</html>"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&config()).expect("client");
    let body = fetcher
        .fetch(&format!("{}/search?q=rust%20async", server.uri()))
        .await
        .unwrap_or_else(|e| panic!("Expected Ok, got Err: {e}"));
    assert_eq!(body, "<html>results</html>");
}

#[tokio::test]
async fn non_200_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&config()).expect("client");
    let err = fetcher
        .fetch(&format!("{}/missing", server.uri()))
        .await
        .expect_err("404 must fail");
    assert!(matches!(err, SearchError::Fetch(_)), "got: {err:?}");
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn other_success_codes_are_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&config()).expect("client");
    let result = fetcher.fetch(&server.uri()).await;
    assert!(matches!(result, Err(SearchError::Fetch(_))));
}

#[tokio::test]
async fn sends_browser_headers_and_custom_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "LinkscoutTest/1.0"))
        .and(header("accept-language", "en-US,en;q=0.5"))
        .and(header("dnt", "1"))
        .and(header_exists("sec-fetch-mode"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let config = SearchConfig {
        user_agent: Some("LinkscoutTest/1.0".into()),
        ..config()
    };
    let fetcher = HttpFetcher::new(&config).expect("client");
    let body = fetcher.fetch(&server.uri()).await.expect("headers matched");
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = SearchConfig {
        timeout_seconds: 1,
        ..Default::default()
    };
    let fetcher = HttpFetcher::new(&config).expect("client");
    let result = fetcher.fetch(&server.uri()).await;
    assert!(matches!(result, Err(SearchError::Fetch(_))));
}

#[tokio::test]
async fn connection_refused_is_a_fetch_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let fetcher = HttpFetcher::new(&config()).expect("client");
    let result = fetcher.fetch(&uri).await;
    assert!(matches!(result, Err(SearchError::Fetch(_))));
}
