//! Shared canned-fetcher fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use linkscout::{DeliveryMode, EventEnvelope, StreamingSession};
use linkscout_search::task::page_urls;
use linkscout_search::{Collector, Fetcher, Provider, SearchConfig, SearchError};

pub const YOUTUBE_PAGE: &str = r#"<html><body>
  <div class="yt-lockup-video">
    <a href="/watch?v=abc123"><img src="x.jpg"></a>
    <h3 class="yt-lockup-title">Rust in 100 Seconds</h3>
    <span class="video-time">2:24</span>
  </div>
</body></html>"#;

pub const YOUTUBE_MOBILE_PAGE: &str = r#"<div class="compact-media-item">
  <a href="/watch?v=m1">x</a>
  <h4 class="compact-media-item-headline">Mobile clip</h4>
  <span class="compact-media-item-metadata">10:01</span>
</div>"#;

pub const BING_PAGE: &str = r#"<ol id="b_results">
  <li class="b_algo">
    <h2><a href="https://www.rust-lang.org/">Rust Programming Language</a></h2>
    <div class="b_caption"><p>A language empowering everyone.</p></div>
  </li>
  <li class="b_algo">
    <h2><a href="https://doc.rust-lang.org/book/">The Rust Book</a></h2>
    <div class="b_caption"><p>An introductory book about Rust.</p></div>
  </li>
</ol>"#;

pub const DDG_PAGE: &str = r#"<div class="results">
  <div class="result">
    <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&rut=abc">Rust</a>
    <a class="result__snippet">Official site.</a>
  </div>
  <div class="result">
    <a class="result__a" href="https://crates.io/">crates.io</a>
    <a class="result__snippet">The Rust community registry.</a>
  </div>
</div>"#;

/// URLs the canned providers yield, in launch order.
pub const EXPECTED_URLS: [&str; 5] = [
    "https://www.youtube.com/watch?v=abc123",
    "https://www.youtube.com/watch?v=m1",
    "https://www.rust-lang.org/",
    "https://doc.rust-lang.org/book/",
    "https://crates.io/",
];

/// Serves fixed bodies for known URLs and fails everything else.
pub struct CannedFetcher {
    pages: HashMap<String, &'static str>,
}

impl CannedFetcher {
    /// Canned pages for a query, covering YouTube, YouTube Mobile (first
    /// page only), Bing and DuckDuckGo.
    pub fn for_query(query: &str) -> Self {
        let mut pages = HashMap::new();
        let mut serve = |provider: Provider, body: &'static str| {
            if let Some(url) = page_urls(provider, query).into_iter().next() {
                pages.insert(url, body);
            }
        };
        serve(Provider::YouTube, YOUTUBE_PAGE);
        serve(Provider::YouTubeMobile, YOUTUBE_MOBILE_PAGE);
        serve(Provider::Bing, BING_PAGE);
        serve(Provider::DuckDuckGo, DDG_PAGE);
        Self { pages }
    }
}

impl Fetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SearchError> {
        self.pages
            .get(url)
            .map(|body| (*body).to_owned())
            .ok_or_else(|| SearchError::Fetch(format!("{url}: HTTP 404 Not Found")))
    }
}

pub fn search_config() -> SearchConfig {
    SearchConfig {
        page_delay_ms: 0,
        custom_engine_ids: Vec::new(),
        ..Default::default()
    }
}

pub fn session(query: &str, delivery: DeliveryMode) -> StreamingSession<CannedFetcher> {
    let collector = Collector::new(CannedFetcher::for_query(query), search_config());
    StreamingSession::new(collector, delivery)
}

pub fn event_names(events: &[EventEnvelope]) -> Vec<&str> {
    events.iter().map(|e| e.event.as_str()).collect()
}

pub fn result_urls(events: &[EventEnvelope]) -> Vec<String> {
    events
        .iter()
        .filter(|e| e.event == "new_result")
        .filter_map(|e| e.payload["result"]["url"].as_str().map(str::to_owned))
        .collect()
}
