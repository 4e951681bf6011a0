//! One provider's share of a search: which pages to fetch, and how to turn
//! them into results.

use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::extractor::{Extractor, PageContext};
use crate::http::Fetcher;
use crate::types::{Provider, SearchResult};

/// Page offsets requested from the Bing video endpoints.
const BING_VIDEO_OFFSETS: [u32; 4] = [0, 25, 50, 75];

/// Pages requested from the mobile YouTube site.
const YOUTUBE_MOBILE_PAGES: std::ops::RangeInclusive<u32> = 1..=3;

/// Search URLs for `provider`, in fetch order.
///
/// Custom search engines need an engine id and are planned with
/// [`ProviderTask::custom_engine`] instead, so they get no pages here.
pub fn page_urls(provider: Provider, query: &str) -> Vec<String> {
    let q = urlencoding::encode(query);
    match provider {
        Provider::YouTube => vec![format!("https://www.youtube.com/results?search_query={q}")],
        Provider::YouTubeMobile => YOUTUBE_MOBILE_PAGES
            .map(|page| format!("https://m.youtube.com/results?search_query={q}&page={page}"))
            .collect(),
        Provider::BingVideos => BING_VIDEO_OFFSETS
            .iter()
            .map(|first| format!("https://www.bing.com/videos/search?q={q}&first={first}"))
            .collect(),
        Provider::BingVideosUk => BING_VIDEO_OFFSETS
            .iter()
            .map(|first| format!("https://www.bing.co.uk/videos/search?q={q}&first={first}"))
            .collect(),
        // The landing page takes no query.
        Provider::GoogleVideoHome => vec!["https://www.google.com/videohp".to_owned()],
        Provider::GoogleVideos => vec![format!("https://www.google.com/videohp?q={q}")],
        Provider::Google => vec![format!("https://www.google.com/search?q={q}")],
        Provider::Bing => vec![format!("https://www.bing.com/search?q={q}")],
        Provider::DuckDuckGo => vec![format!("https://html.duckduckgo.com/html/?q={q}")],
        Provider::Yahoo => vec![format!("https://search.yahoo.com/search?p={q}")],
        Provider::Brave => vec![format!("https://search.brave.com/search?q={q}")],
        Provider::Qwant => vec![format!("https://www.qwant.com/?q={q}&t=web")],
        Provider::Ecosia => vec![format!("https://www.ecosia.org/search?q={q}")],
        Provider::GoogleScholar => vec![format!("https://scholar.google.com/scholar?q={q}")],
        Provider::SemanticScholar => {
            vec![format!("https://www.semanticscholar.org/search?q={q}")]
        }
        Provider::Base => vec![format!(
            "https://www.base-search.net/Search/Results?lookfor={q}"
        )],
        Provider::Arxiv => vec![format!(
            "https://arxiv.org/search/?query={q}&searchtype=all"
        )],
        Provider::GitHub => vec![format!(
            "https://github.com/search?q={q}&type=repositories"
        )],
        Provider::WolframAlpha => vec![format!("https://www.wolframalpha.com/input?i={q}")],
        Provider::InternetArchive => vec![format!("https://archive.org/search?query={q}")],
        Provider::MetaGer => vec![format!(
            "https://metager.org/meta/meta.ger3?eingabe={q}"
        )],
        Provider::GoogleCse => Vec::new(),
    }
}

/// A planned unit of work for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderTask {
    provider: Provider,
    /// Engine id for custom search engine tasks.
    engine_id: Option<String>,
    pages: Vec<String>,
    cap: usize,
}

impl ProviderTask {
    /// Plan the pages for a regular provider.
    pub fn new(provider: Provider, query: &str, config: &SearchConfig) -> Self {
        Self {
            provider,
            engine_id: None,
            pages: page_urls(provider, query),
            cap: config.cap_for(provider),
        }
    }

    /// Plan a Google Programmable Search query against engine `engine_id`.
    pub fn custom_engine(engine_id: &str, query: &str, config: &SearchConfig) -> Self {
        let page = format!(
            "https://cse.google.com/cse?cx={engine_id}&q={}",
            urlencoding::encode(query)
        );
        Self {
            provider: Provider::GoogleCse,
            engine_id: Some(engine_id.to_owned()),
            pages: vec![page],
            cap: config.cap_for(Provider::GoogleCse),
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn engine_id(&self) -> Option<&str> {
        self.engine_id.as_deref()
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Log label: the provider id, plus the engine id for custom engines.
    pub fn label(&self) -> String {
        match &self.engine_id {
            Some(id) => format!("{}:{id}", self.provider),
            None => self.provider.to_string(),
        }
    }

    /// Fetch and extract every page in order.
    ///
    /// Pages are fetched strictly sequentially with `page_delay` between
    /// consecutive fetches. Fetching stops once `cap` results are held. A
    /// page that fails to fetch or extract is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Provider`] only if every page failed.
    pub async fn run<F: Fetcher>(
        &self,
        fetcher: &F,
        extractor: &dyn Extractor,
        page_delay: Duration,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let label = self.label();
        let mut results: Vec<SearchResult> = Vec::new();
        let mut attempted = 0usize;
        let mut failed = 0usize;
        let mut last_error: Option<SearchError> = None;

        for (index, url) in self.pages.iter().enumerate() {
            if results.len() >= self.cap {
                break;
            }
            if index > 0 && !page_delay.is_zero() {
                tokio::time::sleep(page_delay).await;
            }
            attempted += 1;

            let body = match fetcher.fetch(url).await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(provider = %label, url = %url, error = %err, "page fetch failed");
                    failed += 1;
                    last_error = Some(err);
                    continue;
                }
            };

            let page = PageContext {
                page_url: url,
                limit: self.cap - results.len(),
            };
            match extractor.extract(&body, &page) {
                Ok(extraction) => {
                    tracing::debug!(
                        provider = %label,
                        url = %url,
                        count = extraction.results.len(),
                        skipped = extraction.failures.len(),
                        "page extracted"
                    );
                    results.extend(extraction.results);
                }
                Err(err) => {
                    tracing::warn!(provider = %label, url = %url, error = %err, "page extraction failed");
                    failed += 1;
                    last_error = Some(err);
                }
            }
        }

        if attempted > 0 && failed == attempted {
            let reason = last_error.map(|e| e.to_string()).unwrap_or_default();
            return Err(SearchError::Provider(format!(
                "{label}: all {attempted} page(s) failed, last error: {reason}"
            )));
        }

        results.truncate(self.cap);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::DuckDuckGoExtractor;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned bodies by URL and records every request.
    #[derive(Default)]
    struct CannedFetcher {
        bodies: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl CannedFetcher {
        fn with(mut self, url: &str, body: String) -> Self {
            self.bodies.insert(url.to_owned(), body);
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().expect("lock").clone()
        }
    }

    impl Fetcher for CannedFetcher {
        async fn fetch(&self, url: &str) -> Result<String, SearchError> {
            self.requested.lock().expect("lock").push(url.to_owned());
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| SearchError::Fetch(format!("{url}: HTTP 404 Not Found")))
        }
    }

    fn ddg_page(urls: &[&str]) -> String {
        let blocks: String = urls
            .iter()
            .map(|u| format!(r#"<div class="result"><a class="result__a" href="{u}">Title {u}</a></div>"#))
            .collect();
        format!("<html><body>{blocks}</body></html>")
    }

    fn config() -> SearchConfig {
        SearchConfig {
            page_delay_ms: 0,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn page_urls_encode_query() {
        let pages = page_urls(Provider::Google, "rust & tokio");
        assert_eq!(pages, vec!["https://www.google.com/search?q=rust%20%26%20tokio"]);
    }

    #[test]
    fn paginated_providers() {
        let mobile = page_urls(Provider::YouTubeMobile, "cats");
        assert_eq!(mobile.len(), 3);
        assert!(mobile[2].ends_with("&page=3"));

        let bing = page_urls(Provider::BingVideosUk, "cats");
        assert_eq!(
            bing,
            vec![
                "https://www.bing.co.uk/videos/search?q=cats&first=0",
                "https://www.bing.co.uk/videos/search?q=cats&first=25",
                "https://www.bing.co.uk/videos/search?q=cats&first=50",
                "https://www.bing.co.uk/videos/search?q=cats&first=75",
            ]
        );
    }

    #[test]
    fn every_regular_provider_has_pages() {
        for provider in Provider::videos().iter().chain(Provider::websites()) {
            let pages = page_urls(*provider, "q");
            assert!(!pages.is_empty(), "{provider} has no pages");
            assert!(pages.iter().all(|p| p.starts_with("https://")));
        }
        assert!(page_urls(Provider::GoogleCse, "q").is_empty());
    }

    #[test]
    fn video_home_ignores_query() {
        assert_eq!(
            page_urls(Provider::GoogleVideoHome, "anything"),
            vec!["https://www.google.com/videohp"]
        );
    }

    #[test]
    fn custom_engine_task() {
        let task = ProviderTask::custom_engine("123:abc", "rust lang", &config());
        assert_eq!(task.provider(), Provider::GoogleCse);
        assert_eq!(task.engine_id(), Some("123:abc"));
        assert_eq!(task.pages(), ["https://cse.google.com/cse?cx=123:abc&q=rust%20lang"]);
        assert_eq!(task.label(), "google_cse:123:abc");
        assert_eq!(task.cap(), 100);
    }

    #[tokio::test]
    async fn run_collects_pages_in_order() {
        let task = ProviderTask {
            provider: Provider::DuckDuckGo,
            engine_id: None,
            pages: vec!["https://p/1".into(), "https://p/2".into()],
            cap: 10,
        };
        let fetcher = CannedFetcher::default()
            .with("https://p/1", ddg_page(&["https://a.example/", "https://b.example/"]))
            .with("https://p/2", ddg_page(&["https://c.example/"]));

        let results = task
            .run(&fetcher, &DuckDuckGoExtractor, Duration::ZERO)
            .await
            .expect("run succeeds");
        let urls: Vec<_> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, ["https://a.example/", "https://b.example/", "https://c.example/"]);
        assert_eq!(fetcher.requested(), ["https://p/1", "https://p/2"]);
    }

    #[tokio::test]
    async fn run_stops_fetching_at_cap() {
        let task = ProviderTask {
            provider: Provider::DuckDuckGo,
            engine_id: None,
            pages: vec!["https://p/1".into(), "https://p/2".into()],
            cap: 2,
        };
        let fetcher = CannedFetcher::default()
            .with(
                "https://p/1",
                ddg_page(&["https://a.example/", "https://b.example/", "https://c.example/"]),
            )
            .with("https://p/2", ddg_page(&["https://d.example/"]));

        let results = task
            .run(&fetcher, &DuckDuckGoExtractor, Duration::ZERO)
            .await
            .expect("run succeeds");
        assert_eq!(results.len(), 2);
        assert_eq!(fetcher.requested(), ["https://p/1"]);
    }

    #[tokio::test]
    async fn failed_page_is_skipped() {
        let task = ProviderTask {
            provider: Provider::DuckDuckGo,
            engine_id: None,
            pages: vec!["https://p/missing".into(), "https://p/2".into()],
            cap: 10,
        };
        let fetcher =
            CannedFetcher::default().with("https://p/2", ddg_page(&["https://z.example/"]));

        let results = task
            .run(&fetcher, &DuckDuckGoExtractor, Duration::ZERO)
            .await
            .expect("partial failure is not an error");
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn all_pages_failing_is_provider_error() {
        let task = ProviderTask::new(Provider::DuckDuckGo, "rust", &config());
        let err = task
            .run(&CannedFetcher::default(), &DuckDuckGoExtractor, Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Provider(_)));
        assert!(err.to_string().contains("duckduckgo"));
    }

    #[tokio::test(start_paused = true)]
    async fn delay_applies_between_pages_only() {
        let task = ProviderTask {
            provider: Provider::DuckDuckGo,
            engine_id: None,
            pages: vec!["https://p/1".into(), "https://p/2".into(), "https://p/3".into()],
            cap: 10,
        };
        let fetcher = CannedFetcher::default()
            .with("https://p/1", ddg_page(&["https://a.example/"]))
            .with("https://p/2", ddg_page(&["https://b.example/"]))
            .with("https://p/3", ddg_page(&["https://c.example/"]));

        let started = tokio::time::Instant::now();
        let results = task
            .run(&fetcher, &DuckDuckGoExtractor, Duration::from_secs(1))
            .await
            .expect("run succeeds");
        assert_eq!(results.len(), 3);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(2), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(3), "elapsed {elapsed:?}");
    }
}
