//! Core types: search results, search requests, and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SearchError;

/// Whether a result points at a video or a regular web page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Video,
    Website,
}

impl ResultKind {
    /// Wire name of this kind (`"video"` / `"website"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Website => "website",
        }
    }
}

/// Preview image attached to a result.
///
/// Video providers usually expose a thumbnail; web providers only give us a
/// favicon for the result's domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Artwork {
    Thumbnail(String),
    Favicon(String),
}

impl Artwork {
    /// The image URL regardless of which kind of artwork this is.
    pub fn url(&self) -> &str {
        match self {
            Self::Thumbnail(url) | Self::Favicon(url) => url,
        }
    }
}

/// A single normalized result produced by a provider's extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Video or website.
    pub kind: ResultKind,
    /// Display title. Never empty once a result leaves an extractor.
    pub title: String,
    /// Absolute `http(s)` URL. Used as the deduplication key.
    pub url: String,
    /// Free-form description; may be empty.
    pub description: String,
    /// Thumbnail or favicon, if one could be determined.
    pub artwork: Option<Artwork>,
    /// Display name of the provider that produced this result.
    pub platform: String,
    /// Human-readable site name derived from `url`.
    pub source: String,
    /// Video duration as shown by the provider. Always `None` for websites.
    pub duration: Option<String>,
}

impl SearchResult {
    /// Whether this result satisfies the output invariants: a non-empty
    /// title and an absolute `http://` or `https://` URL.
    pub fn is_well_formed(&self) -> bool {
        !self.title.trim().is_empty() && is_http_url(&self.url)
    }
}

/// Returns `true` if `url` starts with an HTTP or HTTPS scheme.
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A validated, per-query search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    want_videos: bool,
    want_websites: bool,
}

impl SearchRequest {
    /// Build a request, rejecting blank queries and requests that ask for
    /// neither videos nor websites.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] with a user-facing message.
    pub fn new(
        query: impl AsRef<str>,
        want_videos: bool,
        want_websites: bool,
    ) -> Result<Self, SearchError> {
        let query = query.as_ref().trim();
        if query.is_empty() {
            return Err(SearchError::Validation(
                "Please enter a search query".into(),
            ));
        }
        if !want_videos && !want_websites {
            return Err(SearchError::Validation(
                "Please select at least one search type".into(),
            ));
        }
        Ok(Self {
            query: query.to_owned(),
            want_videos,
            want_websites,
        })
    }

    /// The trimmed query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn want_videos(&self) -> bool {
        self.want_videos
    }

    pub fn want_websites(&self) -> bool {
        self.want_websites
    }
}

/// Every provider linkscout knows how to scrape.
///
/// [`Provider::name`] is the platform label attached to results (several
/// providers share one, e.g. both Bing tasks report `"Bing"`), while
/// [`Provider::id`] is unique and is what configuration and logs use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "youtube")]
    YouTube,
    #[serde(rename = "youtube_mobile")]
    YouTubeMobile,
    #[serde(rename = "bing_videos")]
    BingVideos,
    #[serde(rename = "bing_videos_uk")]
    BingVideosUk,
    #[serde(rename = "google_video_home")]
    GoogleVideoHome,
    #[serde(rename = "google_videos")]
    GoogleVideos,
    #[serde(rename = "google")]
    Google,
    #[serde(rename = "bing")]
    Bing,
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
    #[serde(rename = "yahoo")]
    Yahoo,
    #[serde(rename = "brave")]
    Brave,
    #[serde(rename = "qwant")]
    Qwant,
    #[serde(rename = "ecosia")]
    Ecosia,
    #[serde(rename = "google_scholar")]
    GoogleScholar,
    #[serde(rename = "semantic_scholar")]
    SemanticScholar,
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "arxiv")]
    Arxiv,
    #[serde(rename = "github")]
    GitHub,
    #[serde(rename = "wolfram_alpha")]
    WolframAlpha,
    #[serde(rename = "internet_archive")]
    InternetArchive,
    #[serde(rename = "metager")]
    MetaGer,
    #[serde(rename = "google_cse")]
    GoogleCse,
}

const VIDEO_PROVIDERS: &[Provider] = &[
    Provider::YouTube,
    Provider::YouTubeMobile,
    Provider::BingVideos,
    Provider::BingVideosUk,
    Provider::GoogleVideoHome,
    Provider::GoogleVideos,
];

const WEBSITE_PROVIDERS: &[Provider] = &[
    Provider::Google,
    Provider::Bing,
    Provider::DuckDuckGo,
    Provider::Yahoo,
    Provider::Brave,
    Provider::Qwant,
    Provider::Ecosia,
    Provider::GoogleScholar,
    Provider::SemanticScholar,
    Provider::Base,
    Provider::Arxiv,
    Provider::GitHub,
    Provider::WolframAlpha,
    Provider::InternetArchive,
    Provider::MetaGer,
];

impl Provider {
    /// Platform label attached to results from this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::YouTubeMobile => "YouTube Mobile",
            Self::BingVideos => "Bing",
            Self::BingVideosUk => "Bing UK",
            Self::GoogleVideoHome => "Google",
            Self::GoogleVideos => "Google Videos",
            Self::Google => "Google",
            Self::Bing => "Bing",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Yahoo => "Yahoo",
            Self::Brave => "Brave",
            Self::Qwant => "Qwant",
            Self::Ecosia => "Ecosia",
            Self::GoogleScholar => "Google Scholar",
            Self::SemanticScholar => "Semantic Scholar",
            Self::Base => "BASE",
            Self::Arxiv => "arXiv",
            Self::GitHub => "GitHub",
            Self::WolframAlpha => "Wolfram Alpha",
            Self::InternetArchive => "Internet Archive",
            Self::MetaGer => "MetaGer",
            Self::GoogleCse => "Google CSE",
        }
    }

    /// Stable unique identifier, identical to the serde representation.
    pub fn id(&self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::YouTubeMobile => "youtube_mobile",
            Self::BingVideos => "bing_videos",
            Self::BingVideosUk => "bing_videos_uk",
            Self::GoogleVideoHome => "google_video_home",
            Self::GoogleVideos => "google_videos",
            Self::Google => "google",
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
            Self::Yahoo => "yahoo",
            Self::Brave => "brave",
            Self::Qwant => "qwant",
            Self::Ecosia => "ecosia",
            Self::GoogleScholar => "google_scholar",
            Self::SemanticScholar => "semantic_scholar",
            Self::Base => "base",
            Self::Arxiv => "arxiv",
            Self::GitHub => "github",
            Self::WolframAlpha => "wolfram_alpha",
            Self::InternetArchive => "internet_archive",
            Self::MetaGer => "metager",
            Self::GoogleCse => "google_cse",
        }
    }

    /// Look a provider up by its [`Provider::id`].
    pub fn from_id(id: &str) -> Option<Provider> {
        VIDEO_PROVIDERS
            .iter()
            .chain(WEBSITE_PROVIDERS)
            .copied()
            .chain(std::iter::once(Provider::GoogleCse))
            .find(|provider| provider.id() == id)
    }

    /// Kind of result this provider yields.
    pub fn kind(&self) -> ResultKind {
        if VIDEO_PROVIDERS.contains(self) {
            ResultKind::Video
        } else {
            ResultKind::Website
        }
    }

    /// Video providers, in launch order.
    pub fn videos() -> &'static [Provider] {
        VIDEO_PROVIDERS
    }

    /// Website providers, in launch order. Custom search engines are not
    /// listed here; one task is planned per configured engine id.
    pub fn websites() -> &'static [Provider] {
        WEBSITE_PROVIDERS
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
