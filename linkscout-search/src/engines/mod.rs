//! Provider extractors.
//!
//! Each module provides one or more structs implementing
//! [`crate::extractor::Extractor`] for a family of related providers. They
//! are grouped by the markup they read, not by company.

pub mod academic;
pub mod bing;
pub mod brave;
pub mod duckduckgo;
pub mod google;
pub mod metasearch;
pub mod reference;
pub mod youtube;

pub use academic::{ArxivExtractor, BaseExtractor, SemanticScholarExtractor};
pub use bing::{BingExtractor, BingVideosExtractor};
pub use brave::BraveExtractor;
pub use duckduckgo::DuckDuckGoExtractor;
pub use google::{GoogleCseExtractor, GoogleExtractor, GoogleScholarExtractor, GoogleVideosExtractor};
pub use metasearch::{EcosiaExtractor, MetaGerExtractor, QwantExtractor, YahooExtractor};
pub use reference::{GitHubExtractor, InternetArchiveExtractor, WolframAlphaExtractor};
pub use youtube::{YouTubeExtractor, YouTubeMobileExtractor};

use crate::source::source_from_url;
use crate::types::{Artwork, Provider, ResultKind, SearchResult};

/// A website result attributed to `provider`.
pub(crate) fn website(
    provider: Provider,
    title: String,
    url: String,
    description: String,
    favicon: Option<String>,
) -> SearchResult {
    SearchResult {
        kind: ResultKind::Website,
        source: source_from_url(&url),
        title,
        url,
        description,
        artwork: favicon.map(Artwork::Favicon),
        platform: provider.name().to_owned(),
        duration: None,
    }
}

/// A video result attributed to `provider`.
pub(crate) fn video(
    provider: Provider,
    title: String,
    url: String,
    thumbnail: Option<String>,
    duration: Option<String>,
) -> SearchResult {
    SearchResult {
        kind: ResultKind::Video,
        source: source_from_url(&url),
        description: title.clone(),
        title,
        url,
        artwork: thumbnail.map(Artwork::Thumbnail),
        platform: provider.name().to_owned(),
        duration: duration.filter(|d| !d.is_empty()),
    }
}

/// Google's favicon for the host of a result URL.
pub(crate) fn host_favicon(url: &str) -> Option<String> {
    crate::dom::host_of(url).map(|host| crate::dom::google_favicon(&host))
}

/// Join non-empty parts with `sep`.
pub(crate) fn join_present<'a>(parts: impl IntoIterator<Item = &'a str>, sep: &str) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn website_derives_source_and_platform() {
        let r = website(
            Provider::Bing,
            "Rust".into(),
            "https://www.rust-lang.org/".into(),
            String::new(),
            Some("https://f".into()),
        );
        assert_eq!(r.kind, ResultKind::Website);
        assert_eq!(r.platform, "Bing");
        assert_eq!(r.source, "Rust Lang");
        assert_eq!(r.artwork, Some(Artwork::Favicon("https://f".into())));
        assert!(r.duration.is_none());
    }

    #[test]
    fn video_uses_title_as_description() {
        let r = video(
            Provider::BingVideosUk,
            "Clip".into(),
            "https://www.youtube.com/watch?v=x".into(),
            None,
            Some(String::new()),
        );
        assert_eq!(r.description, "Clip");
        assert_eq!(r.platform, "Bing UK");
        assert_eq!(r.source, "YouTube");
        assert!(r.duration.is_none());
    }

    #[test]
    fn join_present_skips_empty() {
        assert_eq!(join_present(["a", "", "b"], " | "), "a | b");
        assert_eq!(join_present(Vec::<&str>::new(), ", "), "");
    }
}
