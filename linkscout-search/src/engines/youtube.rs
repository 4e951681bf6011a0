//! YouTube desktop and mobile result pages.
//!
//! Both pages link each video with a relative `/watch?v=ID` href. Results are
//! rebuilt from the video id so that every YouTube result, whichever page it
//! came from, carries the same canonical URL and thumbnail.

use scraper::ElementRef;

use crate::dom;
use crate::engines::video;
use crate::error::SearchError;
use crate::extractor::{Extractor, PageContext};
use crate::types::{Provider, SearchResult};

/// Video id from an href containing `watch?v=`.
fn video_id(href: &str) -> Option<&str> {
    if !href.contains("/watch?v=") {
        return None;
    }
    let (_, tail) = href.rsplit_once("watch?v=")?;
    let id = tail.split('&').next().unwrap_or_default();
    (!id.is_empty()).then_some(id)
}

/// Shared block reader: first link, title selector, duration selector.
fn read_block(
    provider: Provider,
    block: ElementRef<'_>,
    title_css: &str,
    duration_css: &str,
) -> Result<Option<SearchResult>, SearchError> {
    let Some(href) = dom::first_href(block, "a[href]")? else {
        return Ok(None);
    };
    let Some(id) = video_id(href) else {
        return Ok(None);
    };

    let title = dom::first_text(block, title_css)?;
    if title.is_empty() {
        return Ok(None);
    }

    let duration = dom::first_text(block, duration_css)?;

    Ok(Some(video(
        provider,
        title,
        format!("https://www.youtube.com/watch?v={id}"),
        Some(format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")),
        Some(duration),
    )))
}

/// Desktop results page (`www.youtube.com/results`).
pub struct YouTubeExtractor;

impl Extractor for YouTubeExtractor {
    fn provider(&self) -> Provider {
        Provider::YouTube
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.yt-lockup-video, div.yt-lockup-tile"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        read_block(
            Provider::YouTube,
            block,
            "h3.yt-lockup-title, h3.title, span.yt-lockup-title, span.title",
            "span.video-time, span.duration",
        )
    }
}

/// Mobile results page (`m.youtube.com/results`), paginated.
pub struct YouTubeMobileExtractor;

impl Extractor for YouTubeMobileExtractor {
    fn provider(&self) -> Provider {
        Provider::YouTubeMobile
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.compact-media-item"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        read_block(
            Provider::YouTubeMobile,
            block,
            "h4.compact-media-item-headline, h4.title, h3.compact-media-item-headline, \
             h3.title, span.compact-media-item-headline, span.title",
            "span.compact-media-item-metadata",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::fixture;
    use crate::types::{Artwork, ResultKind};

    const DESKTOP: &str = r#"<html><body>
        <div class="yt-lockup-video">
          <a href="/watch?v=abc123&list=PL1"><img src="x.jpg"></a>
          <h3 class="yt-lockup-title">Rust in  100 Seconds</h3>
          <span class="video-time">2:24</span>
        </div>
        <div class="yt-lockup-tile">
          <a href="/channel/UC123">Channel</a>
          <h3 class="yt-lockup-title">Not a video</h3>
        </div>
        <div class="yt-lockup-video">
          <a href="/watch?v=def456"></a>
          <h3 class="yt-lockup-title"></h3>
        </div>
        <div class="yt-lockup-tile">
          <a href="/watch?v=ghi789"></a>
          <span class="title">Ownership explained</span>
        </div>
    </body></html>"#;

    #[test]
    fn desktop_results_use_canonical_urls() {
        let results = fixture::extract(
            &YouTubeExtractor,
            "https://www.youtube.com/results?search_query=rust",
            DESKTOP,
        );
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.kind, ResultKind::Video);
        assert_eq!(first.title, "Rust in 100 Seconds");
        assert_eq!(first.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(first.description, first.title);
        assert_eq!(
            first.artwork,
            Some(Artwork::Thumbnail(
                "https://i.ytimg.com/vi/abc123/hqdefault.jpg".into()
            ))
        );
        assert_eq!(first.duration.as_deref(), Some("2:24"));
        assert_eq!(first.platform, "YouTube");
        assert_eq!(first.source, "YouTube");

        assert_eq!(results[1].url, "https://www.youtube.com/watch?v=ghi789");
        assert!(results[1].duration.is_none());
    }

    #[test]
    fn mobile_results() {
        let html = r#"<div class="compact-media-item">
              <a href="/watch?v=m1">x</a>
              <h4 class="compact-media-item-headline">Mobile clip</h4>
              <span class="compact-media-item-metadata">10:01</span>
            </div>"#;
        let results = fixture::extract(
            &YouTubeMobileExtractor,
            "https://m.youtube.com/results?search_query=rust&page=1",
            html,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].platform, "YouTube Mobile");
        assert_eq!(results[0].url, "https://www.youtube.com/watch?v=m1");
        assert_eq!(results[0].duration.as_deref(), Some("10:01"));
    }

    #[test]
    fn video_id_parsing() {
        assert_eq!(video_id("/watch?v=abc&t=10"), Some("abc"));
        assert_eq!(video_id("https://www.youtube.com/watch?v=xyz"), Some("xyz"));
        assert_eq!(video_id("/watch?v="), None);
        assert_eq!(video_id("/shorts/abc"), None);
    }

    #[test]
    fn unrelated_markup_yields_nothing() {
        let results = fixture::extract(
            &YouTubeExtractor,
            "https://www.youtube.com/results?search_query=rust",
            "<html><body><p>consent page</p></body></html>",
        );
        assert!(results.is_empty());
    }
}
