//! Bing web and video search.
//!
//! The video pages are scraped from both `www.bing.com` and `www.bing.co.uk`;
//! they share markup but the UK page only ever uses the first two block
//! layouts.

use scraper::ElementRef;

use crate::dom;
use crate::engines::{video, website};
use crate::error::SearchError;
use crate::extractor::{Extractor, PageContext};
use crate::types::{Provider, SearchResult};

/// Bing web results (`li.b_algo`).
pub struct BingExtractor;

impl Extractor for BingExtractor {
    fn provider(&self) -> Provider {
        Provider::Bing
    }

    fn markers(&self) -> &'static [&'static str] {
        &["li.b_algo"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(heading) = dom::select_first(block, "h2")? else {
            return Ok(None);
        };
        let Some(url) = dom::first_href(heading, "a")? else {
            return Ok(None);
        };

        let favicon = format!(
            "https://www.bing.com/s2/favicons?domain={}",
            urlencoding::encode(url)
        );

        Ok(Some(website(
            Provider::Bing,
            dom::text(heading),
            url.to_owned(),
            dom::first_text(block, "div.b_caption")?,
            Some(favicon),
        )))
    }
}

/// Bing video results for one regional site.
pub struct BingVideosExtractor {
    provider: Provider,
    base: &'static str,
    markers: &'static [&'static str],
}

impl BingVideosExtractor {
    /// `www.bing.com` video search.
    pub fn global() -> Self {
        Self {
            provider: Provider::BingVideos,
            base: "https://www.bing.com",
            markers: &["div.dg_u", "div.mc_vtvc", "div.mc_vtvc_meta"],
        }
    }

    /// `www.bing.co.uk` video search.
    pub fn uk() -> Self {
        Self {
            provider: Provider::BingVideosUk,
            base: "https://www.bing.co.uk",
            markers: &["div.dg_u", "div.mc_vtvc"],
        }
    }
}

impl Extractor for BingVideosExtractor {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn markers(&self) -> &'static [&'static str] {
        self.markers
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let title = dom::first_text(
            block,
            "div.mc_vtvc_title, div.title, span.mc_vtvc_title, span.title",
        )?;
        let Some(href) = dom::first_href(block, "a[href]")? else {
            return Ok(None);
        };
        if title.is_empty() {
            return Ok(None);
        }
        let Some(url) = dom::absolutize(self.base, href) else {
            return Ok(None);
        };

        let thumbnail = dom::select_first(block, "img")?
            .and_then(|img| dom::attr(img, "src").or_else(|| dom::attr(img, "data-src")))
            .and_then(|src| dom::absolutize(self.base, src));

        let duration = dom::first_text(
            block,
            "div.mc_vtvc_duration, div.duration, span.mc_vtvc_duration, span.duration",
        )?;

        Ok(Some(video(
            self.provider,
            title,
            url,
            thumbnail,
            Some(duration),
        )))
    }
}
