//! Google properties: web search, the video home page, Scholar, and
//! Programmable Search (CSE) engines.

use scraper::ElementRef;

use crate::dom;
use crate::engines::{host_favicon, video, website};
use crate::error::SearchError;
use crate::extractor::{Extractor, PageContext};
use crate::types::{Artwork, Provider, SearchResult};

/// Favicon for a full result URL, as the web and video pages link them.
fn url_favicon(url: &str) -> String {
    dom::google_favicon(&urlencoding::encode(url))
}

/// Title, link and description of a classic `div.g` block.
fn classic_block(
    block: ElementRef<'_>,
    description_css: &str,
) -> Result<Option<(String, String, String)>, SearchError> {
    let Some(heading) = dom::select_first(block, "h3")? else {
        return Ok(None);
    };
    let Some(url) = dom::first_href(block, "a")? else {
        return Ok(None);
    };
    let description = dom::first_text(block, description_css)?;
    Ok(Some((dom::text(heading), url.to_owned(), description)))
}

/// Google web results.
pub struct GoogleExtractor;

impl Extractor for GoogleExtractor {
    fn provider(&self) -> Provider {
        Provider::Google
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.g"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some((title, url, description)) = classic_block(block, "div.VwiC3b, div.yXK7lf")? else {
            return Ok(None);
        };
        let favicon = url_favicon(&url);
        Ok(Some(website(Provider::Google, title, url, description, Some(favicon))))
    }
}

/// Google video home (`/videohp`), either the bare page or a query page.
///
/// Results are videos but carry a favicon rather than a thumbnail.
pub struct GoogleVideosExtractor {
    provider: Provider,
}

impl GoogleVideosExtractor {
    /// `videohp?q=...`
    pub fn search() -> Self {
        Self {
            provider: Provider::GoogleVideos,
        }
    }

    /// The bare `videohp` landing page.
    pub fn home() -> Self {
        Self {
            provider: Provider::GoogleVideoHome,
        }
    }
}

impl Extractor for GoogleVideosExtractor {
    fn provider(&self) -> Provider {
        self.provider
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.g"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some((title, url, description)) = classic_block(block, "div.s")? else {
            return Ok(None);
        };
        let favicon = url_favicon(&url);
        let mut result = video(self.provider, title, url, None, None);
        result.description = description;
        result.artwork = Some(Artwork::Favicon(favicon));
        Ok(Some(result))
    }
}

/// Google Scholar. Author and venue line is folded into the description.
pub struct GoogleScholarExtractor;

impl GoogleScholarExtractor {
    /// Split the `gs_a` byline ("A Author, B Author - Journal, 2020 - site")
    /// into authors and publication.
    fn byline(meta: &str) -> (&str, &str) {
        let mut parts = meta.split('-');
        match (parts.next(), parts.next()) {
            (Some(authors), Some(publication)) => (authors.trim(), publication.trim()),
            _ => ("", ""),
        }
    }
}

impl Extractor for GoogleScholarExtractor {
    fn provider(&self) -> Provider {
        Provider::GoogleScholar
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.gs_r"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(heading) = dom::select_first(block, "h3.gs_rt")? else {
            return Ok(None);
        };
        let Some(url) = dom::first_href(heading, "a")? else {
            return Ok(None);
        };

        let abstract_text = dom::first_text(block, "div.gs_rs")?;
        let meta = dom::first_text(block, "div.gs_a")?;
        let (authors, publication) = Self::byline(&meta);

        Ok(Some(website(
            Provider::GoogleScholar,
            dom::text(heading),
            url.to_owned(),
            format!("{abstract_text}\nAuthors: {authors}\nPublication: {publication}"),
            host_favicon(url),
        )))
    }
}

/// A Google Programmable Search engine results page.
pub struct GoogleCseExtractor;

impl Extractor for GoogleCseExtractor {
    fn provider(&self) -> Provider {
        Provider::GoogleCse
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.gsc-result"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(title) = dom::select_first(block, "div.gs-title")? else {
            return Ok(None);
        };
        let Some(url) = dom::first_href(title, "a.gs-title")? else {
            return Ok(None);
        };

        Ok(Some(website(
            Provider::GoogleCse,
            dom::text(title),
            url.to_owned(),
            dom::first_text(block, "div.gs-snippet")?,
            host_favicon(url),
        )))
    }
}
