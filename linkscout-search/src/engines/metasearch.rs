//! Secondary general-purpose engines: Yahoo, Qwant, Ecosia and MetaGer.
//!
//! Each of them has shipped several result layouts; the selectors accept all
//! of the ones seen so far.

use scraper::ElementRef;

use crate::dom;
use crate::engines::{host_favicon, website};
use crate::error::SearchError;
use crate::extractor::{Extractor, PageContext};
use crate::types::{Provider, SearchResult};

/// Yahoo web results (`div.algo`).
pub struct YahooExtractor;

impl Extractor for YahooExtractor {
    fn provider(&self) -> Provider {
        Provider::Yahoo
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.algo"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(heading) = dom::select_first(block, "h3")? else {
            return Ok(None);
        };
        let Some(url) = dom::first_href(block, "a")? else {
            return Ok(None);
        };

        let favicon = dom::host_of(url).map(|host| format!("https://s.yimg.com/favicon/{host}"));

        Ok(Some(website(
            Provider::Yahoo,
            dom::text(heading),
            url.to_owned(),
            dom::first_text(block, "div.compText")?,
            favicon,
        )))
    }
}

/// Qwant web results.
pub struct QwantExtractor;

impl Extractor for QwantExtractor {
    fn provider(&self) -> Provider {
        Provider::Qwant
    }

    fn markers(&self) -> &'static [&'static str] {
        &["article.result, article.web-result, div.result, div.web-result"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(heading) = dom::select_first(block, "h2, h3")? else {
            return Ok(None);
        };
        let Some(url) = dom::first_href(block, "a")? else {
            return Ok(None);
        };

        Ok(Some(website(
            Provider::Qwant,
            dom::text(heading),
            url.to_owned(),
            dom::first_text(
                block,
                "p.result-description, p.description, div.result-description, div.description",
            )?,
            host_favicon(url),
        )))
    }
}

/// Ecosia web results.
pub struct EcosiaExtractor;

impl Extractor for EcosiaExtractor {
    fn provider(&self) -> Provider {
        Provider::Ecosia
    }

    fn markers(&self) -> &'static [&'static str] {
        &["article.result, article.web-result, article.card-web, \
           div.result, div.web-result, div.card-web"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(title) = dom::select_first(block, "h2.result-title, h2.title, a.result-title, a.title")? else {
            return Ok(None);
        };
        let Some(url) = dom::first_href(block, "a")? else {
            return Ok(None);
        };

        Ok(Some(website(
            Provider::Ecosia,
            dom::text(title),
            url.to_owned(),
            dom::first_text(
                block,
                "p.result-description, p.description, p.snippet, \
                 div.result-description, div.description, div.snippet",
            )?,
            host_favicon(url),
        )))
    }
}

/// MetaGer, a German metasearch engine. Its own attribution of the hit is
/// appended to the description.
pub struct MetaGerExtractor;

impl Extractor for MetaGerExtractor {
    fn provider(&self) -> Provider {
        Provider::MetaGer
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.result, div.web-result, article.result, article.web-result"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(title) = dom::select_first(block, "h2.result-title, h2.title, a.result-title, a.title")? else {
            return Ok(None);
        };
        // The title element itself must carry the link.
        let Some(url) = dom::attr(title, "href") else {
            return Ok(None);
        };

        let description = dom::first_text(
            block,
            "p.result-description, p.description, div.result-description, div.description",
        )?;
        let host = dom::first_text(
            block,
            "span.result-host, span.source, div.result-host, div.source",
        )?;

        Ok(Some(website(
            Provider::MetaGer,
            dom::text(title),
            url.to_owned(),
            format!("{description}\nSource: {host}"),
            host_favicon(url),
        )))
    }
}
