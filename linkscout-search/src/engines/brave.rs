//! Brave Search: independent index, server-rendered result snippets.

use scraper::ElementRef;

use crate::dom;
use crate::engines::website;
use crate::error::SearchError;
use crate::extractor::{Extractor, PageContext};
use crate::types::{Provider, SearchResult};

pub struct BraveExtractor;

impl Extractor for BraveExtractor {
    fn provider(&self) -> Provider {
        Provider::Brave
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.snippet"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(anchor) = dom::select_first(block, "a.title")? else {
            return Ok(None);
        };
        let Some(url) = dom::attr(anchor, "href") else {
            return Ok(None);
        };

        let favicon = dom::host_of(url).map(|host| {
            format!(
                "https://brave.com/favicon/s2?domain={}",
                urlencoding::encode(&host)
            )
        });

        Ok(Some(website(
            Provider::Brave,
            dom::text(anchor),
            url.to_owned(),
            dom::first_text(block, "div.snippet-description")?,
            favicon,
        )))
    }
}
