//! DuckDuckGo, via the JavaScript-free page at `https://html.duckduckgo.com/html/`.
//!
//! Result links on that page go through DuckDuckGo's click redirector; the
//! target is carried URL-encoded in the `uddg` query parameter.

use scraper::ElementRef;
use url::Url;

use crate::dom;
use crate::engines::website;
use crate::error::SearchError;
use crate::extractor::{Extractor, PageContext};
use crate::types::{Provider, SearchResult};

pub struct DuckDuckGoExtractor;

impl DuckDuckGoExtractor {
    /// Extract the actual URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// Anything else is returned as-is (protocol-relative links get `https:`).
    fn unwrap_redirect(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_owned()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl Extractor for DuckDuckGoExtractor {
    fn provider(&self) -> Provider {
        Provider::DuckDuckGo
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.result"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(anchor) = dom::select_first(block, "a.result__a")? else {
            return Ok(None);
        };
        let Some(url) = dom::attr(anchor, "href").and_then(Self::unwrap_redirect) else {
            return Ok(None);
        };

        let favicon = dom::host_of(&url).map(|host| format!("https://icons.duckduckgo.com/ip3/{host}.ico"));

        Ok(Some(website(
            Provider::DuckDuckGo,
            dom::text(anchor),
            url,
            dom::first_text(block, "a.result__snippet")?,
            favicon,
        )))
    }
}
