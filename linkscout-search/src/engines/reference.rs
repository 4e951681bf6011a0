//! Reference sources that are not web search engines: GitHub repository
//! search, Wolfram Alpha and the Internet Archive.

use scraper::ElementRef;

use crate::dom;
use crate::engines::{join_present, website};
use crate::error::SearchError;
use crate::extractor::{Extractor, PageContext};
use crate::types::{Provider, SearchResult};

const GITHUB_ORIGIN: &str = "https://github.com";
const ARCHIVE_ORIGIN: &str = "https://archive.org";

/// Text of every element matching `css`, joined with `" | "`.
fn joined_text(block: ElementRef<'_>, css: &str) -> Result<String, SearchError> {
    let parts: Vec<String> = dom::select_all(block, css)?.into_iter().map(dom::text).collect();
    Ok(join_present(parts.iter().map(String::as_str), " | "))
}

/// GitHub repository search.
pub struct GitHubExtractor;

impl Extractor for GitHubExtractor {
    fn provider(&self) -> Provider {
        Provider::GitHub
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.repo-list-item, div.Box-row"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(title) = dom::select_first(
            block,
            "a.v-align-middle.repo-list-name, h3.v-align-middle.repo-list-name",
        )?
        else {
            return Ok(None);
        };
        let Some(url) = dom::attr(title, "href").and_then(|href| dom::absolutize(GITHUB_ORIGIN, href)) else {
            return Ok(None);
        };

        let description = dom::first_text(block, "p.repo-list-description, p.color-fg-muted")?;
        let metadata = joined_text(
            block,
            "div.repo-list-meta, div.f6, div.color-fg-muted, \
             span.repo-list-meta, span.f6, span.color-fg-muted",
        )?;

        Ok(Some(website(
            Provider::GitHub,
            dom::text(title),
            url,
            format!("{description}\n{metadata}"),
            Some("https://github.githubassets.com/favicons/favicon.svg".to_owned()),
        )))
    }
}

/// Wolfram Alpha. Every pod links back to the query page itself, so at
/// most one Wolfram Alpha result survives deduplication.
pub struct WolframAlphaExtractor;

impl Extractor for WolframAlphaExtractor {
    fn provider(&self) -> Provider {
        Provider::WolframAlpha
    }

    fn markers(&self) -> &'static [&'static str] {
        &["section.pod, section._2WrB, section._3B89, div.pod, div._2WrB, div._3B89"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let title = dom::first_text(block, "h2._3f89, h2.pod-title, div._3f89, div.pod-title")?;
        if title.is_empty() {
            return Ok(None);
        }

        // Plot pods render as images; their content is the alt text.
        let content = match dom::select_first(
            block,
            "div._3B89, div.pod-content, img._3B89, img.pod-content",
        )? {
            Some(el) if el.value().name() == "img" => dom::attr(el, "alt").unwrap_or_default().to_owned(),
            Some(el) => dom::text(el),
            None => String::new(),
        };
        let info = dom::first_text(block, "div._2WrB, div.pod-info")?;

        Ok(Some(website(
            Provider::WolframAlpha,
            format!("Wolfram Alpha: {title}"),
            page.page_url.to_owned(),
            format!("{content}\n{info}"),
            Some("https://www.wolframalpha.com/favicon.ico".to_owned()),
        )))
    }
}

/// Internet Archive item search.
pub struct InternetArchiveExtractor;

impl Extractor for InternetArchiveExtractor {
    fn provider(&self) -> Provider {
        Provider::InternetArchive
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.item-ia, div.result-item, article.item-ia, article.result-item"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let title = dom::first_text(block, "div.ttl, div.title-link, h3.ttl, h3.title-link")?;
        if title.is_empty() {
            return Ok(None);
        }
        let Some(url) = dom::first_href(block, "a.stealth, a.item-link")?
            .and_then(|href| dom::absolutize(ARCHIVE_ORIGIN, href))
        else {
            return Ok(None);
        };

        let description = dom::first_text(
            block,
            "div.item-description, div.description, span.item-description, span.description",
        )?;
        let metadata = joined_text(
            block,
            "div.item-details, div.metadata, span.item-details, span.metadata",
        )?;

        Ok(Some(website(
            Provider::InternetArchive,
            title,
            url,
            format!("{description}\n{metadata}"),
            Some("https://archive.org/favicon.ico".to_owned()),
        )))
    }
}
