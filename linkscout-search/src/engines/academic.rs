//! Scholarly search: Semantic Scholar, BASE and arXiv.
//!
//! These providers expose richer metadata than general engines (authors,
//! year, submission history, document type). It is folded into the result
//! description, one item per line.

use scraper::ElementRef;

use crate::dom;
use crate::engines::{join_present, website};
use crate::error::SearchError;
use crate::extractor::{Extractor, PageContext};
use crate::types::{Provider, SearchResult};

const SEMANTIC_SCHOLAR_ORIGIN: &str = "https://www.semanticscholar.org";
const ARXIV_ORIGIN: &str = "https://arxiv.org";

/// Semantic Scholar paper search. Paper links are host-relative.
pub struct SemanticScholarExtractor;

impl Extractor for SemanticScholarExtractor {
    fn provider(&self) -> Provider {
        Provider::SemanticScholar
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.result-page, div.search-result-item"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(title) = dom::select_first(block, "h2.search-result-title, a.search-result-title")? else {
            return Ok(None);
        };
        let Some(url) = dom::attr(title, "href").and_then(|href| dom::absolutize(SEMANTIC_SCHOLAR_ORIGIN, href))
        else {
            return Ok(None);
        };

        let abstract_text = dom::first_text(block, "span.search-result-abstract")?;
        let authors: Vec<String> = dom::select_all(block, "span.author-list")?
            .into_iter()
            .map(dom::text)
            .collect();
        let year = dom::first_text(block, "span.year")?;

        Ok(Some(website(
            Provider::SemanticScholar,
            dom::text(title),
            url,
            format!(
                "{abstract_text}\nAuthors: {}\nYear: {year}",
                authors.join(", ")
            ),
            Some(format!("{SEMANTIC_SCHOLAR_ORIGIN}/img/favicon.png")),
        )))
    }
}

/// BASE (Bielefeld Academic Search Engine).
pub struct BaseExtractor;

impl Extractor for BaseExtractor {
    fn provider(&self) -> Provider {
        Provider::Base
    }

    fn markers(&self) -> &'static [&'static str] {
        &["div.result-item, div.doia-result"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let Some(title) = dom::select_first(block, "h3.title, a.title")? else {
            return Ok(None);
        };
        let Some(url) = dom::attr(title, "href") else {
            return Ok(None);
        };

        let description = dom::first_text(block, "div.description")?;
        let metadata: Vec<String> = dom::select_all(block, "div.metadata, div.doctype")?
            .into_iter()
            .map(dom::text)
            .collect();

        Ok(Some(website(
            Provider::Base,
            dom::text(title),
            url.to_owned(),
            format!(
                "{description}\n{}",
                join_present(metadata.iter().map(String::as_str), " | ")
            ),
            Some("https://www.base-search.net/favicon.ico".to_owned()),
        )))
    }
}

/// arXiv full-text search (`li.arxiv-result`).
pub struct ArxivExtractor;

impl Extractor for ArxivExtractor {
    fn provider(&self) -> Provider {
        Provider::Arxiv
    }

    fn markers(&self) -> &'static [&'static str] {
        &["li.arxiv-result"]
    }

    fn extract_block(
        &self,
        block: ElementRef<'_>,
        _page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError> {
        let title = dom::first_text(block, "p.title")?;
        if title.is_empty() {
            return Ok(None);
        }
        let Some(url) = dom::first_href(block, "a.abstract-full")?
            .and_then(|href| dom::absolutize(ARXIV_ORIGIN, href))
        else {
            return Ok(None);
        };

        let abstract_text = dom::first_text(block, "p.abstract-full")?;
        let authors: Vec<String> = dom::select_all(block, "p.authors a")?
            .into_iter()
            .map(dom::text)
            .collect();
        let submitted = dom::first_text(block, "p.submission-history")?;

        Ok(Some(website(
            Provider::Arxiv,
            title,
            url,
            format!(
                "{abstract_text}\nAuthors: {}\n{submitted}",
                authors.join(", ")
            ),
            Some("https://static.arxiv.org/static/browse/0.3.4/images/icons/favicon.ico".to_owned()),
        )))
    }
}
