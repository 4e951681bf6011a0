//! Trait definition for pluggable per-provider result extractors.
//!
//! Each provider implements [`Extractor`] to turn one raw response page into
//! normalized [`SearchResult`] values. Extraction is pure and synchronous;
//! fetching is the [`crate::http::Fetcher`]'s job.

use scraper::{ElementRef, Html};

use crate::dom;
use crate::error::SearchError;
use crate::types::{Provider, SearchResult};

/// What an extractor knows about the page it is reading.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// URL the body was fetched from.
    pub page_url: &'a str,
    /// Maximum number of results to take from this page.
    pub limit: usize,
}

/// Outcome of extracting one page.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Accepted results, in document order.
    pub results: Vec<SearchResult>,
    /// Blocks that failed to process. Each was skipped.
    pub failures: Vec<SearchError>,
    /// Number of candidate blocks the winning marker matched.
    pub candidates: usize,
}

/// A provider-specific HTML result extractor.
///
/// Implementors only describe where candidate blocks are
/// ([`Extractor::markers`]) and how to read one block
/// ([`Extractor::extract_block`]). The provided [`Extractor::extract`] drives
/// both, enforces the page limit, and isolates per-block failures.
///
/// All implementations must be `Send + Sync` so a registry can be shared by
/// concurrently running provider tasks.
pub trait Extractor: Send + Sync {
    /// Which provider this extractor reads.
    fn provider(&self) -> Provider;

    /// Alternative CSS selector groups locating candidate result blocks,
    /// tried in order. The first one that matches anything is used.
    fn markers(&self) -> &'static [&'static str];

    /// Read one candidate block.
    ///
    /// Returns `Ok(None)` for blocks that simply are not results (no title,
    /// no usable link).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Extraction`] if the block could not be processed.
    fn extract_block(
        &self,
        block: ElementRef<'_>,
        page: &PageContext<'_>,
    ) -> Result<Option<SearchResult>, SearchError>;

    /// Extract up to `page.limit` results from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Extraction`] only when the page as a whole cannot
    /// be read, i.e. a marker selector is invalid. Failures of individual
    /// blocks are collected in [`Extraction::failures`] instead.
    fn extract(&self, body: &str, page: &PageContext<'_>) -> Result<Extraction, SearchError> {
        let document = Html::parse_document(body);

        let mut blocks: Vec<ElementRef<'_>> = Vec::new();
        for marker in self.markers() {
            let selector = dom::selector(marker)?;
            blocks = document.select(&selector).collect();
            if !blocks.is_empty() {
                break;
            }
        }

        let mut extraction = Extraction {
            candidates: blocks.len(),
            ..Extraction::default()
        };

        for block in blocks {
            if extraction.results.len() >= page.limit {
                break;
            }
            match self.extract_block(block, page) {
                Ok(Some(result)) if result.is_well_formed() => extraction.results.push(result),
                Ok(_) => {}
                Err(err) => {
                    tracing::debug!(provider = %self.provider(), error = %err, "skipping result block");
                    extraction.failures.push(err);
                }
            }
        }

        tracing::trace!(
            provider = %self.provider(),
            candidates = extraction.candidates,
            accepted = extraction.results.len(),
            skipped = extraction.failures.len(),
            "page extracted"
        );
        Ok(extraction)
    }
}
