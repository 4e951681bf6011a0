//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] is built once by the embedding application and handed to
//! the fetcher and collector. Nothing in this crate reads ambient global
//! state. The defaults reproduce the polite, browser-like scraping behaviour
//! the providers tolerate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{Provider, ResultKind};

/// Google Programmable Search engine ids queried on every website search.
const DEFAULT_CUSTOM_ENGINE_IDS: &[&str] = &[
    "006516753008110874046:vzcl7wcfhei",
    "006516753008110874046:hrhinud6efg",
    "006516753008110874046:6v9mqdaai6q",
    "006516753008110874046:wevn3lkn9rr",
    "006516753008110874046:cfdhwy9o57g",
];

/// Providers whose cap differs from their kind's cap. Google's video pages
/// are kept to the website cap.
const DEFAULT_PROVIDER_CAPS: &[(Provider, usize)] = &[
    (Provider::GoogleVideoHome, 100),
    (Provider::GoogleVideos, 100),
];

/// Configuration for a search batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Per-request HTTP timeout in seconds. Bounds the latency of the whole
    /// batch, since there is no batch-wide deadline.
    pub timeout_seconds: u64,
    /// Fixed delay between consecutive page fetches of a paginated provider.
    pub page_delay_ms: u64,
    /// Maximum results kept per video provider.
    pub video_result_cap: usize,
    /// Maximum results kept per website provider.
    pub website_result_cap: usize,
    /// Custom User-Agent string. If `None`, one of a built-in list of desktop
    /// browser User-Agents is chosen when the HTTP client is built.
    pub user_agent: Option<String>,
    /// Google custom search engine ids. One task is launched per id.
    pub custom_engine_ids: Vec<String>,
    /// Providers to leave out of every batch.
    pub disabled_providers: Vec<Provider>,
    /// Per-provider cap overrides, keyed by [`Provider::id`].
    pub provider_result_caps: BTreeMap<String, usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            page_delay_ms: 1000,
            video_result_cap: 75,
            website_result_cap: 100,
            user_agent: None,
            custom_engine_ids: DEFAULT_CUSTOM_ENGINE_IDS
                .iter()
                .map(|id| (*id).to_owned())
                .collect(),
            disabled_providers: Vec::new(),
            provider_result_caps: DEFAULT_PROVIDER_CAPS
                .iter()
                .map(|(provider, cap)| (provider.id().to_owned(), *cap))
                .collect(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - both result caps must be greater than 0
    /// - cap overrides must name known providers and be greater than 0
    /// - custom engine ids must not be blank
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.video_result_cap == 0 {
            return Err(SearchError::Config(
                "video_result_cap must be greater than 0".into(),
            ));
        }
        if self.website_result_cap == 0 {
            return Err(SearchError::Config(
                "website_result_cap must be greater than 0".into(),
            ));
        }
        for (id, cap) in &self.provider_result_caps {
            if Provider::from_id(id).is_none() {
                return Err(SearchError::Config(format!(
                    "provider_result_caps: unknown provider {id}"
                )));
            }
            if *cap == 0 {
                return Err(SearchError::Config(format!(
                    "provider_result_caps.{id} must be greater than 0"
                )));
            }
        }
        if self.custom_engine_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(SearchError::Config(
                "custom_engine_ids must not contain blank ids".into(),
            ));
        }
        Ok(())
    }

    /// Result cap for a provider: its override if one is set, otherwise the
    /// cap for the kind of results it yields.
    pub fn cap_for(&self, provider: Provider) -> usize {
        if let Some(cap) = self.provider_result_caps.get(provider.id()) {
            return *cap;
        }
        match provider.kind() {
            ResultKind::Video => self.video_result_cap,
            ResultKind::Website => self.website_result_cap,
        }
    }

    /// Whether `provider` takes part in searches.
    pub fn is_enabled(&self, provider: Provider) -> bool {
        !self.disabled_providers.contains(&provider)
    }
}
