//! Core collector: concurrent multi-provider fan-out, fan-in and dedup.
//!
//! All provider tasks of a batch are futures polled together on the caller's
//! task. Nothing is spawned, so there is no cross-thread shared state; the
//! merge and dedup steps run sequentially as outcomes come in.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use futures::future::{self, join_all};
use futures::stream::{self, FuturesUnordered, Stream, StreamExt};
use futures::FutureExt;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::{Fetcher, HttpFetcher};
use crate::registry::Registry;
use crate::task::ProviderTask;
use crate::types::{Provider, SearchRequest, SearchResult};

use super::dedup::{deduplicate, UrlDeduplicator};

/// Runs a search request against every enabled provider.
pub struct Collector<F> {
    fetcher: F,
    registry: Registry,
    config: SearchConfig,
}

impl Collector<HttpFetcher> {
    /// A collector backed by a real HTTP client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid or the client
    /// cannot be built.
    pub fn http(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: Fetcher> Collector<F> {
    /// A collector using the built-in extractor for every provider.
    pub fn new(fetcher: F, config: SearchConfig) -> Self {
        Self::with_registry(fetcher, Registry::default(), config)
    }

    pub fn with_registry(fetcher: F, registry: Registry, config: SearchConfig) -> Self {
        Self {
            fetcher,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Plan the tasks for `request`, in launch order.
    ///
    /// Video providers come first, then website providers, then one custom
    /// search engine task per configured engine id (these count as website
    /// search). Providers that are disabled or have no registered extractor
    /// are left out.
    pub fn plan(&self, request: &SearchRequest) -> Vec<ProviderTask> {
        let query = request.query();
        let mut tasks = Vec::new();

        if request.want_videos() {
            tasks.extend(
                Provider::videos()
                    .iter()
                    .filter(|provider| self.is_runnable(**provider))
                    .map(|provider| ProviderTask::new(*provider, query, &self.config)),
            );
        }

        if request.want_websites() {
            tasks.extend(
                Provider::websites()
                    .iter()
                    .filter(|provider| self.is_runnable(**provider))
                    .map(|provider| ProviderTask::new(*provider, query, &self.config)),
            );
            if self.is_runnable(Provider::GoogleCse) {
                tasks.extend(
                    self.config
                        .custom_engine_ids
                        .iter()
                        .map(|id| ProviderTask::custom_engine(id, query, &self.config)),
                );
            }
        }

        tasks
    }

    fn is_runnable(&self, provider: Provider) -> bool {
        if !self.config.is_enabled(provider) {
            return false;
        }
        if !self.registry.contains(provider) {
            tracing::debug!(%provider, "no extractor registered, skipping");
            return false;
        }
        true
    }

    /// Run every task to completion and return the merged, deduplicated
    /// results.
    ///
    /// # Pipeline
    ///
    /// 1. Plan tasks with [`Collector::plan`]
    /// 2. Fan out with [`futures::future::join_all`]
    /// 3. Log failed and panicked tasks at warn level; they contribute nothing
    /// 4. Merge outcomes in launch order, each task's own order preserved
    /// 5. Deduplicate by URL, first occurrence wins
    ///
    /// Never fails: if every provider fails the result is simply empty.
    pub async fn collect(&self, request: &SearchRequest) -> Vec<SearchResult> {
        let tasks = self.plan(request);
        tracing::debug!(query = request.query(), "collecting");
        tracing::info!(tasks = tasks.len(), "search batch started");

        let outcomes = join_all(tasks.into_iter().map(|task| self.run_task(task))).await;

        let mut merged: Vec<SearchResult> = Vec::new();
        let mut failed = 0usize;
        for outcome in outcomes {
            match outcome {
                Ok(results) => merged.extend(results),
                Err(_) => failed += 1,
            }
        }

        let raw = merged.len();
        let results = deduplicate(merged);
        tracing::info!(
            total = results.len(),
            duplicates = raw - results.len(),
            failed_providers = failed,
            "search batch finished"
        );
        results
    }

    /// Run every task concurrently and yield each new result as soon as the
    /// task that produced it finishes.
    ///
    /// Deduplication follows arrival order: when two providers return the
    /// same URL, the one that finishes first wins.
    pub fn stream<'a>(&'a self, request: &SearchRequest) -> impl Stream<Item = SearchResult> + Send + 'a {
        let tasks = self.plan(request);
        tracing::debug!(query = request.query(), "streaming");
        tracing::info!(tasks = tasks.len(), "search batch started");

        let pending: FuturesUnordered<_> = tasks.into_iter().map(|task| self.run_task(task)).collect();
        let mut seen = UrlDeduplicator::new();

        pending
            .flat_map(|outcome| stream::iter(outcome.unwrap_or_default()))
            .filter(move |result| future::ready(seen.insert(&result.url)))
    }

    /// Run one task, converting a panic into a provider failure.
    async fn run_task(&self, task: ProviderTask) -> Result<Vec<SearchResult>, SearchError> {
        let label = task.label();
        let Some(extractor) = self.registry.get(task.provider()) else {
            let err = SearchError::Provider(format!("{label}: no extractor registered"));
            tracing::warn!(provider = %label, error = %err, "provider failed");
            return Err(err);
        };
        let delay = Duration::from_millis(self.config.page_delay_ms);

        let outcome = AssertUnwindSafe(task.run(&self.fetcher, extractor.as_ref(), delay))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(SearchError::Provider(format!(
                    "{label}: task panicked: {}",
                    panic_message(panic.as_ref())
                )))
            });

        match &outcome {
            Ok(results) => tracing::debug!(provider = %label, count = results.len(), "provider finished"),
            Err(err) => tracing::warn!(provider = %label, error = %err, "provider failed"),
        }
        outcome
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return *message;
    }
    payload
        .downcast_ref::<String>()
        .map_or("unknown panic", String::as_str)
}
