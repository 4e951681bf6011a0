//! Provider → extractor lookup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::engines::{
    ArxivExtractor, BaseExtractor, BingExtractor, BingVideosExtractor, BraveExtractor,
    DuckDuckGoExtractor, EcosiaExtractor, GitHubExtractor, GoogleCseExtractor, GoogleExtractor,
    GoogleScholarExtractor, GoogleVideosExtractor, InternetArchiveExtractor, MetaGerExtractor,
    QwantExtractor, SemanticScholarExtractor, WolframAlphaExtractor, YahooExtractor,
    YouTubeExtractor, YouTubeMobileExtractor,
};
use crate::extractor::Extractor;
use crate::types::Provider;

/// Maps each provider to the extractor that reads its pages.
///
/// [`Registry::default`] covers every built-in provider. Entries can be
/// replaced with [`Registry::register`], which is how tests plug in fakes.
#[derive(Clone)]
pub struct Registry {
    extractors: HashMap<Provider, Arc<dyn Extractor>>,
}

impl Registry {
    /// A registry with no extractors at all.
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Add or replace the extractor for the provider it reports.
    pub fn register(&mut self, extractor: Arc<dyn Extractor>) -> &mut Self {
        self.extractors.insert(extractor.provider(), extractor);
        self
    }

    /// Builder-style [`Registry::register`].
    pub fn with(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.register(extractor);
        self
    }

    pub fn get(&self, provider: Provider) -> Option<Arc<dyn Extractor>> {
        self.extractors.get(&provider).cloned()
    }

    pub fn contains(&self, provider: Provider) -> bool {
        self.extractors.contains_key(&provider)
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        let builtin: [Arc<dyn Extractor>; 22] = [
            Arc::new(YouTubeExtractor),
            Arc::new(YouTubeMobileExtractor),
            Arc::new(BingVideosExtractor::global()),
            Arc::new(BingVideosExtractor::uk()),
            Arc::new(GoogleVideosExtractor::home()),
            Arc::new(GoogleVideosExtractor::search()),
            Arc::new(GoogleExtractor),
            Arc::new(BingExtractor),
            Arc::new(DuckDuckGoExtractor),
            Arc::new(YahooExtractor),
            Arc::new(BraveExtractor),
            Arc::new(QwantExtractor),
            Arc::new(EcosiaExtractor),
            Arc::new(GoogleScholarExtractor),
            Arc::new(SemanticScholarExtractor),
            Arc::new(BaseExtractor),
            Arc::new(ArxivExtractor),
            Arc::new(GitHubExtractor),
            Arc::new(WolframAlphaExtractor),
            Arc::new(InternetArchiveExtractor),
            Arc::new(MetaGerExtractor),
            Arc::new(GoogleCseExtractor),
        ];
        builtin
            .into_iter()
            .fold(Self::empty(), |registry, extractor| registry.with(extractor))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut providers: Vec<_> = self.extractors.keys().collect();
        providers.sort();
        f.debug_struct("Registry").field("providers", &providers).finish()
    }
}
