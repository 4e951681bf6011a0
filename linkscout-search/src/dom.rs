//! Small helpers over `scraper` shared by the extractors.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::SearchError;

/// Parsed selectors by source text. Extractors use a fixed set of
/// selectors, so the cache stays small.
static SELECTORS: LazyLock<RwLock<HashMap<String, Selector>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Parse a CSS selector group, reusing an earlier parse of the same text.
///
/// # Errors
///
/// Returns [`SearchError::Extraction`] if `css` is not a valid selector.
pub fn selector(css: &str) -> Result<Selector, SearchError> {
    if let Some(cached) = SELECTORS
        .read()
        .ok()
        .and_then(|cache| cache.get(css).cloned())
    {
        return Ok(cached);
    }

    let parsed = Selector::parse(css)
        .map_err(|e| SearchError::Extraction(format!("invalid selector {css}: {e:?}")))?;
    if let Ok(mut cache) = SELECTORS.write() {
        cache.insert(css.to_owned(), parsed.clone());
    }
    Ok(parsed)
}

/// First descendant of `el` matching `css`, in document order.
pub fn select_first<'a>(el: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>, SearchError> {
    let sel = selector(css)?;
    Ok(el.select(&sel).next())
}

/// Every descendant of `el` matching `css`, in document order.
pub fn select_all<'a>(el: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, SearchError> {
    let sel = selector(css)?;
    Ok(el.select(&sel).collect())
}

/// Text content of `el` with whitespace runs collapsed to single spaces.
pub fn text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first descendant matching `css`, or an empty string.
pub fn first_text(el: ElementRef<'_>, css: &str) -> Result<String, SearchError> {
    Ok(select_first(el, css)?.map(text).unwrap_or_default())
}

/// Non-blank value of attribute `name`, trimmed.
pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// `href` of the first descendant matching `css`.
pub fn first_href<'a>(el: ElementRef<'a>, css: &str) -> Result<Option<&'a str>, SearchError> {
    Ok(select_first(el, css)?.and_then(|a| attr(a, "href")))
}

/// Resolve `href` against `base`. Absolute `http(s)` links are returned
/// unchanged; anything that does not resolve to `http(s)` yields `None`.
pub fn absolutize(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let resolved = Url::parse(base).ok()?.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

/// Lower-cased host of `url`, if it has one.
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
}

/// Google's favicon service for `domain`.
pub fn google_favicon(domain: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={domain}")
}
