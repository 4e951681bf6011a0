//! Human-readable site names for result URLs.

use url::Url;

/// Well-known sites, checked in order. The first entry whose domain list
/// matches the URL's host wins.
const KNOWN_SOURCES: &[(&[&str], &str)] = &[
    // Video platforms
    (&["youtube.com", "youtu.be"], "YouTube"),
    (&["vimeo.com"], "Vimeo"),
    (&["dailymotion.com", "dai.ly"], "Dailymotion"),
    // Social platforms
    (&["facebook.com"], "Facebook"),
    (&["twitter.com"], "Twitter"),
    (&["instagram.com"], "Instagram"),
    (&["linkedin.com"], "LinkedIn"),
    // News and media
    (&["cnn.com"], "CNN"),
    (&["bbc.co.uk", "bbc.com"], "BBC"),
    (&["nytimes.com"], "New York Times"),
    (&["reuters.com"], "Reuters"),
    // Tech
    (&["github.com"], "GitHub"),
    (&["stackoverflow.com"], "Stack Overflow"),
    (&["medium.com"], "Medium"),
    (&["dev.to"], "DEV Community"),
    // Education
    (&["edu"], "Educational Institution"),
    (&["wikipedia.org"], "Wikipedia"),
    (&["coursera.org"], "Coursera"),
    (&["udemy.com"], "Udemy"),
];

/// Derive a display name for the site a URL points at.
///
/// Well-known hosts map to their brand name. Anything else is named after the
/// first label of the host with `www.` stripped, hyphen-separated words
/// title-cased (`my-site.example.org` becomes `"My Site"`). Empty or
/// unparseable input yields `"Unknown"`.
///
/// # Examples
///
/// ```
/// use linkscout_search::source::source_from_url;
///
/// assert_eq!(source_from_url("https://www.youtube.com/watch?v=abc"), "YouTube");
/// assert_eq!(source_from_url("https://unknownsite.example.com/x"), "Unknownsite");
/// assert_eq!(source_from_url(""), "Unknown");
/// ```
pub fn source_from_url(url: &str) -> String {
    let Some(host) = Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    else {
        return "Unknown".to_owned();
    };

    for (domains, name) in KNOWN_SOURCES {
        if domains.iter().any(|domain| host_matches(&host, domain)) {
            return (*name).to_owned();
        }
    }

    let bare = host.strip_prefix("www.").unwrap_or(&host);
    let label = bare.split('.').next().unwrap_or_default();
    if label.is_empty() {
        return "Unknown".to_owned();
    }

    label
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `host` is `domain` itself or one of its subdomains. A bare top-level
/// label such as `edu` also matches second-level registrations like
/// `ox.edu.au`.
fn host_matches(host: &str, domain: &str) -> bool {
    if !domain.contains('.') {
        return host.split('.').skip(1).any(|label| label == domain);
    }
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}
