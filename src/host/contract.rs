//! Versioned client/server envelopes for the JSON event protocol.
//!
//! Every line on the wire is one envelope. Clients send
//! [`ClientEnvelope`]s (currently only `search_query`); the host answers with
//! [`EventEnvelope`]s carrying a [`ServerEvent`].

use linkscout_search::{SearchError, SearchRequest, SearchResult};
use serde::{Deserialize, Serialize};

/// Contract version for client and event envelopes.
pub const EVENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    EVENT_VERSION
}

/// Events a client may send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientEventName {
    #[serde(rename = "search_query")]
    SearchQuery,
}

impl ClientEventName {
    /// Render event name to wire format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SearchQuery => "search_query",
        }
    }

    /// Parse an event name from wire format.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "search_query" => Some(Self::SearchQuery),
            _ => None,
        }
    }
}

/// A versioned envelope from client -> host.
///
/// `v` defaults to the current version and `request_id` is optional; when
/// present it is echoed on every event the request produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientEnvelope {
    #[serde(default = "default_version")]
    pub v: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl ClientEnvelope {
    /// Build a v1 `search_query` envelope.
    #[must_use]
    pub fn search_query(request_id: Option<String>, payload: &SearchQueryPayload) -> Self {
        Self {
            v: EVENT_VERSION,
            request_id,
            event: ClientEventName::SearchQuery.as_str().to_owned(),
            payload: serde_json::to_value(payload).unwrap_or_default(),
        }
    }

    /// Validate the envelope version and resolve the event name.
    pub fn validate(&self) -> Result<ClientEventName, ContractError> {
        if self.v != EVENT_VERSION {
            return Err(ContractError::new(
                ContractErrorKind::UnsupportedVersion,
                format!(
                    "unsupported contract version {}; expected {}",
                    self.v, EVENT_VERSION
                ),
            ));
        }
        ClientEventName::parse(&self.event).ok_or_else(|| {
            ContractError::new(
                ContractErrorKind::UnknownEvent,
                format!("unknown event: {}", self.event),
            )
        })
    }
}

/// Which result kinds a query asks for. An absent flag is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTypes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websites: Option<bool>,
}

impl SearchTypes {
    /// Set both flags explicitly.
    #[must_use]
    pub fn only(videos: bool, websites: bool) -> Self {
        Self {
            videos: Some(videos),
            websites: Some(websites),
        }
    }

    /// Resolve to `(videos, websites)`.
    ///
    /// At least one present flag must be `true`, otherwise nothing is
    /// selected. Absent flags then default to `true`.
    fn resolve(self) -> (bool, bool) {
        let any_selected = self.videos == Some(true) || self.websites == Some(true);
        if !any_selected {
            return (false, false);
        }
        (self.videos.unwrap_or(true), self.websites.unwrap_or(true))
    }
}

/// Payload of a `search_query` event.
///
/// A missing `searchTypes` object means both kinds. Inside a present object a
/// missing flag defaults to `true`, but at least one present flag must be
/// `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQueryPayload {
    #[serde(default)]
    pub query: String,
    #[serde(
        default,
        rename = "searchTypes",
        skip_serializing_if = "Option::is_none"
    )]
    pub search_types: Option<SearchTypes>,
}

impl SearchQueryPayload {
    /// Turn the payload into a validated request.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Validation`] for a blank query or when no
    /// result kind is selected.
    pub fn to_request(&self) -> Result<SearchRequest, SearchError> {
        let (videos, websites) = self
            .search_types
            .map_or((true, true), SearchTypes::resolve);
        SearchRequest::new(&self.query, videos, websites)
    }
}

/// One result as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub url: String,
    pub title: String,
    pub platform: String,
    pub description: String,
    /// Thumbnail, else favicon, else empty.
    pub thumbnail: String,
    pub source: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub kind: String,
}

fn or_default(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_owned()
    } else {
        value.to_owned()
    }
}

impl From<&SearchResult> for ResultRecord {
    fn from(result: &SearchResult) -> Self {
        Self {
            url: result.url.clone(),
            title: or_default(&result.title, "Untitled Result"),
            platform: or_default(&result.platform, "Unknown"),
            description: result.description.clone(),
            thumbnail: result
                .artwork
                .as_ref()
                .map(|artwork| artwork.url().to_owned())
                .unwrap_or_default(),
            source: or_default(&result.source, "Unknown"),
            duration: or_default(result.duration.as_deref().unwrap_or_default(), "Unknown"),
            kind: result.kind.as_str().to_owned(),
        }
    }
}

/// Events the host sends to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    Connected { message: String },
    SearchStarted { message: String },
    NewResult { result: ResultRecord, query: String },
    SearchCompleted { message: String, total: usize },
    SearchError { message: String },
}

impl ServerEvent {
    #[must_use]
    pub fn connected() -> Self {
        Self::Connected {
            message: "Connected to server".to_owned(),
        }
    }

    #[must_use]
    pub fn search_started(query: &str) -> Self {
        Self::SearchStarted {
            message: format!("Starting search for: {query}"),
        }
    }

    #[must_use]
    pub fn new_result(result: &SearchResult, query: &str) -> Self {
        Self::NewResult {
            result: ResultRecord::from(result),
            query: query.to_owned(),
        }
    }

    #[must_use]
    pub fn search_completed(total: usize) -> Self {
        Self::SearchCompleted {
            message: format!("Search completed. Found {total} results."),
            total,
        }
    }

    #[must_use]
    pub fn search_error(message: impl Into<String>) -> Self {
        Self::SearchError {
            message: message.into(),
        }
    }

    /// Render event name to wire format.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::SearchStarted { .. } => "search_started",
            Self::NewResult { .. } => "new_result",
            Self::SearchCompleted { .. } => "search_completed",
            Self::SearchError { .. } => "search_error",
        }
    }

    /// The event's JSON payload object.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        match self {
            Self::Connected { message }
            | Self::SearchStarted { message }
            | Self::SearchError { message } => serde_json::json!({ "message": message }),
            Self::NewResult { result, query } => serde_json::json!({
                "result": result,
                "query": query,
            }),
            Self::SearchCompleted { message, total } => serde_json::json!({
                "message": message,
                "total": total,
            }),
        }
    }
}

/// A versioned event envelope from host -> client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub v: u32,
    pub event_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub event: String,
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Wrap `event` in a v1 envelope with a fresh event id.
    #[must_use]
    pub fn new(request_id: Option<&str>, event: &ServerEvent) -> Self {
        Self {
            v: EVENT_VERSION,
            event_id: uuid::Uuid::new_v4().to_string(),
            request_id: request_id.map(str::to_owned),
            event: event.name().to_owned(),
            payload: event.payload(),
        }
    }
}

/// Contract validation error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractErrorKind {
    UnsupportedVersion,
    InvalidEnvelope,
    UnknownEvent,
}

/// Contract validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractError {
    pub kind: ContractErrorKind,
    pub message: String,
}

impl ContractError {
    #[must_use]
    pub fn new(kind: ContractErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl std::fmt::Display for ContractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ContractError {}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use linkscout_search::{Artwork, ResultKind};

    fn video() -> SearchResult {
        SearchResult {
            kind: ResultKind::Video,
            title: "Async Rust".into(),
            url: "https://www.youtube.com/watch?v=abc".into(),
            description: "Async Rust".into(),
            artwork: Some(Artwork::Thumbnail(
                "https://i.ytimg.com/vi/abc/hqdefault.jpg".into(),
            )),
            platform: "YouTube".into(),
            source: "YouTube".into(),
            duration: Some("12:34".into()),
        }
    }

    #[test]
    fn client_envelope_defaults_version_and_request_id() {
        let env: ClientEnvelope =
            serde_json::from_str(r#"{"event":"search_query","payload":{"query":"cats"}}"#)
                .unwrap();
        assert_eq!(env.v, EVENT_VERSION);
        assert!(env.request_id.is_none());
        assert_eq!(env.validate(), Ok(ClientEventName::SearchQuery));
    }

    #[test]
    fn client_envelope_rejects_other_versions() {
        let env: ClientEnvelope =
            serde_json::from_str(r#"{"v":2,"event":"search_query"}"#).unwrap();
        let err = env.validate().unwrap_err();
        assert_eq!(err.kind, ContractErrorKind::UnsupportedVersion);
    }

    #[test]
    fn client_envelope_rejects_unknown_events() {
        let env: ClientEnvelope = serde_json::from_str(r#"{"event":"host.ping"}"#).unwrap();
        let err = env.validate().unwrap_err();
        assert_eq!(err.kind, ContractErrorKind::UnknownEvent);
        assert!(err.message.contains("host.ping"));
    }

    #[test]
    fn missing_search_types_means_both() {
        let payload: SearchQueryPayload = serde_json::from_str(r#"{"query":" cats "}"#).unwrap();
        let request = payload.to_request().unwrap();
        assert_eq!(request.query(), "cats");
        assert!(request.want_videos());
        assert!(request.want_websites());
    }

    #[test]
    fn missing_flag_inside_search_types_defaults_to_true() {
        let payload: SearchQueryPayload =
            serde_json::from_str(r#"{"query":"cats","searchTypes":{"videos":true}}"#).unwrap();
        let request = payload.to_request().unwrap();
        assert!(request.want_videos());
        assert!(request.want_websites());

        let payload: SearchQueryPayload = serde_json::from_str(
            r#"{"query":"cats","searchTypes":{"videos":false,"websites":true}}"#,
        )
        .unwrap();
        let request = payload.to_request().unwrap();
        assert!(!request.want_videos());
        assert!(request.want_websites());
    }

    #[test]
    fn search_types_without_a_true_flag_rejected() {
        for raw in [
            r#"{"query":"cats","searchTypes":{}}"#,
            r#"{"query":"cats","searchTypes":{"videos":false}}"#,
            r#"{"query":"cats","searchTypes":{"websites":false}}"#,
        ] {
            let payload: SearchQueryPayload = serde_json::from_str(raw).unwrap();
            assert_eq!(
                payload.to_request().unwrap_err().to_string(),
                "Please select at least one search type",
                "{raw}"
            );
        }
    }

    #[test]
    fn search_types_skip_absent_flags_when_serialized() {
        let payload = SearchQueryPayload {
            query: "cats".to_owned(),
            search_types: Some(SearchTypes {
                videos: Some(true),
                websites: None,
            }),
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"query":"cats","searchTypes":{"videos":true}}"#);
    }

    #[test]
    fn invalid_payloads_fail_validation() {
        let blank: SearchQueryPayload =
            serde_json::from_str(r#"{"query":"","searchTypes":{"videos":true}}"#).unwrap();
        assert_eq!(
            blank.to_request().unwrap_err().to_string(),
            "Please enter a search query"
        );

        let none: SearchQueryPayload = serde_json::from_str(
            r#"{"query":"cats","searchTypes":{"videos":false,"websites":false}}"#,
        )
        .unwrap();
        assert_eq!(
            none.to_request().unwrap_err().to_string(),
            "Please select at least one search type"
        );
    }

    #[test]
    fn result_record_prefers_thumbnail_and_fills_defaults() {
        let record = ResultRecord::from(&video());
        assert_eq!(record.thumbnail, "https://i.ytimg.com/vi/abc/hqdefault.jpg");
        assert_eq!(record.duration, "12:34");
        assert_eq!(record.kind, "video");

        let mut site = video();
        site.kind = ResultKind::Website;
        site.artwork = Some(Artwork::Favicon("https://example.com/favicon.ico".into()));
        site.duration = None;
        site.source = String::new();
        let record = ResultRecord::from(&site);
        assert_eq!(record.thumbnail, "https://example.com/favicon.ico");
        assert_eq!(record.duration, "Unknown");
        assert_eq!(record.source, "Unknown");
        assert_eq!(record.kind, "website");

        site.artwork = None;
        assert_eq!(ResultRecord::from(&site).thumbnail, "");
    }

    #[test]
    fn result_record_serializes_type_field() {
        let json = serde_json::to_value(ResultRecord::from(&video())).unwrap();
        assert_eq!(json["type"], "video");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn event_payloads_match_wire_format() {
        let started = ServerEvent::search_started("cats");
        assert_eq!(started.name(), "search_started");
        assert_eq!(started.payload()["message"], "Starting search for: cats");

        let done = ServerEvent::search_completed(3);
        assert_eq!(done.payload()["message"], "Search completed. Found 3 results.");
        assert_eq!(done.payload()["total"], 3);

        let result = ServerEvent::new_result(&video(), "cats");
        assert_eq!(result.name(), "new_result");
        assert_eq!(result.payload()["query"], "cats");
        assert_eq!(result.payload()["result"]["platform"], "YouTube");

        assert_eq!(ServerEvent::connected().payload()["message"], "Connected to server");
    }

    #[test]
    fn event_envelope_roundtrip_json() {
        let envelope = EventEnvelope::new(Some("req-1"), &ServerEvent::search_error("boom"));
        assert_eq!(envelope.v, EVENT_VERSION);
        assert!(uuid::Uuid::parse_str(&envelope.event_id).is_ok());

        let json = serde_json::to_string(&envelope).unwrap();
        let parsed: EventEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[test]
    fn event_ids_are_unique() {
        let a = EventEnvelope::new(None, &ServerEvent::connected());
        let b = EventEnvelope::new(None, &ServerEvent::connected());
        assert_ne!(a.event_id, b.event_id);
        assert!(!serde_json::to_string(&a).unwrap().contains("request_id"));
    }
}
