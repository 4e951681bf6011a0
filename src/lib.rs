//! linkscout: concurrent multi-source web and video search, streamed to
//! clients as newline-delimited JSON events.
//!
//! # Architecture
//!
//! - **Search** ([`linkscout_search`]): provider extractors, the HTTP
//!   fetcher, and the collector that fans a query out to every provider
//! - **Session** ([`session`]): one request/response cycle per query,
//!   turning collector output into `search_started`, `new_result` and
//!   `search_completed` events
//! - **Host** ([`host`]): the versioned wire contract and the stdio bridge
//!   used by the `linkscout-host` binary

pub mod config;
pub mod error;
pub mod host;
pub mod session;

pub use config::{AppConfig, DeliveryMode, SessionConfig};
pub use error::{AppError, Result};
pub use host::contract::{ClientEnvelope, EventEnvelope, ResultRecord, SearchQueryPayload, ServerEvent};
pub use session::{EventSink, QueryOutcome, SessionState, StreamingSession};
