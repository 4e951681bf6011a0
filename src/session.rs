//! Per-client search session: validates a query, runs the collector, and
//! pushes events to an [`EventSink`].
//!
//! A session handles one request at a time. Whatever happens during a
//! request, the client sees either `search_error` or the sequence
//! `search_started`, `new_result`*, `search_completed`, and the session is
//! back in [`SessionState::Idle`] afterwards.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::pin;

use futures_util::{FutureExt, StreamExt};
use linkscout_search::{Collector, Fetcher, HttpFetcher, SearchRequest};
use tokio::sync::mpsc;

use crate::config::{AppConfig, DeliveryMode};
use crate::error::{AppError, Result};
use crate::host::contract::{EventEnvelope, SearchQueryPayload, ServerEvent};

/// Where a session's events go.
pub trait EventSink: Send {
    /// Deliver one event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Channel`] (or [`AppError::Io`]) once the client
    /// can no longer receive events.
    fn emit(&mut self, envelope: EventEnvelope) -> impl Future<Output = Result<()>> + Send;
}

impl EventSink for mpsc::Sender<EventEnvelope> {
    async fn emit(&mut self, envelope: EventEnvelope) -> Result<()> {
        self.send(envelope)
            .await
            .map_err(|_| AppError::Channel("event receiver dropped".into()))
    }
}

impl EventSink for Vec<EventEnvelope> {
    async fn emit(&mut self, envelope: EventEnvelope) -> Result<()> {
        self.push(envelope);
        Ok(())
    }
}

/// Lifecycle of one request.
///
/// `Idle → Validating → Running → Emitting → Completed → Idle`, or
/// `Errored → Idle` from any state after `Validating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Validating,
    Running,
    Emitting,
    Completed,
    Errored,
}

impl SessionState {
    /// Whether `self → next` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::*;
        matches!(
            (self, next),
            (Idle, Validating)
                | (Validating, Running)
                | (Running, Emitting)
                | (Running, Completed)
                | (Emitting, Completed)
                | (Validating | Running | Emitting, Errored)
                | (Completed | Errored, Idle)
        )
    }
}

/// How a request ended, as reported to the caller of
/// [`StreamingSession::handle_query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// `search_completed` was sent with this total.
    Completed { total: usize },
    /// `search_error` was sent instead.
    Failed,
}

/// A search session bound to one collector.
pub struct StreamingSession<F> {
    collector: Collector<F>,
    delivery: DeliveryMode,
    state: SessionState,
}

impl StreamingSession<HttpFetcher> {
    /// A session searching over HTTP with `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let collector = Collector::http(config.search.clone())?;
        Ok(Self::new(collector, config.session.delivery))
    }
}

impl<F: Fetcher> StreamingSession<F> {
    pub fn new(collector: Collector<F>, delivery: DeliveryMode) -> Self {
        Self {
            collector,
            delivery,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn delivery(&self) -> DeliveryMode {
        self.delivery
    }

    /// Handle one `search_query` payload, sending every event to `sink`.
    ///
    /// Validation failures and failures during the search (including a
    /// panic) are reported to the client as `search_error` and yield
    /// [`QueryOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Only sink failures are returned: once the client is gone there is
    /// nobody left to report to.
    pub async fn handle_query<S: EventSink>(
        &mut self,
        request_id: Option<&str>,
        payload: &SearchQueryPayload,
        sink: &mut S,
    ) -> Result<QueryOutcome> {
        self.transition(SessionState::Validating);
        let request = match payload.to_request() {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(error = %err, "search request rejected");
                return self.fail(request_id, err.to_string(), sink).await;
            }
        };

        tracing::debug!(query = request.query(), delivery = ?self.delivery, "search requested");
        let started = ServerEvent::search_started(request.query());
        if let Err(err) = sink.emit(EventEnvelope::new(request_id, &started)).await {
            return self.abandon(err);
        }
        self.transition(SessionState::Running);

        let Self {
            collector,
            delivery,
            state,
        } = self;
        let search = run_search(collector, *delivery, &request, request_id, &mut *sink, state);

        match AssertUnwindSafe(search).catch_unwind().await {
            Ok(Ok(total)) => {
                self.transition(SessionState::Completed);
                let done = ServerEvent::search_completed(total);
                if let Err(err) = sink.emit(EventEnvelope::new(request_id, &done)).await {
                    return self.abandon(err);
                }
                tracing::info!(total, "search completed");
                self.transition(SessionState::Idle);
                Ok(QueryOutcome::Completed { total })
            }
            Ok(Err(err)) => self.abandon(err),
            Err(panic) => {
                let message = format!("Error during search: {}", panic_message(panic.as_ref()));
                tracing::error!(error = %message, "search panicked");
                self.fail(request_id, message, sink).await
            }
        }
    }

    async fn fail<S: EventSink>(
        &mut self,
        request_id: Option<&str>,
        message: String,
        sink: &mut S,
    ) -> Result<QueryOutcome> {
        self.transition(SessionState::Errored);
        let emitted = sink
            .emit(EventEnvelope::new(request_id, &ServerEvent::search_error(message)))
            .await;
        self.transition(SessionState::Idle);
        emitted.map(|()| QueryOutcome::Failed)
    }

    /// The sink is gone; reset and hand the error to the caller.
    fn abandon(&mut self, err: AppError) -> Result<QueryOutcome> {
        tracing::warn!(error = %err, "client went away during search");
        self.transition(SessionState::Errored);
        self.transition(SessionState::Idle);
        Err(err)
    }

    fn transition(&mut self, next: SessionState) {
        if !self.state.can_transition_to(next) {
            tracing::warn!(from = ?self.state, to = ?next, "unexpected session transition");
        }
        tracing::trace!(from = ?self.state, to = ?next, "session transition");
        self.state = next;
    }
}

/// Run the collector and emit every result. Returns the number emitted.
async fn run_search<F: Fetcher, S: EventSink>(
    collector: &Collector<F>,
    delivery: DeliveryMode,
    request: &SearchRequest,
    request_id: Option<&str>,
    sink: &mut S,
    state: &mut SessionState,
) -> Result<usize> {
    let query = request.query();
    let mut total = 0usize;

    match delivery {
        DeliveryMode::Incremental => {
            let mut results = pin!(collector.stream(request));
            while let Some(result) = results.next().await {
                *state = SessionState::Emitting;
                let event = ServerEvent::new_result(&result, query);
                sink.emit(EventEnvelope::new(request_id, &event)).await?;
                total += 1;
            }
        }
        DeliveryMode::Buffered => {
            let results = collector.collect(request).await;
            *state = SessionState::Emitting;
            for result in &results {
                let event = ServerEvent::new_result(result, query);
                sink.emit(EventEnvelope::new(request_id, &event)).await?;
                total += 1;
            }
        }
    }

    Ok(total)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return *message;
    }
    payload
        .downcast_ref::<String>()
        .map_or("unknown panic", String::as_str)
}
