//! Newline-delimited JSON bridge between a client and a [`StreamingSession`].
//!
//! Reads [`ClientEnvelope`] lines from the input, runs each `search_query`
//! through the session, and writes every resulting [`EventEnvelope`] as one
//! JSON line to the output.
//!
//! When the output is stdout it is exclusively reserved for the protocol;
//! all diagnostic output (tracing, logs) must be routed to stderr.

use linkscout_search::Fetcher;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::mpsc;

use crate::error::{AppError, Result};
use crate::host::contract::{ClientEnvelope, EventEnvelope, SearchQueryPayload, ServerEvent};
use crate::session::{EventSink, StreamingSession};

/// Event sink that writes each envelope as one flushed JSON line.
pub struct JsonLines<W> {
    writer: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin + Send> JsonLines<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Serialize `envelope`, write it followed by a newline, and flush.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Protocol`] if the envelope cannot be serialized
    /// and [`AppError::Channel`] if the writer fails.
    pub async fn write(&mut self, envelope: &EventEnvelope) -> Result<()> {
        let json = serde_json::to_string(envelope)
            .map_err(|e| AppError::Protocol(format!("failed to serialize event envelope: {e}")))?;
        self.writer
            .write_all(json.as_bytes())
            .await
            .map_err(|e| AppError::Channel(format!("failed to write event: {e}")))?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| AppError::Channel(format!("failed to write newline: {e}")))?;
        self.writer
            .flush()
            .await
            .map_err(|e| AppError::Channel(format!("failed to flush output: {e}")))?;
        Ok(())
    }

    /// The underlying writer. Every line has already been flushed.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: AsyncWrite + Unpin + Send> EventSink for JsonLines<W> {
    async fn emit(&mut self, envelope: EventEnvelope) -> Result<()> {
        self.write(&envelope).await
    }
}

/// Run the bridge on stdin/stdout until stdin closes.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or stdout cannot be written.
pub async fn run_stdio_bridge<F: Fetcher>(
    session: StreamingSession<F>,
    event_capacity: usize,
) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    run_bridge(stdin, tokio::io::stdout(), session, event_capacity)
        .await
        .map(drop)
}

/// Run the bridge over any reader/writer pair until the reader hits EOF.
///
/// Two tasks cooperate:
///
/// 1. **Reader** (the current task) sends `connected`, then parses each
///    line and dispatches it through the session. Malformed lines and
///    unknown events produce a `search_error` and reading continues.
/// 2. **Writer** (spawned) drains the bounded event queue into `writer`.
///
/// Returns the writer once every queued event has been written.
///
/// # Errors
///
/// Returns an error if reading fails or the writer stops accepting events.
pub async fn run_bridge<R, W, F>(
    reader: R,
    writer: W,
    mut session: StreamingSession<F>,
    event_capacity: usize,
) -> Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    F: Fetcher,
{
    let (mut events, mut event_rx) = mpsc::channel::<EventEnvelope>(event_capacity.max(1));

    let writer_handle = tokio::spawn(async move {
        let mut lines = JsonLines::new(writer);
        while let Some(envelope) = event_rx.recv().await {
            if let Err(e) = lines.write(&envelope).await {
                tracing::warn!(error = %e, "failed to write event; stopping event writer");
                break;
            }
        }
        lines.into_inner()
    });

    let reader_result = run_reader(reader, &mut session, &mut events).await;

    // Closing the queue lets the writer drain and exit.
    drop(events);
    let writer = writer_handle
        .await
        .map_err(|e| AppError::Channel(format!("event writer task failed: {e}")))?;

    reader_result.map(|()| writer)
}

async fn run_reader<R, F, S>(
    mut reader: R,
    session: &mut StreamingSession<F>,
    sink: &mut S,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    F: Fetcher,
    S: EventSink,
{
    sink.emit(EventEnvelope::new(None, &ServerEvent::connected()))
        .await?;
    tracing::info!("client connected");

    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| AppError::Channel(format!("failed to read input: {e}")))?;

        if bytes_read == 0 {
            tracing::info!("input closed (EOF); shutting down bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        dispatch(trimmed, session, sink).await?;
    }

    Ok(())
}

/// Handle one input line.
async fn dispatch<F, S>(line: &str, session: &mut StreamingSession<F>, sink: &mut S) -> Result<()>
where
    F: Fetcher,
    S: EventSink,
{
    let envelope: ClientEnvelope = match serde_json::from_str(line) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse client envelope");
            return reject(None, format!("Error processing search request: {e}"), sink).await;
        }
    };
    let request_id = envelope.request_id.as_deref();

    if let Err(e) = envelope.validate() {
        tracing::warn!(error = %e, "rejected client envelope");
        return reject(request_id, e.message, sink).await;
    }

    let payload = if envelope.payload.is_null() {
        SearchQueryPayload::default()
    } else {
        match serde_json::from_value::<SearchQueryPayload>(envelope.payload.clone()) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "invalid search_query payload");
                return reject(
                    request_id,
                    format!("Error processing search request: {e}"),
                    sink,
                )
                .await;
            }
        }
    };

    session.handle_query(request_id, &payload, sink).await.map(drop)
}

async fn reject<S: EventSink>(request_id: Option<&str>, message: String, sink: &mut S) -> Result<()> {
    sink.emit(EventEnvelope::new(
        request_id,
        &ServerEvent::search_error(message),
    ))
    .await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::config::DeliveryMode;
    use linkscout_search::{Collector, SearchConfig, SearchError};

    struct OfflineFetcher;

    impl Fetcher for OfflineFetcher {
        async fn fetch(&self, url: &str) -> std::result::Result<String, SearchError> {
            Err(SearchError::Fetch(format!("{url}: offline")))
        }
    }

    fn session() -> StreamingSession<OfflineFetcher> {
        let config = SearchConfig {
            page_delay_ms: 0,
            ..Default::default()
        };
        StreamingSession::new(Collector::new(OfflineFetcher, config), DeliveryMode::Buffered)
    }

    fn parse_lines(output: &[u8]) -> Vec<EventEnvelope> {
        String::from_utf8_lossy(output)
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is an event envelope"))
            .collect()
    }

    #[tokio::test]
    async fn json_lines_writes_one_flushed_line_per_event() {
        let mut lines = JsonLines::new(Vec::new());
        lines
            .emit(EventEnvelope::new(None, &ServerEvent::connected()))
            .await
            .unwrap();
        lines
            .emit(EventEnvelope::new(Some("r"), &ServerEvent::search_completed(0)))
            .await
            .unwrap();

        let output = lines.into_inner();
        assert!(output.ends_with(b"\n"));
        let events = parse_lines(&output);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event, "connected");
        assert_eq!(events[1].request_id.as_deref(), Some("r"));
    }

    #[tokio::test]
    async fn empty_input_only_announces_connection() {
        let output = run_bridge(&b""[..], Vec::new(), session(), 8).await.unwrap();
        let events = parse_lines(&output);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "connected");
        assert_eq!(events[0].payload["message"], "Connected to server");
    }

    #[tokio::test]
    async fn malformed_lines_do_not_stop_the_bridge() {
        let input = concat!(
            "this is not json\n",
            "\n",
            "{\"event\":\"host.ping\",\"request_id\":\"p1\"}\n",
            "{\"event\":\"search_query\",\"payload\":{\"query\":42}}\n",
            "{\"event\":\"search_query\",\"request_id\":\"q1\"}\n",
        );
        let output = run_bridge(input.as_bytes(), Vec::new(), session(), 8)
            .await
            .unwrap();
        let events = parse_lines(&output);

        let names: Vec<&str> = events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(
            names,
            ["connected", "search_error", "search_error", "search_error", "search_error"]
        );
        assert!(events[1].request_id.is_none());
        assert_eq!(events[2].request_id.as_deref(), Some("p1"));
        assert!(events[2].payload["message"]
            .as_str()
            .unwrap()
            .contains("unknown event"));
        assert_eq!(events[4].request_id.as_deref(), Some("q1"));
        assert_eq!(events[4].payload["message"], "Please enter a search query");
    }
}
