//! Headless host bridge binary for stdin/stdout JSON communication.
//!
//! This binary reads `ClientEnvelope` messages as newline-delimited JSON
//! from stdin, runs each `search_query` through a streaming session, and
//! writes `EventEnvelope` messages to stdout.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel. Set `LINKSCOUT_CONFIG` to load a config file
//! other than the default.

use std::path::PathBuf;

use linkscout::host::stdio::run_stdio_bridge;
use linkscout::{AppConfig, StreamingSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("linkscout=info,linkscout_search=info")
            }),
        )
        .init();

    let config_path = std::env::var_os("LINKSCOUT_CONFIG").map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    tracing::info!(delivery = ?config.session.delivery, "linkscout-host starting");

    let session = StreamingSession::from_config(&config)?;
    run_stdio_bridge(session, config.session.event_capacity)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "linkscout-host exited with error");
            anyhow::anyhow!("linkscout-host failed: {e}")
        })?;

    tracing::info!("linkscout-host shut down cleanly");
    Ok(())
}
