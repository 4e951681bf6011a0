//! CLI binary for linkscout: run one search and print its events.

use std::path::PathBuf;

use clap::Parser;
use linkscout::host::contract::{SearchQueryPayload, SearchTypes};
use linkscout::host::stdio::JsonLines;
use linkscout::{AppConfig, DeliveryMode, QueryOutcome, StreamingSession};
use tracing_subscriber::EnvFilter;

/// linkscout: search dozens of web and video providers at once.
///
/// Prints one JSON event per line on stdout, exactly as the
/// `linkscout-host` bridge would send them.
#[derive(Parser)]
#[command(name = "linkscout", version, about)]
struct Cli {
    /// Search query.
    #[arg(required = true)]
    query: Vec<String>,

    /// Search video providers only.
    #[arg(long, conflicts_with = "websites_only")]
    videos_only: bool,

    /// Search website providers only.
    #[arg(long)]
    websites_only: bool,

    /// Emit results after the whole batch finishes instead of as they arrive.
    #[arg(long)]
    buffered: bool,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("linkscout=info,linkscout_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.buffered {
        config.session.delivery = DeliveryMode::Buffered;
    }

    let payload = SearchQueryPayload {
        query: cli.query.join(" "),
        search_types: Some(SearchTypes::only(!cli.websites_only, !cli.videos_only)),
    };

    let mut session = StreamingSession::from_config(&config)?;
    let mut output = JsonLines::new(tokio::io::stdout());
    match session.handle_query(None, &payload, &mut output).await? {
        QueryOutcome::Completed { total } => {
            tracing::info!(total, "search finished");
            Ok(())
        }
        QueryOutcome::Failed => anyhow::bail!("search failed"),
    }
}
