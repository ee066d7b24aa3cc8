//! matchgrab API - HTTP query service
//!
//! Serves read-only account and match queries over a match store written by
//! the ingestion process.
//!
//! redb takes an exclusive lock on the store file, so while the API runs
//! neither ingestion nor `matchgrab-cli` can open the same store. Stop the API
//! first, or point ingestion at a separate file and swap it in.

use anyhow::Result;
use clap::Parser;
use matchgrab_api::handlers::AppState;
use matchgrab_common::Config;
use matchgrab_store::MatchStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "matchgrab-api")]
#[command(about = "matchgrab match query API")]
#[command(
    after_help = "The API holds an exclusive lock on the store file while it runs; \
                  ingestion and matchgrab-cli cannot open the same store until it stops."
)]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "matchgrab.toml")]
    config: PathBuf,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Match store file (overrides config)
    #[arg(long, env = "MATCHGRAB_STORE")]
    store: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let mut config = Config::load(Some(args.config.as_path()))
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", args.config.display(), e))?;
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(store) = args.store {
        config.store.path = store;
    }
    if let Some(level) = args.log_level {
        config.log.level = level;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting matchgrab API");
    info!("Match store: {}", config.store.path.display());

    let store = MatchStore::open(&config.store.path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to open match store {}: {}",
            config.store.path.display(),
            e
        )
    })?;
    info!("Match store holds {} matches", store.count()?);

    let app = matchgrab_api::router(Arc::new(AppState::new(store)));

    info!("Starting query API on {}", config.server.listen);

    let listener = TcpListener::bind(config.server.listen).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down...");
        })
        .await?;

    info!("matchgrab API shut down gracefully");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_help_mentions_store_lock() {
        let help = Args::command().render_long_help().to_string();
        assert!(help.contains("exclusive lock on the store file"), "{help}");
    }
}
