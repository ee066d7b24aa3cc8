//! matchgrab CLI - offline store inspection
//!
//! Runs the API's queries directly against a store file and prints JSON.
//! redb locks the file per process, so stop the API before pointing this at
//! the same store.

use anyhow::Result;
use clap::{Parser, Subcommand};
use matchgrab_common::Config;
use matchgrab_store::{MatchStore, QueryEngine};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "matchgrab-cli")]
#[command(about = "matchgrab store inspection CLI")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "matchgrab.toml")]
    config: PathBuf,

    /// Match store file (overrides config)
    #[arg(short, long, env = "MATCHGRAB_STORE")]
    store: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every known account and its summoner name
    Accounts,
    /// List the matches an account played in
    #[command(allow_negative_numbers = true)]
    Account {
        /// Account ID
        account_id: i64,
    },
    /// Show one match
    #[command(allow_negative_numbers = true)]
    Match {
        /// Match ID
        match_id: i64,
    },
    /// Count stored matches
    Count,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let path = match args.store {
        Some(path) => path,
        None => Config::load(Some(args.config.as_path()))?.store.path,
    };
    debug!("Opening match store at {}", path.display());

    let store = MatchStore::open(&path)
        .map_err(|e| anyhow::anyhow!("Failed to open match store {}: {}", path.display(), e))?;
    let engine = QueryEngine::new(&store);

    match args.command {
        Commands::Accounts => print_json(&engine.list_accounts()?)?,
        Commands::Account { account_id } => {
            print_json(&engine.matches_for_account(account_id)?)?;
        }
        Commands::Match { match_id } => print_json(&engine.match_by_id(match_id)?)?,
        Commands::Count => println!("{}", store.count()?),
    }

    Ok(())
}
