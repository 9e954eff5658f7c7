//! pickstat server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite draw store, rebuilds the in-memory ledger from it, and serves the
//! JSON API over HTTP.
//!
//! # Importing history
//!
//! ```text
//! pickstat-server import draws.csv
//! ```

use std::{fs::File, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pickstat_server::{ServerConfig, app, hydrate, import::import_csv};
use pickstat_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "pickstat lottery statistics server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the HTTP API (the default).
  Serve,
  /// Record draws from a CSV file, then exit.
  Import {
    /// Headered CSV: variant,draw_date,session,winning_number,supplemental_digit
    file: PathBuf,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  // Open SQLite store.
  let store_path = server_cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let state = hydrate(store, server_cfg.analysis).await?;

  match cli.command.unwrap_or(Command::Serve) {
    Command::Import { file } => {
      let reader =
        File::open(&file).with_context(|| format!("failed to open {file:?}"))?;
      let summary = import_csv(&state, reader)
        .await
        .with_context(|| format!("import of {file:?} failed"))?;
      tracing::info!(
        recorded = summary.recorded,
        skipped = summary.skipped,
        "import finished"
      );
    }
    Command::Serve => {
      let address = server_cfg.address();
      tracing::info!("Listening on http://{address}");
      let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

      axum::serve(listener, app(state)).await.context("server error")?;
    }
  }

  Ok(())
}
