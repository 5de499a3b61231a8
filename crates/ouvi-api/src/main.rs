//! ouvi intake server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), layered under
//! `OUVI_*` environment variables, opens the SQLite store, and serves the
//! intake API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use ouvi_api::{AppState, FsMediaStore, ServerConfig};
use ouvi_core::{IntakeWorkflow, classify::KeywordClassifier};
use ouvi_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "ouvi citizen-complaint intake server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("OUVI"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Schema initialisation happens here, once, before any request is served.
  let store = SqliteStore::open(&server_cfg.db_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", server_cfg.db_path))?;

  tokio::fs::create_dir_all(&server_cfg.upload_dir)
    .await
    .with_context(|| {
      format!("failed to create upload dir {:?}", server_cfg.upload_dir)
    })?;

  let workflow = IntakeWorkflow::new(
    store,
    FsMediaStore::new(server_cfg.upload_dir.clone()),
    KeywordClassifier::default(),
  );
  let state = AppState { workflow: Arc::new(workflow) };

  let app = ouvi_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
