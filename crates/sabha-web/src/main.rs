//! sabha server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the pages and JSON API over HTTP.
//!
//! # Seeding
//!
//! To load a JSON fixture into the configured store and exit:
//!
//! ```text
//! cargo run -p sabha-web --bin server -- --seed fixtures.json
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use sabha_store_sqlite::SqliteStore;
use sabha_web::{AppState, ServerConfig, seed, templates::Templates};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Sabha event catalog server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Load a JSON fixture into the store and exit.
  #[arg(long, value_name = "FILE")]
  seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = load_config(cli.config)?;

  let home = std::env::var_os("HOME").map(PathBuf::from);
  let store_path = server_cfg.resolved_store_path(home.as_deref());
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.seed {
    Some(fixture) => load_fixture(&store, fixture).await,
    None => serve(store, &server_cfg).await,
  }
}

/// Defaults, then the TOML file (if present), then `SABHA_*` variables.
fn load_config(path: PathBuf) -> anyhow::Result<ServerConfig> {
  config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 3000)?
    .set_default("store_path", "sabha.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("SABHA"))
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}

async fn load_fixture(store: &SqliteStore, path: PathBuf) -> anyhow::Result<()> {
  let raw = tokio::fs::read_to_string(&path)
    .await
    .with_context(|| format!("failed to read fixture {path:?}"))?;
  let summary = seed::seed(store, seed::Fixture::from_json(&raw)?).await?;
  println!(
    "seeded {} events, {} topics, {} categories, {} sessions",
    summary.events, summary.topics, summary.categories, summary.sessions
  );
  Ok(())
}

async fn serve(store: SqliteStore, cfg: &ServerConfig) -> anyhow::Result<()> {
  let state = AppState {
    store:     Arc::new(store),
    templates: Arc::new(Templates::new().context("failed to compile templates")?),
  };

  let address = format!("{}:{}", cfg.host, cfg.port);
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, sabha_web::router(state))
    .await
    .context("server error")
}
