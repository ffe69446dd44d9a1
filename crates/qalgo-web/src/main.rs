//! Quantum algorithm demo server entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use qalgo_web::config::{LogFormat, StorageBackend};
use qalgo_web::{AppConfig, AppState, create_router, telemetry};

#[derive(Parser, Debug)]
#[command(name = "qalgo-web")]
#[command(about = "Serve the quantum algorithm demos and the opinion board")]
#[command(version)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "QALGO_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:5000
    #[arg(short, long)]
    bind: Option<String>,

    /// SQLite database for opinions
    #[arg(long)]
    database: Option<PathBuf>,

    /// Keep opinions in memory only
    #[arg(long, conflicts_with = "database")]
    memory_store: bool,

    /// Directory for rendered artifacts
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Seed for reproducible simulations
    #[arg(long)]
    seed: Option<u64>,

    /// Log output format
    #[arg(long, value_parser = ["console", "json"])]
    log_format: Option<String>,
}

impl Args {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(bind) = self.bind {
            config.server.bind_address = bind;
        }
        if let Some(path) = self.database {
            config.storage.backend = StorageBackend::Sqlite;
            config.storage.path = Some(path);
        }
        if self.memory_store {
            config.storage.backend = StorageBackend::Memory;
        }
        if let Some(dir) = self.results_dir {
            config.output.results_dir = dir;
        }
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        match self.log_format.as_deref() {
            Some("json") => config.logging.format = LogFormat::Json,
            Some(_) => config.logging.format = LogFormat::Console,
            None => {}
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    let config = args.apply(config);
    config.validate()?;

    telemetry::init_tracing(&config.logging)?;

    let bind_addr = config.bind_addr()?;
    let state = Arc::new(AppState::from_config(config).context("opening the opinion store")?);
    info!(
        storage = ?state.config.storage.backend,
        output = ?state.config.output.mode,
        "Initialized application state"
    );

    let app = create_router(state);

    info!("Starting quantum algorithm server at http://{}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
