// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result
    )
)]

use clap::Parser;
use color_eyre::eyre::Result;
use linkshelf::config::{self, UserConfig};
use linkshelf::cors::{build_cors_layer, DEFAULT_CORS_ORIGINS};
use linkshelf::logging::{init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use linkshelf::request_logging::RequestLoggingLayer;
use linkshelf::server::{router, AppState};
use linkshelf::{list_topics, reconcile_pins, Db, DocumentStore, FsStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

const DEFAULT_ADDR: &str = "127.0.0.1:50000";

/// Linkshelf - bookmark store with topics and pinned links
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the HTTP server to [default: 127.0.0.1:50000]
    #[arg(short, long, env = "LINKSHELF_ADDR")]
    addr: Option<String>,

    /// Directory holding the document store (default: ~/.linkshelf/data)
    #[arg(long, env = "LINKSHELF_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Password every API request must send in the x-password header
    #[arg(long, env = "LINKSHELF_PASSWORD", hide_env_values = true)]
    password: String,

    /// Comma-separated list of allowed CORS origins. "*" allows all.
    #[arg(
        long,
        env = "LINKSHELF_CORS_ORIGINS",
        default_value = DEFAULT_CORS_ORIGINS,
        value_delimiter = ','
    )]
    cors_origins: Vec<String>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "LINKSHELF_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "LINKSHELF_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Custom log directory (default: ~/.linkshelf/logs)
    #[arg(long, env = "LINKSHELF_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Rebuild every topic's pin index from the resources' pin flags before serving
    #[arg(long)]
    reconcile_pins: bool,
}

async fn reconcile_all(db: &Db) -> Result<()> {
    for topic in list_topics(db).await? {
        match reconcile_pins(db, &topic).await {
            Ok(pins) => info!(topic = %topic, pins = pins.len(), "Reconciled pin index"),
            Err(e) => warn!(topic = %topic, error = %e, "Failed to reconcile pin index"),
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal, stopping server...");
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let log_config = LogConfig {
        log_dir: args.log_dir.clone().unwrap_or_else(config::default_log_dir),
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };
    let log_file = log_config.log_dir.join(LOG_FILENAME);
    if let Err(e) = init_logging(&log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    let user_cfg = config::load_user_config().unwrap_or_else(|e| {
        warn!("Failed to load user config, using defaults: {e}");
        UserConfig::default()
    });

    let data_dir = args
        .data_dir
        .or(user_cfg.store.data_dir)
        .unwrap_or_else(config::default_data_dir);
    let addr = args
        .addr
        .or(user_cfg.server.addr)
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());

    let store: Arc<dyn DocumentStore> = Arc::new(FsStore::open(&data_dir).await?);
    let db = Db::with_default_sanitizer(store);
    info!("Document store at {}", data_dir.display());

    if args.reconcile_pins {
        reconcile_all(&db).await?;
    }

    let cors_origins: Vec<String> = args
        .cors_origins
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    info!("CORS origins: {}", cors_origins.join(", "));

    let app = router(AppState::new(db, &args.password))
        .layer(build_cors_layer(cors_origins))
        .layer(RequestLoggingLayer);

    let listener = TcpListener::bind(&addr).await?;
    info!("Linkshelf API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Linkshelf stopped");
    Ok(())
}
