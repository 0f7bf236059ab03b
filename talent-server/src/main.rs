//! talent-server - HR candidate tracker backend
//!
//! Serves the candidate spreadsheet and the user table over a
//! session-authenticated JSON API.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use talent_common::config::{load_toml_config, AppConfig, DEFAULT_PORT};
use talent_common::db::{self, init_database};
use talent_common::RecordStore;
use talent_server::{build_router, AppState, SessionStore};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How often idle sessions are swept
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Command-line arguments for talent-server
#[derive(Parser, Debug)]
#[command(name = "talent-server")]
#[command(about = "HR candidate tracking backend")]
#[command(version)]
struct Args {
    /// Port to listen on (default 5000)
    #[arg(short, long, env = "TALENT_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, default_value = "127.0.0.1", env = "TALENT_BIND")]
    bind: String,

    /// Folder holding the spreadsheet and the user database
    #[arg(short, long, env = "TALENT_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "TALENT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref());
    let config = AppConfig::resolve(args.root_folder.as_deref(), &toml_config);

    // Initialize tracing (RUST_LOG wins over the configured level)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting talent-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Root folder: {}", config.root_folder.display());
    info!("Spreadsheet: {} [{}]", config.data_file.display(), config.sheet_name);
    info!("User database: {}", config.user_db.display());

    let pool = init_database(&config.user_db)
        .await
        .context("Failed to open user database")?;
    db::initialize(&pool, &config.admin_username, &config.admin_password)
        .await
        .context("Failed to initialize users table")?;
    info!("✓ User database ready");

    let state = AppState::from_config(pool, &config);

    // Rewrite legacy or reordered spreadsheets into canonical shape
    match normalize_spreadsheet(state.records.clone()).await {
        Ok(count) => info!("✓ Spreadsheet ready ({} records)", count),
        Err(e) => error!("Spreadsheet normalization failed: {:#}", e),
    }

    tokio::spawn(sweep_sessions(state.sessions.clone()));

    let app = build_router(state);

    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);
    let addr: SocketAddr = format!("{}:{}", args.bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", args.bind, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("talent-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the spreadsheet if needed, then load and save it once
async fn normalize_spreadsheet(store: RecordStore) -> Result<usize> {
    tokio::task::spawn_blocking(move || -> Result<usize> {
        store.create_if_missing()?;
        let records = store.load_all()?;
        store.save_all(&records)?;
        Ok(records.len())
    })
    .await
    .context("Spreadsheet task panicked")?
}

/// Periodically drop idle sessions
async fn sweep_sessions(sessions: SessionStore) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        let purged = sessions.purge_expired().await;
        if purged > 0 {
            info!("Purged {} expired sessions", purged);
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
