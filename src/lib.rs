//! venuebook library root.
//! Exposes the CLI parser, high-level run() function, and internal modules.

pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod http;
pub mod models;
pub mod state;

use clap::Parser;
use cli::Cli;
use config::Config;
use db::initialize::init_db;
use db::pool::Db;
use errors::AppResult;
use state::AppState;
use tokio::net::TcpListener;
use tracing::info;

/// Entry point used by main.rs: load config, open the database, serve.
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load();
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(port) = cli.port {
        cfg.port = port;
    }

    let db = Db::open(&cfg.database)?;
    db.with_conn(init_db)?;
    info!("database ready at {}", cfg.database);

    let app = http::router(AppState { db });

    let address = format!("0.0.0.0:{}", cfg.port);
    let listener = TcpListener::bind(&address).await?;
    info!("server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
