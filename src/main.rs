//! BuildHub Server: construction back-office documents, folders, and
//! finance totals.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use buildhub_core::config::AppConfig;
use buildhub_core::error::AppError;
use buildhub_database::DatabasePool;
use buildhub_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the `BUILDHUB_ENV` overlay, and env overrides
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("BUILDHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Connect, migrate if configured, and serve until shutdown
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting BuildHub v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    db.ensure_reachable().await?;
    if config.database.migrate_on_start {
        run_migrations(db.pool()).await?;
    } else {
        tracing::info!("Skipping migrations (database.migrate_on_start = false)");
    }

    buildhub_api::run_server(config, db).await
}
