//! Start the BuildHub server.

use clap::Args;

use buildhub_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Skip database migrations on startup, overriding
    /// `database.migrate_on_start`
    #[arg(long)]
    pub no_migrate: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting BuildHub server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    let db = super::connect(&config).await?;
    db.ensure_reachable().await?;

    if config.database.migrate_on_start && !args.no_migrate {
        buildhub_database::migration::run_migrations(db.pool()).await?;
        println!("  Migrations applied successfully.");
    }

    buildhub_api::run_server(config, db).await
}
