//! Database migration runner.

use sqlx::PgPool;
use tracing::info;

use buildhub_core::error::{AppError, ErrorKind};
use buildhub_core::result::AppResult;

/// Run all pending database migrations from the workspace `migrations/`
/// directory.
pub async fn run_migrations(pool: &PgPool) -> AppResult<()> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(
        available = migrator.iter().count(),
        "Running database migrations"
    );

    migrator.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed");
    Ok(())
}
