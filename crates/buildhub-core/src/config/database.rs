//! PostgreSQL settings.
//!
//! BuildHub is a back-office service with a handful of concurrent users,
//! so the pool defaults stay small and every statement runs under a
//! server-side timeout.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// PostgreSQL connection and pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` connection URL.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds a request waits for a free connection before failing.
    #[serde(default = "default_acquire_timeout", alias = "connect_timeout_seconds")]
    pub acquire_timeout_seconds: u64,
    /// Seconds an idle connection is kept. `0` keeps it indefinitely.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// `statement_timeout` set on every pooled connection, in
    /// milliseconds. `0` leaves the server default.
    #[serde(default = "default_statement_timeout")]
    pub statement_timeout_ms: u64,
    /// Apply pending migrations when the server starts.
    #[serde(default = "default_migrate_on_start")]
    pub migrate_on_start: bool,
}

impl DatabaseConfig {
    /// Settings for `url` with every other field at its default.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_seconds: default_acquire_timeout(),
            idle_timeout_seconds: default_idle_timeout(),
            statement_timeout_ms: default_statement_timeout(),
            migrate_on_start: default_migrate_on_start(),
        }
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        (self.idle_timeout_seconds > 0).then(|| Duration::from_secs(self.idle_timeout_seconds))
    }

    /// Reject settings the pool cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if !(self.url.starts_with("postgres://") || self.url.starts_with("postgresql://")) {
            return Err(AppError::configuration(
                "database.url must be a postgres:// URL",
            ));
        }
        if self.max_connections == 0 {
            return Err(AppError::configuration(
                "database.max_connections must be at least 1",
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(AppError::configuration(format!(
                "database.min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    5
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_statement_timeout() -> u64 {
    15_000
}

fn default_migrate_on_start() -> bool {
    true
}
