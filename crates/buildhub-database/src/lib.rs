//! # buildhub-database
//!
//! PostgreSQL connection management, migrations, and the repository
//! implementations for documents, folders, and tags. The [`memory`]
//! module provides in-process repositories used by tests and the CLI.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::{DatabaseHealth, DatabasePool};
pub use repositories::{DocumentRepository, FolderRepository, TagRepository};
