//! CLI command definitions and dispatch.

pub mod document;
pub mod folder;
pub mod migrate;
pub mod serve;
pub mod tag;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use buildhub_core::config::AppConfig;
use buildhub_core::error::AppError;
use buildhub_database::DatabasePool;
use buildhub_database::repositories::{
    PgDocumentRepository, PgFolderRepository, PgTagRepository,
};
use buildhub_service::{
    DocumentService, FolderService, TagService, TreeService, VersionService,
};

use crate::output::OutputFormat;

/// BuildHub: construction back-office document management
#[derive(Debug, Parser)]
#[command(name = "buildhub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// User ID recorded on changes made from the CLI
    #[arg(long, default_value_t = 0)]
    pub user_id: i64,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the BuildHub server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Folder management
    Folder(folder::FolderArgs),
    /// Document browsing
    Document(document::DocumentArgs),
    /// Tag management
    Tag(tag::TagArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Folder(args) => folder::execute(args, self).await,
            Commands::Document(args) => document::execute(args, self).await,
            Commands::Tag(args) => tag::execute(args, self).await,
        }
    }
}

/// Services over a PostgreSQL connection, for the data commands.
pub struct Services {
    pub documents: DocumentService,
    pub versions: VersionService,
    pub folders: FolderService,
    pub tree: TreeService,
    pub tags: TagService,
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
}

/// Helper: connect to the configured database
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}

/// Helper: build the services the data commands run against
pub async fn services(config_path: &str) -> Result<Services, AppError> {
    let config = load_config(config_path)?;
    let db = connect(&config).await?;
    let pool = db.pool().clone();

    let document_repo = Arc::new(PgDocumentRepository::new(pool.clone()));
    let folder_repo = Arc::new(PgFolderRepository::new(pool.clone()));
    let tag_repo = Arc::new(PgTagRepository::new(pool));
    let max_upload = config.documents.max_upload_size_bytes;

    Ok(Services {
        documents: DocumentService::new(
            document_repo.clone(),
            folder_repo.clone(),
            tag_repo.clone(),
            max_upload,
        ),
        versions: VersionService::new(document_repo.clone(), max_upload),
        folders: FolderService::new(folder_repo.clone(), document_repo.clone()),
        tree: TreeService::new(folder_repo, document_repo),
        tags: TagService::new(tag_repo),
    })
}
