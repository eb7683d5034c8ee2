//! Document browsing CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use buildhub_core::error::AppError;
use buildhub_core::types::{DocumentId, FolderId, SortDirection};
use buildhub_entity::document::{Document, DocumentCategory, DocumentVersion};
use buildhub_service::{DocumentFilter, SortKey};

use super::Cli;
use crate::output;

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocumentArgs {
    /// Document subcommand
    #[command(subcommand)]
    pub command: DocumentCommand,
}

/// Document subcommands
#[derive(Debug, Subcommand)]
pub enum DocumentCommand {
    /// List documents matching the given filters
    List {
        /// Text to look for in name, description, and tags
        #[arg(short, long)]
        search: Option<String>,
        /// Only documents in this folder
        #[arg(long)]
        folder: Option<FolderId>,
        /// Only documents of this category
        #[arg(long)]
        category: Option<DocumentCategory>,
        /// Sort key: name, date, size, or category
        #[arg(long)]
        sort_by: Option<SortKey>,
        /// Sort direction: asc or desc
        #[arg(long, default_value = "asc")]
        order: SortDirection,
    },
    /// Show the version history of a document
    Versions {
        /// Document ID
        id: DocumentId,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    id: String,
    name: String,
    category: String,
    status: String,
    version: String,
    size: i64,
    uploaded_at: String,
}

impl From<&Document> for DocumentRow {
    fn from(d: &Document) -> Self {
        Self {
            id: d.id.to_string(),
            name: d.file_name.clone(),
            category: d.category.to_string(),
            status: d.status.to_string(),
            version: d
                .current_version()
                .map(|v| v.version.to_string())
                .unwrap_or_default(),
            size: d.file_size,
            uploaded_at: d.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct VersionRow {
    version: String,
    active: bool,
    file_name: String,
    size: i64,
    uploaded_by: i64,
    uploaded_at: String,
    change_log: String,
}

impl From<&DocumentVersion> for VersionRow {
    fn from(v: &DocumentVersion) -> Self {
        Self {
            version: v.version.to_string(),
            active: v.is_active,
            file_name: v.file_name.clone(),
            size: v.file_size,
            uploaded_by: v.uploaded_by,
            uploaded_at: v.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
            change_log: v.change_log.clone().unwrap_or_default(),
        }
    }
}

/// Execute document commands
pub async fn execute(args: &DocumentArgs, cli: &Cli) -> Result<(), AppError> {
    let services = super::services(&cli.config).await?;

    match &args.command {
        DocumentCommand::List {
            search,
            folder,
            category,
            sort_by,
            order,
        } => {
            let filter = DocumentFilter {
                search: search.clone(),
                category: *category,
                folder_id: *folder,
                sort_by: *sort_by,
                sort_order: *order,
                ..DocumentFilter::default()
            };
            let documents = services.documents.list(&filter).await?;
            let rows: Vec<DocumentRow> = documents.iter().map(DocumentRow::from).collect();
            output::print_list(&rows, cli.format);
        }
        DocumentCommand::Versions { id } => {
            let versions = services.versions.list_versions(id).await?;
            let rows: Vec<VersionRow> = versions.iter().map(VersionRow::from).collect();
            output::print_list(&rows, cli.format);
        }
    }

    Ok(())
}
