//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use buildhub_core::error::AppError;
use buildhub_core::types::FolderId;
use buildhub_entity::folder::{Folder, FolderNode};
use buildhub_service::RequestContext;

use super::Cli;
use crate::output::{self, OutputFormat};

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// List all folders
    List,
    /// Show the folder tree
    Tree,
    /// Create a new folder
    Create {
        /// Folder name
        #[arg(short, long)]
        name: String,
        /// Parent folder ID (omit for root)
        #[arg(short, long)]
        parent_id: Option<FolderId>,
    },
    /// Delete an empty folder
    Delete {
        /// Folder ID
        id: FolderId,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    id: String,
    path: String,
    documents: u64,
    created_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id.to_string(),
            path: f.path.clone(),
            documents: f.document_count.unwrap_or(0),
            created_at: f.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute folder commands
pub async fn execute(args: &FolderArgs, cli: &Cli) -> Result<(), AppError> {
    let services = super::services(&cli.config).await?;
    let ctx = RequestContext::new(cli.user_id);

    match &args.command {
        FolderCommand::List => {
            let folders = services.folders.list().await?;
            let rows: Vec<FolderRow> = folders.iter().map(FolderRow::from).collect();
            output::print_list(&rows, cli.format);
        }
        FolderCommand::Tree => {
            let tree = services.tree.tree().await?;
            match cli.format {
                OutputFormat::Json => output::print_json(&tree),
                OutputFormat::Table => {
                    if tree.roots.is_empty() {
                        println!("No folders.");
                    }
                    for node in &tree.roots {
                        print_node(node, 0);
                    }
                }
            }
        }
        FolderCommand::Create { name, parent_id } => {
            let folder = services
                .folders
                .create(&ctx, name, parent_id.as_ref())
                .await?;
            output::print_success(&format!(
                "Folder '{}' created (id: {})",
                folder.path, folder.id
            ));
        }
        FolderCommand::Delete { id } => {
            services.folders.delete(&ctx, id).await?;
            output::print_success(&format!("Folder {} deleted", id));
        }
    }

    Ok(())
}

fn print_node(node: &FolderNode, depth: usize) {
    println!(
        "{}{} ({} documents)",
        "  ".repeat(depth),
        node.name,
        node.document_count
    );
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
