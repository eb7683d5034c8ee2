//! Tag management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use buildhub_core::error::AppError;
use buildhub_service::RequestContext;

use super::Cli;
use crate::output;

/// Arguments for tag commands
#[derive(Debug, Args)]
pub struct TagArgs {
    /// Tag subcommand
    #[command(subcommand)]
    pub command: TagCommand,
}

/// Tag subcommands
#[derive(Debug, Subcommand)]
pub enum TagCommand {
    /// List all tags
    List,
    /// Create a tag
    Create {
        /// Tag name
        #[arg(short, long)]
        name: String,
        /// Color as #RRGGBB
        #[arg(short, long, default_value = "#607D8B")]
        color: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct TagRow {
    id: String,
    name: String,
    color: String,
}

/// Execute tag commands
pub async fn execute(args: &TagArgs, cli: &Cli) -> Result<(), AppError> {
    let services = super::services(&cli.config).await?;

    match &args.command {
        TagCommand::List => {
            let rows: Vec<TagRow> = services
                .tags
                .list()
                .await?
                .into_iter()
                .map(|t| TagRow {
                    id: t.id.to_string(),
                    name: t.name,
                    color: t.color,
                })
                .collect();
            output::print_list(&rows, cli.format);
        }
        TagCommand::Create { name, color } => {
            let ctx = RequestContext::new(cli.user_id);
            let tag = services.tags.create(&ctx, name, color).await?;
            output::print_success(&format!("Tag '{}' created (id: {})", tag.name, tag.id));
        }
    }

    Ok(())
}
