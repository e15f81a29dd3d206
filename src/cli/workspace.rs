//! Workspace registry CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::display::format_workspace_list;
use crate::error::DailyResult;

use super::context::Context;

/// Workspace subcommands
#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// Register a directory as a named workspace
    Add {
        /// Workspace name
        name: String,
        /// Data directory
        path: PathBuf,
    },

    /// List registered workspaces
    List,

    /// Make a workspace the default
    Use {
        /// Workspace name
        name: String,
    },
}

/// Handle a workspace command
pub fn handle_workspace_command(ctx: &mut Context, cmd: WorkspaceCommands) -> DailyResult<()> {
    match cmd {
        WorkspaceCommands::Add { name, path } => {
            let path = if path.is_absolute() {
                path
            } else {
                std::env::current_dir()?.join(path)
            };
            ctx.settings.add_workspace(&name, path.clone())?;
            ctx.settings.save(&ctx.paths)?;
            println!("Added workspace '{}' at {}", name.trim(), path.display());
        }
        WorkspaceCommands::List => {
            let default = ctx.workspace(None)?;
            print!(
                "{}",
                format_workspace_list(&ctx.paths, &ctx.settings, default.name())
            );
        }
        WorkspaceCommands::Use { name } => {
            ctx.settings.set_default(&name)?;
            ctx.settings.save(&ctx.paths)?;
            println!("Default workspace is now '{}'", name);
        }
    }

    Ok(())
}
