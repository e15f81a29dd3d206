//! Note CLI commands

use std::process::Command;

use clap::Subcommand;

use crate::error::{DailyError, DailyResult};

use super::context::Context;

/// Note subcommands
#[derive(Subcommand)]
pub enum NoteCommands {
    /// List notes
    List,

    /// Print a note
    Show {
        /// Note name, relative to the notes directory
        name: String,
    },

    /// Open a note in your editor
    Edit {
        /// Note name, relative to the notes directory
        name: String,
    },
}

/// Handle a note command
pub fn handle_note_command(
    ctx: &mut Context,
    workspace: Option<&str>,
    cmd: NoteCommands,
) -> DailyResult<()> {
    let workspace = ctx.workspace(workspace)?;
    ctx.activate(&workspace)?;
    let notes = ctx.storage(&workspace).notes();

    match cmd {
        NoteCommands::List => {
            let names = notes.list()?;
            if names.is_empty() {
                println!("No notes found.");
            }
            for name in names {
                println!("{}", name.display());
            }
        }
        NoteCommands::Show { name } => {
            print!("{}", notes.read(&name)?);
        }
        NoteCommands::Edit { name } => {
            // The temp copy is deleted when `temp` drops, whichever way this arm exits.
            let temp = notes.checkout(&name)?;
            let editor = ctx.settings.editor_command();

            let status = Command::new(&editor)
                .arg(&*temp)
                .status()
                .map_err(|e| DailyError::Io(format!("Failed to launch '{}': {}", editor, e)))?;

            if !status.success() {
                return Err(DailyError::Io(format!(
                    "Editor '{}' exited with {}; note left unchanged",
                    editor, status
                )));
            }

            notes.checkin(&name, &temp)?;
            println!("Saved note '{}'", name);
        }
    }

    Ok(())
}
