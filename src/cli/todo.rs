//! Todo CLI commands

use clap::Subcommand;

use crate::display::format_todo_list;
use crate::error::DailyResult;

use super::context::Context;

/// Todo subcommands
#[derive(Subcommand)]
pub enum TodoCommands {
    /// List todos
    List {
        /// Include completed todos
        #[arg(short, long)]
        all: bool,
    },

    /// Add a todo
    Add {
        /// Todo text
        text: Vec<String>,
    },

    /// Mark a todo as done
    Done {
        /// Todo id
        id: u32,
    },
}

/// Handle a todo command
pub fn handle_todo_command(
    ctx: &mut Context,
    workspace: Option<&str>,
    cmd: TodoCommands,
) -> DailyResult<()> {
    let workspace = ctx.workspace(workspace)?;
    ctx.activate(&workspace)?;
    let todos = ctx.storage(&workspace).todos();

    match cmd {
        TodoCommands::List { all } => {
            let list = todos.load()?;
            print!("{}", format_todo_list(&list, all));
        }
        TodoCommands::Add { text } => {
            let id = todos.add(&text.join(" "))?;
            println!("Added todo #{}", id);
        }
        TodoCommands::Done { id } => {
            todos.complete(id)?;
            println!("Completed todo #{}", id);
        }
    }

    Ok(())
}
