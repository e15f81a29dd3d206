//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the storage and encryption layers.

pub mod context;
pub mod encrypt;
pub mod note;
pub mod prompt;
pub mod todo;
pub mod workspace;

pub use context::Context;
pub use encrypt::{handle_encrypt_command, handle_unlock_command, EncryptCommands};
pub use note::{handle_note_command, NoteCommands};
pub use todo::{handle_todo_command, TodoCommands};
pub use workspace::{handle_workspace_command, WorkspaceCommands};
