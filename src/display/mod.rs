//! Display formatting for terminal output
//!
//! Formats todos, workspaces, encryption status and audit history as plain
//! text tables.

pub mod encryption;
pub mod todo;
pub mod workspace;

pub use encryption::{format_audit_entries, format_status};
pub use todo::format_todo_list;
pub use workspace::format_workspace_list;
