//! Todo repository
//!
//! Loads and saves the workspace's `todos.json` through the storage contract.

use crate::config::Workspace;
use crate::crypto::DerivedKey;
use crate::error::DailyError;
use crate::models::TodoList;

use super::{read_json, write_json};

/// Repository for todo persistence
pub struct TodoRepository<'a> {
    workspace: &'a Workspace,
    key: Option<&'a DerivedKey>,
}

impl<'a> TodoRepository<'a> {
    pub fn new(workspace: &'a Workspace, key: Option<&'a DerivedKey>) -> Self {
        Self { workspace, key }
    }

    /// Load the todo list, empty if the store does not exist yet
    pub fn load(&self) -> Result<TodoList, DailyError> {
        read_json(&self.workspace.todos_file(), self.key)
    }

    /// Save the todo list
    pub fn save(&self, list: &TodoList) -> Result<(), DailyError> {
        write_json(
            self.workspace.root(),
            &self.workspace.todos_file(),
            list,
            self.key,
        )
    }

    /// Add a todo and persist it
    pub fn add(&self, text: &str) -> Result<u32, DailyError> {
        let mut list = self.load()?;
        let id = list.add(text)?;
        self.save(&list)?;
        Ok(id)
    }

    /// Mark a todo done and persist it
    pub fn complete(&self, id: u32) -> Result<(), DailyError> {
        let mut list = self.load()?;
        list.complete(id)?;
        self.save(&list)
    }
}
