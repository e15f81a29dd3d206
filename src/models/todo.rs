//! Todo model
//!
//! The todo store is a single JSON document: `{"todos":[...]}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DailyError, DailyResult};

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Stable numeric id, unique within the store
    pub id: u32,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// The todo store document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    #[serde(default)]
    pub todos: Vec<Todo>,
}

impl TodoList {
    fn next_id(&self) -> DailyResult<u32> {
        self.todos
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| DailyError::Validation("No todo ids left in this store".into()))
    }

    /// Append a new open todo and return its id
    pub fn add(&mut self, text: impl Into<String>) -> DailyResult<u32> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DailyError::Validation("Todo text cannot be empty".into()));
        }

        let id = self.next_id()?;
        self.todos.push(Todo {
            id,
            text: text.trim().to_string(),
            done: false,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    /// Mark a todo as done
    pub fn complete(&mut self, id: u32) -> DailyResult<()> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DailyError::todo_not_found(id.to_string()))?;
        todo.done = true;
        Ok(())
    }

    /// Todos that are not done yet
    pub fn open(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(|t| !t.done)
    }
}
