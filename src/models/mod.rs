//! Core data models for Daily

pub mod todo;

pub use todo::{Todo, TodoList};
