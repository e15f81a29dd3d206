//! Configuration module for Daily
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence and the workspace registry
//! - Workspace directory layout

pub mod paths;
pub mod settings;
pub mod workspace;

pub use paths::DailyPaths;
pub use settings::Settings;
pub use workspace::Workspace;
