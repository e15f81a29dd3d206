//! Daily - a terminal organiser for todos and notes with encryption at rest
//!
//! Every workspace is a plain directory holding `todos.json` and a `notes/`
//! tree of Markdown files. Once encryption is enabled for a workspace, every
//! data file is stored as a `DAILY_ENC_V1` frame sealed with AES-256-GCM under
//! a key derived from the user's passphrase.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, settings and the workspace registry
//! - `error`: Custom error types
//! - `crypto`: Framing, key derivation and the AEAD file codec
//! - `session`: Per-workspace key cache
//! - `migration`: Plaintext-to-encrypted migration with rollback
//! - `storage`: Todo and note repositories over encrypted or plain files
//! - `models`: Core data models
//! - `audit`: Security event log
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use daily::config::{DailyPaths, Settings};
//! use daily::session::{unlock_workspace, SessionKeys};
//!
//! let paths = DailyPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let workspace = settings.resolve_workspace(&paths, None)?;
//!
//! let mut session = SessionKeys::new();
//! unlock_workspace(&workspace, "correct horse", &mut session)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod migration;
pub mod models;
pub mod session;
pub mod storage;

pub use error::DailyError;
