//! Session key management
//!
//! Keys derived from a passphrase live only in a [`SessionKeys`] value for the
//! lifetime of the process (or until cleared), keyed by workspace name.
//! Switching between workspaces that are already unlocked is a lookup.

mod store;
mod unlock;

pub use store::{verify_key, SessionKeys};
pub use unlock::unlock_workspace;
