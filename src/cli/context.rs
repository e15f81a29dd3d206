//! Command context
//!
//! Owns the paths, settings, audit log and session keys for one invocation
//! and is passed by reference to every command handler.

use crate::audit::{AuditEntry, AuditLogger, SecurityEvent};
use crate::config::{DailyPaths, Settings, Workspace};
use crate::error::{DailyError, DailyResult};
use crate::session::{unlock_workspace, SessionKeys};
use crate::storage::Storage;

use super::prompt::prompt_passphrase;

/// Everything a command needs
pub struct Context {
    pub paths: DailyPaths,
    pub settings: Settings,
    pub audit: AuditLogger,
    pub session: SessionKeys,
}

impl Context {
    /// Load paths and settings from the environment
    pub fn load() -> DailyResult<Self> {
        Self::with_paths(DailyPaths::new()?)
    }

    /// Build a context rooted at the given paths
    pub fn with_paths(paths: DailyPaths) -> DailyResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let audit = AuditLogger::new(paths.audit_log());
        Ok(Self {
            paths,
            settings,
            audit,
            session: SessionKeys::new(),
        })
    }

    /// Resolve a workspace by name, falling back to the default
    pub fn workspace(&self, name: Option<&str>) -> DailyResult<Workspace> {
        self.settings.resolve_workspace(&self.paths, name)
    }

    /// Make `workspace` active, prompting for its passphrase if it is
    /// encrypted and no key is cached yet
    pub fn activate(&mut self, workspace: &Workspace) -> DailyResult<()> {
        if self.session.switch_active(workspace.name()) || !workspace.is_encryption_enabled() {
            return Ok(());
        }

        let passphrase = prompt_passphrase(&format!(
            "Passphrase for workspace '{}': ",
            workspace.name()
        ))?;
        self.unlock(workspace, &passphrase)
    }

    /// Unlock with a known passphrase and audit the outcome
    pub fn unlock(&mut self, workspace: &Workspace, passphrase: &str) -> DailyResult<()> {
        match unlock_workspace(workspace, passphrase, &mut self.session) {
            Ok(()) => {
                self.audit
                    .log_best_effort(&AuditEntry::new(SecurityEvent::Unlocked, workspace.name()));
                Ok(())
            }
            Err(e @ DailyError::WrongPassphrase(_)) => {
                self.audit.log_best_effort(&AuditEntry::new(
                    SecurityEvent::UnlockRejected,
                    workspace.name(),
                ));
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Storage bound to the session's key for `workspace`
    pub fn storage<'a>(&'a self, workspace: &'a Workspace) -> Storage<'a> {
        Storage::new(workspace, &self.session)
    }

    /// Drop every cached key, auditing each one
    pub fn close(&mut self) {
        for id in self.session.clear_all() {
            self.audit
                .log_best_effort(&AuditEntry::new(SecurityEvent::SessionCleared, id));
        }
    }
}
