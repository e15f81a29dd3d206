//! Encryption CLI commands
//!
//! Provides commands for enabling encryption, unlocking a workspace and
//! inspecting its encryption state.

use clap::Subcommand;

use crate::audit::{AuditEntry, SecurityEvent};
use crate::display::{format_audit_entries, format_status};
use crate::error::{DailyError, DailyResult};
use crate::migration::{enable_encryption, encryption_status, MigrationOutcome};

use super::context::Context;
use super::prompt::{prompt_new_passphrase, prompt_passphrase};

/// Encryption management commands
#[derive(Subcommand)]
pub enum EncryptCommands {
    /// Encrypt every file in the workspace and keep it encrypted from now on
    Enable,

    /// Show encryption status
    Status,

    /// Show recent security events
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle encryption commands
pub fn handle_encrypt_command(
    ctx: &mut Context,
    workspace: Option<&str>,
    cmd: EncryptCommands,
) -> DailyResult<()> {
    match cmd {
        EncryptCommands::Enable => enable(ctx, workspace),
        EncryptCommands::Status => show_status(ctx, workspace),
        EncryptCommands::History { limit } => {
            let entries = ctx.audit.read_recent(limit)?;
            print!("{}", format_audit_entries(&entries));
            Ok(())
        }
    }
}

fn enable(ctx: &mut Context, workspace: Option<&str>) -> DailyResult<()> {
    let workspace = ctx.workspace(workspace)?;

    if workspace.is_encryption_enabled() {
        println!(
            "Encryption is already enabled for '{}'. Enter the passphrase to unlock it.",
            workspace.name()
        );
    } else {
        println!("Enable Encryption");
        println!("=================");
        println!();
        println!(
            "Every todo list and note in '{}' will be encrypted with AES-256-GCM.",
            workspace.name()
        );
        println!("IMPORTANT: If you forget your passphrase, your data cannot be recovered!");
        println!();
    }

    let (passphrase, confirmation) = prompt_new_passphrase()?;

    println!("Deriving encryption key...");
    match enable_encryption(&workspace, &passphrase, &confirmation, &mut ctx.session) {
        Ok(MigrationOutcome::Migrated { encrypted, skipped }) => {
            ctx.audit.log(
                &AuditEntry::new(SecurityEvent::EncryptionEnabled, workspace.name())
                    .with_detail(format!("{} encrypted, {} already encrypted", encrypted, skipped)),
            )?;
            println!();
            println!("Encryption enabled: {} file(s) encrypted.", encrypted);
            Ok(())
        }
        Ok(MigrationOutcome::AlreadyEnabled) => {
            ctx.audit
                .log(&AuditEntry::new(SecurityEvent::Unlocked, workspace.name()))?;
            println!("Passphrase accepted.");
            Ok(())
        }
        Err(e @ DailyError::Migration { .. }) => {
            ctx.audit.log_best_effort(
                &AuditEntry::new(SecurityEvent::MigrationRolledBack, workspace.name())
                    .with_detail(e.to_string()),
            );
            ctx.audit.log_best_effort(&AuditEntry::new(
                SecurityEvent::SessionCleared,
                workspace.name(),
            ));
            if e.has_restore_failures() {
                eprintln!(
                    "The workspace is in an inconsistent state; \
                     the files named below were not restored."
                );
            }
            Err(e)
        }
        Err(e @ DailyError::WrongPassphrase(_)) => {
            ctx.audit.log_best_effort(&AuditEntry::new(
                SecurityEvent::UnlockRejected,
                workspace.name(),
            ));
            Err(e)
        }
        Err(e) => Err(e),
    }
}

fn show_status(ctx: &Context, workspace: Option<&str>) -> DailyResult<()> {
    let workspace = ctx.workspace(workspace)?;
    let status = encryption_status(&workspace)?;
    print!("{}", format_status(&workspace, &status));
    Ok(())
}

/// Verify the passphrase for a workspace by unlocking it
pub fn handle_unlock_command(ctx: &mut Context, workspace: Option<&str>) -> DailyResult<()> {
    let workspace = ctx.workspace(workspace)?;

    if !workspace.is_encryption_enabled() {
        println!("Workspace '{}' is not encrypted.", workspace.name());
        return Ok(());
    }

    let passphrase = prompt_passphrase(&format!(
        "Passphrase for workspace '{}': ",
        workspace.name()
    ))?;
    ctx.unlock(&workspace, &passphrase)?;

    println!("Passphrase is correct; workspace '{}' unlocked.", workspace.name());
    Ok(())
}
