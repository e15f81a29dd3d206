//! Encryption status and audit history formatting

use crate::audit::AuditEntry;
use crate::config::Workspace;
use crate::migration::EncryptionStatus;

/// Format the encryption state of a workspace
pub fn format_status(workspace: &Workspace, status: &EncryptionStatus) -> String {
    let mut output = String::new();
    output.push_str(&format!("Workspace:   {}\n", workspace.name()));
    output.push_str(&format!("Location:    {}\n", workspace.root().display()));
    output.push_str(&format!(
        "Encryption:  {}\n",
        if status.enabled { "Enabled" } else { "Disabled" }
    ));
    if status.enabled {
        output.push_str("Cipher:      AES-256-GCM (Argon2id key)\n");
    }
    output.push_str(&format!(
        "Salt:        {}\n",
        if status.salt_present { "present" } else { "missing" }
    ));
    output.push_str(&format!("Encrypted:   {} file(s)\n", status.encrypted_files));
    output.push_str(&format!("Plaintext:   {} file(s)\n", status.plaintext_files));

    if status.is_inconsistent() {
        output.push('\n');
        output.push_str(
            "Warning: the workspace is in an inconsistent state. \
             Run 'daily encrypt enable' to finish encrypting it.\n",
        );
    }

    output
}

/// Format audit entries, one per line
pub fn format_audit_entries(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No security events recorded.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}
