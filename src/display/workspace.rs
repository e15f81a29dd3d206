//! Workspace list formatting

use crate::config::settings::DEFAULT_WORKSPACE;
use crate::config::{DailyPaths, Settings, Workspace};

/// Format every known workspace, marking the default and encrypted ones
pub fn format_workspace_list(paths: &DailyPaths, settings: &Settings, default: &str) -> String {
    let mut workspaces = vec![Workspace::new(
        DEFAULT_WORKSPACE,
        paths.default_workspace_dir(),
    )];
    workspaces.extend(
        settings
            .workspaces
            .iter()
            .map(|(name, dir)| Workspace::new(name.as_str(), dir.clone())),
    );

    let name_width = workspaces
        .iter()
        .map(|w| w.name().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "  {:<name_width$}  {:<9}  {}\n",
        "Name",
        "Encrypted",
        "Location",
        name_width = name_width,
    ));
    for ws in &workspaces {
        output.push_str(&format!(
            "{} {:<name_width$}  {:<9}  {}\n",
            if ws.name() == default { "*" } else { " " },
            ws.name(),
            if ws.is_encryption_enabled() { "yes" } else { "no" },
            ws.root().display(),
            name_width = name_width,
        ));
    }
    output
}
