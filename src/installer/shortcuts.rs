use crate::error::{JustInstallError, Result};
use mslnk::ShellLink;
use std::fs;
use std::path::{Path, PathBuf};

/// Start-menu link path for a shortcut named `name`.
pub fn link_path(start_menu: &Path, name: &str) -> PathBuf {
    start_menu.join(format!("{}.lnk", name))
}

/// Write a `.lnk` at `link` pointing to `target`.
pub fn create_shortcut(link: &Path, target: &Path) -> Result<()> {
    let shortcut_err = |reason: String| JustInstallError::ShortcutError {
        path: link.to_path_buf(),
        reason,
    };

    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent).map_err(|e| JustInstallError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let shell_link = ShellLink::new(target).map_err(|e| shortcut_err(e.to_string()))?;
    shell_link
        .create_lnk(link)
        .map_err(|e| shortcut_err(e.to_string()))
}
