use crate::error::{JustInstallError, Result};
use crate::project_identity;
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

const SHIMS_DIR_NAME: &str = "Shims";
const START_MENU_SUFFIX: &str = "Microsoft\\Windows\\Start Menu\\Programs";
const EXEPROXY_SUFFIX: &str = "exeproxy\\exeproxy.exe";

/// Scratch directory for downloads and the registry cache.
pub fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(project_identity::TEMP_DIR_NAME)
}

pub fn config_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(
        project_identity::PROJECT_QUALIFIER,
        project_identity::PROJECT_ORG,
        project_identity::CONFIG_DIR_NAME,
    )
    .ok_or_else(|| JustInstallError::PathError("Could not determine config directory".to_string()))?;
    Ok(proj.config_dir().to_path_buf())
}

pub fn settings_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("settings.kdl"))
}

/// `%SystemDrive%\Shims`
pub fn shims_dir() -> Result<PathBuf> {
    let drive = required_env("SystemDrive")?;
    Ok(PathBuf::from(format!("{}\\{}", drive.trim_end_matches('\\'), SHIMS_DIR_NAME)))
}

/// `%ProgramData%\Microsoft\Windows\Start Menu\Programs`
pub fn start_menu_dir() -> Result<PathBuf> {
    let program_data = required_env("ProgramData")?;
    Ok(PathBuf::from(format!(
        "{}\\{}",
        program_data.trim_end_matches('\\'),
        START_MENU_SUFFIX
    )))
}

/// Location of the exeproxy shim tool, if installed.
///
/// Looks in `%ProgramFiles(x86)%\exeproxy` first, then on `PATH`.
pub fn exeproxy_path() -> Option<PathBuf> {
    let default = std::env::var("ProgramFiles(x86)").ok().map(|pf| {
        PathBuf::from(format!("{}\\{}", pf.trim_end_matches('\\'), EXEPROXY_SUFFIX))
    });

    match default {
        Some(path) if path.is_file() => Some(path),
        _ => which::which("exeproxy").ok(),
    }
}

fn required_env(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            JustInstallError::PathError(format!("environment variable %{}% is not set", name))
        })
}

#[cfg(test)]
mod tests;
