use crate::error::{JustInstallError, Result};
use crate::ui as output;
use std::fs;
use std::path::Path;

/// Delete downloaded installers and the cached registry.
pub fn run(temp_dir: &Path) -> Result<()> {
    reset_dir(temp_dir)?;
    output::success(&format!("Cleaned {}", temp_dir.display()));
    Ok(())
}

/// Remove `dir` with everything in it and recreate it empty.
pub fn reset_dir(dir: &Path) -> Result<()> {
    let io_err = |e| JustInstallError::IoError {
        path: dir.to_path_buf(),
        source: e,
    };

    if dir.exists() {
        fs::remove_dir_all(dir).map_err(io_err)?;
    }
    fs::create_dir_all(dir).map_err(io_err)
}
