use crate::error::{JustInstallError, Result};
use crate::ui;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::ZipArchive;

/// Extract every entry of the zip archive at `archive` below `dest`.
///
/// Entries whose names would land outside `dest` are skipped.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let io_err = |path: &Path, source: io::Error| JustInstallError::IoError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(archive).map_err(|e| io_err(archive, e))?;
    let mut zip = ZipArchive::new(file)?;

    fs::create_dir_all(dest).map_err(|e| io_err(dest, e))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;

        let Some(relative) = entry.enclosed_name() else {
            ui::warning(&format!("Skipping unsafe archive entry '{}'", entry.name()));
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| io_err(&out_path, e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }

        let mut out = File::create(&out_path).map_err(|e| io_err(&out_path, e))?;
        io::copy(&mut entry, &mut out).map_err(|e| io_err(&out_path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))
                    .map_err(|e| io_err(&out_path, e))?;
            }
        }
    }

    Ok(())
}
