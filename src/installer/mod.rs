//! Installer dispatch
//!
//! Maps an installer kind to its silent-install command line, or runs one
//! of the built-in recipes (copy, custom, zip).

mod command_exec;
pub mod extract;
pub mod shims;
pub mod shortcuts;

pub use shims::ShimCreator;

use crate::error::{JustInstallError, Result};
use crate::registry::{ContainerKind, InstallerKind, Options};
use crate::ui;
use crate::utils::templates::{self, Variables};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything an install needs besides the installer itself.
#[derive(Debug, Clone)]
pub struct InstallContext<'a> {
    /// Package variables: environment, `version` and `lang`.
    pub variables: &'a Variables,
    /// Needed only for shortcuts; `None` when it cannot be located.
    pub start_menu_dir: Option<PathBuf>,
}

impl InstallContext<'_> {
    fn expander(&self, installer: &Path) -> impl Fn(&str) -> Result<String> {
        let vars = self
            .variables
            .clone()
            .with("installer", installer.to_string_lossy());
        move |template: &str| templates::expand(template, &vars)
    }
}

/// Silent-install command line for the fixed installer kinds.
pub fn command(path: &Path, kind: &InstallerKind) -> Result<Vec<String>> {
    let installer = path.to_string_lossy().into_owned();
    let with_args = |args: &[&str]| {
        std::iter::once(installer.clone())
            .chain(args.iter().map(|a| a.to_string()))
            .collect::<Vec<_>>()
    };

    match kind {
        InstallerKind::AdvancedInstaller => Ok(with_args(&["/i", "/q"])),
        InstallerKind::Appx => Ok(vec![
            "powershell.exe".to_string(),
            "-NoProfile".to_string(),
            "-NonInteractive".to_string(),
            "-Command".to_string(),
            "Add-AppxPackage".to_string(),
            "-Path".to_string(),
            installer.clone(),
        ]),
        InstallerKind::AsIs => Ok(with_args(&[])),
        InstallerKind::InnoSetup => Ok(with_args(&["/norestart", "/sp-", "/verysilent"])),
        InstallerKind::Msi => Ok(vec![
            "msiexec.exe".to_string(),
            "/q".to_string(),
            "/i".to_string(),
            installer.clone(),
            "ALLUSERS=1".to_string(),
            "REBOOT=ReallySuppress".to_string(),
        ]),
        InstallerKind::Nsis => Ok(with_args(&["/S"])),
        InstallerKind::Squirrel => Ok(with_args(&["--silent"])),
        InstallerKind::Copy | InstallerKind::Custom | InstallerKind::Zip => {
            Err(JustInstallError::InvalidPackage(format!(
                "installer kind \"{}\" has no fixed command line",
                kind
            )))
        }
        InstallerKind::Unknown(tag) => Err(JustInstallError::UnknownInstallerKind(tag.clone())),
    }
}

/// Install the file at `path` according to `kind` and `options`.
pub fn install(
    path: &Path,
    kind: &InstallerKind,
    options: &Options,
    ctx: &InstallContext<'_>,
) -> Result<()> {
    let expand = ctx.expander(path);

    match kind {
        InstallerKind::Copy => install_copy(path, options, &expand),
        InstallerKind::Custom => install_custom(options, &expand),
        InstallerKind::Zip => install_zip(path, options, ctx.start_menu_dir.as_deref(), &expand),
        InstallerKind::AdvancedInstaller
        | InstallerKind::Appx
        | InstallerKind::AsIs
        | InstallerKind::InnoSetup
        | InstallerKind::Msi
        | InstallerKind::Nsis
        | InstallerKind::Squirrel => command_exec::run(&command(path, kind)?),
        InstallerKind::Unknown(tag) => Err(JustInstallError::UnknownInstallerKind(tag.clone())),
    }
}

fn required_destination(options: &Options, kind: &str) -> Result<String> {
    options
        .destination
        .clone()
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| {
            JustInstallError::InvalidPackage(format!(
                "the \"{}\" installer requires a destination",
                kind
            ))
        })
}

fn install_copy(
    path: &Path,
    options: &Options,
    expand: &dyn Fn(&str) -> Result<String>,
) -> Result<()> {
    let destination = PathBuf::from(expand(&required_destination(options, "copy")?)?);

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| JustInstallError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    ui::verbose(&format!("Copying {} to {}", path.display(), destination.display()));
    fs::copy(path, &destination).map_err(|e| JustInstallError::IoError {
        path: destination.clone(),
        source: e,
    })?;
    Ok(())
}

fn install_custom(options: &Options, expand: &dyn Fn(&str) -> Result<String>) -> Result<()> {
    if options.arguments.is_empty() {
        return Err(JustInstallError::InvalidPackage(
            "the \"custom\" installer requires arguments".to_string(),
        ));
    }

    let argv = options
        .arguments
        .iter()
        .map(|arg| expand(arg))
        .collect::<Result<Vec<_>>>()?;

    command_exec::run(&argv)
}

fn install_zip(
    path: &Path,
    options: &Options,
    start_menu_dir: Option<&Path>,
    expand: &dyn Fn(&str) -> Result<String>,
) -> Result<()> {
    let destination = PathBuf::from(expand(&required_destination(options, "zip")?)?);

    ui::verbose(&format!("Extracting {} to {}", path.display(), destination.display()));
    extract::extract_zip(path, &destination)?;

    if options.shortcuts.is_empty() {
        return Ok(());
    }
    let start_menu_dir = start_menu_dir.ok_or_else(|| {
        JustInstallError::PathError("could not locate the Start Menu folder".to_string())
    })?;

    for shortcut in &options.shortcuts {
        let name = expand(&shortcut.name)?;
        let target = PathBuf::from(expand(&shortcut.target)?);
        let link = shortcuts::link_path(start_menu_dir, &name);

        ui::indent(&format!("Creating shortcut {}", link.display()), 1);
        shortcuts::create_shortcut(&link, &target)?;
    }

    Ok(())
}

/// Extract the installer wrapped in a container, if any, and return the
/// path of the installer to run.
pub fn unwrap_container(path: &Path, options: &Options, temp_dir: &Path) -> Result<PathBuf> {
    let Some(container) = options.container.as_ref() else {
        return Ok(path.to_path_buf());
    };

    match &container.kind {
        ContainerKind::Zip => {}
        ContainerKind::Unknown(tag) => {
            return Err(JustInstallError::UnsupportedContainer(tag.clone()));
        }
    }

    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| {
            JustInstallError::PathError(format!("'{}' has no file name", path.display()))
        })?;
    let extracted = temp_dir.join(format!("{}_extracted", base));

    if extracted.exists() {
        fs::remove_dir_all(&extracted).map_err(|e| JustInstallError::IoError {
            path: extracted.clone(),
            source: e,
        })?;
    }

    ui::verbose(&format!("Extracting container to {}", extracted.display()));
    extract::extract_zip(path, &extracted)?;

    match container.installer.as_deref().filter(|i| !i.is_empty()) {
        Some(inner) => Ok(inner
            .split(['\\', '/'])
            .filter(|part| !part.is_empty())
            .fold(extracted, |acc, part| acc.join(part))),
        None => single_entry(&extracted),
    }
}

fn single_entry(dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dir)
        .map_err(|e| JustInstallError::IoError {
            path: dir.to_path_buf(),
            source: e,
        })?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| JustInstallError::IoError {
            path: dir.to_path_buf(),
            source: e,
        })?;

    match entries.as_slice() {
        [only] => Ok(only.path()),
        _ => Err(JustInstallError::InvalidPackage(format!(
            "container holds {} entries; the package must name its installer",
            entries.len()
        ))),
    }
}
