use crate::config::RunConfig;
use crate::error::{JustInstallError, Result};
use crate::fetch::{self, FetchOptions};
use crate::installer::{self, InstallContext, ShimCreator};
use crate::registry::cache;
use crate::registry::{Options, Package, Registry};
use crate::ui as output;
use crate::utils::paths;
use crate::utils::templates::Variables;
use std::path::{Path, PathBuf};

/// Options for the install command
#[derive(Debug, Clone, Default)]
pub struct InstallOptions {
    pub packages: Vec<String>,
    pub download_only: bool,
    /// Re-download installers already in the temp directory.
    pub force: bool,
    pub shims_only: bool,
}

pub fn run(options: &InstallOptions, config: &RunConfig) -> Result<()> {
    let registry = cache::load_registry(&config.registry_source(), false, config.progress)?;

    warn_interactive(&registry, &options.packages);

    let base = config.variables();
    let mut failed = Vec::new();

    for name in &options.packages {
        output::header(&format!("{} ({})", name, config.arch));

        match install_one(&registry, name, &base, options, config) {
            Ok(()) => output::success(&format!("{} done", name)),
            Err(e) if e.is_fatal() => {
                output::error(&format!("{}: {}", name, e));
                return Err(e);
            }
            Err(e) => {
                output::error(&format!("{}: {}", name, e));
                failed.push(name.as_str());
            }
        }
    }

    if failed.is_empty() {
        return Ok(());
    }

    Err(JustInstallError::Other(format!(
        "encountered errors installing packages: {}",
        failed.join(", ")
    )))
}

/// Names among `requested` whose installers may need user input.
pub fn interactive_packages<'a>(registry: &Registry, requested: &'a [String]) -> Vec<&'a str> {
    requested
        .iter()
        .filter(|name| {
            registry
                .get(name)
                .is_some_and(|package| package.installer.interactive)
        })
        .map(String::as_str)
        .collect()
}

fn warn_interactive(registry: &Registry, requested: &[String]) {
    let interactive = interactive_packages(registry, requested);
    if interactive.is_empty() {
        return;
    }

    output::warning("The following packages might require user interaction:");
    for name in interactive {
        output::indent(name, 1);
    }
}

fn install_one(
    registry: &Registry,
    name: &str,
    base: &Variables,
    options: &InstallOptions,
    config: &RunConfig,
) -> Result<()> {
    let package = registry
        .get(name)
        .ok_or_else(|| JustInstallError::UnknownPackage(name.to_string()))?;
    let variables = package.variables(base);
    let installer_options = package.installer.options_for_arch(config.arch)?;

    if options.shims_only {
        return create_shims(&installer_options, &variables);
    }

    let downloaded = download(package, &variables, options.force, config)?;
    if options.download_only {
        output::info(&format!("Downloaded {}", downloaded.display()));
        return Ok(());
    }

    let installer_path =
        installer::unwrap_container(&downloaded, &installer_options, &config.temp_dir)?;

    let ctx = InstallContext {
        variables: &variables,
        start_menu_dir: paths::start_menu_dir().ok(),
    };
    installer::install(
        &installer_path,
        &package.installer.kind,
        &installer_options,
        &ctx,
    )?;

    create_shims(&installer_options, &variables)
}

/// Download the installer for the configured architecture into the temp
/// directory.
fn download(
    package: &Package,
    variables: &Variables,
    force: bool,
    config: &RunConfig,
) -> Result<PathBuf> {
    let template = package.installer.url_for_arch(config.arch)?;
    let url = crate::utils::templates::expand(template, variables)?;
    let download_dir = ensure_dir(&config.temp_dir)?;

    output::verbose(&format!("Fetching {}", url));
    fetch::fetch(
        &url,
        &FetchOptions {
            destination: Some(download_dir),
            force,
            progress: config.progress,
            ..Default::default()
        },
    )
}

fn create_shims(options: &Options, variables: &Variables) -> Result<()> {
    if options.shims.is_empty() {
        return Ok(());
    }

    ShimCreator::from_system()?.create(&options.shims, |template| {
        crate::utils::templates::expand(template, variables)
    })
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| JustInstallError::IoError {
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(dir.to_path_buf())
}
