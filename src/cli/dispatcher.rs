//! Command dispatcher
//!
//! Resolves the run configuration and routes CLI commands to their handlers.

use crate::cli::args::{Cli, Command, InstallArgs, RegistryArgs};
use crate::commands;
use crate::config::{CliOverrides, RunConfig, Settings};
use crate::error::Result;
use crate::project_identity;
use crate::utils::{paths, platform};
use clap::CommandFactory;

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli, settings: &Settings) -> Result<()> {
    match &args.command {
        None | Some(Command::Install(_)) => {
            let install = match &args.command {
                Some(Command::Install(install)) => install,
                _ => &args.install,
            };
            if install.packages.is_empty() {
                Cli::command().print_help()?;
                return Ok(());
            }
            let config = resolve(&install_overrides(install), settings)?;
            commands::install::run(&install_options(install), &config)
        }

        Some(Command::Audit { force, registry }) => {
            commands::audit::run(&resolve(&registry_overrides(registry), settings)?, *force)
        }

        Some(Command::Clean) => commands::clean::run(&paths::temp_dir()),

        Some(Command::List { force, registry }) => {
            commands::list::run(&resolve(&registry_overrides(registry), settings)?, *force)
        }

        Some(Command::Update { registry }) => {
            commands::update::run(&resolve(&registry_overrides(registry), settings)?)
        }

        Some(Command::Completions { shell }) => commands::completions::run(*shell),
    }
}

fn resolve(overrides: &CliOverrides, settings: &Settings) -> Result<RunConfig> {
    RunConfig::resolve(
        overrides,
        project_identity::env_get("REGISTRY"),
        settings,
        platform::is_64bit(),
        paths::temp_dir(),
    )
}

pub(crate) fn install_overrides(args: &InstallArgs) -> CliOverrides {
    CliOverrides {
        arch: args.arch.clone(),
        lang: args.lang.clone(),
        ..registry_overrides(&args.registry)
    }
}

pub(crate) fn registry_overrides(args: &RegistryArgs) -> CliOverrides {
    CliOverrides {
        registry: args.registry.clone(),
        no_progress: args.no_progress,
        ..Default::default()
    }
}

pub(crate) fn install_options(args: &InstallArgs) -> commands::install::InstallOptions {
    commands::install::InstallOptions {
        packages: args.packages.clone(),
        download_only: args.download_only,
        force: args.force,
        shims_only: args.shim,
    }
}

#[cfg(test)]
mod tests;
