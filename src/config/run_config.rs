use super::settings::Settings;
use crate::error::Result;
use crate::registry::Architecture;
use crate::registry::cache::RegistrySource;
use crate::utils::platform;
use crate::utils::templates::Variables;
use std::path::PathBuf;

/// Values given on the command line. `None` defers to lower layers.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub arch: Option<String>,
    pub registry: Option<String>,
    pub lang: Option<String>,
    pub no_progress: bool,
}

/// Configuration for one invocation, resolved once and passed down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub arch: Architecture,
    /// Custom registry location; `None` means the default registry.
    pub registry: Option<String>,
    pub lang: String,
    pub progress: bool,
    pub temp_dir: PathBuf,
}

impl RunConfig {
    /// Resolve with precedence: command line, environment, settings file,
    /// built-in default.
    pub fn resolve(
        cli: &CliOverrides,
        env_registry: Option<String>,
        settings: &Settings,
        host_is_64bit: bool,
        temp_dir: PathBuf,
    ) -> Result<Self> {
        let preferred_arch = cli.arch.as_deref().or(settings.get("arch"));
        let arch = platform::select_architecture(preferred_arch, host_is_64bit)?;

        let registry = non_empty(cli.registry.clone())
            .or(non_empty(env_registry))
            .or_else(|| settings.get("registry").map(str::to_string));

        let lang = non_empty(cli.lang.clone())
            .or_else(|| settings.get("lang").map(str::to_string))
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Ok(Self {
            arch,
            registry,
            lang,
            progress: !cli.no_progress && settings.progress(),
            temp_dir,
        })
    }

    pub fn registry_source(&self) -> RegistrySource {
        RegistrySource::resolve(self.registry.as_deref(), &self.temp_dir)
    }

    /// Base template variables: the environment plus `lang`.
    pub fn variables(&self) -> Variables {
        Variables::from_env().with("lang", self.lang.as_str())
    }
}

pub const DEFAULT_LANG: &str = "en-US";

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
