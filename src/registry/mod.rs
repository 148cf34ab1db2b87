//! Package registry
//!
//! Typed view of the JSON catalog mapping package names to installers.

pub mod cache;
mod types;

pub use types::{
    Architecture, Container, ContainerKind, Installer, InstallerKind, InstallerOptions, Options,
    Package, Shortcut,
};

use crate::error::{JustInstallError, Result};
use crate::project_identity::REGISTRY_SUPPORTED_VERSION;
use crate::utils::templates::{self, Variables};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Registry {
    pub version: u32,
    #[serde(default)]
    pub packages: HashMap<String, Package>,
    #[serde(rename = "$schema", default)]
    pub schema: Option<String>,
}

#[derive(Deserialize)]
struct SchemaHeader {
    version: u32,
}

impl Registry {
    /// Read and validate the registry file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| JustInstallError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parse registry JSON. The schema version is checked before the package
    /// table so an incompatible registry reports the version, not a shape
    /// mismatch.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let parse_error = |source| JustInstallError::RegistryParse {
            path: origin.to_path_buf(),
            source,
        };

        let header: SchemaHeader = serde_json::from_str(content).map_err(parse_error)?;
        if header.version != REGISTRY_SUPPORTED_VERSION {
            return Err(JustInstallError::RegistryVersion {
                expected: REGISTRY_SUPPORTED_VERSION,
                found: header.version,
            });
        }

        serde_json::from_str(content).map_err(parse_error)
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Package names in lexicographic order.
    pub fn sorted_package_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.packages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Package {
    /// Template variables for this package: `base` plus `version`.
    pub fn variables(&self, base: &Variables) -> Variables {
        base.clone().with("version", self.version.as_str())
    }

    /// Expand `template` with this package's variables.
    pub fn expand(&self, template: &str, base: &Variables) -> Result<String> {
        templates::expand(template, &self.variables(base))
    }
}

#[cfg(test)]
mod tests;
