//! Local copy of the registry.
//!
//! The default registry (or a custom remote one) is cached in the temp
//! directory and refreshed once it is older than a day.

use super::Registry;
use crate::error::{JustInstallError, Result};
use crate::fetch::{self, FetchOptions};
use crate::project_identity;
use crate::ui;
use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Hours a cached registry stays fresh.
pub const REGISTRY_TTL_HOURS: i64 = 24;

/// Where the registry comes from and where its copy lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySource {
    /// URL or local path.
    pub location: String,
    pub cache_file: PathBuf,
}

impl RegistrySource {
    /// The default registry, or `custom` when given. Custom registries get
    /// their own cache file so switching back never reuses their content.
    pub fn resolve(custom: Option<&str>, temp_dir: &Path) -> Self {
        match custom.filter(|c| !c.trim().is_empty()) {
            Some(location) => Self {
                location: location.to_string(),
                cache_file: temp_dir.join(project_identity::REGISTRY_CUSTOM_CACHE_FILE),
            },
            None => Self {
                location: project_identity::REGISTRY_URL.to_string(),
                cache_file: temp_dir.join(project_identity::REGISTRY_CACHE_FILE),
            },
        }
    }

    pub fn is_remote(&self) -> bool {
        let lower = self.location.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

/// Whether a copy last written at `modified` must be refreshed at `now`.
pub fn is_stale(modified: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(modified) > Duration::hours(REGISTRY_TTL_HOURS)
}

fn cache_needs_refresh(cache_file: &Path, now: DateTime<Utc>) -> bool {
    match fs::metadata(cache_file).and_then(|m| m.modified()) {
        Ok(modified) => is_stale(DateTime::<Utc>::from(modified), now),
        Err(_) => true,
    }
}

/// Load the registry described by `source`.
///
/// Local registries are read in place. Remote ones are downloaded into the
/// cache file when it is missing, stale, or `force` is set.
pub fn load_registry(source: &RegistrySource, force: bool, progress: bool) -> Result<Registry> {
    if !source.is_remote() {
        let path = fetch::fetch(&source.location, &FetchOptions::default())?;
        ui::verbose(&format!("Using local registry {}", path.display()));
        return Registry::load(&path);
    }

    if force || cache_needs_refresh(&source.cache_file, Utc::now()) {
        if let Some(parent) = source.cache_file.parent() {
            fs::create_dir_all(parent).map_err(|e| JustInstallError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        ui::info("Updating registry");
        fetch::fetch(
            &source.location,
            &FetchOptions {
                destination: Some(source.cache_file.clone()),
                // A stale copy still exists on disk; it must be replaced.
                force: true,
                progress,
                ..Default::default()
            },
        )?;
    } else {
        ui::verbose(&format!(
            "Using cached registry {}",
            source.cache_file.display()
        ));
    }

    Registry::load(&source.cache_file)
}
