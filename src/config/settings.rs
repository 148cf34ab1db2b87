//! Settings Module
//!
//! Optional per-user defaults read from `settings.kdl`:
//!
//! ```kdl
//! settings {
//!     registry "https://example.com/my-registry.json"
//!     lang "de-DE"
//!     arch "x86"
//!     progress "off"
//!     color "never"
//! }
//! ```

use crate::error::{JustInstallError, Result};
use crate::ui::ColorMode;
use crate::utils::paths;
use kdl::KdlDocument;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const VALID_KEYS: [&str; 5] = ["registry", "lang", "arch", "progress", "color"];

/// Settings read from disk, merged over the defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    /// Load the user's settings file, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::settings_file()?)
    }

    pub fn load_from(settings_file: &Path) -> Result<Self> {
        let mut values = Self::defaults();

        if settings_file.exists() {
            let content =
                fs::read_to_string(settings_file).map_err(|e| JustInstallError::IoError {
                    path: settings_file.to_path_buf(),
                    source: e,
                })?;
            values.extend(parse_settings(&content)?);
        }

        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn color_mode(&self) -> ColorMode {
        match self.get("color") {
            Some("always") => ColorMode::Always,
            Some("never") => ColorMode::Never,
            _ => ColorMode::Auto,
        }
    }

    pub fn progress(&self) -> bool {
        self.get("progress") != Some("off")
    }

    fn defaults() -> HashMap<String, String> {
        let mut defaults = HashMap::new();
        defaults.insert("color".to_string(), "auto".to_string());
        defaults.insert("progress".to_string(), "on".to_string());
        defaults.insert("lang".to_string(), "en-US".to_string());
        defaults
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            values: Self::defaults(),
        }
    }
}

/// Parse the `settings { ... }` block.
fn parse_settings(content: &str) -> Result<HashMap<String, String>> {
    let doc: KdlDocument = content.parse()?;
    let mut values = HashMap::new();

    let Some(children) = doc.get("settings").and_then(|node| node.children()) else {
        return Ok(values);
    };

    for child in children.nodes() {
        let key = child.name().value();
        validate_key(key)?;

        let value = child
            .entries()
            .first()
            .and_then(|entry| entry.value().as_string())
            .ok_or_else(|| {
                JustInstallError::ConfigError(format!("setting '{}' needs a string value", key))
            })?;
        validate_value(key, value)?;

        values.insert(key.to_string(), value.to_string());
    }

    Ok(values)
}

fn validate_key(key: &str) -> Result<()> {
    if !VALID_KEYS.contains(&key) {
        return Err(JustInstallError::ConfigError(format!(
            "Unknown setting: '{}'. Valid settings: {}",
            key,
            VALID_KEYS.join(", ")
        )));
    }
    Ok(())
}

fn validate_value(key: &str, value: &str) -> Result<()> {
    let valid: &[&str] = match key {
        "color" => &["auto", "always", "never"],
        "progress" => &["on", "off"],
        "arch" => &["x86", "x86_64"],
        _ => return Ok(()),
    };

    if !valid.contains(&value) {
        return Err(JustInstallError::ConfigError(format!(
            "Invalid value for '{}': '{}'. Valid: {}",
            key,
            value,
            valid.join(", ")
        )));
    }
    Ok(())
}
