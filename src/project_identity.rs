//! Central project identity contract.
//!
//! Runtime names, environment prefix and well-known remote locations.

pub const BINARY_NAME: &str = "just-install";
pub const CONFIG_DIR_NAME: &str = "just-install";
pub const TEMP_DIR_NAME: &str = "just-install";
pub const ENV_PREFIX: &str = "JUST_INSTALL";
pub const PROJECT_QUALIFIER: &str = "org";
pub const PROJECT_ORG: &str = "just-install";

/// Registry schema version this build understands.
pub const REGISTRY_SUPPORTED_VERSION: u32 = 4;

pub const REGISTRY_URL: &str = "https://just-install.github.io/registry/just-install-v4.json";
pub const REGISTRY_CACHE_FILE: &str = "registry.json";
pub const REGISTRY_CUSTOM_CACHE_FILE: &str = "registry-custom.json";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}

pub fn env_get(suffix: &str) -> Option<String> {
    std::env::var(env_key(suffix))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

pub fn user_agent() -> String {
    format!("{}/{}", BINARY_NAME, env!("CARGO_PKG_VERSION"))
}
