use crate::config::RunConfig;
use crate::error::Result;
use crate::registry::cache;
use crate::ui as output;

/// Download a fresh copy of the registry.
pub fn run(config: &RunConfig) -> Result<()> {
    let source = config.registry_source();
    let registry = cache::load_registry(&source, true, config.progress)?;

    output::success(&format!(
        "Registry updated: {} packages from {}",
        registry.packages.len(),
        source.location
    ));
    Ok(())
}
