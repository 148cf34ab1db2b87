use crate::config::RunConfig;
use crate::error::Result;
use crate::registry::{Registry, cache};

/// Print every package with its version.
pub fn run(config: &RunConfig, force: bool) -> Result<()> {
    let registry = cache::load_registry(&config.registry_source(), force, config.progress)?;

    for line in listing(&registry) {
        println!("{}", line);
    }

    Ok(())
}

/// `<name right-aligned to 35> - <version>` per package, sorted by name.
pub fn listing(registry: &Registry) -> Vec<String> {
    registry
        .sorted_package_names()
        .into_iter()
        .filter_map(|name| {
            registry
                .get(name)
                .map(|package| format!("{:>35} - {}", name, package.version))
        })
        .collect()
}
