//! Registry audit
//!
//! Checks every installer URL in the registry on a bounded worker pool.

mod retry;

pub use retry::RetryPolicy;

use crate::config::RunConfig;
use crate::error::{JustInstallError, Result};
use crate::fetch::{self, CheckOptions, content_types};
use crate::registry::{Registry, cache};
use crate::ui as output;
use crate::utils::templates::Variables;
use rayon::prelude::*;
use std::thread;
use std::time::Duration;

/// One URL to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditJob {
    /// `<package> (<arch>)`
    pub description: String,
    pub url: String,
}

/// A link that failed the audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditFailure {
    pub description: String,
    pub message: String,
}

pub fn run(config: &RunConfig, force: bool) -> Result<()> {
    let registry = cache::load_registry(&config.registry_source(), force, config.progress)?;

    let (jobs, mut failures) = audit_jobs(&registry, &config.variables());
    let options = CheckOptions {
        expected_content_types: content_types::installer_content_types(),
        ..Default::default()
    };

    failures.extend(check_all(&jobs, &options, &RetryPolicy::AUDIT, &thread::sleep)?);

    if failures.is_empty() {
        output::success(&format!("All {} links are healthy", jobs.len()));
        return Ok(());
    }

    output::error("found errors:");
    for failure in &failures {
        output::indent(&format!("{}: {}", failure.description, failure.message), 1);
    }

    Err(JustInstallError::Other(format!(
        "{} link(s) failed the audit",
        failures.len()
    )))
}

/// Jobs for every audited package and architecture URL, in package order.
/// URLs whose template cannot be expanded are reported as failures.
pub fn audit_jobs(registry: &Registry, base: &Variables) -> (Vec<AuditJob>, Vec<AuditFailure>) {
    let mut jobs = Vec::new();
    let mut failures = Vec::new();

    for name in registry.sorted_package_names() {
        let Some(package) = registry.get(name) else {
            continue;
        };
        if package.skip_audit {
            output::verbose(&format!("skipping audit of {}", name));
            continue;
        }

        for (arch, template) in package.installer.urls() {
            let description = format!("{} ({})", name, arch);
            match package.expand(template, base) {
                Ok(url) => jobs.push(AuditJob { description, url }),
                Err(e) => failures.push(AuditFailure {
                    description,
                    message: e.to_string(),
                }),
            }
        }
    }

    (jobs, failures)
}

/// Check `jobs` on a pool sized to the machine's parallelism. Returns once
/// every job has finished.
pub fn check_all(
    jobs: &[AuditJob],
    options: &CheckOptions,
    policy: &RetryPolicy,
    sleep: &(dyn Fn(Duration) + Sync),
) -> Result<Vec<AuditFailure>> {
    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| JustInstallError::Other(format!("could not start audit workers: {}", e)))?;

    let failures: Vec<AuditFailure> = pool.install(|| {
        jobs.par_iter()
            .filter_map(|job| {
                output::info(&format!("checking {}", job.description));
                policy
                    .execute(&job.description, || fetch::check(&job.url, options), sleep)
                    .err()
                    .map(|e| AuditFailure {
                        description: job.description.clone(),
                        message: e.to_string(),
                    })
            })
            .collect()
    });

    Ok(failures)
}
