use super::*;
use crate::cli::args::Cli;
use clap::Parser;
use std::fs;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec![project_identity::BINARY_NAME];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

#[test]
fn bare_packages_map_to_install_options() {
    let cli = parse(&["-d", "-f", "--shim", "7zip", "git"]);
    let options = install_options(&cli.install);

    assert_eq!(options.packages, vec!["7zip", "git"]);
    assert!(options.download_only);
    assert!(options.force);
    assert!(options.shims_only);
}

#[test]
fn install_flags_become_overrides() {
    let cli = parse(&[
        "install",
        "--arch",
        "x86",
        "--lang",
        "it-IT",
        "--registry",
        "C:\\registry.json",
        "--no-progress",
        "firefox",
    ]);
    let Some(Command::Install(install)) = &cli.command else {
        panic!("expected install command");
    };

    let overrides = install_overrides(install);
    assert_eq!(overrides.arch.as_deref(), Some("x86"));
    assert_eq!(overrides.lang.as_deref(), Some("it-IT"));
    assert_eq!(overrides.registry.as_deref(), Some("C:\\registry.json"));
    assert!(overrides.no_progress);
}

#[test]
fn registry_commands_only_override_registry_and_progress() {
    let cli = parse(&["list", "-r", "https://example.com/r.json"]);
    let Some(Command::List { registry, force }) = &cli.command else {
        panic!("expected list command");
    };

    let overrides = registry_overrides(registry);
    assert!(!force);
    assert_eq!(overrides.registry.as_deref(), Some("https://example.com/r.json"));
    assert_eq!(overrides.arch, None);
    assert_eq!(overrides.lang, None);
    assert!(!overrides.no_progress);
}

#[test]
fn list_dispatches_against_a_local_registry() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("registry.json");
    fs::write(
        &registry,
        r#"{"version": 4, "packages": {"7zip": {"version": "19.00", "installer": {
            "kind": "msi", "x86": "https://example.com/7z.msi"
        }}}}"#,
    )
    .unwrap();

    let cli = parse(&["list", "--registry", registry.to_str().unwrap()]);
    dispatch(&cli, &Settings::default()).unwrap();
}

#[test]
fn install_of_unknown_package_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("registry.json");
    fs::write(&registry, r#"{"version": 4, "packages": {}}"#).unwrap();

    let cli = parse(&["--registry", registry.to_str().unwrap(), "nope"]);
    let err = dispatch(&cli, &Settings::default()).unwrap_err();
    assert!(err.to_string().contains("nope"));
}
