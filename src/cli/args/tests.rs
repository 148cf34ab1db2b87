use super::{Cli, Command};
use crate::project_identity;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    let mut argv = vec![project_identity::BINARY_NAME];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)
}

#[test]
fn bare_package_names_install_without_a_subcommand() {
    let cli = parse(&["7zip", "firefox"]).expect("packages should parse");
    assert!(cli.command.is_none());
    assert_eq!(cli.install.packages, vec!["7zip", "firefox"]);
}

#[test]
fn short_flags_match_long_flags() {
    let cli = parse(&["-a", "x86", "-d", "-f", "-s", "-r", "r.json", "git"]).unwrap();
    assert_eq!(cli.install.arch.as_deref(), Some("x86"));
    assert!(cli.install.download_only);
    assert!(cli.install.force);
    assert!(cli.install.shim);
    assert_eq!(cli.install.registry.registry.as_deref(), Some("r.json"));
}

#[test]
fn no_arguments_parses_to_empty_install() {
    let cli = parse(&[]).unwrap();
    assert!(cli.command.is_none());
    assert!(cli.install.packages.is_empty());
}

#[test]
fn subcommands_take_their_own_flags() {
    let cli = parse(&["audit", "--force", "--registry", "r.json"]).unwrap();
    match cli.command {
        Some(Command::Audit { force, registry }) => {
            assert!(force);
            assert_eq!(registry.registry.as_deref(), Some("r.json"));
        }
        other => panic!("unexpected command: {:?}", other),
    }

    assert!(matches!(parse(&["clean"]).unwrap().command, Some(Command::Clean)));
    assert!(matches!(
        parse(&["update"]).unwrap().command,
        Some(Command::Update { .. })
    ));
    assert!(matches!(
        parse(&["completions", "bash"]).unwrap().command,
        Some(Command::Completions { shell: Shell::Bash })
    ));
}

#[test]
fn global_flags_work_after_a_subcommand() {
    let cli = parse(&["list", "-v"]).unwrap();
    assert!(cli.global.verbose);
}

#[test]
fn quiet_and_verbose_conflict() {
    assert!(parse(&["-q", "-v", "list"]).is_err());
}

#[test]
fn unknown_flags_are_rejected() {
    assert!(parse(&["--frobnicate"]).is_err());
    assert!(parse(&["clean", "--force"]).is_err());
}

#[test]
fn clean_has_no_positional_packages() {
    assert!(parse(&["clean", "7zip"]).is_err());
}

#[test]
fn help_lists_every_command() {
    let mut out = Vec::new();
    Cli::command()
        .write_long_help(&mut out)
        .expect("can render help");
    let help = String::from_utf8(out).expect("help is valid utf8");
    for command in ["install", "audit", "clean", "list", "update", "completions"] {
        assert!(help.contains(command), "help is missing {}", command);
    }
    assert!(help.contains("--download-only"));
}

#[test]
fn install_help_describes_shim_flag() {
    let mut cmd = Cli::command();
    let install = cmd
        .find_subcommand_mut("install")
        .expect("install subcommand exists");
    let mut out = Vec::new();
    install
        .write_long_help(&mut out)
        .expect("can render install help");
    let help = String::from_utf8(out).expect("help is valid utf8");
    assert!(help.contains("--shim"));
    assert!(help.contains("exeproxy"));
}
