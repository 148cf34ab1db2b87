use super::*;

#[test]
fn build_program_command_splits_program_and_args() {
    let argv = vec!["msiexec.exe".to_string(), "/q".to_string()];
    let cmd = build_program_command(&argv).unwrap();
    assert_eq!(cmd.get_program(), "msiexec.exe");
    let args: Vec<_> = cmd.get_args().collect();
    assert_eq!(args, vec!["/q"]);
}

#[test]
fn build_program_command_rejects_empty_argv() {
    assert!(build_program_command(&[]).is_err());
}

#[test]
fn default_architecture_follows_host() {
    assert_eq!(select_architecture(None, true).unwrap(), Architecture::X86_64);
    assert_eq!(select_architecture(None, false).unwrap(), Architecture::X86);
    assert_eq!(select_architecture(Some(""), false).unwrap(), Architecture::X86);
}

#[test]
fn explicit_x86_is_always_allowed() {
    assert_eq!(select_architecture(Some("x86"), true).unwrap(), Architecture::X86);
    assert_eq!(select_architecture(Some("x86"), false).unwrap(), Architecture::X86);
}

#[test]
fn x86_64_on_32bit_host_is_rejected() {
    assert!(select_architecture(Some("x86_64"), false).is_err());
}

#[test]
fn unknown_architecture_is_rejected() {
    let err = select_architecture(Some("arm64"), true).unwrap_err();
    assert!(err.to_string().contains("arm64"));
}

#[test]
fn display_command_quotes_spaces() {
    let argv = vec![
        "C:\\Program Files\\app.exe".to_string(),
        "/S".to_string(),
    ];
    let shown = display_command(&argv);
    assert!(shown.contains("'C:\\Program Files\\app.exe'") || shown.contains("\"C:\\Program Files\\app.exe\""));
    assert!(shown.ends_with("/S"));
}
