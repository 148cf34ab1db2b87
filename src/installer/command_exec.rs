use crate::error::{JustInstallError, Result};
use crate::ui;
use crate::utils::platform;
use std::process::{Command, ExitStatus, Stdio};

/// msiexec's ERROR_SUCCESS_REBOOT_REQUIRED.
pub const MSI_REBOOT_REQUIRED: i32 = 3010;

/// Run `argv` with the console attached and wait for it.
pub fn run(argv: &[String]) -> Result<()> {
    let mut cmd = platform::build_program_command(argv)?;
    let display = platform::display_command(argv);

    ui::verbose(&format!("Running {}", display));
    let status = run_interactive_command(&mut cmd, &display)?;

    check_exit(argv.first().map(String::as_str).unwrap_or_default(), status.code(), &display)
}

fn run_interactive_command(cmd: &mut Command, display: &str) -> Result<ExitStatus> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    let mut child = cmd
        .spawn()
        .map_err(|e| JustInstallError::SystemCommandFailed {
            command: display.to_string(),
            reason: e.to_string(),
        })?;

    child
        .wait()
        .map_err(|e| JustInstallError::SystemCommandFailed {
            command: display.to_string(),
            reason: e.to_string(),
        })
}

/// Map an exit code to success or failure. `None` means the process was
/// terminated by a signal.
pub(crate) fn check_exit(program: &str, code: Option<i32>, display: &str) -> Result<()> {
    match code {
        Some(0) => Ok(()),
        Some(MSI_REBOOT_REQUIRED) if is_msiexec(program) => {
            ui::warning("Installation succeeded, a reboot is required to complete it");
            Ok(())
        }
        Some(code) => Err(JustInstallError::SystemCommandFailed {
            command: display.to_string(),
            reason: format!("exited with status {}", code),
        }),
        None => Err(JustInstallError::SystemCommandFailed {
            command: display.to_string(),
            reason: "terminated without an exit code".to_string(),
        }),
    }
}

fn is_msiexec(program: &str) -> bool {
    let name = program
        .rsplit(['\\', '/'])
        .next()
        .unwrap_or(program)
        .to_ascii_lowercase();
    name == "msiexec.exe" || name == "msiexec"
}
