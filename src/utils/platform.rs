use crate::error::{JustInstallError, Result};
use crate::registry::Architecture;
use std::path::Path;
use std::process::Command;

/// Whether the host runs a 64-bit Windows.
///
/// A 32-bit Windows has no `ProgramFiles(x86)` directory.
pub fn is_64bit() -> bool {
    std::env::var("ProgramFiles(x86)")
        .map(|sentinel| !sentinel.is_empty() && Path::new(&sentinel).is_dir())
        .unwrap_or(false)
}

/// Pick the architecture to install for.
///
/// `preferred` comes from the command line or settings; when absent the
/// widest architecture the host supports is chosen.
pub fn select_architecture(preferred: Option<&str>, host_is_64bit: bool) -> Result<Architecture> {
    match preferred {
        None | Some("") => Ok(if host_is_64bit {
            Architecture::X86_64
        } else {
            Architecture::X86
        }),
        Some(raw) => {
            let arch: Architecture = raw.parse()?;
            if arch == Architecture::X86_64 && !host_is_64bit {
                return Err(JustInstallError::ConfigError(
                    "this machine cannot run 64-bit software".to_string(),
                ));
            }
            Ok(arch)
        }
    }
}

/// Build a direct program invocation from an argument vector whose first
/// element is the program.
pub fn build_program_command(argv: &[String]) -> Result<Command> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| JustInstallError::Other("empty command line".to_string()))?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}

/// Render an argument vector the way a user would type it.
pub fn display_command(argv: &[String]) -> String {
    shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| argv.join(" "))
}

#[cfg(test)]
mod tests;
