use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "just-install",
    about = "The simple package installer for Windows",
    long_about = "Installs Windows software unattended from the just-install registry.\n\nRun `just-install <package>...` to install, or use one of the commands below.",
    version,
    args_conflicts_with_subcommands = true,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    // Bare `just-install <package>...` installs.
    #[command(flatten)]
    pub install: InstallArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalFlags {
    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RegistryArgs {
    /// Use the specified registry file or URL
    #[arg(short = 'r', long, value_name = "PATH|URL")]
    pub registry: Option<String>,

    /// Do not draw download progress bars
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InstallArgs {
    /// Packages to install
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Force installation for a specific architecture (if supported by the host)
    #[arg(short = 'a', long, value_name = "x86|x86_64")]
    pub arch: Option<String>,

    /// Only download packages, do not install them
    #[arg(short = 'd', long)]
    pub download_only: bool,

    /// Force package re-download
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Create shims only (if exeproxy is installed)
    #[arg(short = 's', long = "shim")]
    pub shim: bool,

    /// Language tag substituted into installer URLs
    #[arg(long, value_name = "TAG")]
    pub lang: Option<String>,

    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install packages
    Install(InstallArgs),

    /// Audit the registry
    Audit {
        /// Re-download the registry before auditing
        #[arg(short = 'f', long)]
        force: bool,

        #[command(flatten)]
        registry: RegistryArgs,
    },

    /// Remove caches and temporary files
    Clean,

    /// List all known packages
    List {
        /// Re-download the registry before listing
        #[arg(short = 'f', long)]
        force: bool,

        #[command(flatten)]
        registry: RegistryArgs,
    },

    /// Update the registry
    Update {
        #[command(flatten)]
        registry: RegistryArgs,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests;
