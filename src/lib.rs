pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod installer;
pub mod project_identity;
pub mod registry;
pub mod ui;
pub mod utils;

use clap::Parser;
use std::ffi::OsString;
use std::process::exit;

/// Run just-install CLI entrypoint.
pub fn run_cli() {
    // 1. Parse, preferring arguments embedded in the executable
    let args = cli::args::Cli::parse_from(command_line());
    ui::set_quiet(args.global.quiet);
    ui::set_verbose(args.global.verbose);

    // 2. Settings decide the color mode, so they load before any output
    let settings = match config::Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            ui::init_colors(ui::ColorMode::Auto);
            ui::error(&format!("{}", e));
            exit(1);
        }
    };
    ui::init_colors(settings.color_mode());

    // 3. Run
    if let Err(e) = cli::dispatcher::dispatch(&args, &settings) {
        ui::error(&format!("{}", e));
        exit(1);
    }
}

fn command_line() -> Vec<OsString> {
    let mut argv: Vec<OsString> = std::env::args_os().collect();

    let embedded = std::env::current_exe()
        .ok()
        .and_then(|exe| utils::overlay::embedded_arguments(&exe));

    if let Some(embedded) = embedded {
        argv.truncate(1);
        argv.extend(embedded.into_iter().map(OsString::from));
    }

    argv
}
