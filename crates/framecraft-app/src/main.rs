//! Main application entry point.

use clap::Parser;
use framecraft_app::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting FrameCraft");

    let command = Cli::parse().into_command();
    match framecraft_app::run(&command, &mut std::io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("framecraft: {err}");
            ExitCode::FAILURE
        }
    }
}
