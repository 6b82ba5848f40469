//! Main application entry point.

use clap::Parser;
use std::process;
use vitae_app::Cli;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("Starting vitae: {:?}", cli.command);

    if let Err(err) = vitae_app::run(cli) {
        log::error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}
