mod cli;
mod command;
mod config;
mod engine;
mod fleet;
mod logging;
mod model;
mod render;
mod simulation;
mod tui;
mod view;

use std::process;

use clap::Parser;

use cli::Cli;
use config::Config;

fn main() {
    let cli = Cli::parse();

    logging::init(if cli.is_interactive() {
        &logging::Target::File
    } else {
        &logging::Target::Stderr
    });

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, &config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
