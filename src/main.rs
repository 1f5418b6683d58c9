mod cli;
mod config;
mod convert;
mod downscale;
mod extract_cmd;
mod logging;
mod units_cmd;
mod vpd_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Downscale(args) => downscale::run(args),
        Command::Extract(args) => extract_cmd::run(args),
        Command::Vpd(args) => vpd_cmd::run(args),
        Command::ConvertUnits(args) => units_cmd::run(args),
    }
}
