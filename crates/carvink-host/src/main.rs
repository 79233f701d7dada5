//! Carvink host entry point.

use clap::Parser;

mod cli;
mod error;
mod replay;
mod script;

use crate::cli::{Cli, Command};
use crate::replay::{run_convert, run_replay};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Replay(args) => match run_replay(&args) {
            Ok(summary) => {
                println!(
                    "{} events, {} directives, {} persists, {} paths",
                    summary.events, summary.directives, summary.persists, summary.paths
                );
                0
            }
            Err(error) => {
                eprintln!("error: {error}");
                1
            }
        },
        Command::Convert(args) => match run_convert(&args) {
            Ok(paths) => {
                println!("{paths} paths written to {}", args.output.display());
                0
            }
            Err(error) => {
                eprintln!("error: {error}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
