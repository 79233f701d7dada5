//! Command line definitions for the Carvink host.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "carvink-host",
    version,
    about = "Headless host for the Carvink drawing surface",
    long_about = "Mount a canvas session without a UI, replay recorded input scripts \
                  against it and write out the persisted drawings.\n\n\
                  Log verbosity follows RUST_LOG."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay an event script against a freshly mounted session.
    Replay(ReplayArgs),

    /// Convert a paper.js project export into the native drawing format.
    Convert(ConvertArgs),
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// Canvas configuration (JSON, camelCase keys).
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,

    /// Event script, one JSON event or directive per line.
    #[arg(long, value_name = "FILE")]
    pub events: PathBuf,

    /// Directory receiving persisted drawings (default: platform data directory).
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Drawing to load at mount; overrides `drawingContent` in the config.
    #[arg(long, value_name = "FILE")]
    pub content: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// paper.js `project.exportJSON()` output.
    #[arg(long, value_name = "FILE")]
    pub input: PathBuf,

    /// Where to write the converted drawing.
    #[arg(long, value_name = "FILE")]
    pub output: PathBuf,
}
