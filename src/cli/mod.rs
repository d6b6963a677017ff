//! CLI commands

mod fetch;
mod filter;

pub use fetch::fetch;
pub use filter::filter;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Haltr - streaming stop-sequence filtering for generation streams
#[derive(Parser)]
#[command(name = "haltr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter a text stream from stdin, stopping at a stop sequence
    Filter {
        /// Literal stop string (repeatable)
        #[arg(long = "stop", short)]
        stop: Vec<String>,

        /// Sentinel emitted in place of a matched stop sequence
        #[arg(long, default_value = "<|endoftext|>")]
        sentinel: String,

        /// YAML or JSON filter config file (ignored when --stop is given)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Fetch missing weight files from a remote location with pget
    Fetch {
        /// Remote base location (e.g. "gs://my-bucket/models/llama")
        remote: String,

        /// File name to ensure locally (repeatable)
        #[arg(long = "file", short)]
        files: Vec<String>,

        /// Output directory (default: $HALTR_WEIGHTS_DIR or ./weights)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}
