//! jsonette CLI.
//!
//! Reads a JSON file, parses it, and prints the resulting value tree.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use jsonette::limits::DEFAULT_MAX_NESTING_DEPTH;
use jsonette::{parse_with_limits, Limits};

#[derive(Parser)]
#[command(name = "jsonette")]
#[command(about = "Parse a JSON file and print the value tree", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the JSON document
    path: PathBuf,

    /// Maximum container nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    max_depth: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let text = match std::fs::read_to_string(&cli.path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read {}: {}", cli.path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    match parse_with_limits(&text, Limits::with_max_depth(cli.max_depth)) {
        Ok(value) => {
            println!("{value:#?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}: {}", cli.path.display(), err);
            ExitCode::FAILURE
        }
    }
}
