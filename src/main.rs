//! scalecmp - Command-line tool for comparing image upscaling algorithms

use std::process::ExitCode;

use clap::Parser;
use scalecmp::cli::{self, Cli};

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_micros()
        .init();

    cli::run(args)
}
