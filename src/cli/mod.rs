//! Command-line interface implementation
//!
//! This module provides the CLI definition and dispatches to submodules
//! for specific command implementations.

mod bench;
mod compare;
mod info;
mod scale;

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use glob::glob;

use crate::config::{load_config, merge_cli_overrides, project_root, CliOverrides, ScalecmpConfig};
use crate::registry::ScalerRegistry;
use crate::scalers::ScalerKind;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// scalecmp - Compare image upscaling algorithms side by side
#[derive(Parser)]
#[command(name = "scalecmp")]
#[command(about = "scalecmp - Upscale images with several algorithms and compare the results")]
#[command(version)]
pub struct Cli {
    /// Path to a scalecmp.toml (default: discovered from the working directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the available scalers in registry order
    List,

    /// Upscale one image with one scaler
    Scale {
        /// Input image (3-channel RGB)
        input: PathBuf,

        /// Output file; the format follows the extension
        #[arg(short, long)]
        output: PathBuf,

        /// Scaler to use
        #[arg(short, long, value_enum, default_value = "linear")]
        scaler: ScalerKind,

        /// Integer upscale factor (default: compare.factor from config)
        #[arg(short, long, conflicts_with = "size", value_parser = clap::value_parser!(u32).range(1..))]
        factor: Option<u32>,

        /// Exact output size (e.g., "640x480")
        #[arg(long, value_parser = parse_size)]
        size: Option<(u32, u32)>,

        /// Disable DDT edge map smoothing
        #[arg(long)]
        no_smoothing: bool,
    },

    /// Upscale images with every selected scaler and save one file per scaler
    Compare {
        /// Input images or glob patterns (e.g., "shots/*.png")
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Integer upscale factor
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        factor: Option<u32>,

        /// Output directory for `<stem><Name>.png` files
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Scaler to run (repeatable; default: all)
        #[arg(short, long = "scaler", value_enum)]
        scalers: Vec<ScalerKind>,

        /// Disable DDT edge map smoothing
        #[arg(long)]
        no_smoothing: bool,
    },

    /// Time every selected scaler on one image
    Bench {
        /// Input image (3-channel RGB)
        input: PathBuf,

        /// Timed runs per scaler
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        iterations: Option<u32>,

        /// Integer upscale factor
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        factor: Option<u32>,

        /// Scaler to time (repeatable; default: all)
        #[arg(short, long = "scaler", value_enum)]
        scalers: Vec<ScalerKind>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI application
pub fn run(cli: Cli) -> ExitCode {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::List => info::run_list(),
        Commands::Scale { input, output, scaler, factor, size, no_smoothing } => {
            let overrides = CliOverrides {
                factor,
                ddt_smoothing: no_smoothing.then_some(false),
                ..Default::default()
            };
            let settings = match Settings::load(config_path, &overrides) {
                Ok(s) => s,
                Err(code) => return code,
            };
            let target = match size {
                Some(size) => scale::Target::Size(size.0, size.1),
                None => scale::Target::Factor(settings.config.compare.factor),
            };
            scale::run_scale(&settings, &input, &output, scaler, target)
        }
        Commands::Compare { inputs, factor, out, scalers, no_smoothing } => {
            let overrides = CliOverrides {
                out,
                factor,
                scalers: (!scalers.is_empty()).then_some(scalers),
                ddt_smoothing: no_smoothing.then_some(false),
                ..Default::default()
            };
            let settings = match Settings::load(config_path, &overrides) {
                Ok(s) => s,
                Err(code) => return code,
            };
            let inputs = match expand_inputs(&inputs) {
                Ok(paths) => paths,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_INVALID_ARGS);
                }
            };
            compare::run_compare(&settings, &inputs)
        }
        Commands::Bench { input, iterations, factor, scalers, json } => {
            let overrides = CliOverrides { iterations, bench_factor: factor, ..Default::default() };
            let settings = match Settings::load(config_path, &overrides) {
                Ok(s) => s,
                Err(code) => return code,
            };
            bench::run_bench(&settings, &input, &scalers, json)
        }
    }
}

/// Effective configuration for one command run.
pub(crate) struct Settings {
    pub config: ScalecmpConfig,
    pub registry: ScalerRegistry,
    /// Directory relative config paths resolve against
    pub root: PathBuf,
}

impl Settings {
    /// Load the config file, apply CLI overrides and build the registry.
    ///
    /// Errors are reported on stderr; the returned code is the exit status.
    fn load(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Self, ExitCode> {
        let discovered = match config_path {
            Some(p) => Some(p.to_path_buf()),
            None => crate::config::find_config(),
        };

        let mut config = match load_config(discovered.as_deref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                return Err(ExitCode::from(EXIT_ERROR));
            }
        };

        let root = match discovered.as_deref().and_then(project_root) {
            Some(dir) if overrides.out.is_none() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        merge_cli_overrides(&mut config, overrides);
        let errors = config.validate();
        if !errors.is_empty() {
            for e in &errors {
                eprintln!("Error: {}", e);
            }
            return Err(ExitCode::from(EXIT_INVALID_ARGS));
        }

        let registry = ScalerRegistry::from_config(&config);
        Ok(Self { config, registry, root })
    }
}

/// Parse a size string like "640x480" into (width, height).
pub(crate) fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid size '{}', expected WxH (e.g., \"640x480\")", s));
    }
    let w: u32 =
        parts[0].trim().parse().map_err(|_| format!("invalid width '{}'", parts[0].trim()))?;
    let h: u32 =
        parts[1].trim().parse().map_err(|_| format!("invalid height '{}'", parts[1].trim()))?;
    if w == 0 || h == 0 {
        return Err(format!("size dimensions must be > 0, got {}x{}", w, h));
    }
    Ok((w, h))
}

/// Multiply image dimensions by an integer factor, rejecting overflow.
pub(crate) fn scaled_dimensions(dims: (u32, u32), factor: u32) -> Result<(u32, u32), String> {
    match (dims.0.checked_mul(factor), dims.1.checked_mul(factor)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(format!("{}x{} scaled by {} is too large", dims.0, dims.1, factor)),
    }
}

/// Expand input arguments, treating those with glob metacharacters as patterns.
///
/// Plain paths are kept as given even if they do not exist, so the loader
/// can report them. A pattern that matches nothing is an error.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.contains(&['*', '?', '['][..]) {
            files.push(PathBuf::from(input));
            continue;
        }

        let paths = glob(input).map_err(|e| format!("invalid pattern '{}': {}", input, e))?;
        let mut matched: Vec<PathBuf> = paths.filter_map(Result::ok).filter(|p| p.is_file()).collect();
        if matched.is_empty() {
            return Err(format!("no files match '{}'", input));
        }
        matched.sort();
        files.append(&mut matched);
    }

    Ok(files)
}
