//! Bench command implementation

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use log::debug;
use serde::Serialize;

use crate::codec;
use crate::raster::Image;
use crate::registry::ScalerRegistry;
use crate::scalers::ScalerKind;

use super::{scaled_dimensions, Settings, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Timing of one scaler.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct BenchResult {
    pub scaler: &'static str,
    /// Mean wall time per run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub millis: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The failure was a bad argument (size limits) rather than a fault
    #[serde(skip)]
    pub bad_argument: bool,
}

/// Full bench report, serialized for `--json`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct BenchReport {
    pub input: String,
    pub source: [u32; 2],
    pub target: [u32; 2],
    pub iterations: u32,
    pub results: Vec<BenchResult>,
}

/// Execute the bench command
pub(crate) fn run_bench(
    settings: &Settings,
    input: &Path,
    requested: &[ScalerKind],
    json: bool,
) -> ExitCode {
    let src = match codec::load(input) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (dst_w, dst_h) = match scaled_dimensions(src.dimensions(), settings.config.bench.factor) {
        Ok(dims) => dims,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let kinds = settings.registry.select(requested);
    let iterations = settings.config.bench.iterations;
    let results = time_scalers(&settings.registry, &kinds, &src, (dst_w, dst_h), iterations);
    let status = exit_status(&results);

    if json {
        let report = BenchReport {
            input: input.display().to_string(),
            source: [src.width(), src.height()],
            target: [dst_w, dst_h],
            iterations,
            results,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for result in &results {
            match (&result.millis, &result.error) {
                (Some(ms), _) => println!("{}\t{:.3}", result.scaler, ms),
                (None, Some(e)) => eprintln!("{}\tfailed: {}", result.scaler, e),
                (None, None) => {}
            }
        }
    }

    ExitCode::from(status)
}

/// Faults win over bad arguments, as in `compare`.
fn exit_status(results: &[BenchResult]) -> u8 {
    let failed = results.iter().filter(|r| r.error.is_some());
    if failed.clone().any(|r| !r.bad_argument) {
        EXIT_ERROR
    } else if failed.count() > 0 {
        EXIT_INVALID_ARGS
    } else {
        EXIT_SUCCESS
    }
}

/// Time each scaler sequentially, `iterations` runs apiece.
///
/// A scaler that fails is reported once and not retried.
fn time_scalers(
    registry: &ScalerRegistry,
    kinds: &[ScalerKind],
    src: &Image,
    (dst_w, dst_h): (u32, u32),
    iterations: u32,
) -> Vec<BenchResult> {
    kinds
        .iter()
        .map(|&kind| {
            let scaler = registry.new_scaler(kind);
            let name = registry.name(kind);
            let start = Instant::now();
            for _ in 0..iterations {
                if let Err(e) = scaler.scale(src, dst_w, dst_h) {
                    return BenchResult {
                        scaler: name,
                        millis: None,
                        error: Some(e.to_string()),
                        bad_argument: e.is_bad_argument(),
                    };
                }
            }
            let millis = start.elapsed().as_secs_f64() * 1000.0 / f64::from(iterations.max(1));
            debug!("{}: {:.3} ms over {} run(s)", name, millis, iterations);
            BenchResult { scaler: name, millis: Some(millis), error: None, bad_argument: false }
        })
        .collect()
}
