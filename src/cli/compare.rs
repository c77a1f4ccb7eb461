//! Compare command implementation
//!
//! Every selected scaler runs on the same input at the same target size and
//! each result is saved as `<out>/<stem><Name>.png`. Scalers run concurrently
//! on the rayon pool; each individual scale call is single-threaded.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use log::{info, warn};
use rayon::prelude::*;

use crate::codec;
use crate::config::resolve_path;
use crate::raster::Image;
use crate::scalers::{ScaleError, ScalerKind};

use super::{scaled_dimensions, Settings, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Result of one scaler on one input.
struct Outcome {
    kind: ScalerKind,
    result: Result<Image, ScaleError>,
    millis: f64,
}

/// Execute the compare command
pub(crate) fn run_compare(settings: &Settings, inputs: &[PathBuf]) -> ExitCode {
    let out_dir = resolve_path(&settings.root, &settings.config.compare.out);
    let kinds = settings.registry.select(&settings.config.compare.scalers);
    let factor = settings.config.compare.factor;

    let mut failed = false;
    let mut bad_args = false;

    for input in inputs {
        let src = match codec::load(input) {
            Ok(img) => img,
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
                continue;
            }
        };

        let (dst_w, dst_h) = match scaled_dimensions(src.dimensions(), factor) {
            Ok(dims) => dims,
            Err(e) => {
                eprintln!("Error: {}: {}", input.display(), e);
                bad_args = true;
                continue;
            }
        };

        println!(
            "{}: {}x{} -> {}x{}",
            input.display(),
            src.width(),
            src.height(),
            dst_w,
            dst_h
        );

        for outcome in run_scalers(settings, &kinds, &src, dst_w, dst_h) {
            let name = settings.registry.name(outcome.kind);
            match outcome.result {
                Ok(scaled) => {
                    let path = codec::output_path_for(input, &out_dir, name);
                    if let Err(e) = codec::save(&path, &scaled) {
                        eprintln!("Error saving {}: {}", path.display(), e);
                        failed = true;
                        continue;
                    }
                    println!("  {:<8} {:>9.1} ms  {}", name, outcome.millis, path.display());
                }
                Err(e) => {
                    warn!("{} skipped {}: {}", name, input.display(), e);
                    eprintln!("  {:<8} failed: {}", name, e);
                    if e.is_bad_argument() {
                        bad_args = true;
                    } else {
                        failed = true;
                    }
                }
            }
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else if bad_args {
        ExitCode::from(EXIT_INVALID_ARGS)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Run each scaler on `src`, in parallel across scalers.
///
/// Outcomes come back in the order of `kinds`.
fn run_scalers(
    settings: &Settings,
    kinds: &[ScalerKind],
    src: &Image,
    dst_w: u32,
    dst_h: u32,
) -> Vec<Outcome> {
    kinds
        .par_iter()
        .map(|&kind| {
            let scaler = settings.registry.new_scaler(kind);
            let start = Instant::now();
            let result = scaler.scale(src, dst_w, dst_h);
            let millis = start.elapsed().as_secs_f64() * 1000.0;
            info!("{} finished in {:.1} ms", kind.display_name(), millis);
            Outcome { kind, result, millis }
        })
        .collect()
}

