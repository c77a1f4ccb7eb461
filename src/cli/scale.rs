//! Scale command implementation

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use log::info;

use crate::codec;
use crate::scalers::ScalerKind;

use super::{scaled_dimensions, Settings, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Requested output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Factor(u32),
    Size(u32, u32),
}

impl Target {
    fn resolve(self, src: (u32, u32)) -> Result<(u32, u32), String> {
        match self {
            Target::Factor(factor) => scaled_dimensions(src, factor),
            Target::Size(w, h) => Ok((w, h)),
        }
    }
}

/// Execute the scale command
pub(crate) fn run_scale(
    settings: &Settings,
    input: &Path,
    output: &Path,
    kind: ScalerKind,
    target: Target,
) -> ExitCode {
    let src = match codec::load(input) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (dst_w, dst_h) = match target.resolve(src.dimensions()) {
        Ok(dims) => dims,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let scaler = settings.registry.new_scaler(kind);
    let start = Instant::now();
    let scaled = match scaler.scale(&src, dst_w, dst_h) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = if e.is_bad_argument() { EXIT_INVALID_ARGS } else { EXIT_ERROR };
            return ExitCode::from(code);
        }
    };
    info!(
        "{} scaled {} to {}x{} in {:.1} ms",
        kind.display_name(),
        input.display(),
        dst_w,
        dst_h,
        start.elapsed().as_secs_f64() * 1000.0
    );

    if let Err(e) = codec::save(output, &scaled) {
        eprintln!("Error saving {}: {}", output.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output.display());
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_resolve() {
        assert_eq!(Target::Factor(3).resolve((4, 5)), Ok((12, 15)));
        assert_eq!(Target::Size(7, 2).resolve((4, 5)), Ok((7, 2)));
        assert!(Target::Factor(2).resolve((u32::MAX, 1)).is_err());
    }
}
