//! Info command implementations (list)

use std::process::ExitCode;

use crate::registry::ScalerRegistry;

use super::EXIT_SUCCESS;

/// Execute the list command
pub fn run_list() -> ExitCode {
    let registry = ScalerRegistry::new();
    for line in list_lines(&registry) {
        println!("{}", line);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// One line per scaler: display name, command-line name, sizing note.
fn list_lines(registry: &ScalerRegistry) -> Vec<String> {
    registry
        .kinds()
        .iter()
        .map(|&kind| {
            let sizing = if kind.is_doubling() { "2x steps + resize" } else { "any size" };
            format!("{:<8} {:<8} {}", registry.name(kind), kind.to_string(), sizing)
        })
        .collect()
}
