//! Benchmark objective functions available from the command line.

#[cfg(test)]
#[path = "../../tests/unit/extensions/functions_test.rs"]
mod functions_test;

use mary9::models::ObjectiveFn;
use mary9::utils::Float;
use std::f64::consts::PI;
use std::sync::Arc;

/// Names of available benchmark functions.
pub const FUNCTION_NAMES: [&str; 3] = ["sphere", "rosenbrock", "rastrigin"];

/// Returns a benchmark function by its name.
pub fn get_benchmark_function(name: &str) -> Result<ObjectiveFn, String> {
    match name {
        "sphere" => Ok(Arc::new(sphere)),
        "rosenbrock" => Ok(Arc::new(rosenbrock)),
        "rastrigin" => Ok(Arc::new(rastrigin)),
        _ => Err(format!("unknown function: '{name}', expected one of: {}", FUNCTION_NAMES.join(", "))),
    }
}

fn sphere(x: &[Float]) -> Float {
    x.iter().map(|v| v * v).sum()
}

fn rosenbrock(x: &[Float]) -> Float {
    x.windows(2).map(|pair| 100. * (pair[1] - pair[0] * pair[0]).powi(2) + (1. - pair[0]).powi(2)).sum()
}

fn rastrigin(x: &[Float]) -> Float {
    10. * x.len() as Float + x.iter().map(|v| v * v - 10. * (2. * PI * v).cos()).sum::<Float>()
}
