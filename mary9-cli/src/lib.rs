//! A command line interface library of the mary9 optimizer: benchmark functions, declarative
//! configuration and result serialization.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/unit/lib_test.rs"]
mod lib_test;

pub mod extensions;

use mary9::models::OptimizationResult;
use serde::Serialize;
use std::io::Write;

/// A serializable representation of one ranked result.
#[derive(Clone, Debug, Serialize)]
pub struct ResultRecord<'a> {
    /// A parameter vector in objective space.
    pub x: &'a [f64],
    /// An objective value at `x`.
    pub value: f64,
    /// An identifier of the local search which produced the result.
    pub solver: &'a str,
}

/// Returns results serialized as a json array, best result first.
pub fn get_results_serialized(results: &[OptimizationResult]) -> Result<String, String> {
    let records = results
        .iter()
        .map(|result| ResultRecord { x: result.x.as_slice(), value: result.value, solver: result.solver.as_str() })
        .collect::<Vec<_>>();

    serde_json::to_string_pretty(&records).map_err(|err| format!("cannot serialize results: '{err}'"))
}

/// Writes serialized results into given writer.
pub fn write_results<W: Write>(results: &[OptimizationResult], mut writer: W) -> Result<(), String> {
    let serialized = get_results_serialized(results)?;

    writer
        .write_all(serialized.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|err| format!("cannot write results: '{err}'"))
}
