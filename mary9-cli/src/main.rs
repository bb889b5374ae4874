//! A command line interface to the mary9 hybrid optimizer.

mod commands;

use clap::Command;
use commands::solve::{get_solve_app, run_solve};
use std::process;

fn main() {
    let matches = Command::new("Mary9 Optimizer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command line interface to the hybrid black-box optimizer")
        .subcommand(get_solve_app())
        .get_matches();

    let result = match matches.subcommand() {
        Some(("solve", solve_matches)) => run_solve(solve_matches, commands::create_write_buffer),
        _ => Err("no subcommand was used. Use -h to print help information.".to_string()),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
