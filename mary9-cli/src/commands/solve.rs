#[cfg(test)]
#[path = "../../tests/unit/commands/solve_test.rs"]
mod solve_test;

use super::*;

use clap::{Arg, ArgAction, ArgMatches, Command};
use mary9::orchestration::OptimizerBuilder;
use mary9::utils::LogLevels;
use mary9_cli::extensions::config::{create_builder_from_config_file, create_stdout_logger};
use mary9_cli::extensions::functions::{FUNCTION_NAMES, get_benchmark_function};
use mary9_cli::write_results;
use std::io::BufReader;

const FUNCTION_ARG_NAME: &str = "FUNCTION";
const DIMENSIONS_ARG_NAME: &str = "dims";
const LOWER_ARG_NAME: &str = "lower";
const UPPER_ARG_NAME: &str = "upper";
const MULTI_STARTS_ARG_NAME: &str = "multi-starts";
const LOCAL_SEARCH_ARG_NAME: &str = "local-search-equivalent";
const RANDOM_SEED_ARG_NAME: &str = "seed";
const CONFIG_ARG_NAME: &str = "config";
const LOG_ARG_NAME: &str = "log";
const OUT_RESULT_ARG_NAME: &str = "out-result";

const DEFAULT_LOWER_BOUND: f64 = -5.;
const DEFAULT_UPPER_BOUND: f64 = 5.;

pub fn get_solve_app() -> Command {
    Command::new("solve")
        .about("Minimizes a benchmark function within bounds")
        .arg(
            Arg::new(FUNCTION_ARG_NAME)
                .help("Specifies the benchmark function")
                .required(true)
                .value_parser(FUNCTION_NAMES)
                .index(1),
        )
        .arg(
            Arg::new(DIMENSIONS_ARG_NAME)
                .help("Specifies amount of parameters")
                .short('d')
                .long(DIMENSIONS_ARG_NAME)
                .required(true),
        )
        .arg(
            Arg::new(LOWER_ARG_NAME)
                .help("Specifies lower bounds: one value for all parameters or a comma separated list")
                .short('l')
                .long(LOWER_ARG_NAME)
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new(UPPER_ARG_NAME)
                .help("Specifies upper bounds: one value for all parameters or a comma separated list")
                .short('u')
                .long(UPPER_ARG_NAME)
                .allow_hyphen_values(true)
                .required(false),
        )
        .arg(
            Arg::new(MULTI_STARTS_ARG_NAME)
                .help("Specifies amount of equivalent multi-starts which defines the budget")
                .short('m')
                .long(MULTI_STARTS_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOCAL_SEARCH_ARG_NAME)
                .help("Specifies a cost of one local search in gradient evaluations")
                .long(LOCAL_SEARCH_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(RANDOM_SEED_ARG_NAME)
                .help("Specifies random seed")
                .short('s')
                .long(RANDOM_SEED_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to an optimizer config file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether default logging is enabled")
                .long(LOG_ARG_NAME)
                .action(ArgAction::SetTrue)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
}

pub fn run_solve(
    matches: &ArgMatches,
    out_writer_func: fn(Option<File>) -> BufWriter<Box<dyn Write>>,
) -> Result<(), String> {
    let function_name = matches.get_one::<String>(FUNCTION_ARG_NAME).ok_or("function name is not set")?;
    let dimensions = parse_int_value::<usize>(matches, DIMENSIONS_ARG_NAME, "amount of parameters")?
        .ok_or("amount of parameters is not set")?;
    let lower = get_bounds(matches, LOWER_ARG_NAME, dimensions, DEFAULT_LOWER_BOUND)?;
    let upper = get_bounds(matches, UPPER_ARG_NAME, dimensions, DEFAULT_UPPER_BOUND)?;

    let mut builder = OptimizerBuilder::default()
        .with_objective(get_benchmark_function(function_name)?)
        .with_bounds(lower, upper)
        .with_log_levels(LogLevels::silent());

    if let Some(path) = matches.get_one::<String>(CONFIG_ARG_NAME) {
        builder = create_builder_from_config_file(builder, BufReader::new(open_file(path, "config")?))?;
    }

    builder = configure_from_args(builder, matches)?;

    let optimizer = builder.build().map_err(|err| err.to_string())?;
    let outcome = optimizer.minimize();

    let out_file = matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;

    write_results(outcome.results.as_slice(), out_writer_func(out_file))
}

fn configure_from_args(mut builder: OptimizerBuilder, matches: &ArgMatches) -> Result<OptimizerBuilder, String> {
    if let Some(multi_starts) = parse_int_value::<usize>(matches, MULTI_STARTS_ARG_NAME, "multi-starts")? {
        builder = builder.with_multi_starts(multi_starts);
    }

    if let Some(local_search) = parse_int_value::<usize>(matches, LOCAL_SEARCH_ARG_NAME, "local search equivalent")? {
        builder = builder.with_local_search_equivalent(local_search);
    }

    if let Some(seed) = parse_int_value::<u64>(matches, RANDOM_SEED_ARG_NAME, "random seed")? {
        builder = builder.with_seed(seed);
    }

    if matches.get_flag(LOG_ARG_NAME) {
        builder = builder.with_logger(create_stdout_logger()).with_log_levels(LogLevels::default());
    }

    Ok(builder)
}

/// Expands a single value to all dimensions or checks that a list has one value per dimension.
fn get_bounds(matches: &ArgMatches, arg_name: &str, dimensions: usize, default: f64) -> Result<Vec<f64>, String> {
    match parse_float_list(matches, arg_name, arg_name)? {
        None => Ok(vec![default; dimensions]),
        Some(values) if values.len() == 1 => Ok(vec![values[0]; dimensions]),
        Some(values) if values.len() == dimensions => Ok(values),
        Some(values) => Err(format!("expected 1 or {dimensions} {arg_name} bounds, got {}", values.len())),
    }
}
