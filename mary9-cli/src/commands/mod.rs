pub mod solve;

use clap::ArgMatches;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::str::FromStr;

pub(crate) fn create_write_buffer(out_file: Option<File>) -> BufWriter<Box<dyn Write>> {
    if let Some(out_file) = out_file {
        BufWriter::new(Box::new(out_file))
    } else {
        BufWriter::new(Box::new(stdout()))
    }
}

fn open_file(path: &str, description: &str) -> Result<File, String> {
    File::open(path).map_err(|err| format!("cannot open {description} file '{path}': '{err}'"))
}

fn create_file(path: &str, description: &str) -> Result<File, String> {
    File::create(path).map_err(|err| format!("cannot create {description} file '{path}': '{err}'"))
}

fn parse_int_value<T: FromStr<Err = std::num::ParseIntError>>(
    matches: &ArgMatches,
    arg_name: &str,
    arg_desc: &str,
) -> Result<Option<T>, String> {
    matches
        .get_one::<String>(arg_name)
        .map(|arg| {
            arg.parse::<T>().map_err(|err| format!("cannot get integer value, error: '{err}': '{arg_desc}'")).map(Some)
        })
        .unwrap_or(Ok(None))
}

fn parse_float_list(matches: &ArgMatches, arg_name: &str, arg_desc: &str) -> Result<Option<Vec<f64>>, String> {
    matches
        .get_one::<String>(arg_name)
        .map(|arg| {
            arg.split(',')
                .map(|value| {
                    value
                        .trim()
                        .parse::<f64>()
                        .map_err(|err| format!("cannot get float value, error: '{err}': '{arg_desc}'"))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some)
        })
        .unwrap_or(Ok(None))
}
