#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]

#[macro_use]
mod environment;

use environment::RealEnvironment;
use environment::RealEnvironmentOptions;
use run_cli::AppError;

mod arg_parser;
mod configuration;
mod persistence;
mod platform;
mod run_cli;
mod search_path;
mod utils;

#[cfg(test)]
mod test_helpers;

fn main() {
  if let Err(err) = run() {
    let result = format!("{:#}", err.inner);
    #[allow(clippy::print_stderr)]
    if !result.is_empty() {
      eprintln!("{}", result);
    }
    std::process::exit(err.exit_code);
  }
}

fn run() -> Result<(), AppError> {
  let args = arg_parser::parse_args(std::env::args().collect())?;
  let environment = RealEnvironment::new(&RealEnvironmentOptions { is_verbose: args.verbose });
  run_cli::run_cli(&args, &environment)?;
  Ok(())
}
