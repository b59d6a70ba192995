use crate::arg_parser::parse_args;
use crate::environment::TestEnvironment;
use crate::run_cli::AppError;
use crate::run_cli::run_cli;

pub fn run_test_cli(args: Vec<&str>, environment: &TestEnvironment) -> Result<(), AppError> {
  let mut args: Vec<String> = args.into_iter().map(String::from).collect();
  args.insert(0, String::from(""));
  let args = parse_args(args)?;
  environment.set_verbose(args.verbose);
  run_cli(&args, environment)?;
  Ok(())
}
