use anyhow::Result;
use clap::error::ErrorKind;
use thiserror::Error;

use crate::search_path::UpdateStrategy;

pub struct CliArgs {
  pub sub_command: SubCommand,
  pub verbose: bool,
}

impl CliArgs {
  fn new_with_sub_command(sub_command: SubCommand) -> CliArgs {
    CliArgs { sub_command, verbose: false }
  }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubCommand {
  Update(UpdateSubCommand),
  Version,
  Help(String),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateSubCommand {
  pub variable: Option<String>,
  pub dir: Option<String>,
  pub strategy: UpdateStrategy,
  pub no_persist: bool,
  pub shell_profile: Option<String>,
  pub os: Option<String>,
}

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ParseArgsError(#[from] anyhow::Error);

pub fn parse_args(args: Vec<String>) -> Result<CliArgs, ParseArgsError> {
  inner_parse_args(args).map_err(ParseArgsError)
}

fn inner_parse_args(args: Vec<String>) -> Result<CliArgs> {
  let cli_parser = create_cli_parser();
  let matches = match cli_parser.try_get_matches_from(&args) {
    Ok(result) => result,
    Err(err) => {
      return match err.kind() {
        ErrorKind::DisplayHelp => Ok(CliArgs::new_with_sub_command(SubCommand::Help(err.render().to_string()))),
        ErrorKind::DisplayVersion => Ok(CliArgs::new_with_sub_command(SubCommand::Version)),
        _ => Err(err.into()),
      };
    }
  };

  // the value parser only accepts known names
  let strategy = matches
    .get_one::<String>("strategy")
    .and_then(|s| UpdateStrategy::parse(s))
    .unwrap_or_default();

  Ok(CliArgs {
    sub_command: SubCommand::Update(UpdateSubCommand {
      variable: matches.get_one::<String>("var").map(String::from),
      dir: matches.get_one::<String>("dir").map(String::from),
      strategy,
      no_persist: matches.get_flag("no-persist"),
      shell_profile: matches.get_one::<String>("shell-profile").map(String::from),
      os: matches.get_one::<String>("os").map(String::from),
    }),
    verbose: matches.get_flag("verbose"),
  })
}

pub fn create_cli_parser() -> clap::Command {
  use clap::Arg;
  use clap::ArgAction;
  use clap::Command;

  Command::new("obj2bin-env")
    .bin_name("obj2bin-env")
    .version(env!("CARGO_PKG_VERSION"))
    .about("Adds the obj2bin bin directory to a search path environment variable.")
    .help_template(
      r#"{bin} {version}

{about}

USAGE:
    {usage}

OPTIONS:
{options}

ENVIRONMENT VARIABLES:
  OBJ2BIN_ENV_VAR      Variable to update when --var is not provided.
  OBJ2BIN_INSTALL_DIR  Directory to add when --dir is not provided."#,
    )
    .arg(
      Arg::new("var")
        .long("var")
        .value_name("NAME")
        .help("Environment variable to update. Defaults to TESTPATH.")
        .num_args(1),
    )
    .arg(
      Arg::new("dir")
        .long("dir")
        .value_name("DIR")
        .help("Directory to add to the variable. Defaults to the obj2bin install directory.")
        .num_args(1),
    )
    .arg(
      Arg::new("strategy")
        .long("strategy")
        .help("dedupe: normalize separators and skip when already present. append: always append.")
        .value_parser(["dedupe", "append"])
        .default_value("dedupe")
        .num_args(1),
    )
    .arg(
      Arg::new("no-persist")
        .long("no-persist")
        .help("Only update the variable for this process.")
        .action(ArgAction::SetTrue),
    )
    .arg(
      Arg::new("shell-profile")
        .long("shell-profile")
        .value_name("FILE")
        .help("On non-Windows systems, persist by appending an export line to this shell startup file.")
        .num_args(1),
    )
    .arg(
      Arg::new("os")
        .long("os")
        // for exercising the other platform's behaviour
        .hide(true)
        .num_args(1),
    )
    .arg(
      Arg::new("verbose")
        .long("verbose")
        .help("Prints additional diagnostic information.")
        .action(ArgAction::SetTrue),
    )
}
