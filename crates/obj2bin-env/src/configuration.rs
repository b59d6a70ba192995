use std::path::PathBuf;

use thiserror::Error;

use crate::arg_parser::UpdateSubCommand;
use crate::environment::Environment;
use crate::search_path::UpdateStrategy;

pub const DEFAULT_VARIABLE_NAME: &str = "TESTPATH";
pub const DEFAULT_TARGET_DIR: &str = "C:/Program Files/obj2bin/bin";
pub const VARIABLE_NAME_ENV_VAR: &str = "OBJ2BIN_ENV_VAR";
pub const TARGET_DIR_ENV_VAR: &str = "OBJ2BIN_INSTALL_DIR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
  Windows,
  Unix,
}

impl OsFamily {
  pub fn from_os(os: &str) -> Self {
    if os.eq_ignore_ascii_case("windows") {
      OsFamily::Windows
    } else {
      OsFamily::Unix
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfig {
  pub variable_name: String,
  pub target_dir: String,
  pub strategy: UpdateStrategy,
  pub os_family: OsFamily,
  pub persist: bool,
  pub shell_profile: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("The variable name must not be empty.")]
  EmptyVariableName,
  #[error("Invalid variable name '{0}'. Names can't contain '=' or NUL characters.")]
  InvalidVariableName(String),
  #[error("The directory to add must not be empty.")]
  EmptyTargetDir,
  #[error("--shell-profile is only supported on non-Windows systems.")]
  ShellProfileOnWindows,
}

/// Resolves the configuration, preferring command line
/// flags over environment variables over defaults.
pub fn resolve_config(args: &UpdateSubCommand, environment: &impl Environment) -> Result<UpdateConfig, ConfigError> {
  let variable_name = args
    .variable
    .clone()
    .or_else(|| resolve_env_var_value(environment, VARIABLE_NAME_ENV_VAR))
    .unwrap_or_else(|| DEFAULT_VARIABLE_NAME.to_string());
  if variable_name.is_empty() {
    return Err(ConfigError::EmptyVariableName);
  }
  if variable_name.contains(['=', '\0']) {
    return Err(ConfigError::InvalidVariableName(variable_name));
  }

  let target_dir = args
    .dir
    .clone()
    .or_else(|| resolve_env_var_value(environment, TARGET_DIR_ENV_VAR))
    .unwrap_or_else(|| DEFAULT_TARGET_DIR.to_string());
  if target_dir.is_empty() {
    return Err(ConfigError::EmptyTargetDir);
  }

  let os = args.os.clone().unwrap_or_else(|| environment.os());
  let os_family = OsFamily::from_os(&os);
  if os_family == OsFamily::Windows && args.shell_profile.is_some() {
    return Err(ConfigError::ShellProfileOnWindows);
  }

  Ok(UpdateConfig {
    variable_name,
    target_dir,
    strategy: args.strategy,
    os_family,
    persist: !args.no_persist,
    shell_profile: args.shell_profile.as_ref().map(PathBuf::from),
  })
}

fn resolve_env_var_value(environment: &impl Environment, name: &str) -> Option<String> {
  environment
    .env_var(name)
    .map(|value| value.to_string_lossy().into_owned())
    .filter(|value| !value.is_empty())
}
