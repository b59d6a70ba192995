use anyhow::Result;
use thiserror::Error;

use crate::arg_parser::CliArgs;
use crate::arg_parser::ParseArgsError;
use crate::arg_parser::SubCommand;
use crate::configuration::UpdateConfig;
use crate::configuration::resolve_config;
use crate::environment::Environment;
use crate::platform::Persisted;
use crate::platform::PlatformPolicy;
use crate::platform::policy_for;
use crate::search_path::UpdateStrategy;
use crate::search_path::update_search_path;

#[derive(Debug, Error)]
#[error("{inner:#}")]
pub struct AppError {
  pub inner: anyhow::Error,
  pub exit_code: i32,
}

impl From<anyhow::Error> for AppError {
  fn from(inner: anyhow::Error) -> Self {
    AppError { inner, exit_code: 1 }
  }
}

impl From<ParseArgsError> for AppError {
  fn from(value: ParseArgsError) -> Self {
    AppError {
      inner: value.into(),
      exit_code: 1,
    }
  }
}

pub fn run_cli(args: &CliArgs, environment: &impl Environment) -> Result<()> {
  match &args.sub_command {
    SubCommand::Help(text) => {
      environment.log(text);
      Ok(())
    }
    SubCommand::Version => {
      environment.log(&format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));
      Ok(())
    }
    SubCommand::Update(cmd) => {
      let config = resolve_config(cmd, environment)?;
      let policy = policy_for(config.os_family, config.shell_profile.clone());
      update_variable(&config, &policy, environment);
      Ok(())
    }
  }
}

fn update_variable(config: &UpdateConfig, policy: &impl PlatformPolicy, environment: &impl Environment) {
  log_verbose!(
    environment,
    "Adding {} to {} ({} policy, {} strategy).",
    config.target_dir,
    config.variable_name,
    policy.name(),
    config.strategy.as_str()
  );
  let current = environment
    .env_var(&config.variable_name)
    .map(|value| value.to_string_lossy().into_owned())
    .unwrap_or_default();
  let update = update_search_path(&current, &config.target_dir, policy, config.strategy);
  environment.log(&format!("current_path: {}", update.before));
  if !update.changed {
    log_verbose!(environment, "{} already contains {}.", config.variable_name, config.target_dir);
  }

  environment.set_env_var(&config.variable_name, &update.after);

  if !config.persist {
    log_verbose!(environment, "Skipping persistence of {}.", config.variable_name);
  } else if config.strategy == UpdateStrategy::Append {
    log_verbose!(
      environment,
      "The append strategy doesn't persist. {} was only updated for this process.",
      config.variable_name
    );
  } else {
    persist_variable(config, policy, &update.after, environment);
  }

  environment.log(&format!("new_path: {}", update.after));
}

/// Persistence failures only warn because the process
/// environment was already updated.
fn persist_variable(config: &UpdateConfig, policy: &impl PlatformPolicy, value: &str, environment: &impl Environment) {
  match policy.persist(environment, &config.variable_name, value) {
    Ok(Persisted::Skipped) => {
      log_verbose!(
        environment,
        "No persistent store on this platform. {} was only updated for this process.",
        config.variable_name
      );
    }
    Ok(Persisted::UserEnvironment) => {
      log_verbose!(environment, "Persisted {} to the user environment.", config.variable_name);
    }
    Ok(Persisted::ShellProfile { path, wrote_line }) => {
      if wrote_line {
        log_verbose!(environment, "Added an export of {} to {}.", config.variable_name, path.display());
      }
    }
    Err(err) => {
      environment.log_warn(&format!("Failed persisting {}. {:#}", config.variable_name, anyhow::Error::from(err)));
    }
  }
}
