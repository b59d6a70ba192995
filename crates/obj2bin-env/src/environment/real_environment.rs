use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::process::Stdio;

use super::CommandOutput;
use super::Environment;
use crate::utils::Logger;
use crate::utils::LoggerOptions;

pub struct RealEnvironmentOptions {
  pub is_verbose: bool,
}

#[derive(Clone)]
pub struct RealEnvironment {
  logger: Logger,
}

impl RealEnvironment {
  pub fn new(options: &RealEnvironmentOptions) -> RealEnvironment {
    RealEnvironment {
      logger: Logger::new(&LoggerOptions {
        is_verbose: options.is_verbose,
      }),
    }
  }
}

impl Environment for RealEnvironment {
  fn is_verbose(&self) -> bool {
    self.logger.is_verbose()
  }

  fn os(&self) -> String {
    std::env::consts::OS.to_string()
  }

  fn env_var(&self, name: &str) -> Option<OsString> {
    std::env::var_os(name)
  }

  fn set_env_var(&self, name: &str, value: &str) {
    log_verbose!(self, "Setting {} in the process environment.", name);
    // SAFETY: obj2bin-env never spawns threads, so nothing reads the
    // environment concurrently
    unsafe {
      std::env::set_var(name, value);
    }
  }

  fn run_command(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
    log_verbose!(self, "Running: {} {}", program, args.join(" "));
    let output = Command::new(program).args(args).stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::piped()).output()?;
    Ok(CommandOutput {
      success: output.status.success(),
      exit_code: output.status.code(),
      stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
  }

  fn read_file(&self, file_path: &Path) -> std::io::Result<String> {
    log_verbose!(self, "Reading file: {}", file_path.display());
    fs::read_to_string(file_path)
  }

  fn append_file(&self, file_path: &Path, text: &str) -> std::io::Result<()> {
    log_verbose!(self, "Appending to file: {}", file_path.display());
    let mut file = fs::OpenOptions::new().create(true).append(true).open(file_path)?;
    file.write_all(text.as_bytes())?;
    file.flush()
  }

  fn log(&self, text: &str) {
    self.logger.log(text);
  }

  fn log_stderr(&self, text: &str) {
    self.logger.log_stderr(text);
  }

  fn log_warn(&self, text: &str) {
    self.logger.log_warn(text);
  }
}
