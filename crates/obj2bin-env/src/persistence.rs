use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::environment::Environment;

/// `setx` truncates anything longer than this.
pub const SETX_MAX_VALUE_LEN: usize = 1024;

#[derive(Debug, Error)]
pub enum PersistError {
  #[error("Could not run setx")]
  Spawn(#[source] std::io::Error),
  #[error("setx failed ({}){}", exit_code_text(.exit_code), stderr_suffix(.stderr))]
  CommandFailed { exit_code: Option<i32>, stderr: String },
  #[error("Could not update shell profile {}", .path.display())]
  ShellProfile {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

fn exit_code_text(exit_code: &Option<i32>) -> String {
  match exit_code {
    Some(code) => format!("exit code {}", code),
    None => "terminated by signal".to_string(),
  }
}

fn stderr_suffix(stderr: &str) -> String {
  if stderr.is_empty() { String::new() } else { format!(": {}", stderr) }
}

/// Stores the variable in the current user's persistent environment.
pub fn persist_with_setx(environment: &impl Environment, variable: &str, value: &str) -> Result<(), PersistError> {
  let value_len = value.chars().count();
  if value_len > SETX_MAX_VALUE_LEN {
    environment.log_warn(&format!(
      "The value of {} is {} characters long and setx will truncate it to {} characters.",
      variable, value_len, SETX_MAX_VALUE_LEN
    ));
  }

  let output = environment.run_command("setx", &[variable, value]).map_err(PersistError::Spawn)?;
  if output.success {
    Ok(())
  } else {
    Err(PersistError::CommandFailed {
      exit_code: output.exit_code,
      stderr: output.stderr,
    })
  }
}

/// Appends an export line for the variable to a shell startup file.
///
/// Returns `false` when the file already contains the exact line.
pub fn persist_to_shell_profile(environment: &impl Environment, profile_path: &Path, variable: &str, value: &str) -> Result<bool, PersistError> {
  let to_error = |source: std::io::Error| PersistError::ShellProfile {
    path: profile_path.to_path_buf(),
    source,
  };
  let existing_text = match environment.read_file(profile_path) {
    Ok(text) => text,
    Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
    Err(err) => return Err(to_error(err)),
  };

  let line = export_line(variable, value);
  if existing_text.lines().any(|l| l.trim() == line) {
    log_verbose!(environment, "{} already exports this value.", profile_path.display());
    return Ok(false);
  }

  let mut text = String::new();
  if !existing_text.is_empty() && !existing_text.ends_with('\n') {
    text.push('\n');
  }
  text.push_str(&line);
  text.push('\n');
  environment.append_file(profile_path, &text).map_err(to_error)?;
  Ok(true)
}

/// Creates a POSIX shell `export` statement with the value double quoted.
pub fn export_line(variable: &str, value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  for c in value.chars() {
    if matches!(c, '"' | '\\' | '$' | '`') {
      quoted.push('\\');
    }
    quoted.push(c);
  }
  format!("export {}=\"{}\"", variable, quoted)
}
