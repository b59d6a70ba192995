use std::ffi::OsString;
use std::path::Path;

/// Result of running an external program to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
  pub success: bool,
  pub exit_code: Option<i32>,
  pub stderr: String,
}

#[cfg(test)]
impl CommandOutput {
  pub fn success() -> Self {
    Self {
      success: true,
      exit_code: Some(0),
      stderr: String::new(),
    }
  }
}

pub trait Environment: Clone + std::marker::Send + std::marker::Sync + 'static {
  fn is_verbose(&self) -> bool;
  /// Identifier of the host operating system (ex. "windows", "linux", "macos").
  fn os(&self) -> String;
  fn env_var(&self, name: &str) -> Option<OsString>;
  /// Sets a variable in this process' environment. Parent
  /// processes never observe this change.
  fn set_env_var(&self, name: &str, value: &str);
  fn run_command(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput>;
  fn read_file(&self, file_path: &Path) -> std::io::Result<String>;
  /// Appends the text to the file, creating it when it doesn't exist.
  fn append_file(&self, file_path: &Path, text: &str) -> std::io::Result<()>;
  fn log(&self, text: &str);
  fn log_stderr(&self, text: &str);
  fn log_warn(&self, text: &str);
}

// use a macro here so the expression provided is only evaluated when in verbose mode
macro_rules! log_verbose {
  ($environment:expr, $($arg:tt)*) => {
    if $environment.is_verbose() {
      let mut text = String::from("[VERBOSE] ");
      text.push_str(&format!($($arg)*));
      $environment.log_stderr(&text);
    }
  }
}
