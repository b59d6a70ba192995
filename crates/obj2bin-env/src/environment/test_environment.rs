use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use super::CommandOutput;
use super::Environment;

#[derive(Default)]
struct TestEnvironmentState {
  os: String,
  is_verbose: bool,
  env_vars: HashMap<String, OsString>,
  files: HashMap<PathBuf, String>,
  ran_commands: Vec<Vec<String>>,
  command_spawn_error: Option<std::io::ErrorKind>,
  command_output: Option<CommandOutput>,
  logged_messages: Vec<String>,
  logged_errors: Vec<String>,
  logged_warnings: Vec<String>,
}

/// In-memory environment that records every side effect.
#[derive(Clone)]
pub struct TestEnvironment {
  state: Arc<Mutex<TestEnvironmentState>>,
}

impl TestEnvironment {
  pub fn new() -> TestEnvironment {
    TestEnvironment {
      state: Arc::new(Mutex::new(TestEnvironmentState {
        os: "linux".to_string(),
        ..Default::default()
      })),
    }
  }

  pub fn set_os(&self, os: &str) {
    self.state.lock().os = os.to_string();
  }

  pub fn set_verbose(&self, value: bool) {
    self.state.lock().is_verbose = value;
  }

  /// Gets a variable as a string, which is easier to assert on.
  pub fn get_env_var(&self, name: &str) -> Option<String> {
    self.state.lock().env_vars.get(name).map(|value| value.to_string_lossy().into_owned())
  }

  /// Allows setting values that aren't valid UTF-8.
  pub fn set_env_var_os(&self, name: &str, value: OsString) {
    self.state.lock().env_vars.insert(name.to_string(), value);
  }

  pub fn write_file(&self, file_path: impl AsRef<Path>, text: &str) {
    self.state.lock().files.insert(file_path.as_ref().to_path_buf(), text.to_string());
  }

  pub fn get_file_text(&self, file_path: impl AsRef<Path>) -> Option<String> {
    self.state.lock().files.get(file_path.as_ref()).cloned()
  }

  /// Makes subsequent commands fail to spawn with the provided error kind.
  pub fn set_command_spawn_error(&self, kind: std::io::ErrorKind) {
    self.state.lock().command_spawn_error = Some(kind);
  }

  pub fn set_command_output(&self, output: CommandOutput) {
    self.state.lock().command_output = Some(output);
  }

  pub fn take_ran_commands(&self) -> Vec<Vec<String>> {
    std::mem::take(&mut self.state.lock().ran_commands)
  }

  pub fn take_stdout_messages(&self) -> Vec<String> {
    std::mem::take(&mut self.state.lock().logged_messages)
  }

  pub fn take_stderr_messages(&self) -> Vec<String> {
    std::mem::take(&mut self.state.lock().logged_errors)
  }

  pub fn take_warnings(&self) -> Vec<String> {
    std::mem::take(&mut self.state.lock().logged_warnings)
  }
}

impl Environment for TestEnvironment {
  fn is_verbose(&self) -> bool {
    self.state.lock().is_verbose
  }

  fn os(&self) -> String {
    self.state.lock().os.clone()
  }

  fn env_var(&self, name: &str) -> Option<OsString> {
    self.state.lock().env_vars.get(name).cloned()
  }

  fn set_env_var(&self, name: &str, value: &str) {
    self.state.lock().env_vars.insert(name.to_string(), OsString::from(value));
  }

  fn run_command(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
    let mut state = self.state.lock();
    if let Some(kind) = state.command_spawn_error {
      return Err(std::io::Error::new(kind, format!("could not spawn {}", program)));
    }
    let mut command = vec![program.to_string()];
    command.extend(args.iter().map(|a| a.to_string()));
    state.ran_commands.push(command);
    Ok(state.command_output.clone().unwrap_or_else(CommandOutput::success))
  }

  fn read_file(&self, file_path: &Path) -> std::io::Result<String> {
    match self.state.lock().files.get(file_path) {
      Some(text) => Ok(text.clone()),
      None => Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("Could not find file at path {}", file_path.display()),
      )),
    }
  }

  fn append_file(&self, file_path: &Path, text: &str) -> std::io::Result<()> {
    self.state.lock().files.entry(file_path.to_path_buf()).or_default().push_str(text);
    Ok(())
  }

  fn log(&self, text: &str) {
    self.state.lock().logged_messages.push(text.to_string());
  }

  fn log_stderr(&self, text: &str) {
    self.state.lock().logged_errors.push(text.to_string());
  }

  fn log_warn(&self, text: &str) {
    self.state.lock().logged_warnings.push(text.to_string());
  }
}
