use std::path::PathBuf;

use crate::configuration::OsFamily;
use crate::environment::Environment;
use crate::persistence::PersistError;
use crate::persistence::persist_to_shell_profile;
use crate::persistence::persist_with_setx;

/// How a variable ended up being persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
  /// The platform has no persistent store configured.
  Skipped,
  /// Stored in the user's environment via `setx`.
  UserEnvironment,
  ShellProfile { path: PathBuf, wrote_line: bool },
}

/// Operating system specific behaviour for search path variables.
pub trait PlatformPolicy {
  fn name(&self) -> &'static str;
  /// Delimiter placed between directories in a search path.
  fn separator(&self) -> char;
  /// Converts directory separators to the platform convention.
  fn normalize(&self, path: &str) -> String;
  fn persist(&self, environment: &impl Environment, variable: &str, value: &str) -> Result<Persisted, PersistError>;
}

pub struct WindowsPolicy;

impl PlatformPolicy for WindowsPolicy {
  fn name(&self) -> &'static str {
    "windows"
  }

  fn separator(&self) -> char {
    ';'
  }

  fn normalize(&self, path: &str) -> String {
    path.replace('/', "\\")
  }

  fn persist(&self, environment: &impl Environment, variable: &str, value: &str) -> Result<Persisted, PersistError> {
    persist_with_setx(environment, variable, value)?;
    Ok(Persisted::UserEnvironment)
  }
}

#[derive(Default)]
pub struct UnixPolicy {
  shell_profile: Option<PathBuf>,
}

impl UnixPolicy {
  pub fn new(shell_profile: Option<PathBuf>) -> Self {
    Self { shell_profile }
  }
}

impl PlatformPolicy for UnixPolicy {
  fn name(&self) -> &'static str {
    "unix"
  }

  fn separator(&self) -> char {
    ':'
  }

  fn normalize(&self, path: &str) -> String {
    path.to_string()
  }

  fn persist(&self, environment: &impl Environment, variable: &str, value: &str) -> Result<Persisted, PersistError> {
    match &self.shell_profile {
      Some(path) => {
        let wrote_line = persist_to_shell_profile(environment, path, variable, value)?;
        Ok(Persisted::ShellProfile {
          path: path.clone(),
          wrote_line,
        })
      }
      None => Ok(Persisted::Skipped),
    }
  }
}

/// The policy for a resolved OS family.
pub enum Platform {
  Windows(WindowsPolicy),
  Unix(UnixPolicy),
}

pub fn policy_for(os_family: OsFamily, shell_profile: Option<PathBuf>) -> Platform {
  match os_family {
    OsFamily::Windows => Platform::Windows(WindowsPolicy),
    OsFamily::Unix => Platform::Unix(UnixPolicy::new(shell_profile)),
  }
}

impl PlatformPolicy for Platform {
  fn name(&self) -> &'static str {
    match self {
      Platform::Windows(policy) => policy.name(),
      Platform::Unix(policy) => policy.name(),
    }
  }

  fn separator(&self) -> char {
    match self {
      Platform::Windows(policy) => policy.separator(),
      Platform::Unix(policy) => policy.separator(),
    }
  }

  fn normalize(&self, path: &str) -> String {
    match self {
      Platform::Windows(policy) => policy.normalize(path),
      Platform::Unix(policy) => policy.normalize(path),
    }
  }

  fn persist(&self, environment: &impl Environment, variable: &str, value: &str) -> Result<Persisted, PersistError> {
    match self {
      Platform::Windows(policy) => policy.persist(environment, variable, value),
      Platform::Unix(policy) => policy.persist(environment, variable, value),
    }
  }
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::environment::TestEnvironment;

  #[test]
  fn windows_normalizes_forward_slashes() {
    assert_eq!(WindowsPolicy.normalize("C:/Program Files/obj2bin/bin"), "C:\\Program Files\\obj2bin\\bin");
    assert_eq!(WindowsPolicy.normalize("C:\\already\\fine"), "C:\\already\\fine");
  }

  #[test]
  fn unix_leaves_paths_untouched() {
    let policy = UnixPolicy::default();
    assert_eq!(policy.normalize("C:\\a/b"), "C:\\a/b");
    assert_eq!(policy.separator(), ':');
  }

  #[test]
  fn windows_persists_with_setx() {
    let environment = TestEnvironment::new();
    let result = WindowsPolicy.persist(&environment, "TESTPATH", "C:\\a;C:\\b").unwrap();
    assert_eq!(result, Persisted::UserEnvironment);
    assert_eq!(
      environment.take_ran_commands(),
      vec![vec!["setx".to_string(), "TESTPATH".to_string(), "C:\\a;C:\\b".to_string()]]
    );
  }

  #[test]
  fn unix_skips_persisting_without_shell_profile() {
    let environment = TestEnvironment::new();
    let result = UnixPolicy::default().persist(&environment, "TESTPATH", "/a").unwrap();
    assert_eq!(result, Persisted::Skipped);
    assert!(environment.take_ran_commands().is_empty());
  }

  #[test]
  fn unix_persists_to_shell_profile() {
    let environment = TestEnvironment::new();
    let policy = UnixPolicy::new(Some(PathBuf::from("/home/.bashrc")));
    let result = policy.persist(&environment, "TESTPATH", "/a:/b").unwrap();
    assert_eq!(
      result,
      Persisted::ShellProfile {
        path: PathBuf::from("/home/.bashrc"),
        wrote_line: true,
      }
    );
    assert_eq!(environment.get_file_text("/home/.bashrc").unwrap(), "export TESTPATH=\"/a:/b\"\n");
  }

  #[test]
  fn policy_for_windows() {
    let policy = policy_for(OsFamily::Windows, None);
    assert_eq!(policy.name(), "windows");
    assert_eq!(policy.separator(), ';');
    assert_eq!(policy.normalize("C:/a"), "C:\\a");
  }

  #[test]
  fn policy_for_unix_persists_to_provided_profile() {
    let environment = TestEnvironment::new();
    let policy = policy_for(OsFamily::Unix, Some(PathBuf::from("/home/.zshrc")));
    assert_eq!(policy.separator(), ':');
    let result = policy.persist(&environment, "TESTPATH", "/a").unwrap();
    assert_eq!(
      result,
      Persisted::ShellProfile {
        path: PathBuf::from("/home/.zshrc"),
        wrote_line: true,
      }
    );
    assert_eq!(environment.get_file_text("/home/.zshrc").unwrap(), "export TESTPATH=\"/a\"\n");
    assert!(environment.take_ran_commands().is_empty());
  }
}
