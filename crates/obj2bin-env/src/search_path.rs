use crate::platform::PlatformPolicy;

/// How the directory gets added to the search path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateStrategy {
  /// Normalizes separators and only appends when the directory is missing.
  #[default]
  Deduplicate,
  /// Always appends and never normalizes. Running this twice
  /// leaves two copies of the directory in the value.
  Append,
}

impl UpdateStrategy {
  pub fn parse(text: &str) -> Option<Self> {
    match text {
      "dedupe" => Some(UpdateStrategy::Deduplicate),
      "append" => Some(UpdateStrategy::Append),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      UpdateStrategy::Deduplicate => "dedupe",
      UpdateStrategy::Append => "append",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathUpdate {
  /// The current value as the strategy sees it (normalized when deduplicating).
  pub before: String,
  pub after: String,
  pub changed: bool,
}

pub fn update_search_path(current: &str, target_dir: &str, policy: &impl PlatformPolicy, strategy: UpdateStrategy) -> PathUpdate {
  let separator = policy.separator().to_string();
  let (before, after) = match strategy {
    UpdateStrategy::Deduplicate => {
      let current = policy.normalize(current);
      let target_dir = policy.normalize(target_dir);
      let delimiter = if current.is_empty() || current.ends_with([';', ':']) { "" } else { separator.as_str() };
      let after = if current.contains(&target_dir) {
        current.clone()
      } else {
        format!("{}{}{}", current, delimiter, target_dir)
      };
      (current, after)
    }
    UpdateStrategy::Append => {
      let delimiter = if current.is_empty() { "" } else { separator.as_str() };
      (current.to_string(), format!("{}{}{}", current, delimiter, target_dir))
    }
  };

  PathUpdate {
    changed: before != after,
    before,
    after,
  }
}
