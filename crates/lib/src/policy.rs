//! Garbage policy for previously tracked members of the working set.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
  #[error("unrecognized garbagePolicy '{raw}'")]
  Invalid { raw: String },
}

/// Whether the working set is purged before the new inventory is appended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Policy {
  /// Keep every resource and append the inventory alongside them.
  #[default]
  Ignore,
  /// Drop every resource and leave only the inventory.
  Collect,
}

impl Policy {
  /// Parse a raw configuration value.
  ///
  /// An empty value means [`Policy::Ignore`]. Matching is exact.
  pub fn parse(raw: &str) -> Result<Self, PolicyError> {
    match raw {
      "" | "ignore" => Ok(Policy::Ignore),
      "collect" => Ok(Policy::Collect),
      other => Err(PolicyError::Invalid { raw: other.to_string() }),
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Policy::Ignore => "ignore",
      Policy::Collect => "collect",
    }
  }

  pub fn should_purge(self) -> bool {
    matches!(self, Policy::Collect)
  }
}

impl fmt::Display for Policy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Policy {
  type Err = PolicyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}
