//! Transformer configuration.
//!
//! The configuration is a small YAML document consumed once, before any
//! transform runs:
//!
//! ```yaml
//! metadata:
//!   name: inventory
//!   namespace: default
//! policy: collect
//! ```
//!
//! `metadata` names the emitted artifact. `policy` is validated here so that an
//! invalid value never reaches a transform. Unknown keys are ignored.

use serde::Deserialize;
use thiserror::Error;

use crate::artifact::ArtifactIdentity;
use crate::policy::{Policy, PolicyError};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to parse transformer config: {0}")]
  Parse(#[from] serde_yaml::Error),

  #[error(transparent)]
  InvalidPolicy(#[from] PolicyError),
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
  #[serde(default)]
  metadata: ArtifactIdentity,
  #[serde(default)]
  policy: Option<String>,
}

/// Validated transformer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformerConfig {
  pub identity: ArtifactIdentity,
  pub policy: Policy,
}

impl TransformerConfig {
  pub fn new(identity: ArtifactIdentity, policy: Policy) -> Self {
    Self { identity, policy }
  }

  /// Parse and validate a YAML configuration document.
  ///
  /// An empty document yields the defaults: an unnamed artifact and
  /// [`Policy::Ignore`].
  pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
    let raw: RawConfig = if content.trim().is_empty() {
      RawConfig::default()
    } else {
      serde_yaml::from_str(content)?
    };

    let policy = Policy::parse(raw.policy.as_deref().unwrap_or_default())?;

    Ok(Self {
      identity: raw.metadata,
      policy,
    })
  }
}
