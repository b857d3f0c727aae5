//! Construction of the carrier artifact that holds the inventory.
//!
//! The transformer only depends on the [`ArtifactFactory`] contract. The
//! default factory, [`ConfigMapFactory`], produces a `v1` `ConfigMap`, but any
//! resource type able to carry annotations will do.

mod configmap;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resource::Resource;

pub use configmap::ConfigMapFactory;

#[derive(Debug, Error)]
pub enum ArtifactError {
  #[error("invalid artifact name '{name}': {reason}")]
  InvalidName { name: String, reason: String },

  #[error("invalid artifact namespace '{namespace}': {reason}")]
  InvalidNamespace { namespace: String, reason: String },

  #[error("failed to serialize inventory content: {0}")]
  Content(#[from] serde_json::Error),

  #[error("{0}")]
  Other(String),
}

/// Name and namespace of the artifact to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactIdentity {
  #[serde(default)]
  pub name: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub namespace: String,
}

impl ArtifactIdentity {
  pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      namespace: namespace.into(),
    }
  }
}

/// Builds the carrier artifact from an identity and its annotations.
///
/// Implementations must not touch the working set; a failure here aborts the
/// transform before anything is removed.
pub trait ArtifactFactory {
  fn build(
    &self,
    identity: &ArtifactIdentity,
    annotations: BTreeMap<String, String>,
  ) -> Result<Resource, ArtifactError>;
}

impl<F: ArtifactFactory + ?Sized> ArtifactFactory for &F {
  fn build(
    &self,
    identity: &ArtifactIdentity,
    annotations: BTreeMap<String, String>,
  ) -> Result<Resource, ArtifactError> {
    (**self).build(identity, annotations)
  }
}
