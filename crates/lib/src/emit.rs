//! Merging the inventory artifact into the working set.
//!
//! Emission runs in a fixed order:
//! 1. annotate: digest under [`HASH_ANNOTATION`], membership under
//!    [`CONTENT_ANNOTATION`](crate::consts::CONTENT_ANNOTATION)
//! 2. construct the artifact through the [`ArtifactFactory`]
//! 3. purge the working set when the policy asks for it
//! 4. append the artifact
//!
//! Steps 1 and 2 never mutate the working set, so a failure there leaves it
//! exactly as it was.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::artifact::{ArtifactError, ArtifactFactory, ArtifactIdentity};
use crate::consts::HASH_ANNOTATION;
use crate::inventory::Inventory;
use crate::policy::Policy;
use crate::resource::{ResourceId, ResourceSet, ResourceSetError};
use crate::util::hash::Digest;

#[derive(Debug, Error)]
pub enum EmitError {
  #[error("failed to create inventory artifact '{name}': {source}")]
  ArtifactCreationFailed {
    name: String,
    #[source]
    source: ArtifactError,
  },

  #[error("failed to append inventory artifact: {0}")]
  Append(#[from] ResourceSetError),
}

/// What an emission did to the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmitOutcome {
  pub artifact: ResourceId,
  pub purged: usize,
}

/// Emits inventory artifacts built by `F`.
#[derive(Debug, Clone, Default)]
pub struct SnapshotEmitter<F> {
  factory: F,
}

impl<F: ArtifactFactory> SnapshotEmitter<F> {
  pub fn new(factory: F) -> Self {
    Self { factory }
  }

  pub fn emit(
    &self,
    working_set: &mut ResourceSet,
    inventory: &Inventory,
    digest: &Digest,
    policy: Policy,
    identity: &ArtifactIdentity,
  ) -> Result<EmitOutcome, EmitError> {
    let creation_failed = |source: ArtifactError| EmitError::ArtifactCreationFailed {
      name: identity.name.clone(),
      source,
    };

    let mut annotations = BTreeMap::new();
    annotations.insert(HASH_ANNOTATION.to_string(), digest.to_string());
    inventory
      .update_annotations(&mut annotations)
      .map_err(|e| creation_failed(ArtifactError::Content(e)))?;

    let artifact = self.factory.build(identity, annotations).map_err(creation_failed)?;
    let artifact_id = artifact.id();
    debug!(artifact = %artifact_id, "constructed inventory artifact");

    // Under `ignore` nothing is purged, so an identity collision is rejected
    // by `append` while the working set is still intact.
    let purged = if policy.should_purge() {
      let removed = working_set.clear();
      info!(removed, "purged working set");
      removed
    } else {
      0
    };

    working_set.append(artifact)?;

    Ok(EmitOutcome {
      artifact: artifact_id,
      purged,
    })
  }
}
