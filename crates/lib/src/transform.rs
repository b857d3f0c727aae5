//! The inventory transform.
//!
//! A transform takes exclusive ownership of a working set for one
//! synchronous pass:
//!
//! ```text
//! Idle → Building → Hashing → PolicyCheck → Emitting → Done
//!            └─────────┴──────────┴────────────┴──→ Failed
//! ```
//!
//! Any failure stops the pass at the stage it occurred in. Only `Emitting`
//! mutates the working set, and it purges only after the artifact has been
//! constructed.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::artifact::{ArtifactFactory, ConfigMapFactory};
use crate::config::{ConfigError, TransformerConfig};
use crate::emit::{EmitError, SnapshotEmitter};
use crate::inventory::{InventoryError, build_inventory};
use crate::policy::Policy;
use crate::resource::{ResourceId, ResourceSet};
use crate::util::hash::{Digest, HashError, sort_and_hash};

/// Stages of a single transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformStage {
  Idle,
  Building,
  Hashing,
  PolicyCheck,
  Emitting,
  Done,
  Failed,
}

impl fmt::Display for TransformStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      TransformStage::Idle => "idle",
      TransformStage::Building => "building",
      TransformStage::Hashing => "hashing",
      TransformStage::PolicyCheck => "policy-check",
      TransformStage::Emitting => "emitting",
      TransformStage::Done => "done",
      TransformStage::Failed => "failed",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Error)]
pub enum TransformError {
  #[error(transparent)]
  Inventory(#[from] InventoryError),

  #[error("failed to hash inventory: {0}")]
  Hash(#[from] HashError),

  #[error(transparent)]
  Emit(#[from] EmitError),
}

impl TransformError {
  /// The stage the transform was in when it failed.
  pub fn stage(&self) -> TransformStage {
    match self {
      TransformError::Inventory(_) => TransformStage::Building,
      TransformError::Hash(_) => TransformStage::Hashing,
      TransformError::Emit(_) => TransformStage::Emitting,
    }
  }
}

pub type Result<T> = std::result::Result<T, TransformError>;

/// Summary of a completed transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformReport {
  pub digest: Digest,
  /// Number of resources recorded in the inventory.
  pub members: usize,
  pub policy: Policy,
  pub artifact: ResourceId,
  pub purged: usize,
}

/// Records a working set's inventory as a fingerprinted artifact.
///
/// Configuration is validated once at construction; no state is carried from
/// one [`transform`](Self::transform) to the next.
#[derive(Debug, Clone)]
pub struct InventoryTransformer<F = ConfigMapFactory> {
  config: TransformerConfig,
  emitter: SnapshotEmitter<F>,
}

impl InventoryTransformer<ConfigMapFactory> {
  pub fn new(config: TransformerConfig) -> Self {
    Self::with_factory(config, ConfigMapFactory)
  }

  /// Parse a YAML configuration and build a transformer emitting `ConfigMap`s.
  pub fn from_yaml(content: &str) -> std::result::Result<Self, ConfigError> {
    Ok(Self::new(TransformerConfig::from_yaml(content)?))
  }
}

impl<F: ArtifactFactory> InventoryTransformer<F> {
  pub fn with_factory(config: TransformerConfig, factory: F) -> Self {
    Self {
      config,
      emitter: SnapshotEmitter::new(factory),
    }
  }

  pub fn config(&self) -> &TransformerConfig {
    &self.config
  }

  /// Build, hash and emit the inventory of `working_set`, mutating it in place.
  ///
  /// On error the working set is left unmodified.
  pub fn transform(&self, working_set: &mut ResourceSet) -> Result<TransformReport> {
    let mut stage = TransformStage::Idle;
    match self.run(working_set, &mut stage) {
      Ok(report) => {
        enter(&mut stage, TransformStage::Done);
        info!(
          digest = %report.digest,
          members = report.members,
          policy = %report.policy,
          purged = report.purged,
          "inventory transform complete"
        );
        Ok(report)
      }
      Err(e) => {
        warn!(stage = %stage, error = %e, "inventory transform failed");
        enter(&mut stage, TransformStage::Failed);
        Err(e)
      }
    }
  }

  fn run(&self, working_set: &mut ResourceSet, stage: &mut TransformStage) -> Result<TransformReport> {
    enter(stage, TransformStage::Building);
    let (inventory, ids) = build_inventory(working_set)?;

    enter(stage, TransformStage::Hashing);
    let members = ids.len();
    let digest = sort_and_hash(ids)?;
    debug!(digest = %digest, full = digest.full(), "computed inventory digest");

    enter(stage, TransformStage::PolicyCheck);
    let policy = self.config.policy;
    debug!(policy = %policy, purge = policy.should_purge(), "checked garbage policy");

    enter(stage, TransformStage::Emitting);
    let outcome = self
      .emitter
      .emit(working_set, &inventory, &digest, policy, &self.config.identity)?;

    Ok(TransformReport {
      digest,
      members,
      policy,
      artifact: outcome.artifact,
      purged: outcome.purged,
    })
  }
}

fn enter(stage: &mut TransformStage, next: TransformStage) {
  debug!(from = %stage, to = %next, "transform stage");
  *stage = next;
}
