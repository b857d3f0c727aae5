//! kinventory-lib: inventory snapshots for managed configuration resources
//!
//! This crate records the membership of a working set as a fingerprinted
//! artifact that a pruning client can compare across runs:
//! - `ResourceId`: canonical identity of a resource
//! - `Inventory`: each resource mapped to the resources referencing it
//! - `Digest`: order-independent hash of the inventory's members
//! - `Policy`: whether the working set is purged before the artifact is added
//! - `InventoryTransformer`: runs build → hash → policy → emit over a working set

pub mod artifact;
pub mod config;
pub mod consts;
pub mod emit;
pub mod inventory;
pub mod policy;
pub mod resource;
pub mod transform;
pub mod util;

pub use artifact::{ArtifactError, ArtifactFactory, ArtifactIdentity, ConfigMapFactory};
pub use config::{ConfigError, TransformerConfig};
pub use emit::{EmitError, EmitOutcome, SnapshotEmitter};
pub use inventory::{Inventory, InventoryError, ReferenceResolver, build_inventory};
pub use policy::{Policy, PolicyError};
pub use resource::{Gvk, ReferenceHandle, Resource, ResourceId, ResourceSet, ResourceSetError};
pub use transform::{InventoryTransformer, TransformError, TransformReport, TransformStage};
pub use util::hash::{Digest, sort_and_hash};
