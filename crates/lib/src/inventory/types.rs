//! Inventory types.
//!
//! An [`Inventory`] maps every resource in a working set to the resources that
//! reference it. It is rebuilt from scratch on every transform and never kept
//! between calls.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::consts::CONTENT_ANNOTATION;
use crate::resource::{ReferenceHandle, ResourceId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
  #[error("item '{id}' already in inventory")]
  DuplicateResource { id: ResourceId },

  #[error("reference '{handle}' does not resolve to any resource in the working set")]
  UnresolvedReference { handle: ReferenceHandle },
}

pub type Result<T> = std::result::Result<T, InventoryError>;

/// Resource identities and the identities of the resources referencing them.
///
/// Keys are held in a [`BTreeMap`] so the membership annotation serializes
/// deterministically.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Inventory {
  current: BTreeMap<ResourceId, Vec<ResourceId>>,
}

/// JSON shape of the membership annotation.
#[derive(Serialize)]
struct InventoryContent {
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  current: BTreeMap<String, Vec<String>>,
}

impl Inventory {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, id: &ResourceId) -> bool {
    self.current.contains_key(id)
  }

  pub(crate) fn insert(&mut self, id: ResourceId, refs: Vec<ResourceId>) {
    self.current.insert(id, refs);
  }

  /// Resources referencing `id`, in the order their handles were declared.
  pub fn refs(&self, id: &ResourceId) -> Option<&[ResourceId]> {
    self.current.get(id).map(Vec::as_slice)
  }

  pub fn ids(&self) -> impl Iterator<Item = &ResourceId> {
    self.current.keys()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&ResourceId, &[ResourceId])> {
    self.current.iter().map(|(id, refs)| (id, refs.as_slice()))
  }

  pub fn len(&self) -> usize {
    self.current.len()
  }

  pub fn is_empty(&self) -> bool {
    self.current.is_empty()
  }

  /// Serialize the membership as `{"current":{"<id>":["<ref>", ...]}}`.
  pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
    let current = self
      .current
      .iter()
      .map(|(id, refs)| (id.to_string(), refs.iter().map(ResourceId::to_string).collect()))
      .collect();
    serde_json::to_string(&InventoryContent { current })
  }

  /// Write the membership annotation into `annotations`.
  pub fn update_annotations(
    &self,
    annotations: &mut BTreeMap<String, String>,
  ) -> std::result::Result<(), serde_json::Error> {
    annotations.insert(CONTENT_ANNOTATION.to_string(), self.to_json()?);
    Ok(())
  }
}
