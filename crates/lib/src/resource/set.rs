//! The working set: an ordered collection of resources.

use thiserror::Error;

use super::types::{Resource, ResourceId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceSetError {
  #[error("resource '{id}' already exists in the working set")]
  AlreadyExists { id: ResourceId },
}

/// Resources under consideration for one transform, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSet {
  resources: Vec<Resource>,
}

impl ResourceSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a set without rejecting duplicate identities.
  ///
  /// Loaders upstream of the inventory may hand over inconsistent sets; the
  /// inventory builder is what reports duplicates.
  pub fn from_resources(resources: Vec<Resource>) -> Self {
    Self { resources }
  }

  pub fn resources(&self) -> &[Resource] {
    &self.resources
  }

  pub fn all_ids(&self) -> Vec<ResourceId> {
    self.resources.iter().map(Resource::id).collect()
  }

  pub fn len(&self) -> usize {
    self.resources.len()
  }

  pub fn is_empty(&self) -> bool {
    self.resources.is_empty()
  }

  /// Look up a resource by its current identity.
  pub fn get_by_current_id(&self, id: &ResourceId) -> Option<&Resource> {
    self.resources.iter().find(|r| r.has_id(id))
  }

  pub fn contains(&self, id: &ResourceId) -> bool {
    self.get_by_current_id(id).is_some()
  }

  /// Remove every resource with the given identity, returning how many were removed.
  pub fn remove(&mut self, id: &ResourceId) -> usize {
    let before = self.resources.len();
    self.resources.retain(|r| !r.has_id(id));
    before - self.resources.len()
  }

  /// Remove all resources, returning how many were removed.
  pub fn clear(&mut self) -> usize {
    let removed = self.resources.len();
    self.resources.clear();
    removed
  }

  pub fn append(&mut self, resource: Resource) -> Result<(), ResourceSetError> {
    let id = resource.id();
    if self.contains(&id) {
      return Err(ResourceSetError::AlreadyExists { id });
    }
    self.resources.push(resource);
    Ok(())
  }
}

impl IntoIterator for ResourceSet {
  type Item = Resource;
  type IntoIter = std::vec::IntoIter<Resource>;

  fn into_iter(self) -> Self::IntoIter {
    self.resources.into_iter()
  }
}
