//! Resolution of "referenced-by" handles against the working set.

use tracing::trace;

use crate::resource::{Resource, ResourceId, ResourceSet};

use super::types::{InventoryError, Result};

/// Resolves a resource's reference handles through the working set.
///
/// Only direct edges are followed; a pair of resources referencing each other
/// resolves to two entries listing one another.
pub struct ReferenceResolver<'a> {
  working_set: &'a ResourceSet,
}

impl<'a> ReferenceResolver<'a> {
  pub fn new(working_set: &'a ResourceSet) -> Self {
    Self { working_set }
  }

  /// Canonical ids of the resources referencing `resource`, in handle order.
  ///
  /// Duplicate handles resolve to duplicate entries. The first handle that
  /// does not match a resource aborts resolution.
  pub fn resolve(&self, resource: &Resource) -> Result<Vec<ResourceId>> {
    let mut refs = Vec::with_capacity(resource.ref_by.len());

    for handle in &resource.ref_by {
      let referrer = self
        .working_set
        .get_by_current_id(handle.current_id())
        .ok_or_else(|| InventoryError::UnresolvedReference { handle: handle.clone() })?;

      trace!(resource = %resource.id(), referrer = %referrer.id(), "resolved reference");
      refs.push(referrer.id());
    }

    Ok(refs)
  }
}
