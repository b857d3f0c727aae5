//! Single-pass construction of an [`Inventory`] from a working set.

use std::collections::HashSet;

use tracing::debug;

use crate::resource::ResourceSet;

use super::resolve::ReferenceResolver;
use super::types::{Inventory, InventoryError, Result};

/// Enumerate `working_set` once, assigning each resource its identity and
/// resolved references.
///
/// Returns the inventory together with the canonical id of every member, in
/// enumeration order. The id list is what gets hashed.
///
/// # Errors
///
/// - [`InventoryError::DuplicateResource`] on the first canonical id seen
///   twice. Only the identity is reported, not the resources that collided.
/// - [`InventoryError::UnresolvedReference`] when any handle fails to resolve.
pub fn build_inventory(working_set: &ResourceSet) -> Result<(Inventory, Vec<String>)> {
  let resolver = ReferenceResolver::new(working_set);
  let mut inventory = Inventory::new();
  let mut ids = Vec::with_capacity(working_set.len());
  // Distinct fields can share a canonical id through the placeholders.
  let mut seen = HashSet::with_capacity(working_set.len());

  for resource in working_set.resources() {
    let id = resource.id();
    let canonical = id.canonical();
    if !seen.insert(canonical.clone()) {
      return Err(InventoryError::DuplicateResource { id });
    }

    let refs = resolver.resolve(resource)?;
    ids.push(canonical);
    inventory.insert(id, refs);
  }

  debug!(count = inventory.len(), "built inventory");
  Ok((inventory, ids))
}
