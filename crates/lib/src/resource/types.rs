//! Resource identity and the resource model held by a working set.
//!
//! A [`ResourceId`] names a resource by group, version, kind, namespace and
//! name. Its [`Display`](std::fmt::Display) form is the canonical string used
//! both as an inventory key and as hash input:
//!
//! ```text
//! group_version_kind|namespace|name
//! ```
//!
//! Empty fields are replaced by fixed placeholders (`~G`, `~V`, `~K`, `~X`,
//! `~N`) so the field order can always be recovered.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{GVK_SEPARATOR, ID_SEPARATOR, NO_GROUP, NO_KIND, NO_NAME, NO_NAMESPACE, NO_VERSION};

/// Group, version and kind of a resource.
///
/// The core API group is the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Gvk {
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub group: String,
  pub version: String,
  pub kind: String,
}

impl Gvk {
  pub fn new(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
    Self {
      group: group.into(),
      version: version.into(),
      kind: kind.into(),
    }
  }
}

impl fmt::Display for Gvk {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}{sep}{}{sep}{}",
      or_placeholder(&self.group, NO_GROUP),
      or_placeholder(&self.version, NO_VERSION),
      or_placeholder(&self.kind, NO_KIND),
      sep = GVK_SEPARATOR,
    )
  }
}

/// Canonical identity of a managed resource.
///
/// Two resources with the same canonical string are the same inventory item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceId {
  pub gvk: Gvk,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub namespace: String,
  pub name: String,
}

impl ResourceId {
  pub fn new(gvk: Gvk, namespace: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      gvk,
      namespace: namespace.into(),
      name: name.into(),
    }
  }

  /// The canonical string form, as used for hashing.
  pub fn canonical(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for ResourceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}{sep}{}{sep}{}",
      self.gvk,
      or_placeholder(&self.namespace, NO_NAMESPACE),
      or_placeholder(&self.name, NO_NAME),
      sep = ID_SEPARATOR,
    )
  }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
  if value.is_empty() { placeholder } else { value }
}

/// Whether two fields render the same in a canonical id.
fn same_field(a: &str, b: &str, placeholder: &str) -> bool {
  or_placeholder(a, placeholder) == or_placeholder(b, placeholder)
}

impl Gvk {
  /// Compare by canonical form, treating an empty field and its placeholder as equal.
  pub fn same_as(&self, other: &Gvk) -> bool {
    same_field(&self.group, &other.group, NO_GROUP)
      && same_field(&self.version, &other.version, NO_VERSION)
      && same_field(&self.kind, &other.kind, NO_KIND)
  }
}

/// An opaque "referenced-by" link produced upstream.
///
/// The handle carries the *current* identity of the referencing resource and
/// can only be turned into a resource by looking it up in a working set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceHandle(pub ResourceId);

impl ReferenceHandle {
  pub fn current_id(&self) -> &ResourceId {
    &self.0
  }
}

impl From<ResourceId> for ReferenceHandle {
  fn from(id: ResourceId) -> Self {
    Self(id)
  }
}

impl fmt::Display for ReferenceHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A configuration resource in a working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
  #[serde(flatten)]
  pub gvk: Gvk,
  pub name: String,
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub namespace: String,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub annotations: BTreeMap<String, String>,
  /// Resources that reference this one.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub ref_by: Vec<ReferenceHandle>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub data: BTreeMap<String, String>,
}

impl Resource {
  pub fn new(gvk: Gvk, namespace: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      gvk,
      name: name.into(),
      namespace: namespace.into(),
      annotations: BTreeMap::new(),
      ref_by: Vec::new(),
      data: BTreeMap::new(),
    }
  }

  /// Record that `referrer` references this resource.
  pub fn with_ref_by(mut self, referrer: ResourceId) -> Self {
    self.ref_by.push(ReferenceHandle(referrer));
    self
  }

  pub fn id(&self) -> ResourceId {
    ResourceId::new(self.gvk.clone(), self.namespace.clone(), self.name.clone())
  }

  /// Whether this resource's canonical id is `id`'s, without building one.
  pub fn has_id(&self, id: &ResourceId) -> bool {
    self.gvk.same_as(&id.gvk)
      && same_field(&self.namespace, &id.namespace, NO_NAMESPACE)
      && same_field(&self.name, &id.name, NO_NAME)
  }
}
