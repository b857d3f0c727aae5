use std::collections::BTreeMap;

use crate::resource::{Gvk, Resource};

use super::{ArtifactError, ArtifactFactory, ArtifactIdentity};

const MAX_SUBDOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Emits the inventory as an empty `v1` `ConfigMap` carrying only annotations.
///
/// Annotations are used rather than data keys since data keys are too
/// constrained to hold canonical ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigMapFactory;

impl ArtifactFactory for ConfigMapFactory {
  fn build(
    &self,
    identity: &ArtifactIdentity,
    annotations: BTreeMap<String, String>,
  ) -> Result<Resource, ArtifactError> {
    if let Err(reason) = validate_subdomain(&identity.name) {
      return Err(ArtifactError::InvalidName {
        name: identity.name.clone(),
        reason,
      });
    }
    if !identity.namespace.is_empty()
      && let Err(reason) = validate_label(&identity.namespace)
    {
      return Err(ArtifactError::InvalidNamespace {
        namespace: identity.namespace.clone(),
        reason,
      });
    }

    let mut config_map = Resource::new(
      Gvk::new("", "v1", "ConfigMap"),
      identity.namespace.clone(),
      identity.name.clone(),
    );
    config_map.annotations = annotations;
    Ok(config_map)
  }
}

/// Check `value` is a DNS-1123 subdomain.
fn validate_subdomain(value: &str) -> Result<(), String> {
  validate_dns1123(value, MAX_SUBDOMAIN_LEN, true)
}

/// Check `value` is a DNS-1123 label, as namespaces must be.
fn validate_label(value: &str) -> Result<(), String> {
  validate_dns1123(value, MAX_LABEL_LEN, false)
}

fn validate_dns1123(value: &str, max_len: usize, allow_dots: bool) -> Result<(), String> {
  if value.is_empty() {
    return Err("must not be empty".to_string());
  }
  if value.len() > max_len {
    return Err(format!("must be no more than {max_len} characters"));
  }
  if let Some(c) = value
    .chars()
    .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || (allow_dots && *c == '.')))
  {
    return Err(format!("contains invalid character '{c}'"));
  }

  let alphanumeric = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
  if !value.starts_with(alphanumeric) || !value.ends_with(alphanumeric) {
    return Err("must start and end with an alphanumeric character".to_string());
  }

  Ok(())
}
