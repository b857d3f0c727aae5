use std::collections::BTreeMap;

use kinventory_lib::consts::{CONTENT_ANNOTATION, HASH_ANNOTATION};
use kinventory_lib::{
  ArtifactError, ArtifactFactory, ArtifactIdentity, EmitError, InventoryError, InventoryTransformer, Policy,
  ReferenceHandle, Resource, ResourceSet, TransformError, TransformStage, TransformerConfig, build_inventory,
};

use super::common::{config_map, deployment, inventory_id, service, transformer};

/// Working set {A, B} where B references A.
fn a_and_b() -> ResourceSet {
  ResourceSet::from_resources(vec![config_map("a").with_ref_by(service("b").id()), service("b")])
}

#[test]
fn end_to_end_inventory_and_digest() {
  let set = a_and_b();
  let (inventory, ids) = build_inventory(&set).unwrap();

  assert_eq!(inventory.refs(&config_map("a").id()), Some(&[service("b").id()][..]));
  assert_eq!(inventory.refs(&service("b").id()), Some(&[][..]));
  assert_eq!(ids, vec!["~G_v1_ConfigMap|default|a", "~G_v1_Service|default|b"]);

  let mut collected = set.clone();
  let report = transformer(Policy::Collect).transform(&mut collected).unwrap();
  assert_eq!(report.digest.as_str(), "ggmb766mm6");
  assert_eq!(
    report.digest.full(),
    "00ab766aa6342bdbbd73864c6f81f7ccd5a36d561b3171c7ae3c077f188e7d89"
  );
}

#[test]
fn collect_leaves_only_the_artifact() {
  let mut set = a_and_b();
  set.append(deployment("web")).unwrap();

  let report = transformer(Policy::Collect).transform(&mut set).unwrap();

  assert_eq!(report.purged, 3);
  assert_eq!(report.members, 3);
  assert_eq!(set.len(), 1);
  let artifact = &set.resources()[0];
  assert_eq!(artifact.id(), inventory_id());
  assert_eq!(artifact.annotations.get(HASH_ANNOTATION), Some(&report.digest.to_string()));
}

#[test]
fn ignore_keeps_members_and_appends_artifact() {
  let mut set = a_and_b();
  let original = set.clone();

  let report = transformer(Policy::Ignore).transform(&mut set).unwrap();

  assert_eq!(report.purged, 0);
  assert_eq!(set.len(), original.len() + 1);
  assert_eq!(&set.resources()[..original.len()], original.resources());
  let artifact = set.get_by_current_id(&inventory_id()).unwrap();
  assert_eq!(artifact.annotations.get(HASH_ANNOTATION).map(String::as_str), Some("ggmb766mm6"));
}

#[test]
fn artifact_carries_membership() {
  let mut set = a_and_b();
  transformer(Policy::Collect).transform(&mut set).unwrap();

  let content = set.resources()[0].annotations.get(CONTENT_ANNOTATION).unwrap();
  let parsed: BTreeMap<String, BTreeMap<String, Vec<String>>> = serde_json::from_str(content).unwrap();
  let current = &parsed["current"];
  assert_eq!(current["~G_v1_ConfigMap|default|a"], vec!["~G_v1_Service|default|b".to_string()]);
  assert!(current["~G_v1_Service|default|b"].is_empty());
}

#[test]
fn same_membership_same_digest_across_runs() {
  let mut first = a_and_b();
  let mut second = ResourceSet::from_resources(first.resources().iter().rev().cloned().collect());

  let a = transformer(Policy::Ignore).transform(&mut first).unwrap();
  let b = transformer(Policy::Ignore).transform(&mut second).unwrap();
  assert_eq!(a.digest, b.digest);
}

#[test]
fn duplicate_identity_aborts_without_mutation() {
  let mut set = ResourceSet::from_resources(vec![config_map("a"), service("b"), config_map("a")]);
  let before = set.clone();

  let err = transformer(Policy::Collect).transform(&mut set).unwrap_err();

  assert!(matches!(
    err,
    TransformError::Inventory(InventoryError::DuplicateResource { ref id }) if *id == config_map("a").id()
  ));
  assert_eq!(err.to_string(), "item '~G_v1_ConfigMap|default|a' already in inventory");
  assert_eq!(set, before);
}

#[test]
fn unresolved_reference_aborts_without_mutation() {
  let mut set = ResourceSet::from_resources(vec![config_map("a").with_ref_by(deployment("gone").id())]);
  let before = set.clone();

  let err = transformer(Policy::Collect).transform(&mut set).unwrap_err();

  match err {
    TransformError::Inventory(InventoryError::UnresolvedReference { handle }) => {
      assert_eq!(handle, ReferenceHandle(deployment("gone").id()));
    }
    other => panic!("expected unresolved reference, got {other:?}"),
  }
  assert_eq!(set, before);
}

#[test]
fn cyclic_references_are_tolerated() {
  let mut set = ResourceSet::from_resources(vec![
    config_map("a").with_ref_by(service("b").id()),
    service("b").with_ref_by(config_map("a").id()),
  ]);

  let report = transformer(Policy::Ignore).transform(&mut set).unwrap();
  assert_eq!(report.members, 2);
}

struct RejectingFactory;

impl ArtifactFactory for RejectingFactory {
  fn build(&self, _: &ArtifactIdentity, _: BTreeMap<String, String>) -> Result<Resource, ArtifactError> {
    Err(ArtifactError::Other("carrier store offline".to_string()))
  }
}

#[test]
fn artifact_failure_never_purges() {
  let mut set = a_and_b();
  let before = set.clone();
  let transformer = InventoryTransformer::with_factory(
    TransformerConfig::new(ArtifactIdentity::new("inventory", "default"), Policy::Collect),
    RejectingFactory,
  );

  let err = transformer.transform(&mut set).unwrap_err();

  assert_eq!(err.stage(), TransformStage::Emitting);
  assert!(matches!(err, TransformError::Emit(EmitError::ArtifactCreationFailed { .. })));
  assert_eq!(set, before);
}

#[test]
fn invalid_artifact_name_never_purges() {
  let mut set = a_and_b();
  let before = set.clone();
  let transformer = InventoryTransformer::new(TransformerConfig::new(
    ArtifactIdentity::new("Not_Valid", "default"),
    Policy::Collect,
  ));

  let err = transformer.transform(&mut set).unwrap_err();

  assert!(matches!(
    err,
    TransformError::Emit(EmitError::ArtifactCreationFailed {
      source: ArtifactError::InvalidName { .. },
      ..
    })
  ));
  assert_eq!(set, before);
}

#[test]
fn empty_working_set_still_emits() {
  let mut set = ResourceSet::new();
  let report = transformer(Policy::Collect).transform(&mut set).unwrap();

  assert_eq!(report.members, 0);
  assert_eq!(report.digest.as_str(), "742k4t98mf");
  assert_eq!(set.len(), 1);
  assert_eq!(
    set.resources()[0].annotations.get(CONTENT_ANNOTATION).map(String::as_str),
    Some("{}")
  );
}

#[test]
fn transformer_keeps_no_state_between_runs() {
  let transformer = transformer(Policy::Collect);

  let mut first = a_and_b();
  let mut second = a_and_b();
  let a = transformer.transform(&mut first).unwrap();
  let b = transformer.transform(&mut second).unwrap();

  assert_eq!(a, b);
  assert_eq!(first, second);
}
