use proptest::prelude::*;

use kinventory_lib::{Gvk, Resource, ResourceSet, build_inventory, sort_and_hash};

fn working_set(names: &[String]) -> ResourceSet {
  ResourceSet::from_resources(
    names
      .iter()
      .map(|n| Resource::new(Gvk::new("", "v1", "ConfigMap"), "default", n.clone()))
      .collect(),
  )
}

fn digest_of(set: &ResourceSet) -> String {
  let (_, ids) = build_inventory(set).unwrap();
  sort_and_hash(ids).unwrap().to_string()
}

proptest! {
  #[test]
  fn digest_is_independent_of_enumeration_order(
    (names, shuffled) in proptest::collection::btree_set("[a-z][a-z0-9-]{0,12}", 0..16)
      .prop_map(|set| set.into_iter().collect::<Vec<_>>())
      .prop_flat_map(|names| (Just(names.clone()), Just(names).prop_shuffle()))
  ) {
    prop_assert_eq!(digest_of(&working_set(&names)), digest_of(&working_set(&shuffled)));
  }

  #[test]
  fn adding_a_member_changes_the_digest(
    names in proptest::collection::btree_set("[a-z]{1,8}", 1..8),
    extra in "[0-9]{1,4}",
  ) {
    let names: Vec<String> = names.into_iter().collect();
    let mut grown = names.clone();
    grown.push(extra);
    prop_assert_ne!(digest_of(&working_set(&names)), digest_of(&working_set(&grown)));
  }
}

#[test]
fn digest_ignores_references() {
  let plain = ResourceSet::from_resources(vec![
    Resource::new(Gvk::new("", "v1", "ConfigMap"), "default", "a"),
    Resource::new(Gvk::new("", "v1", "Service"), "default", "b"),
  ]);
  let linked = ResourceSet::from_resources(vec![
    Resource::new(Gvk::new("", "v1", "ConfigMap"), "default", "a").with_ref_by(plain.resources()[1].id()),
    Resource::new(Gvk::new("", "v1", "Service"), "default", "b"),
  ]);

  assert_eq!(digest_of(&plain), digest_of(&linked));
}
