//! Well-known keys and sizes shared across the crate.

/// Annotation carrying the inventory digest on the emitted artifact.
///
/// Downstream pruning clients compare this value across runs, so it must
/// never change.
pub const HASH_ANNOTATION: &str = "kustomize.config.k8s.io/InventoryHash";

/// Annotation carrying the JSON-encoded inventory membership.
pub const CONTENT_ANNOTATION: &str = "kustomize.config.k8s.io/Inventory";

/// Number of hex characters of the SHA-256 kept in a [`Digest`](crate::util::hash::Digest).
pub const DIGEST_LEN: usize = 10;

/// Placeholders written into canonical ids for empty fields.
pub const NO_GROUP: &str = "~G";
pub const NO_VERSION: &str = "~V";
pub const NO_KIND: &str = "~K";
pub const NO_NAMESPACE: &str = "~X";
pub const NO_NAME: &str = "~N";

/// Separator between group, version and kind.
pub const GVK_SEPARATOR: &str = "_";

/// Separator between the gvk, namespace and name of a canonical id.
pub const ID_SEPARATOR: &str = "|";
