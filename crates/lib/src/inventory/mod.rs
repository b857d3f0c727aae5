//! Inventory construction.
//!
//! Builds the identity → referrers map for a working set and the list of
//! canonical ids that feeds the stable hash.

mod build;
mod resolve;
mod types;

pub use build::build_inventory;
pub use resolve::ReferenceResolver;
pub use types::*;
