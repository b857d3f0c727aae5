//! Resources, their canonical identities and the working set holding them.

mod set;
mod types;

pub use set::{ResourceSet, ResourceSetError};
pub use types::*;
