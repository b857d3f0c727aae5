//! Order-independent fingerprinting of inventory membership.
//!
//! The digest of a set of canonical ids is computed by:
//! 1. sorting the ids byte-wise
//! 2. serializing the sorted list as a compact JSON array, or `null` when
//!    there are no ids
//! 3. taking the SHA-256 of that JSON
//! 4. keeping the first [`DIGEST_LEN`] hex characters, with `0`, `1`, `3`, `a`
//!    and `e` swapped for letters so the value never parses as a number
//!
//! The same set of ids always yields the same digest, whatever order the
//! working set enumerated them in.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::consts::DIGEST_LEN;

pub type HashError = serde_json::Error;

/// Deterministic fingerprint over a sorted set of canonical ids.
///
/// # Format
///
/// A 10-character lowercase string, e.g. `"g47ktf2dcg"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Digest {
  encoded: String,
  full: String,
}

impl Digest {
  /// The encoded form written to the hash annotation.
  pub fn as_str(&self) -> &str {
    &self.encoded
  }

  /// The full 64-character SHA-256 hex the digest was derived from.
  pub fn full(&self) -> &str {
    &self.full
  }
}

impl std::fmt::Display for Digest {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.encoded)
  }
}

/// Sort `ids` and compute their [`Digest`].
///
/// The input is consumed so the sort happens in place.
pub fn sort_and_hash(mut ids: Vec<String>) -> Result<Digest, HashError> {
  ids.sort_unstable();
  let members = (!ids.is_empty()).then_some(&ids);
  let serialized = serde_json::to_string(&members)?;
  let full = hash_bytes(serialized.as_bytes());
  Ok(Digest {
    encoded: encode(&full),
    full,
  })
}

/// Full SHA-256 hex of arbitrary bytes.
pub fn hash_bytes(data: &[u8]) -> String {
  let mut hasher = Sha256::new();
  hasher.update(data);
  hex::encode(hasher.finalize())
}

fn encode(full_hex: &str) -> String {
  full_hex
    .chars()
    .take(DIGEST_LEN)
    .map(|c| match c {
      '0' => 'g',
      '1' => 'h',
      '3' => 'k',
      'a' => 'm',
      'e' => 't',
      other => other,
    })
    .collect()
}
