//! Content fingerprints of API objects.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::encode::{to_canonical_json, EncodeError};

/// Hex-encoded SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Fingerprint {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Stable fingerprint implemented by the generated `zz_generated.hash.rs`.
pub trait ContentHash {
	fn content_hash(&self) -> Result<Fingerprint, EncodeError>;
}

/// Digest of the kind name followed by the canonical JSON form of `value`.
///
/// Object key order never affects the result, while any change of a value
/// does.
pub fn fingerprint<T: Serialize + ?Sized>(kind: &str, value: &T) -> Result<Fingerprint, EncodeError> {
	let canonical = to_canonical_json(value)?;
	let mut hasher = Sha256::new();
	hasher.update(kind.as_bytes());
	hasher.update([0]);
	hasher.update(&canonical);
	Ok(Fingerprint(format!("{:x}", hasher.finalize())))
}
