//! Skein-512 MAC computation and constant-time verification: the comparison
//! is constant-time over the 64 tag bytes, via `subtle`.

use subtle::ConstantTimeEq;

use crate::primitives::skein::{Skein512, DIGEST_BYTES};
use crate::secret::{DerivedKey, MacTag};

/// Computes the 64-byte Skein-512 MAC of `data`, keyed by `key`.
pub fn compute(key: &DerivedKey, data: &[u8]) -> MacTag {
	MacTag(Skein512::keyed_digest(key.as_bytes(), data))
}

/// Recomputes the MAC of `data` under `key` and compares it to `expected`
/// in constant time, returning `true` only on an exact match.
pub fn verify(key: &DerivedKey, data: &[u8], expected: &[u8; DIGEST_BYTES]) -> bool {
	let actual = compute(key, data);
	actual.as_bytes().ct_eq(expected).into()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verify_accepts_matching_tag() {
		let key = DerivedKey([9u8; 64]);
		let tag = compute(&key, b"ciphertext bytes");
		assert!(verify(&key, b"ciphertext bytes", tag.as_bytes()));
	}

	#[test]
	fn verify_rejects_tampered_data() {
		let key = DerivedKey([9u8; 64]);
		let tag = compute(&key, b"ciphertext bytes");
		assert!(!verify(&key, b"tampered bytes!!", tag.as_bytes()));
	}

	#[test]
	fn verify_rejects_wrong_key() {
		let key_a = DerivedKey([1u8; 64]);
		let key_b = DerivedKey([2u8; 64]);
		let tag = compute(&key_a, b"data");
		assert!(!verify(&key_b, b"data", tag.as_bytes()));
	}
}
