//! SSPKDF: the salted, iterated, Skein-512-based password-based key
//! derivation function.
//!
//! Shaped like a conventional `derive(password, params) -> key` KDF, but
//! built directly on [`Skein512`] instead of calling out to an external
//! password-hashing crate: the iteration chains one Skein-512 digest into
//! the next rather than layering a separate memory-hard primitive.

use crate::primitives::skein::{Skein512, DIGEST_BYTES};
use crate::secret::DerivedKey;

/// `num_iter` and `num_concat` must each be at least 1; `validate` enforces
/// that at the point where a container header has already been parsed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostParameters {
	pub num_iter: u32,
	pub num_concat: u32,
}

impl CostParameters {
	/// Repository default: 1,000,000 iterations, 1,000,000 concatenations.
	pub const DEFAULT: CostParameters = CostParameters {
		num_iter: 1_000_000,
		num_concat: 1_000_000,
	};

	pub fn validate(self) -> Result<Self, CostParameterError> {
		if self.num_iter == 0 || self.num_concat == 0 {
			return Err(CostParameterError);
		}
		Ok(self)
	}
}

#[derive(Debug)]
pub struct CostParameterError;

impl std::fmt::Display for CostParameterError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "num_iter and num_concat must each be at least 1")
	}
}

impl std::error::Error for CostParameterError {}

/// Derives a 64-byte key from `passphrase` and `salt` using `params`.
///
/// Each round `i` in `0..num_iter` rebuilds the string
/// `(passphrase || salt || le64(i))` repeated `num_concat` times, and hashes
/// it with Skein-512, chained from the previous round's digest (round 0
/// chains from the all-zero state). The final round's digest is the
/// derived key.
pub fn sspkdf(passphrase: &[u8], salt: &[u8; 16], params: CostParameters) -> DerivedKey {
	let mut chaining = [0u8; DIGEST_BYTES];

	let mut round_input = Vec::with_capacity((passphrase.len() + salt.len() + 8) * params.num_concat as usize);

	for index in 0..params.num_iter {
		round_input.clear();
		let index_bytes = (index as u64).to_le_bytes();
		for _ in 0..params.num_concat {
			round_input.extend_from_slice(passphrase);
			round_input.extend_from_slice(salt);
			round_input.extend_from_slice(&index_bytes);
		}

		chaining = Skein512::digest_with_chaining(&chaining, &round_input);
	}

	DerivedKey(chaining)
}
