//! CSPRNG-backed randomness for the salt, tweak, and CBC IV drawn at
//! encryption time, with an optional mix-in of operator-supplied entropy.
//! Backed by `rand::rngs::OsRng`.

use rand::rngs::OsRng;
use rand::RngCore;
use threecrypt_crypto::Skein512;

/// Fills `buf` with CSPRNG output.
pub fn fill(buf: &mut [u8]) {
	OsRng.fill_bytes(buf);
}

/// Mixes `extra_entropy` into the OS RNG's output before filling `buf`, for
/// callers that want to combine operator-supplied entropy with the system
/// CSPRNG. The extra entropy is hashed with Skein-512 and XORed
/// into the freshly drawn bytes rather than replacing them outright, so a
/// weak or adversarial `extra_entropy` input can only add randomness, never
/// remove it.
pub fn fill_with_extra_entropy(buf: &mut [u8], extra_entropy: &[u8]) {
	fill(buf);
	if extra_entropy.is_empty() {
		return;
	}
	let digest = Skein512::digest(extra_entropy);
	for (byte, mix) in buf.iter_mut().zip(digest.iter().cycle()) {
		*byte ^= mix;
	}
}
