//! Skein-512: the UBI (Unique Block Iteration) hash construction built on
//! top of [`Threefish512`] via Matyas-Meyer-Oseas. Used both as the
//! compression primitive inside SSPKDF and, keyed, as 3crypt's file MAC.
//!
//! Implemented from the public Skein specification, for the same reason
//! `Threefish512` is: built in-crate rather than adapted from an existing
//! implementation.

use super::threefish::{self, Threefish512, BLOCK_BYTES, BLOCK_WORDS};

pub const DIGEST_BYTES: usize = 64;

const TYPE_KEY: u64 = 0;
const TYPE_CONFIG: u64 = 4;
const TYPE_MESSAGE: u64 = 48;
const TYPE_OUTPUT: u64 = 63;

const FLAG_FIRST: u64 = 1 << 62;
const FLAG_FINAL: u64 = 1 << 63;
const FLAG_BIT_PAD: u64 = 1 << 57;

const SCHEMA_ID: u64 = 0x3341_3853; // "SHA3" packed little-endian, per the Skein config string
const VERSION: u64 = 1;

/// Stateless Skein-512 hasher: each call derives a fresh chaining value from
/// scratch (or from a key), processes the message, and emits the output
/// block. 3crypt never needs Skein's tree-hashing or streaming modes.
pub struct Skein512;

impl Skein512 {
	/// Unkeyed Skein-512(message) -> 64-byte digest.
	pub fn digest(message: &[u8]) -> [u8; DIGEST_BYTES] {
		Self::keyed_digest(&[], message)
	}

	/// Skein-512 MAC(key, message) -> 64-byte tag, using Skein's native MAC
	/// construction: the key is absorbed as its own UBI block before the
	/// configuration block, rather than being used as an HMAC outer key.
	pub fn keyed_digest(key: &[u8], message: &[u8]) -> [u8; DIGEST_BYTES] {
		let g0 = if key.is_empty() {
			[0u64; BLOCK_WORDS]
		} else {
			ubi(&[0u64; BLOCK_WORDS], key, TYPE_KEY)
		};

		let config = config_string();
		let g1 = ubi(&g0, &config, TYPE_CONFIG);
		let g2 = ubi(&g1, message, TYPE_MESSAGE);

		let output_counter = [0u8; 8];
		let g3 = ubi(&g2, &output_counter, TYPE_OUTPUT);

		threefish::words_to_bytes(&g3)
	}

	/// Skein-512(message), but seeded with an arbitrary 64-byte chaining
	/// value instead of the all-zero initial state. Used by SSPKDF to mix
	/// each round's digest into the next round's hash.
	pub fn digest_with_chaining(initial: &[u8; DIGEST_BYTES], message: &[u8]) -> [u8; DIGEST_BYTES] {
		let g0 = threefish::bytes_to_words(initial);
		let config = config_string();
		let g1 = ubi(&g0, &config, TYPE_CONFIG);
		let g2 = ubi(&g1, message, TYPE_MESSAGE);
		let g3 = ubi(&g2, &[0u8; 8], TYPE_OUTPUT);
		threefish::words_to_bytes(&g3)
	}

	/// Computes a MAC over `data` keyed by `key` and writes it into `out`,
	/// which must be exactly [`DIGEST_BYTES`] long.
	pub fn mac_into(out: &mut [u8; DIGEST_BYTES], data: &[u8], key: &[u8]) {
		*out = Self::keyed_digest(key, data);
	}
}

fn config_string() -> [u8; 32] {
	let mut cfg = [0u8; 32];
	let word0 = SCHEMA_ID | (VERSION << 32);
	cfg[0..8].copy_from_slice(&word0.to_le_bytes());
	let output_bits = (DIGEST_BYTES as u64) * 8;
	cfg[8..16].copy_from_slice(&output_bits.to_le_bytes());
	// bytes 16..32 (tree info, reserved) stay zero.
	cfg
}

/// UBI(g, message, type) -> new chaining value, per the Skein spec: the
/// message is processed in 64-byte blocks using Threefish-512 keyed by the
/// running chaining value, each block tweaked with (position, type,
/// first/final flags), combined via Matyas-Meyer-Oseas (E_g,t(b) XOR b).
fn ubi(g: &[u64; BLOCK_WORDS], message: &[u8], type_field: u64) -> [u64; BLOCK_WORDS] {
	let mut chaining = *g;

	// Skein always processes at least one block, even for empty messages.
	let block_count = if message.is_empty() {
		1
	} else {
		message.len().div_ceil(BLOCK_BYTES)
	};

	let mut position: u64 = 0;
	for block_index in 0..block_count {
		let start = block_index * BLOCK_BYTES;
		let end = (start + BLOCK_BYTES).min(message.len());
		let chunk = if start < message.len() { &message[start..end] } else { &[] };

		let mut block = [0u8; BLOCK_BYTES];
		block[..chunk.len()].copy_from_slice(chunk);
		let padded = chunk.len() < BLOCK_BYTES;

		position += chunk.len() as u64;

		let mut tweak1 = type_field << 56;
		if block_index == 0 {
			tweak1 |= FLAG_FIRST;
		}
		if block_index == block_count - 1 {
			tweak1 |= FLAG_FINAL;
			if padded {
				tweak1 |= FLAG_BIT_PAD;
			}
		}
		let tweak = [position, tweak1];

		let cipher = Threefish512::new(&chaining, &tweak);
		let mut words = threefish::bytes_to_words(&block);
		let plaintext_words = words;
		cipher.encrypt_words(&mut words);
		for (word, plain) in words.iter_mut().zip(plaintext_words.iter()) {
			*word ^= plain;
		}
		chaining = words;
	}

	chaining
}
