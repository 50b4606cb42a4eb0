//! CBC mode over 64-byte Threefish-512 blocks. Plaintext shorter than a
//! block is padded up to one block; plaintext that is already block-aligned
//! still gets a full extra padding block. The pad value `k` (number of
//! padding bytes, `1..=64`) is written into every padding byte, PKCS#7-style.

use crate::error::CryptoError;
use crate::primitives::threefish::{Threefish512, BLOCK_BYTES};
use crate::secret::CbcIv;

/// Computes the padded ciphertext-body length for a plaintext of length `p`.
pub fn padded_body_len(plaintext_len: usize) -> usize {
	if plaintext_len < BLOCK_BYTES {
		BLOCK_BYTES
	} else {
		plaintext_len + (BLOCK_BYTES - (plaintext_len % BLOCK_BYTES))
	}
}

/// Encrypts `plaintext` into `out`, which must be exactly
/// [`padded_body_len`]`(plaintext.len())` bytes. Returns that length.
pub fn encrypt(cipher: &Threefish512, iv: &CbcIv, plaintext: &[u8], out: &mut [u8]) -> usize {
	let body_len = padded_body_len(plaintext.len());
	assert_eq!(out.len(), body_len, "output buffer must match the padded body length");

	let pad_len = body_len - plaintext.len();
	debug_assert!((1..=BLOCK_BYTES).contains(&pad_len));

	let mut previous: [u8; BLOCK_BYTES] = *iv.as_bytes();

	for (block_index, out_block) in out.chunks_exact_mut(BLOCK_BYTES).enumerate() {
		let start = block_index * BLOCK_BYTES;
		let mut block = [0u8; BLOCK_BYTES];

		for (i, byte) in block.iter_mut().enumerate() {
			let offset = start + i;
			*byte = if offset < plaintext.len() {
				plaintext[offset]
			} else {
				pad_len as u8
			};
		}

		for (b, p) in block.iter_mut().zip(previous.iter()) {
			*b ^= p;
		}

		cipher.encrypt_block(&mut block);
		out_block.copy_from_slice(&block);
		previous = block;
	}

	body_len
}

/// Decrypts `ciphertext` (a positive multiple of 64 bytes) into `out`,
/// which must be at least `ciphertext.len()` bytes
/// long. Returns the recovered plaintext length after stripping the PKCS#7
/// padding, or `CryptoError::InvalidHeader` if the padding byte is out of
/// range for a CBC body of this length.
pub fn decrypt(cipher: &Threefish512, iv: &CbcIv, ciphertext: &[u8], out: &mut [u8]) -> Result<usize, CryptoError> {
	assert!(!ciphertext.is_empty() && ciphertext.len() % BLOCK_BYTES == 0, "ciphertext must be a positive multiple of the block size");
	assert!(out.len() >= ciphertext.len(), "output buffer must be at least as large as the ciphertext");

	let mut previous: [u8; BLOCK_BYTES] = *iv.as_bytes();

	for (block_index, ct_block) in ciphertext.chunks_exact(BLOCK_BYTES).enumerate() {
		let mut block: [u8; BLOCK_BYTES] = ct_block.try_into().expect("exact chunk");
		let ciphertext_copy = block;

		cipher.decrypt_block(&mut block);
		for (b, p) in block.iter_mut().zip(previous.iter()) {
			*b ^= p;
		}

		let start = block_index * BLOCK_BYTES;
		out[start..start + BLOCK_BYTES].copy_from_slice(&block);
		previous = ciphertext_copy;
	}

	let pad_len = *out[ciphertext.len() - 1..ciphertext.len()].first().expect("non-empty body") as usize;
	if pad_len == 0 || pad_len > BLOCK_BYTES || pad_len > ciphertext.len() {
		return Err(CryptoError::InvalidHeader);
	}

	Ok(ciphertext.len() - pad_len)
}
