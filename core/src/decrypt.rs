//! The decrypt driver: reads a container header, derives the key it
//! claims to need, verifies the MAC before anything is trusted, then
//! CBC-decrypts and truncates the output to the recovered plaintext length.

use std::path::Path;

use threecrypt_crypto::{cbc, header::Header, mac, CryptoError, Passphrase, Threefish512};

use crate::error::EngineError;
use crate::interrupt;
use crate::mapped_file::{ReadMapping, WriteMapping};

/// Decrypts `input_path` into `output_path`, which must not already exist.
///
/// Authenticates before decrypting: the MAC over the header and ciphertext
/// is checked against the derived key before a single plaintext byte is
/// written out.
pub fn decrypt(input_path: &Path, output_path: &Path, passphrase: Passphrase) -> Result<(), EngineError> {
	if !input_path.exists() {
		return Err(EngineError::InputMissing);
	}
	if output_path.exists() {
		return Err(EngineError::OutputExists);
	}

	match decrypt_inner(input_path, output_path, passphrase) {
		Ok(()) => Ok(()),
		Err(error) => {
			let _ = std::fs::remove_file(output_path);
			Err(error)
		}
	}
}

fn decrypt_inner(input_path: &Path, output_path: &Path, passphrase: Passphrase) -> Result<(), EngineError> {
	let input = ReadMapping::open(input_path)?;

	let header = Header::read_from(input.as_slice())?;
	let body_offset = threecrypt_crypto::header::HEADER_LEN;
	let mac_offset = input.len() - threecrypt_crypto::header::MAC_LEN;

	if mac_offset <= body_offset {
		return Err(EngineError::Crypto(CryptoError::TooSmall));
	}
	let ciphertext = &input.as_slice()[body_offset..mac_offset];

	if interrupt::is_requested() {
		return Err(EngineError::Interrupted);
	}

	let derived_key = threecrypt_crypto::sspkdf(passphrase.as_bytes(), header.salt.as_bytes(), header.cost_parameters());
	drop(passphrase);

	let expected_tag: &[u8; 64] = input.as_slice()[mac_offset..].try_into().expect("64-byte tag region");
	if !mac::verify(&derived_key, &input.as_slice()[..mac_offset], expected_tag) {
		return Err(EngineError::Crypto(CryptoError::Authentication));
	}

	if interrupt::is_requested() {
		return Err(EngineError::Interrupted);
	}

	// Size the output for the padded body; it's truncated to the real
	// plaintext length once decryption reveals the padding count.
	let mut output = WriteMapping::create_new(output_path, ciphertext.len() as u64)?;

	let cipher = Threefish512::new_from_bytes(derived_key.as_bytes(), header.tweak.as_bytes());
	let plaintext_len = cbc::decrypt(&cipher, &header.cbc_iv, ciphertext, output.as_mut_slice())?;

	output.finish(plaintext_len as u64)?;

	drop(derived_key);

	Ok(())
}
