//! The encrypt driver: opens the input, sizes and creates the output,
//! derives a key, and writes header, ciphertext and MAC in sequence. Each
//! step is commented with its position in that sequence so the flow stays
//! legible even though it's one long function.

use std::path::Path;

use threecrypt_crypto::{
	cbc,
	header::{Header, HEADER_LEN, MAC_LEN},
	mac, CbcIv, CostParameters, Passphrase, Salt, Threefish512, Tweak,
};

use crate::error::EngineError;
use crate::interrupt;
use crate::mapped_file::{ReadMapping, WriteMapping};
use crate::rng;

/// Overrides the CSPRNG-drawn salt/tweak/IV with fixed values, so the rest
/// of the pipeline is reproducible. Never constructed outside tests.
#[derive(Clone, Copy)]
pub struct FixedRandomness {
	pub salt: [u8; 16],
	pub tweak: [u8; 16],
	pub cbc_iv: [u8; 64],
}

/// Encrypts `input_path` into `output_path`, which must not already exist.
///
/// `passphrase` has already been read and confirmed by the caller; this
/// driver only derives a key from it and scrubs it on return. `extra_entropy`
/// is operator-supplied entropy (empty if the caller has none) mixed into the
/// CSPRNG draw for the salt, tweak, and CBC IV.
pub fn encrypt(input_path: &Path, output_path: &Path, passphrase: Passphrase, cost: CostParameters, extra_entropy: &[u8], fixed_randomness: Option<FixedRandomness>) -> Result<(), EngineError> {
	if !input_path.exists() {
		return Err(EngineError::InputMissing);
	}
	if output_path.exists() {
		return Err(EngineError::OutputExists);
	}

	match encrypt_inner(input_path, output_path, passphrase, cost, extra_entropy, fixed_randomness) {
		Ok(()) => Ok(()),
		Err(error) => {
			// Remove the partially-written output on any failure, best-effort.
			let _ = std::fs::remove_file(output_path);
			Err(error)
		}
	}
}

fn encrypt_inner(input_path: &Path, output_path: &Path, passphrase: Passphrase, cost: CostParameters, extra_entropy: &[u8], fixed_randomness: Option<FixedRandomness>) -> Result<(), EngineError> {
	// Open the input read-only, map it, and compute the output's final size.
	let input = ReadMapping::open(input_path)?;

	let body_len = cbc::padded_body_len(input.len());
	let total_size = HEADER_LEN + body_len + MAC_LEN;

	let mut output = WriteMapping::create_new(output_path, total_size as u64)?;

	if interrupt::is_requested() {
		return Err(EngineError::Interrupted);
	}

	// The passphrase was obtained by the caller; draw or accept fixed
	// salt/tweak/IV.
	let (salt, tweak, cbc_iv) = match fixed_randomness {
		Some(fixed) => (Salt(fixed.salt), Tweak(fixed.tweak), CbcIv(fixed.cbc_iv)),
		None => {
			let mut salt = [0u8; 16];
			let mut tweak = [0u8; 16];
			let mut cbc_iv = [0u8; 64];
			rng::fill_with_extra_entropy(&mut salt, extra_entropy);
			rng::fill_with_extra_entropy(&mut tweak, extra_entropy);
			rng::fill_with_extra_entropy(&mut cbc_iv, extra_entropy);
			(Salt(salt), Tweak(tweak), CbcIv(cbc_iv))
		}
	};

	// Derive the key; the passphrase is owned here, so it scrubs itself on drop.
	let derived_key = threecrypt_crypto::sspkdf(passphrase.as_bytes(), &salt.0, cost);
	drop(passphrase);

	if interrupt::is_requested() {
		return Err(EngineError::Interrupted);
	}

	// Write the header.
	let header = Header {
		total_size: total_size as u64,
		tweak,
		salt,
		cbc_iv,
		num_iter: cost.num_iter,
		num_concat: cost.num_concat,
	};
	header.write_to(output.as_mut_slice());

	// CBC-encrypt the input into the output's ciphertext region.
	let cipher = Threefish512::new_from_bytes(derived_key.as_bytes(), header.tweak.as_bytes());
	let out_slice = output.as_mut_slice();
	let body_region = &mut out_slice[HEADER_LEN..HEADER_LEN + body_len];
	cbc::encrypt(&cipher, &header.cbc_iv, input.as_slice(), body_region);

	// MAC everything written so far, then append the tag.
	let mac_range_end = total_size - MAC_LEN;
	let tag = mac::compute(&derived_key, &output.as_slice()[..mac_range_end]);
	output.as_mut_slice()[mac_range_end..total_size].copy_from_slice(tag.as_bytes());

	// Flush to the backing file; Drop order (mmap before file) unmaps and
	// closes afterward.
	output.sync()?;

	drop(derived_key);

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::tempdir;
	use threecrypt_crypto::Passphrase;

	fn write_temp_file(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
		let path = dir.join(name);
		let mut file = std::fs::File::create(&path).unwrap();
		file.write_all(contents).unwrap();
		path
	}

	#[test]
	fn produces_the_documented_file_size_for_a_one_byte_plaintext() {
		let dir = tempdir().unwrap();
		let input = write_temp_file(dir.path(), "in", b"x");
		let output = dir.path().join("out.3c");

		encrypt(
			&input,
			&output,
			Passphrase::new(b"correct horse battery staple".to_vec()).unwrap(),
			CostParameters { num_iter: 1, num_concat: 1 },
			&[],
			Some(FixedRandomness { salt: [0; 16], tweak: [0; 16], cbc_iv: [0; 64] }),
		)
		.unwrap();

		assert_eq!(std::fs::metadata(&output).unwrap().len(), 253);
	}

	#[test]
	fn refuses_to_overwrite_an_existing_output() {
		let dir = tempdir().unwrap();
		let input = write_temp_file(dir.path(), "in", b"hello\n");
		let output = write_temp_file(dir.path(), "out.3c", b"already here");

		let result = encrypt(&input, &output, Passphrase::new(b"password".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], None);

		assert!(matches!(result, Err(EngineError::OutputExists)));
		assert_eq!(std::fs::read(&output).unwrap(), b"already here");
	}

	#[test]
	fn fails_when_input_is_missing() {
		let dir = tempdir().unwrap();
		let input = dir.path().join("does-not-exist");
		let output = dir.path().join("out.3c");

		let result = encrypt(&input, &output, Passphrase::new(b"password".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], None);

		assert!(matches!(result, Err(EngineError::InputMissing)));
	}

	#[test]
	fn is_deterministic_given_fixed_randomness() {
		let dir = tempdir().unwrap();
		let input = write_temp_file(dir.path(), "in", b"deterministic test payload");
		let fixed = Some(FixedRandomness { salt: [7; 16], tweak: [8; 16], cbc_iv: [9; 64] });

		let out1 = dir.path().join("out1.3c");
		encrypt(&input, &out1, Passphrase::new(b"password".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], fixed).unwrap();

		let out2 = dir.path().join("out2.3c");
		encrypt(&input, &out2, Passphrase::new(b"password".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], fixed).unwrap();

		assert_eq!(std::fs::read(&out1).unwrap(), std::fs::read(&out2).unwrap());
	}
}
