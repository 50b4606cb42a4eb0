//! End-to-end tests over real temporary files, exercising the scenarios and
//! boundary behaviors called out against the container format: fixed
//! file sizes for given plaintext lengths, tamper detection, wrong-password
//! detection, and dump idempotence.

use std::io::Write;
use std::path::Path;

use tempfile::tempdir;

use threecrypt_core::{decrypt, dump, encrypt, FixedRandomness};
use threecrypt_core::EngineError;
use threecrypt_crypto::{CostParameters, CryptoError, Passphrase};

fn write_file(dir: &Path, name: &str, contents: &[u8]) -> std::path::PathBuf {
	let path = dir.join(name);
	std::fs::File::create(&path).unwrap().write_all(contents).unwrap();
	path
}

const ALL_ZERO_RANDOMNESS: FixedRandomness = FixedRandomness { salt: [0u8; 16], tweak: [0u8; 16], cbc_iv: [0u8; 64] };

#[test]
fn scenario_1_hello_with_trivial_cost_parameters() {
	let dir = tempdir().unwrap();
	let input = write_file(dir.path(), "hello.txt", b"hello\n");
	let output = dir.path().join("hello.txt.3c");

	encrypt(
		&input,
		&output,
		Passphrase::new(b"correct horse battery staple".to_vec()).unwrap(),
		CostParameters { num_iter: 1, num_concat: 1 },
		&[],
		Some(ALL_ZERO_RANDOMNESS),
	)
	.unwrap();

	assert_eq!(std::fs::metadata(&output).unwrap().len(), 253);

	let round_tripped = dir.path().join("hello.out");
	decrypt(&output, &round_tripped, Passphrase::new(b"correct horse battery staple".to_vec()).unwrap()).unwrap();
	assert_eq!(std::fs::read(&round_tripped).unwrap(), b"hello\n");
}

#[test]
fn scenario_2_exactly_one_block_of_plaintext() {
	let dir = tempdir().unwrap();
	let plaintext = vec![0x41u8; 64];
	let input = write_file(dir.path(), "plain.bin", &plaintext);
	let output = dir.path().join("plain.bin.3c");

	encrypt(&input, &output, Passphrase::new(b"password".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], None).unwrap();

	assert_eq!(std::fs::metadata(&output).unwrap().len(), 317);
}

#[test]
fn scenario_3_single_bit_flip_is_detected() {
	let dir = tempdir().unwrap();
	let input = write_file(dir.path(), "secret.txt", b"data that absolutely must stay intact");
	let output = dir.path().join("secret.txt.3c");
	encrypt(&input, &output, Passphrase::new(b"password".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], None).unwrap();

	let mut bytes = std::fs::read(&output).unwrap();
	bytes[64] ^= 1;
	std::fs::write(&output, &bytes).unwrap();

	let decrypted = dir.path().join("secret.out");
	let result = decrypt(&output, &decrypted, Passphrase::new(b"password".to_vec()).unwrap());
	assert!(matches!(result, Err(EngineError::Crypto(CryptoError::Authentication))));
	assert!(!decrypted.exists());
}

#[test]
fn scenario_4_larger_cost_parameters_still_round_trip() {
	let dir = tempdir().unwrap();
	let input = write_file(dir.path(), "plain.txt", b"a payload encrypted with nontrivial KDF cost");
	let output = dir.path().join("plain.txt.3c");

	// Representative of the repository default (1,000,000/1,000,000), scaled
	// down so the test suite stays fast; kdf.rs separately covers that larger
	// iteration counts derive different keys than smaller ones.
	let cost = CostParameters { num_iter: 50, num_concat: 50 };
	encrypt(&input, &output, Passphrase::new(b"a reasonably strong passphrase".to_vec()).unwrap(), cost, &[], None).unwrap();

	let decrypted = dir.path().join("plain.out");
	decrypt(&output, &decrypted, Passphrase::new(b"a reasonably strong passphrase".to_vec()).unwrap()).unwrap();
	assert_eq!(std::fs::read(&decrypted).unwrap(), b"a payload encrypted with nontrivial KDF cost");
}

#[test]
fn scenario_5_dump_renders_every_header_field() {
	let dir = tempdir().unwrap();
	let input = write_file(dir.path(), "plain.txt", b"dump me");
	let output = dir.path().join("plain.txt.3c");
	encrypt(&input, &output, Passphrase::new(b"password".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], Some(ALL_ZERO_RANDOMNESS)).unwrap();

	let mut first = Vec::new();
	dump(&output, &mut first).unwrap();
	let text = String::from_utf8(first.clone()).unwrap();

	assert!(text.contains("File Header ID : 3CRYPT_CBC_V2"));
	assert!(text.contains("File Size :"));
	assert!(text.contains("Tweak :"));
	assert!(text.contains("Salt :"));
	assert!(text.contains("CBC IV :"));
	assert!(text.contains("MAC :"));
	assert!(text.contains("num_iter : 1"));
	assert!(text.contains("num_concat : 1"));

	// Idempotence: dumping the same file twice is byte-identical.
	let mut second = Vec::new();
	dump(&output, &mut second).unwrap();
	assert_eq!(first, second);
}

#[test]
fn scenario_6_encrypt_refuses_to_overwrite_existing_output() {
	let dir = tempdir().unwrap();
	let input = write_file(dir.path(), "plain.txt", b"payload");
	let output = write_file(dir.path(), "plain.txt.3c", b"pre-existing contents");

	let result = encrypt(&input, &output, Passphrase::new(b"password".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], None);

	assert!(matches!(result, Err(EngineError::OutputExists)));
	assert_eq!(std::fs::read(&output).unwrap(), b"pre-existing contents");
}

#[test]
fn boundary_plaintext_lengths_produce_the_documented_body_lengths() {
	let dir = tempdir().unwrap();
	let cases: [(usize, u64); 7] = [(0, 253), (1, 253), (63, 253), (64, 317), (65, 317), (127, 317), (128, 381)];

	for (plaintext_len, expected_total_size) in cases {
		let plaintext = vec![0x7Au8; plaintext_len];
		let input = write_file(dir.path(), &format!("plain-{plaintext_len}"), &plaintext);
		let output = dir.path().join(format!("plain-{plaintext_len}.3c"));

		encrypt(&input, &output, Passphrase::new(b"password".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], None).unwrap();

		assert_eq!(std::fs::metadata(&output).unwrap().len(), expected_total_size, "plaintext_len={plaintext_len}");

		let decrypted = dir.path().join(format!("plain-{plaintext_len}.out"));
		decrypt(&output, &decrypted, Passphrase::new(b"password".to_vec()).unwrap()).unwrap();
		assert_eq!(std::fs::read(&decrypted).unwrap(), plaintext, "plaintext_len={plaintext_len}");
	}
}

#[test]
fn decrypt_rejects_a_252_byte_input_as_too_small() {
	let dir = tempdir().unwrap();
	let input = write_file(dir.path(), "short", &vec![0u8; 252]);
	let output = dir.path().join("short.out");

	let result = decrypt(&input, &output, Passphrase::new(b"password".to_vec()).unwrap());
	assert!(matches!(result, Err(EngineError::Crypto(CryptoError::TooSmall))));
}

#[test]
fn decrypt_rejects_unrecognized_magic() {
	let dir = tempdir().unwrap();
	let mut bytes = vec![0u8; 253];
	bytes[0..13].copy_from_slice(b"NOT_3CRYPT___");
	let input = write_file(dir.path(), "not-a-container", &bytes);
	let output = dir.path().join("not-a-container.out");

	let result = decrypt(&input, &output, Passphrase::new(b"password".to_vec()).unwrap());
	assert!(matches!(result, Err(EngineError::Crypto(CryptoError::UnrecognizedFormat))));
}

#[test]
fn wrong_passphrase_is_rejected_with_negligible_false_accept() {
	let dir = tempdir().unwrap();
	let input = write_file(dir.path(), "plain.txt", b"a payload only the right passphrase should open");
	let output = dir.path().join("plain.txt.3c");
	encrypt(&input, &output, Passphrase::new(b"the right passphrase".to_vec()).unwrap(), CostParameters { num_iter: 1, num_concat: 1 }, &[], None).unwrap();

	for wrong in ["the wrong passphrase", "The Right Passphrase", "the right passphras"] {
		let decrypted = dir.path().join("should-not-exist");
		let result = decrypt(&output, &decrypted, Passphrase::new(wrong.as_bytes().to_vec()).unwrap());
		assert!(matches!(result, Err(EngineError::Crypto(CryptoError::Authentication))));
		assert!(!decrypted.exists());
	}
}
