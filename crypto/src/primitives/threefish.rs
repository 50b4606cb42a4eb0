//! Threefish-512: the 512-bit tweakable block cipher underlying the CBC
//! driver and, via Matyas-Meyer-Oseas, the Skein-512 compression function.
//!
//! Implemented from the public Threefish specification (Ferguson, Lucks,
//! Schneier, Whiting, Bellare, Kohno, Callas, Walker, "The Skein Hash
//! Function Family", v1.3) rather than adapted from an existing crate.

pub const BLOCK_WORDS: usize = 8;
pub const BLOCK_BYTES: usize = BLOCK_WORDS * 8;
pub const KEY_BYTES: usize = BLOCK_BYTES;
pub const TWEAK_BYTES: usize = 16;

const ROUNDS: usize = 72;
const SUBKEY_COUNT: usize = ROUNDS / 4 + 1;
const C240: u64 = 0x1BD1_1BDA_A9FC_1A22;

/// Rotation constants, indexed by `[round % 8][mix pair]`.
const ROTATION: [[u32; 4]; 8] = [
	[46, 36, 19, 37],
	[33, 27, 14, 42],
	[17, 49, 36, 39],
	[44, 9, 54, 56],
	[39, 30, 34, 24],
	[13, 50, 10, 17],
	[25, 29, 39, 43],
	[8, 35, 56, 22],
];

/// Word permutation applied once per round (output position `i` takes the
/// value that was at input position `PERMUTATION[i]`).
const PERMUTATION: [usize; 8] = [2, 1, 4, 7, 6, 5, 0, 3];

/// A Threefish-512 instance keyed by a 64-byte key and a 16-byte tweak.
pub struct Threefish512 {
	subkeys: [[u64; BLOCK_WORDS]; SUBKEY_COUNT],
}

impl Threefish512 {
	/// Builds a `Threefish512` from a 64-byte key and 16-byte tweak, the
	/// shapes the container header and derived key are actually stored in.
	pub fn new_from_bytes(key: &[u8; KEY_BYTES], tweak: &[u8; TWEAK_BYTES]) -> Self {
		let key_words = bytes_to_words(key);
		let tweak_words = [u64::from_le_bytes(tweak[0..8].try_into().expect("8 bytes")), u64::from_le_bytes(tweak[8..16].try_into().expect("8 bytes"))];
		Self::new(&key_words, &tweak_words)
	}

	pub fn new(key: &[u64; BLOCK_WORDS], tweak: &[u64; 2]) -> Self {
		let mut key_words = [0u64; BLOCK_WORDS + 1];
		key_words[..BLOCK_WORDS].copy_from_slice(key);
		key_words[BLOCK_WORDS] = C240 ^ key.iter().fold(0u64, |acc, w| acc ^ w);

		let tweak_words = [tweak[0], tweak[1], tweak[0] ^ tweak[1]];

		let mut subkeys = [[0u64; BLOCK_WORDS]; SUBKEY_COUNT];
		for (s, subkey) in subkeys.iter_mut().enumerate() {
			for (i, word) in subkey.iter_mut().enumerate() {
				*word = key_words[(s + i) % (BLOCK_WORDS + 1)];
			}
			subkey[BLOCK_WORDS - 3] = subkey[BLOCK_WORDS - 3].wrapping_add(tweak_words[s % 3]);
			subkey[BLOCK_WORDS - 2] = subkey[BLOCK_WORDS - 2].wrapping_add(tweak_words[(s + 1) % 3]);
			subkey[BLOCK_WORDS - 1] = subkey[BLOCK_WORDS - 1].wrapping_add(s as u64);
		}

		Threefish512 { subkeys }
	}

	/// Encrypts one 64-byte block in place (given as 8 little-endian words).
	pub fn encrypt_words(&self, block: &mut [u64; BLOCK_WORDS]) {
		let mut state = *block;
		for round in 0..ROUNDS {
			if round % 4 == 0 {
				add_subkey(&mut state, &self.subkeys[round / 4]);
			}
			mix_round(&mut state, round % 8);
		}
		add_subkey(&mut state, &self.subkeys[SUBKEY_COUNT - 1]);
		*block = state;
	}

	/// Decrypts one 64-byte block in place (given as 8 little-endian words).
	pub fn decrypt_words(&self, block: &mut [u64; BLOCK_WORDS]) {
		let mut state = *block;
		sub_subkey(&mut state, &self.subkeys[SUBKEY_COUNT - 1]);
		for round in (0..ROUNDS).rev() {
			unmix_round(&mut state, round % 8);
			if round % 4 == 0 {
				sub_subkey(&mut state, &self.subkeys[round / 4]);
			}
		}
		*block = state;
	}

	pub fn encrypt_block(&self, block: &mut [u8; BLOCK_BYTES]) {
		let mut words = bytes_to_words(block);
		self.encrypt_words(&mut words);
		*block = words_to_bytes(&words);
	}

	pub fn decrypt_block(&self, block: &mut [u8; BLOCK_BYTES]) {
		let mut words = bytes_to_words(block);
		self.decrypt_words(&mut words);
		*block = words_to_bytes(&words);
	}
}

fn add_subkey(state: &mut [u64; BLOCK_WORDS], subkey: &[u64; BLOCK_WORDS]) {
	for (word, sk) in state.iter_mut().zip(subkey.iter()) {
		*word = word.wrapping_add(*sk);
	}
}

fn sub_subkey(state: &mut [u64; BLOCK_WORDS], subkey: &[u64; BLOCK_WORDS]) {
	for (word, sk) in state.iter_mut().zip(subkey.iter()) {
		*word = word.wrapping_sub(*sk);
	}
}

fn mix(x0: u64, x1: u64, rotation: u32) -> (u64, u64) {
	let y0 = x0.wrapping_add(x1);
	let y1 = x1.rotate_left(rotation) ^ y0;
	(y0, y1)
}

fn unmix(y0: u64, y1: u64, rotation: u32) -> (u64, u64) {
	let x1 = (y1 ^ y0).rotate_right(rotation);
	let x0 = y0.wrapping_sub(x1);
	(x0, x1)
}

fn mix_round(state: &mut [u64; BLOCK_WORDS], round_mod8: usize) {
	let rotations = ROTATION[round_mod8];
	let mut mixed = *state;
	for j in 0..4 {
		let (a, b) = mix(state[2 * j], state[2 * j + 1], rotations[j]);
		mixed[2 * j] = a;
		mixed[2 * j + 1] = b;
	}
	for (i, &src) in PERMUTATION.iter().enumerate() {
		state[i] = mixed[src];
	}
}

fn unmix_round(state: &mut [u64; BLOCK_WORDS], round_mod8: usize) {
	let rotations = ROTATION[round_mod8];
	let mut unpermuted = [0u64; BLOCK_WORDS];
	for (i, &src) in PERMUTATION.iter().enumerate() {
		unpermuted[src] = state[i];
	}
	for j in 0..4 {
		let (a, b) = unmix(unpermuted[2 * j], unpermuted[2 * j + 1], rotations[j]);
		state[2 * j] = a;
		state[2 * j + 1] = b;
	}
}

pub fn bytes_to_words(bytes: &[u8; BLOCK_BYTES]) -> [u64; BLOCK_WORDS] {
	let mut words = [0u64; BLOCK_WORDS];
	for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
		*word = u64::from_le_bytes(chunk.try_into().expect("8-byte chunk"));
	}
	words
}

pub fn words_to_bytes(words: &[u64; BLOCK_WORDS]) -> [u8; BLOCK_BYTES] {
	let mut bytes = [0u8; BLOCK_BYTES];
	for (chunk, word) in bytes.chunks_exact_mut(8).zip(words.iter()) {
		chunk.copy_from_slice(&word.to_le_bytes());
	}
	bytes
}
