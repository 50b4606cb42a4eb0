//! Fixed-size byte newtypes, split into "public" (stored plaintext in the
//! container header: salt, tweak, IV, MAC tag) and "secret" (scrubbed on
//! drop: the derived key) categories.
//!
//! A small `byte_newtype!` macro generates both categories from one
//! declaration, scrubbing secret types via `zeroize` on drop.

use zeroize::Zeroize;

/// Generates a `pub struct $name([u8; $bytes])` with `from_slice`,
/// `as_bytes`, `Deref<Target = [u8]>`, and (for `secret` types) a
/// zeroizing `Drop` impl.
macro_rules! byte_newtype {
	(public $name:ident, $bytes:expr) => {
		#[derive(Clone, Copy, PartialEq, Eq, Debug)]
		pub struct $name(pub [u8; $bytes]);

		byte_newtype!(@common $name, $bytes);
	};
	(secret $name:ident, $bytes:expr) => {
		#[derive(Clone)]
		pub struct $name(pub [u8; $bytes]);

		impl Drop for $name {
			fn drop(&mut self) {
				self.0.zeroize();
			}
		}

		byte_newtype!(@common $name, $bytes);
	};
	(@common $name:ident, $bytes:expr) => {
		impl $name {
			pub const LEN: usize = $bytes;

			pub fn zeroed() -> Self {
				$name([0u8; $bytes])
			}

			pub fn from_slice(bytes: &[u8]) -> Option<Self> {
				if bytes.len() != $bytes {
					return None;
				}
				let mut buf = [0u8; $bytes];
				buf.copy_from_slice(bytes);
				Some($name(buf))
			}

			pub fn as_bytes(&self) -> &[u8; $bytes] {
				&self.0
			}
		}

		impl AsRef<[u8]> for $name {
			fn as_ref(&self) -> &[u8] {
				&self.0
			}
		}

		impl std::ops::Deref for $name {
			type Target = [u8];
			fn deref(&self) -> &[u8] {
				&self.0
			}
		}
	};
}

byte_newtype!(public Salt, 16);
byte_newtype!(public Tweak, 16);
byte_newtype!(public CbcIv, 64);
byte_newtype!(public MacTag, 64);
byte_newtype!(secret DerivedKey, 64);

/// A passphrase held in memory only as long as it takes to derive a key.
/// Scrubbed on drop. `new` enforces the `[1, 120]`-byte length bound;
/// callers such as the CLI's interactive prompt construct one after reading
/// from the terminal.
pub struct Passphrase {
	bytes: Vec<u8>,
}

impl Passphrase {
	pub const MIN_LEN: usize = 1;
	pub const MAX_LEN: usize = 120;

	pub fn new(bytes: Vec<u8>) -> Result<Self, PassphraseLengthError> {
		if bytes.len() < Self::MIN_LEN || bytes.len() > Self::MAX_LEN {
			return Err(PassphraseLengthError { len: bytes.len() });
		}
		Ok(Passphrase { bytes })
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}
}

impl Drop for Passphrase {
	fn drop(&mut self) {
		self.bytes.zeroize();
	}
}

#[derive(Debug)]
pub struct PassphraseLengthError {
	pub len: usize,
}

impl std::fmt::Display for PassphraseLengthError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"passphrase length {} is outside the allowed range [{}, {}]",
			self.len,
			Passphrase::MIN_LEN,
			Passphrase::MAX_LEN
		)
	}
}

impl std::error::Error for PassphraseLengthError {}
