//! `EngineError` wraps the cryptography layer's `CryptoError` plus the I/O
//! and precondition failures that only arise once files enter the picture:
//! missing input, an output path that already exists, bad interactive
//! passphrase entry, and interruption.

use threecrypt_crypto::CryptoError;

#[derive(Debug)]
pub enum EngineError {
	/// Input path does not exist.
	InputMissing,
	/// Output path already exists; encryption refuses to overwrite.
	OutputExists,
	/// The interactive passphrase entry didn't satisfy the length bound.
	PassphraseLength { len: usize },
	/// The two interactive passphrase entries didn't match.
	PassphraseMismatch,
	/// The operation was interrupted before it could complete.
	Interrupted,
	Crypto(CryptoError),
	Io(std::io::Error),
}

impl From<CryptoError> for EngineError {
	fn from(error: CryptoError) -> Self {
		EngineError::Crypto(error)
	}
}

impl From<std::io::Error> for EngineError {
	fn from(error: std::io::Error) -> Self {
		EngineError::Io(error)
	}
}

impl From<threecrypt_crypto::secret::PassphraseLengthError> for EngineError {
	fn from(error: threecrypt_crypto::secret::PassphraseLengthError) -> Self {
		EngineError::PassphraseLength { len: error.len }
	}
}

impl std::error::Error for EngineError {}

impl std::fmt::Display for EngineError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			EngineError::InputMissing => write!(f, "input file does not exist"),
			EngineError::OutputExists => write!(f, "output file already exists"),
			EngineError::PassphraseLength { len } => write!(f, "passphrase length {len} is outside the allowed range [1, 120]"),
			EngineError::PassphraseMismatch => write!(f, "passphrases don't match"),
			EngineError::Interrupted => write!(f, "operation interrupted"),
			EngineError::Crypto(e) => write!(f, "{e}"),
			EngineError::Io(e) => write!(f, "IO error: {e}"),
		}
	}
}
