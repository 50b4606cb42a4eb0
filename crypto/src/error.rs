//! Errors surfaced by the pure byte-level crypto core: a plain enum with a
//! manual `Display` and `std::error::Error` impl. No `From<io::Error>` here
//! because this crate never touches the filesystem, that's `threecrypt-core`'s job.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
	/// The file is shorter than the minimum possible container size.
	TooSmall,
	/// The leading magic bytes don't match any known container format.
	UnrecognizedFormat,
	/// The header's `total_size` field disagrees with the file's real size.
	TruncatedOrExtended,
	/// A cost parameter was zero, or a padding byte was out of range.
	InvalidHeader,
	/// The MAC recomputed over the ciphertext didn't match the trailing tag.
	Authentication,
}

impl std::fmt::Display for CryptoError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			CryptoError::TooSmall => write!(f, "input file is too small to be a 3crypt container"),
			CryptoError::UnrecognizedFormat => write!(f, "input file is not a recognized 3crypt container"),
			CryptoError::TruncatedOrExtended => write!(f, "container's recorded size does not match the file's actual size"),
			CryptoError::InvalidHeader => write!(f, "container header failed validation"),
			CryptoError::Authentication => write!(f, "authentication failed: wrong password, or the file is corrupt or tampered with"),
		}
	}
}

impl std::error::Error for CryptoError {}
