//! Interactive passphrase entry at the terminal, via `rpassword` so the
//! input is never echoed.

use threecrypt_crypto::Passphrase;
use threecrypt_core::EngineError;

/// Reads a passphrase once, for decrypt or dump.
pub fn read_once(prompt: &str) -> Result<Passphrase, EngineError> {
	let entered = rpassword::prompt_password(prompt).map_err(std::io::Error::from)?;
	Ok(Passphrase::new(entered.into_bytes())?)
}

/// Reads a passphrase twice and requires the two entries to match, for
/// encrypt, where a typo would otherwise lock the operator out silently.
pub fn read_confirmed(prompt: &str, confirm_prompt: &str) -> Result<Passphrase, EngineError> {
	let first = rpassword::prompt_password(prompt).map_err(std::io::Error::from)?;
	let second = rpassword::prompt_password(confirm_prompt).map_err(std::io::Error::from)?;

	if first != second {
		return Err(EngineError::PassphraseMismatch);
	}

	Ok(Passphrase::new(first.into_bytes())?)
}

/// Reads operator-supplied supplementary entropy for the CSPRNG, prompted
/// with `--entropy`. Unlike the passphrase, this input is not secret, so it
/// is read with the same hidden prompt only for terminal consistency; its
/// content never protects anything by itself, it is hashed and mixed in
/// alongside the OS CSPRNG's own draw.
pub fn read_entropy(prompt: &str) -> Result<Vec<u8>, EngineError> {
	let entered = rpassword::prompt_password(prompt).map_err(std::io::Error::from)?;
	Ok(entered.into_bytes())
}
