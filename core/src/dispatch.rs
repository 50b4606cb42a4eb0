//! Identifies which container format, if any, a file on disk is, without
//! fully parsing its header. The CLI's `--dump` and auto-detect-on-decrypt
//! paths both start here.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use threecrypt_crypto::header::{self, Method};

/// Reads just enough of `path` to identify its container format.
pub fn identify(path: &Path) -> io::Result<Method> {
	let mut file = File::open(path)?;
	let mut leading = [0u8; header::MAGIC_LEN];
	let read = file.read(&mut leading)?;
	Ok(header::identify_magic(&leading[..read]))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::tempdir;

	#[test]
	fn identifies_cbc_v2_magic() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("f");
		let mut file = File::create(&path).unwrap();
		file.write_all(header::CBC_V2_ID).unwrap();
		assert_eq!(identify(&path).unwrap(), Method::CbcV2);
	}

	#[test]
	fn identifies_cbc_v1_magic() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("f");
		let mut file = File::create(&path).unwrap();
		file.write_all(header::CBC_V1_ID).unwrap();
		assert_eq!(identify(&path).unwrap(), Method::CbcV1);
	}

	#[test]
	fn reports_none_for_unrelated_files() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("f");
		let mut file = File::create(&path).unwrap();
		file.write_all(b"not a container at all").unwrap();
		assert_eq!(identify(&path).unwrap(), Method::None);
	}

	#[test]
	fn reports_none_for_files_shorter_than_the_magic() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("f");
		let mut file = File::create(&path).unwrap();
		file.write_all(b"short").unwrap();
		assert_eq!(identify(&path).unwrap(), Method::None);
	}
}
