//! Scoped mmap and file-descriptor resources: every mapping is released
//! (unmapped, then closed) on every exit path, in the reverse order of
//! acquisition, without needing to read an entire file into one buffer.
//!
//! Field order matters here: Rust drops struct fields top-to-bottom, so the
//! `mmap` field is declared before `file` in both types below, guaranteeing
//! `munmap` runs before `close`.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use memmap2::{Mmap, MmapMut};

/// A read-only memory-mapped view of an existing file.
pub struct ReadMapping {
	mmap: Mmap,
	#[allow(dead_code)]
	file: File,
}

impl ReadMapping {
	pub fn open(path: &Path) -> io::Result<Self> {
		let file = File::open(path)?;
		// SAFETY: the mapped file is not expected to be concurrently
		// truncated or modified by another process during the lifetime of
		// this mapping; 3crypt holds its own input files open exclusively
		// for the duration of one encrypt/decrypt invocation.
		let mmap = unsafe { Mmap::map(&file)? };
		Ok(ReadMapping { mmap, file })
	}

	pub fn len(&self) -> usize {
		self.mmap.len()
	}

	pub fn is_empty(&self) -> bool {
		self.mmap.is_empty()
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.mmap
	}
}

/// A read-write memory-mapped view of a file truncated/extended to a given
/// size before mapping.
pub struct WriteMapping {
	mmap: MmapMut,
	file: File,
}

impl WriteMapping {
	/// Creates `path` if it doesn't already exist, refusing to overwrite,
	/// sets its length to `size`, and maps it read-write.
	pub fn create_new(path: &Path, size: u64) -> io::Result<Self> {
		let file = OpenOptions::new().read(true).write(true).create_new(true).open(path)?;
		file.set_len(size)?;
		// SAFETY: see ReadMapping::open; this process holds exclusive
		// access to the file it just created.
		let mmap = unsafe { MmapMut::map_mut(&file)? };
		Ok(WriteMapping { mmap, file })
	}

	pub fn as_mut_slice(&mut self) -> &mut [u8] {
		&mut self.mmap
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.mmap
	}

	/// `msync`s the mapping. Call this explicitly before the mapping drops;
	/// `Drop` also best-effort flushes as a safety net, but cannot report
	/// I/O errors.
	pub fn sync(&self) -> io::Result<()> {
		self.mmap.flush()
	}

	/// Unmaps and truncates the backing file to `final_len`, consuming the
	/// mapping so no stale `&mut [u8]` can outlive the resize. Used when
	/// decryption writes into an output file sized for the padded body and
	/// then shrinks it once the unpadded plaintext length is known.
	pub fn finish(self, final_len: u64) -> io::Result<()> {
		self.sync()?;
		let WriteMapping { mmap, file } = self;
		drop(mmap);
		file.set_len(final_len)?;
		Ok(())
	}
}

impl Drop for WriteMapping {
	fn drop(&mut self) {
		if let Err(error) = self.mmap.flush() {
			log::warn!("failed to flush memory-mapped output during drop: {error}");
		}
	}
}
