//! The `CBC_V2` container header codec, plus read-only recognition of the
//! historical `CBC_V1` magic so the dispatcher can identify (though never
//! write) files produced by that earlier format.
//!
//! Serializes field-by-field with `byteorder`, reading and writing each
//! field at its fixed byte offset in the 125-byte header.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::CryptoError;
use crate::kdf::CostParameters;
use crate::primitives::threefish::BLOCK_BYTES;
use crate::secret::{CbcIv, Salt, Tweak};

pub const CBC_V2_ID: &[u8; 13] = b"3CRYPT_CBC_V2";
pub const CBC_V1_ID: &[u8; 13] = b"3CRYPT_CBC_V1";
pub const MAGIC_LEN: usize = 13;

pub const HEADER_LEN: usize = 125;
pub const MAC_LEN: usize = 64;

/// The smallest file that could possibly be a valid container (header + one
/// ciphertext block + MAC).
pub const MIN_CONTAINER_LEN: usize = HEADER_LEN + BLOCK_BYTES + MAC_LEN;

/// The historical `CBC_V1` variant hardcoded this iteration count;
/// `CBC_V1`'s on-disk header otherwise matches `CBC_V2`'s layout.
pub const CBC_V1_HARDCODED_NUM_ITER: u32 = 1_250_000;

/// Which container format a file's magic bytes identify, or neither. A
/// closed tagged variant: adding a format means adding a variant here plus
/// a driver, not registering a type dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	None,
	CbcV1,
	CbcV2,
}

/// Inspects up to [`MAGIC_LEN`] leading bytes and reports which container
/// format, if any, they identify.
pub fn identify_magic(leading_bytes: &[u8]) -> Method {
	if leading_bytes.len() < MAGIC_LEN {
		return Method::None;
	}
	let magic = &leading_bytes[..MAGIC_LEN];
	if magic == CBC_V2_ID {
		Method::CbcV2
	} else if magic == CBC_V1_ID {
		Method::CbcV1
	} else {
		Method::None
	}
}

/// The decoded `CBC_V2` (or read-compatible `CBC_V1`) container header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
	pub total_size: u64,
	pub tweak: Tweak,
	pub salt: Salt,
	pub cbc_iv: CbcIv,
	pub num_iter: u32,
	pub num_concat: u32,
}

impl Header {
	/// Writes the 125-byte `CBC_V2` header at the start of `out`.
	pub fn write_to(&self, out: &mut [u8]) {
		assert!(out.len() >= HEADER_LEN, "output buffer too small for header");

		out[0..13].copy_from_slice(CBC_V2_ID);
		LittleEndian::write_u64(&mut out[13..21], self.total_size);
		out[21..37].copy_from_slice(self.tweak.as_bytes());
		out[37..53].copy_from_slice(self.salt.as_bytes());
		out[53..117].copy_from_slice(self.cbc_iv.as_bytes());
		LittleEndian::write_u32(&mut out[117..121], self.num_iter);
		LittleEndian::write_u32(&mut out[121..125], self.num_concat);
	}

	/// Reads and validates a header from `input`, which must be the full
	/// on-disk file (so `total_size` can be checked against its real
	/// length).
	pub fn read_from(input: &[u8]) -> Result<Header, CryptoError> {
		if input.len() < MIN_CONTAINER_LEN {
			return Err(CryptoError::TooSmall);
		}

		let method = identify_magic(input);
		let num_iter_override = match method {
			Method::CbcV2 => None,
			Method::CbcV1 => Some(CBC_V1_HARDCODED_NUM_ITER),
			Method::None => return Err(CryptoError::UnrecognizedFormat),
		};

		let total_size = LittleEndian::read_u64(&input[13..21]);
		if total_size != input.len() as u64 {
			return Err(CryptoError::TruncatedOrExtended);
		}

		let tweak = Tweak::from_slice(&input[21..37]).expect("16-byte slice");
		let salt = Salt::from_slice(&input[37..53]).expect("16-byte slice");
		let cbc_iv = CbcIv::from_slice(&input[53..117]).expect("64-byte slice");
		let num_iter = num_iter_override.unwrap_or_else(|| LittleEndian::read_u32(&input[117..121]));
		let num_concat = LittleEndian::read_u32(&input[121..125]);

		if num_iter == 0 || num_concat == 0 {
			return Err(CryptoError::InvalidHeader);
		}

		Ok(Header {
			total_size,
			tweak,
			salt,
			cbc_iv,
			num_iter,
			num_concat,
		})
	}

	pub fn cost_parameters(&self) -> CostParameters {
		CostParameters {
			num_iter: self.num_iter,
			num_concat: self.num_concat,
		}
	}
}
