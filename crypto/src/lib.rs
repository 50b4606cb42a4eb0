//! The pure cryptographic core of 3crypt: Threefish-512/Skein-512
//! primitives, the SSPKDF key-derivation function, CBC-mode encryption, the
//! Skein-512 MAC, and the `CBC_V2` container header codec.
//!
//! This crate does no filesystem or mmap I/O, it operates entirely on
//! byte slices. The file-driving state machines live in `threecrypt-core`,
//! so the hard cryptography stays independently testable with no
//! `std::fs` surface at all.

pub mod cbc;
pub mod error;
pub mod header;
pub mod kdf;
pub mod mac;
pub mod primitives;
pub mod secret;

pub use cbc::padded_body_len;
pub use error::CryptoError;
pub use header::{Header, Method};
pub use kdf::{sspkdf, CostParameters};
pub use primitives::{Skein512, Threefish512};
pub use secret::{CbcIv, DerivedKey, MacTag, Passphrase, Salt, Tweak};
