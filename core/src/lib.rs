//! mmap-driven drivers and resource scopes wrapping `threecrypt-crypto`'s
//! pure byte-level primitives into file-to-file encrypt, decrypt, dump and
//! dispatch operations.

pub mod decrypt;
pub mod dispatch;
pub mod dump;
pub mod encrypt;
pub mod error;
pub mod interrupt;
pub mod mapped_file;
pub mod rng;

pub use decrypt::decrypt;
pub use dispatch::identify;
pub use dump::dump;
pub use encrypt::{encrypt, FixedRandomness};
pub use error::EngineError;
