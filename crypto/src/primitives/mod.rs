pub mod skein;
pub mod threefish;

pub use skein::Skein512;
pub use threefish::Threefish512;
