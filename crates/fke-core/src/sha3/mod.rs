//! [NIST] SHA-3 derived functions.
//!
//! [NIST]: https://csrc.nist.gov/projects/hash-functions/sha-3-project

pub mod kmac;
pub mod shake;

pub use kmac::KmacXof256;
pub use shake::{Shake128, Shake256};
