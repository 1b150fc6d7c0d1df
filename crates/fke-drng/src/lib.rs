//! Fast-key-erasure deterministic random number generators and
//! the hash_crypt AEAD.
//!
//! # Overview
//!
//! Every DRNG in this crate implements [`Drng`]: it is seeded
//! with [`Drng::seed`], produces output with [`Drng::generate`]
//! and is wiped with [`Drng::zero`] or when dropped.
//!
//! | DRNG | Primitive | Feature |
//! | --- | --- | --- |
//! | [`Xdrbg128`], [`Xdrbg256`] | SHAKE128, SHAKE256 | `xdrbg` |
//! | [`KmacDrng`] | KMACXOF256 | `kmac-drng` |
//! | [`ChaCha20Drng`] | ChaCha20 | `chacha20-drng` |
//! | [`HashDrbgSha256`], [`HashDrbgSha512`] | SHA-256, SHA-512 | `hash-drbg` |
//!
//! All of them replace their secret state before any output is
//! released, so a compromise of the state does not reveal
//! output that was produced earlier.
//!
//! [`HashCrypt`] (feature `hash-crypt`) is an Encrypt-then-MAC
//! AEAD whose keystream and MAC key come from a DRNG.
//!
//! # Selftests
//!
//! Each algorithm runs a known-answer test the first time it is
//! used. See [`selftest`].
//!
//! # Example
//!
//! ```
//! use fke_drng::{Drng, KmacDrng};
//!
//! let mut drng = KmacDrng::from_seed(b"entropy", b"my application")?;
//! let key: [u8; 32] = drng.bytes(b"")?;
//! # let _ = key;
//! # Ok::<(), fke_drng::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, doctest, feature = "std")), no_std)]
#![warn(missing_docs)]

#[cfg(any(
    feature = "xdrbg",
    feature = "kmac-drng",
    feature = "chacha20-drng",
    feature = "hash-drbg",
))]
pub mod any;
#[cfg(feature = "chacha20-drng")]
mod chacha20_drng;
mod drng;
pub mod errno;
mod error;
#[cfg(any(feature = "xdrbg", feature = "kmac-drng"))]
mod fke;
#[cfg(feature = "hash-crypt")]
mod hash_crypt;
#[cfg(feature = "hash-drbg")]
pub mod hash_drbg;
#[cfg(feature = "kmac-drng")]
mod kmac_drng;
pub mod rand_compat;
pub mod selftest;
pub mod test_util;
mod util;
#[cfg(feature = "xdrbg")]
mod xdrbg;

#[cfg(feature = "chacha20-drng")]
pub use chacha20_drng::ChaCha20Drng;
pub use drng::Drng;
pub use error::{Error, MacError, Result};
pub use fke_core::timecop::{set_timecop, Timecop};
#[cfg(feature = "hash-crypt")]
pub use hash_crypt::{HashCrypt, HashCryptSha512, MAX_TAG_SIZE};
#[cfg(feature = "hash-drbg")]
pub use hash_drbg::{HashDrbg, HashDrbgSha256, HashDrbgSha512};
#[cfg(feature = "kmac-drng")]
pub use kmac_drng::KmacDrng;
#[cfg(feature = "xdrbg")]
pub use xdrbg::{Xdrbg128, Xdrbg256};
