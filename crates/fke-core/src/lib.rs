//! Low level primitives for the fast-key-erasure DRNGs.
//!
//! This crate provides the narrow capability interfaces that
//! the DRNGs and the hash_crypt AEAD in [`fke-drng`] are written
//! against:
//!
//! - [`Hash`][hash::Hash]: SHA-256 and SHA-512.
//! - [`Xof`][xof::Xof] and [`KeyedXof`][xof::KeyedXof]: SHAKE
//!   and KMAC.
//! - [`Mac`][mac::Mac]: HMAC.
//! - [`chacha20`]: the raw ChaCha20 block function.
//!
//! # Warning
//!
//! The cryptography in this crate is low-level and can very
//! easily be misused. Unless you explicitly know what you're
//! doing, use [`fke-drng`] instead.
//!
//! [`fke-drng`]: https://docs.rs/fke-drng

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(any(test, doctest, feature = "std")), no_std)]
#![warn(missing_docs)]

pub mod chacha20;
pub mod hash;
pub mod hmac;
pub mod mac;
pub mod rust;
pub mod sha3;
pub mod test_util;
pub mod timecop;
mod util;
pub mod xof;
pub mod zeroize;

pub use subtle;
pub use util::xor_into;
