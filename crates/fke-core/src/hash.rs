//! Cryptographic hash functions.
//!
//! # Warning
//!
//! This is a low-level module. You should not be be directly
//! using it directly unless you are implementing a DRNG.

#![forbid(unsafe_code)]

use core::{
    borrow::{Borrow, BorrowMut},
    fmt::{self, Debug},
    ops::{Deref, DerefMut},
};

use subtle::{Choice, ConstantTimeEq};

use crate::zeroize::{Zeroize, ZeroizeOnDrop};

/// A cryptographic hash function.
///
/// # Requirements
///
/// The function must:
///
/// * Have pre-image resistance
/// * Be collision resistant (and thus second pre-image
///   resistance)
///
/// Examples of cryptographic hash functions that fulfill
/// these requirements include SHA-256 and SHA-512.
pub trait Hash: Clone {
    /// The human readable name of the hash function.
    const NAME: &'static str;

    /// The size in octets of a digest.
    const DIGEST_SIZE: usize;

    /// The size in bytes of a [`Self::Block`].
    const BLOCK_SIZE: usize;

    /// The output of the hash function.
    type Digest: AsRef<[u8]> + AsMut<[u8]> + Default + ConstantTimeEq + Zeroize;

    /// An individual block.
    type Block: Borrow<[u8]> + BorrowMut<[u8]> + Default + Clone + Zeroize;

    /// Creates a new [`Hash`].
    fn new() -> Self;

    /// Adds `data` to the running hash.
    fn update(&mut self, data: &[u8]);

    /// Returns the current digest.
    fn digest(self) -> Self::Digest;

    /// Returns the digest of `data`.
    fn hash(data: &[u8]) -> Self::Digest
    where
        Self: Sized,
    {
        let mut h = Self::new();
        h.update(data);
        h.digest()
    }

    /// Returns the digest of the concatenation of `parts`.
    fn hash_multi<I>(parts: I) -> Self::Digest
    where
        Self: Sized,
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut h = Self::new();
        for p in parts {
            h.update(p.as_ref());
        }
        h.digest()
    }
}

/// The output of a [`Hash`].
///
/// Digests are frequently derived from secret material (HMAC
/// inner hashes, Hash_DRBG state), so they are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[repr(transparent)]
pub struct Digest<const N: usize>([u8; N]);

impl<const N: usize> Digest<N> {
    /// Creates a new hash digest from an array.
    #[inline]
    pub const fn from_array(digest: [u8; N]) -> Self {
        Self(digest)
    }

    /// Returns the length of the hash digest.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        N
    }

    /// Returns the hash digest as a byte slice.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Default for Digest<N> {
    #[inline]
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> Deref for Digest<N> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Digest<N> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> AsRef<[u8]> for Digest<N> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsMut<[u8]> for Digest<N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> Debug for Digest<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest").field(&self.0).finish()
    }
}

// Gated for safety purposes: MACs built on top of a hash
// (HMAC) must only ever be compared in constant time.
#[cfg(any(test, feature = "test_util"))]
impl<const N: usize> Eq for Digest<N> {}

#[cfg(any(test, feature = "test_util"))]
impl<const N: usize> PartialEq for Digest<N> {
    fn eq(&self, other: &Self) -> bool {
        bool::from(ConstantTimeEq::ct_eq(self, other))
    }
}

impl<const N: usize> ConstantTimeEq for Digest<N> {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

/// A hash function block.
#[derive(Clone, Zeroize)]
pub struct Block<const N: usize>([u8; N]);

impl<const N: usize> Default for Block<N> {
    #[inline]
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> Borrow<[u8]> for Block<N> {
    #[inline]
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> BorrowMut<[u8]> for Block<N> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}
