//! Message Authentication Codes.
//!
//! # Warning
//!
//! This is a low-level module. You should not be using it
//! directly unless you are implementing an AEAD.

use core::{fmt, result::Result};

use subtle::ConstantTimeEq;

use crate::zeroize::Zeroize;

/// An error from a [`Mac`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MacError {
    /// The key provided to [`Mac::new`] is insecure.
    InsecureKey,
    /// The MAC (authentication tag) could not be verified.
    Verification,
}

impl fmt::Display for MacError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsecureKey => write!(f, "insecure key"),
            Self::Verification => write!(f, "unable to verify MAC"),
        }
    }
}

impl core::error::Error for MacError {}

/// A keyed Message Authentication Code Function (MAC).
///
/// Unlike a one-shot MAC, finalizing with [`Mac::tag_reset`]
/// returns the instance to its freshly keyed state so that it
/// can authenticate another message under the same key.
///
/// Examples of keyed MAC algorithms include HMAC-SHA-512.
pub trait Mac: Sized {
    /// The human readable name of the MAC.
    const NAME: &'static str;

    /// The size in octets of a full tag.
    const TAG_SIZE: usize;

    /// An authentication tag. It is wiped when dropped.
    type Tag: AsRef<[u8]> + ConstantTimeEq + Zeroize;

    /// Creates a new [`Mac`].
    fn new(key: &[u8]) -> Result<Self, MacError>;

    /// Adds `data` to the running tag.
    fn update(&mut self, data: &[u8]);

    /// Returns the current authentication tag and rekeys the
    /// running state with the original key.
    fn tag_reset(&mut self) -> Self::Tag;

    /// Determines in constant time whether the current tag is
    /// equal to `expect`.
    ///
    /// `expect` may be a prefix of the full tag, but must not be
    /// empty or longer than [`Self::TAG_SIZE`].
    fn verify(&mut self, expect: &[u8]) -> Result<(), MacError> {
        let mut got = self.tag_reset();
        let ok = match got.as_ref().get(..expect.len()) {
            Some(prefix) if !expect.is_empty() => prefix.ct_eq(expect).into(),
            _ => false,
        };
        got.zeroize();
        if ok {
            Ok(())
        } else {
            Err(MacError::Verification)
        }
    }
}
