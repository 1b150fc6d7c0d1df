//! Selecting a DRNG at runtime.

use core::{fmt, str::FromStr};

use crate::{
    drng::Drng,
    error::{Error, Result},
};

/// Names a DRNG.
///
/// Every DRNG can be named, even when its cargo feature is
/// disabled. [`AnyDrng::new`] reports whether it was compiled
/// in.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DrngKind {
    /// [`Xdrbg128`][crate::Xdrbg128].
    Xdrbg128,
    /// [`Xdrbg256`][crate::Xdrbg256].
    Xdrbg256,
    /// [`KmacDrng`][crate::KmacDrng].
    KmacDrng,
    /// [`ChaCha20Drng`][crate::ChaCha20Drng].
    ChaCha20Drng,
    /// [`HashDrbgSha256`][crate::HashDrbgSha256].
    HashDrbgSha256,
    /// [`HashDrbgSha512`][crate::HashDrbgSha512].
    HashDrbgSha512,
}

impl DrngKind {
    /// Every DRNG.
    pub const ALL: [Self; 6] = [
        Self::Xdrbg128,
        Self::Xdrbg256,
        Self::KmacDrng,
        Self::ChaCha20Drng,
        Self::HashDrbgSha256,
        Self::HashDrbgSha512,
    ];

    /// Returns the name accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xdrbg128 => "xdrbg128",
            Self::Xdrbg256 => "xdrbg256",
            Self::KmacDrng => "kmac-drng",
            Self::ChaCha20Drng => "chacha20-drng",
            Self::HashDrbgSha256 => "hash-drbg-sha256",
            Self::HashDrbgSha512 => "hash-drbg-sha512",
        }
    }

    /// Reports whether the DRNG was compiled in.
    pub const fn is_enabled(self) -> bool {
        match self {
            Self::Xdrbg128 | Self::Xdrbg256 => cfg!(feature = "xdrbg"),
            Self::KmacDrng => cfg!(feature = "kmac-drng"),
            Self::ChaCha20Drng => cfg!(feature = "chacha20-drng"),
            Self::HashDrbgSha256 | Self::HashDrbgSha512 => cfg!(feature = "hash-drbg"),
        }
    }
}

impl FromStr for DrngKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or(Error::InvalidArgument("unknown DRNG"))
    }
}

impl fmt::Display for DrngKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DRNG chosen at runtime.
///
/// # Example
///
/// ```
/// use fke_drng::any::AnyDrng;
///
/// let mut drng = AnyDrng::new("chacha20-drng".parse()?)?;
/// drng.seed(b"seed", b"")?;
/// let mut out = [0u8; 16];
/// drng.generate(b"", &mut out)?;
/// # Ok::<(), fke_drng::Error>(())
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyDrng {
    /// XDRBG-128.
    #[cfg(feature = "xdrbg")]
    Xdrbg128(crate::Xdrbg128),
    /// XDRBG-256.
    #[cfg(feature = "xdrbg")]
    Xdrbg256(crate::Xdrbg256),
    /// KMAC-DRNG.
    #[cfg(feature = "kmac-drng")]
    KmacDrng(crate::KmacDrng),
    /// ChaCha20-DRNG.
    #[cfg(feature = "chacha20-drng")]
    ChaCha20Drng(crate::ChaCha20Drng),
    /// Hash_DRBG-SHA-256.
    #[cfg(feature = "hash-drbg")]
    HashDrbgSha256(crate::HashDrbgSha256),
    /// Hash_DRBG-SHA-512.
    #[cfg(feature = "hash-drbg")]
    HashDrbgSha512(crate::HashDrbgSha512),
}

macro_rules! dispatch {
    ($self:expr, $d:ident => $body:expr) => {
        match $self {
            #[cfg(feature = "xdrbg")]
            Self::Xdrbg128($d) => $body,
            #[cfg(feature = "xdrbg")]
            Self::Xdrbg256($d) => $body,
            #[cfg(feature = "kmac-drng")]
            Self::KmacDrng($d) => $body,
            #[cfg(feature = "chacha20-drng")]
            Self::ChaCha20Drng($d) => $body,
            #[cfg(feature = "hash-drbg")]
            Self::HashDrbgSha256($d) => $body,
            #[cfg(feature = "hash-drbg")]
            Self::HashDrbgSha512($d) => $body,
        }
    };
}

impl AnyDrng {
    /// Creates an unseeded DRNG of the given kind.
    ///
    /// Returns [`Error::NotSupported`] if the DRNG was not
    /// compiled in.
    pub fn new(kind: DrngKind) -> Result<Self> {
        #[allow(unreachable_patterns)]
        let drng = match kind {
            #[cfg(feature = "xdrbg")]
            DrngKind::Xdrbg128 => Self::Xdrbg128(Drng::new()),
            #[cfg(feature = "xdrbg")]
            DrngKind::Xdrbg256 => Self::Xdrbg256(Drng::new()),
            #[cfg(feature = "kmac-drng")]
            DrngKind::KmacDrng => Self::KmacDrng(Drng::new()),
            #[cfg(feature = "chacha20-drng")]
            DrngKind::ChaCha20Drng => Self::ChaCha20Drng(Drng::new()),
            #[cfg(feature = "hash-drbg")]
            DrngKind::HashDrbgSha256 => Self::HashDrbgSha256(Drng::new()),
            #[cfg(feature = "hash-drbg")]
            DrngKind::HashDrbgSha512 => Self::HashDrbgSha512(Drng::new()),
            _ => return Err(Error::NotSupported(kind.as_str())),
        };
        Ok(drng)
    }

    /// Returns the kind of DRNG.
    pub const fn kind(&self) -> DrngKind {
        match self {
            #[cfg(feature = "xdrbg")]
            Self::Xdrbg128(_) => DrngKind::Xdrbg128,
            #[cfg(feature = "xdrbg")]
            Self::Xdrbg256(_) => DrngKind::Xdrbg256,
            #[cfg(feature = "kmac-drng")]
            Self::KmacDrng(_) => DrngKind::KmacDrng,
            #[cfg(feature = "chacha20-drng")]
            Self::ChaCha20Drng(_) => DrngKind::ChaCha20Drng,
            #[cfg(feature = "hash-drbg")]
            Self::HashDrbgSha256(_) => DrngKind::HashDrbgSha256,
            #[cfg(feature = "hash-drbg")]
            Self::HashDrbgSha512(_) => DrngKind::HashDrbgSha512,
        }
    }

    /// Returns the human readable name of the DRNG.
    pub fn name(&self) -> &'static str {
        fn name_of<D: Drng>(_: &D) -> &'static str {
            D::NAME
        }
        dispatch!(self, d => name_of(d))
    }

    /// See [`Drng::seed`].
    pub fn seed(&mut self, seed: &[u8], pers: &[u8]) -> Result<()> {
        dispatch!(self, d => d.seed(seed, pers))
    }

    /// See [`Drng::generate`].
    pub fn generate(&mut self, addtl: &[u8], out: &mut [u8]) -> Result<()> {
        dispatch!(self, d => d.generate(addtl, out))
    }

    /// See [`Drng::zero`].
    pub fn zero(&mut self) {
        dispatch!(self, d => d.zero())
    }

    /// See [`Drng::is_seeded`].
    pub fn is_seeded(&self) -> bool {
        dispatch!(self, d => d.is_seeded())
    }
}
