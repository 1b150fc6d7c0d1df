//! The fast-key-erasure construction shared by XDRBG and
//! KMAC-DRNG.
//!
//! The DRNG holds a single secret key `V`. Every operation
//! starts a transient XOF context from `V`, absorbs its input,
//! and squeezes a replacement for `V` *before* squeezing any
//! output. The old `V` is gone by the time output is released,
//! so a later compromise of the state does not reveal earlier
//! output.
//!
//! ```text
//! INSTANTIATE(seed, pers):
//!     V = XOF(seed || encode(0, pers))
//! RESEED(seed, pers):
//!     V = XOF(V || seed || encode(1, pers))
//! GENERATE(addtl, n):
//!     V || out = XOF(V || encode(2, addtl))
//! ```

use core::{fmt, marker::PhantomData};

use fke_core::{
    timecop,
    xof::{Xof, XofReader},
    zeroize::{Zeroize, ZeroizeOnDrop},
};
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    selftest::{self, Algorithm},
    util::{debug as unsafe_debug, Hex},
};

/// The maximum number of bytes of `alpha` that are absorbed by
/// [`encode`].
pub(crate) const ENCODE_LENGTH: usize = 84;

/// The stage that [`encode`] binds into the XOF.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub(crate) enum Stage {
    Instantiate = 0,
    Reseed = 1,
    Generate = 2,
}

/// Absorbs `alpha` followed by a single byte encoding `stage`
/// and the absorbed length of `alpha`.
///
/// Only the first [`ENCODE_LENGTH`] bytes of `alpha` are used.
pub(crate) fn encode<X: Xof>(xof: &mut X, stage: Stage, alpha: &[u8]) {
    let alpha = match alpha.get(..ENCODE_LENGTH) {
        Some(head) if alpha.len() > ENCODE_LENGTH => {
            debug!(len = alpha.len(), "truncating alpha to {ENCODE_LENGTH} bytes");
            head
        }
        _ => alpha,
    };
    // 2*85 + 84 < 256
    #[allow(clippy::cast_possible_truncation)]
    let enc = (stage as u8)
        .wrapping_mul(85)
        .wrapping_add(alpha.len() as u8);
    xof.update(alpha);
    xof.update(&[enc]);
}

/// The parameters of a fast-key-erasure DRNG.
pub(crate) trait Params {
    /// The human readable name of the DRNG.
    const NAME: &'static str;

    /// The selftest registry entry.
    const ALGORITHM: Algorithm;

    /// The largest number of output bytes squeezed from one
    /// transient context.
    const MAX_CHUNK: usize;

    /// Expected output of generating with no additional input
    /// after instantiating with `00 01 .. 08` and no
    /// personalization.
    const KAT: &'static [u8];

    /// The transient context.
    type Xof: Xof;

    /// Starts a seeding context.
    ///
    /// `key` is `None` when instantiating.
    fn seed_xof(key: Option<&[u8]>) -> Self::Xof;

    /// Starts a generating context keyed with `key`.
    fn generate_xof(key: &[u8]) -> Self::Xof;
}

/// The state of a fast-key-erasure DRNG with a `K`-byte key.
pub(crate) struct Fke<P, const K: usize> {
    key: [u8; K],
    seeded: bool,
    chunk: usize,
    _params: PhantomData<P>,
}

impl<P: Params, const K: usize> Fke<P, K> {
    pub(crate) const fn new() -> Self {
        Self {
            key: [0u8; K],
            seeded: false,
            chunk: P::MAX_CHUNK,
            _params: PhantomData,
        }
    }

    /// Sets the number of output bytes squeezed per transient
    /// context.
    pub(crate) fn set_chunk_size(&mut self, chunk: usize) -> Result<()> {
        if chunk == 0 || chunk > P::MAX_CHUNK {
            return Err(Error::OutOfRange("chunk size"));
        }
        self.chunk = chunk;
        Ok(())
    }

    pub(crate) const fn chunk_size(&self) -> usize {
        self.chunk
    }

    pub(crate) const fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub(crate) fn seed(&mut self, seed: &[u8], pers: &[u8]) -> Result<()> {
        selftest::run(P::ALGORITHM, Self::selftest)?;
        self.seed_unchecked(seed, pers);
        Ok(())
    }

    pub(crate) fn generate(&mut self, addtl: &[u8], out: &mut [u8]) -> Result<()> {
        selftest::run(P::ALGORITHM, Self::selftest)?;
        self.generate_unchecked(addtl, out);
        Ok(())
    }

    fn seed_unchecked(&mut self, seed: &[u8], pers: &[u8]) {
        timecop::poison(seed);

        let (mut xof, stage) = if self.seeded {
            debug!(drng = P::NAME, "reseeding");
            (P::seed_xof(Some(&self.key)), Stage::Reseed)
        } else {
            debug!(drng = P::NAME, "instantiating");
            (P::seed_xof(None), Stage::Instantiate)
        };
        self.seeded = true;

        xof.update(seed);
        encode(&mut xof, stage, pers);
        xof.finalize_xof().read(&mut self.key);

        unsafe_debug!("{} key: {}", P::NAME, Hex(&self.key));
    }

    fn generate_unchecked(&mut self, addtl: &[u8], out: &mut [u8]) {
        if !self.seeded {
            debug!(drng = P::NAME, "generating from an unseeded state");
        }
        trace!(
            drng = P::NAME,
            len = out.len(),
            chunks = out.len().div_ceil(self.chunk),
            "generating"
        );

        for chunk in out.chunks_mut(self.chunk) {
            let mut xof = P::generate_xof(&self.key);
            encode(&mut xof, Stage::Generate, addtl);
            let mut reader = xof.finalize_xof();
            reader.read(&mut self.key);
            reader.read(chunk);
            timecop::unpoison(chunk);
        }
    }

    /// Wipes the key and forgets that the DRNG was seeded.
    pub(crate) fn zero(&mut self) {
        self.seeded = false;
        self.key.zeroize();
    }

    fn selftest() -> bool {
        const SEED: [u8; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];

        let mut drng = Self::new();
        drng.seed_unchecked(&SEED, &[]);
        let mut buf = [0u8; 256];
        let Some(got) = buf.get_mut(..P::KAT.len()) else {
            return false;
        };
        drng.generate_unchecked(&[], got);
        let ok = got == P::KAT;
        buf.zeroize();
        ok
    }

    #[cfg(test)]
    pub(crate) fn key(&self) -> &[u8; K] {
        &self.key
    }

    /// A seeded state holding only `key`.
    #[cfg(test)]
    pub(crate) const fn from_key(key: [u8; K]) -> Self {
        Self {
            key,
            seeded: true,
            chunk: P::MAX_CHUNK,
            _params: PhantomData,
        }
    }
}

impl<P, const K: usize> ZeroizeOnDrop for Fke<P, K> {}
impl<P, const K: usize> Drop for Fke<P, K> {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl<P: Params, const K: usize> fmt::Debug for Fke<P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(P::NAME)
            .field("seeded", &self.seeded)
            .field("chunk", &self.chunk)
            .finish_non_exhaustive()
    }
}

/// Declares a public fast-key-erasure DRNG backed by [`Fke`].
macro_rules! define_fke {
    (
        $(#[$meta:meta])*
        $name:ident, $params:ty, $key_size:literal
    ) => {
        $(#[$meta])*
        pub struct $name($crate::fke::Fke<$params, $key_size>);

        impl $name {
            /// The size in bytes of the secret key `V`.
            pub const KEY_SIZE: usize = $key_size;

            /// The largest number of output bytes produced
            /// from one key.
            pub const MAX_CHUNK: usize = <$params as $crate::fke::Params>::MAX_CHUNK;
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                <Self as $crate::drng::Drng>::new()
            }
        }

        impl $crate::drng::Drng for $name {
            const NAME: &'static str = <$params as $crate::fke::Params>::NAME;

            #[inline]
            fn new() -> Self {
                Self($crate::fke::Fke::new())
            }

            #[inline]
            fn seed(&mut self, seed: &[u8], pers: &[u8]) -> $crate::error::Result<()> {
                self.0.seed(seed, pers)
            }

            #[inline]
            fn generate(&mut self, addtl: &[u8], out: &mut [u8]) -> $crate::error::Result<()> {
                self.0.generate(addtl, out)
            }

            #[inline]
            fn zero(&mut self) {
                self.0.zero()
            }

            #[inline]
            fn is_seeded(&self) -> bool {
                self.0.is_seeded()
            }
        }

        impl ::fke_core::zeroize::ZeroizeOnDrop for $name {}

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(&self.0, f)
            }
        }
    };
}
pub(crate) use define_fke;
