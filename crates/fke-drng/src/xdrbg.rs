//! XDRBG: the SHAKE based fast-key-erasure DRNG.
//!
//! See "XDRBG: A Proposed Deterministic Random Bit Generator
//! Based on Any XOF" (Kelsey, Lucks, Müller).

use fke_core::{
    sha3::{Shake128, Shake256},
    xof::{NewXof, Xof},
};

use crate::{
    error::Result,
    fke::{define_fke, Params},
    selftest::Algorithm,
};

/// The default and largest number of output bytes produced
/// from one key.
const MAX_CHUNK: usize = 1 << 16;

fn keyed<X: NewXof>(key: Option<&[u8]>) -> X {
    let mut xof = X::new();
    if let Some(key) = key {
        xof.update(key);
    }
    xof
}

pub(crate) struct Shake128Params;

impl Params for Shake128Params {
    const NAME: &'static str = "XDRBG-128";
    const ALGORITHM: Algorithm = Algorithm::Xdrbg128;
    const MAX_CHUNK: usize = MAX_CHUNK;
    const KAT: &'static [u8] = &[
        0x0c, 0x66, 0x45, 0x8a, 0x8a, 0xab, 0x64, 0x95, 0xc4, 0xf9, 0xa8, 0xdd, 0x33, 0xd0, 0x96,
        0x0b, 0x40, 0x97, 0xb3, 0x7b, 0x92, 0x29, 0x51, 0x77, 0x6a, 0x9e, 0x24, 0x5f, 0x55, 0x00,
        0xa1, 0x74, 0x3c, 0x8e, 0x20, 0x97, 0x72, 0xfb, 0x15, 0xbc, 0xb5, 0xbd, 0xfc, 0xd7, 0x75,
        0x25, 0xa7, 0x6d, 0xd7, 0x1b, 0x3e, 0x54, 0x80, 0x45, 0x1b, 0x28, 0x56, 0x49, 0x25, 0xf1,
        0x92, 0x8f, 0x6f, 0x89,
    ];

    type Xof = Shake128;

    #[inline]
    fn seed_xof(key: Option<&[u8]>) -> Self::Xof {
        keyed(key)
    }

    #[inline]
    fn generate_xof(key: &[u8]) -> Self::Xof {
        keyed(Some(key))
    }
}

pub(crate) struct Shake256Params;

impl Params for Shake256Params {
    const NAME: &'static str = "XDRBG-256";
    const ALGORITHM: Algorithm = Algorithm::Xdrbg256;
    const MAX_CHUNK: usize = MAX_CHUNK;
    const KAT: &'static [u8] = &[
        0x1a, 0xd2, 0xcb, 0x76, 0x3c, 0x71, 0x6d, 0xf0, 0x79, 0x2c, 0xc0, 0x69, 0x7d, 0x56, 0x6a,
        0x65, 0xb8, 0x36, 0xbe, 0x7d, 0x09, 0x12, 0x7c, 0x65, 0x47, 0xfc, 0x30, 0x58, 0xaa, 0x24,
        0x39, 0x52, 0x29, 0xea, 0xce, 0x43, 0xdf, 0x16, 0x2c, 0x4f, 0x1a, 0xed, 0xbd, 0x3f, 0xf5,
        0x8e, 0xe6, 0x4d, 0x93, 0x07, 0x3d, 0x7f, 0x3d, 0xd2, 0x50, 0x3c, 0xae, 0x04, 0x4a, 0x87,
        0x2c, 0x90, 0x30, 0xd4,
    ];

    type Xof = Shake256;

    #[inline]
    fn seed_xof(key: Option<&[u8]>) -> Self::Xof {
        keyed(key)
    }

    #[inline]
    fn generate_xof(key: &[u8]) -> Self::Xof {
        keyed(Some(key))
    }
}

define_fke! {
    /// XDRBG-128: XDRBG over SHAKE128 with a 32-byte key.
    Xdrbg128, Shake128Params, 32
}

define_fke! {
    /// XDRBG-256: XDRBG over SHAKE256 with a 64-byte key.
    ///
    /// # Example
    ///
    /// ```
    /// use fke_drng::{Drng, Xdrbg256};
    ///
    /// let mut drng = Xdrbg256::from_seed(b"entropy from somewhere", b"pers")?;
    /// let mut out = [0u8; 32];
    /// drng.generate(b"", &mut out)?;
    /// # Ok::<(), fke_drng::Error>(())
    /// ```
    Xdrbg256, Shake256Params, 64
}

macro_rules! chunk_size_impl {
    ($name:ident) => {
        impl $name {
            /// Sets the number of output bytes produced from one
            /// key before the key is replaced.
            ///
            /// Returns [`Error::OutOfRange`][crate::Error::OutOfRange]
            /// if `chunk` is zero or larger than
            /// [`Self::MAX_CHUNK`].
            pub fn with_chunk_size(mut self, chunk: usize) -> Result<Self> {
                self.0.set_chunk_size(chunk)?;
                Ok(self)
            }

            /// Returns the current chunk size.
            pub const fn chunk_size(&self) -> usize {
                self.0.chunk_size()
            }
        }
    };
}
chunk_size_impl!(Xdrbg128);
chunk_size_impl!(Xdrbg256);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{drng::Drng, error::Error, fke::Fke, test_drng};

    test_drng!(xdrbg128, Xdrbg128);
    test_drng!(xdrbg256, Xdrbg256);

    const SEED: [u8; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn test_xdrbg256_generate_with_addtl() {
        let want = hex::decode("bb0c34f914ed4e49873a5fbbf93da9fcf988865b0a5103a3edda430a0ca3105c")
            .expect("valid hex");

        let mut d = Xdrbg256::from_seed(&SEED, &[]).expect("seed");
        let first = d.bytes::<64>(&[]).expect("generate");
        assert_eq!(first[..], Shake256Params::KAT[..]);
        let got = d.bytes::<32>(b"addtl").expect("generate");
        assert_eq!(got[..], want[..]);
    }

    #[test]
    fn test_xdrbg256_reseed() {
        let want = hex::decode("bc4486fcc78a1d715464e8abd5b8da8e32a0b7f56c8fb7dc00dc88422184e254")
            .expect("valid hex");

        let mut d = Xdrbg256::from_seed(&SEED, &[]).expect("seed");
        d.seed(&[0xff; 4], b"pers").expect("reseed");
        let got = d.bytes::<32>(&[]).expect("generate");
        assert_eq!(got[..], want[..]);
    }

    #[test]
    fn test_xdrbg128_known_answer() {
        let mut d = Xdrbg128::from_seed(&SEED, &[]).expect("seed");
        let got = d.bytes::<64>(&[]).expect("generate");
        assert_eq!(got[..], Shake128Params::KAT[..]);
    }

    /// Each chunk replaces the key, so splitting the output
    /// differently changes it.
    #[test]
    fn test_chunk_size_changes_output() {
        let mut a = Xdrbg256::from_seed(&SEED, &[]).expect("seed");
        let mut b = Xdrbg256::from_seed(&SEED, &[])
            .expect("seed")
            .with_chunk_size(16)
            .expect("chunk size");
        assert_eq!(b.chunk_size(), 16);

        let x = a.bytes::<64>(&[]).expect("generate");
        let y = b.bytes::<64>(&[]).expect("generate");
        assert_eq!(x[..16], y[..16]);
        assert_ne!(x[16..], y[16..]);
    }

    #[test]
    fn test_chunk_size_out_of_range() {
        for chunk in [0, MAX_CHUNK + 1] {
            let err = Xdrbg128::new()
                .with_chunk_size(chunk)
                .expect_err("should be out of range");
            assert_eq!(err, Error::OutOfRange("chunk size"));
        }
        let d = Xdrbg128::new().with_chunk_size(MAX_CHUNK).expect("max");
        assert_eq!(d.chunk_size(), Xdrbg128::MAX_CHUNK);
    }

    /// The key is replaced before any output is released and
    /// is never equal to released output. Knowing the new key
    /// does not give back the output it replaced.
    #[test]
    fn test_key_replaced_before_output() {
        let mut d = Xdrbg256::from_seed(&SEED, &[]).expect("seed");
        let before = *d.0.key();
        let out = d.bytes::<64>(&[]).expect("generate");
        let after = *d.0.key();
        assert_ne!(before, after);
        assert_ne!(out, after);

        // The old key alone reproduces the call...
        let mut old = Xdrbg256(Fke::from_key(before));
        assert_eq!(old.bytes::<64>(&[]).expect("generate"), out);
        assert_eq!(*old.0.key(), after);

        // ...but the new key only moves forward.
        let mut new = Xdrbg256(Fke::from_key(after));
        let next = new.bytes::<64>(&[]).expect("generate");
        assert_ne!(next, out);
        assert_eq!(next, d.bytes::<64>(&[]).expect("generate"));
    }
}
