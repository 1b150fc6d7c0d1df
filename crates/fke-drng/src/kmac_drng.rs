//! KMAC-DRNG: the KMACXOF256 based fast-key-erasure DRNG.
//!
//! The current key is the KMAC key. Seeding and generating use
//! distinct customization strings so that the two contexts can
//! never produce the same stream.

use fke_core::{sha3::KmacXof256, xof::KeyedXof};

use crate::{
    fke::{define_fke, Params},
    selftest::Algorithm,
    util::const_assert,
};

/// The size in bytes of the KMAC key.
const KEY_SIZE: usize = 64;

/// The number of bytes squeezed from one KMAC context, key
/// included.
const MAX_SQUEEZE: usize = 100 * <KmacXof256 as fke_core::xof::Xof>::RATE;

const_assert!(MAX_SQUEEZE % <KmacXof256 as fke_core::xof::Xof>::RATE == 0);

const SEED_CUSTOMIZATION: &[u8] = b"KMAC-DRNG seed";
const GENERATE_CUSTOMIZATION: &[u8] = b"KMAC-DRNG generate";

pub(crate) struct KmacParams;

impl Params for KmacParams {
    const NAME: &'static str = "KMAC-DRNG";
    const ALGORITHM: Algorithm = Algorithm::KmacDrng;
    const MAX_CHUNK: usize = MAX_SQUEEZE - KEY_SIZE;
    const KAT: &'static [u8] = &[
        0xbc, 0x70, 0xc5, 0xd6, 0xfe, 0xc4, 0x28, 0x23, 0xab, 0x57, 0x92, 0x5e, 0xb7, 0xd5, 0x95,
        0xce, 0x2d, 0x98, 0x3a, 0x47, 0x71, 0x2f, 0x6d, 0x4f, 0x82, 0x29, 0xe8, 0x5c, 0x11, 0x08,
        0x48, 0x32, 0xfb, 0xcc, 0x30, 0x6c, 0xa1, 0x76, 0x45, 0x18, 0x7c, 0x05, 0xc3, 0x73, 0x20,
        0x28, 0xf2, 0x88, 0x7e, 0xe8, 0x60, 0x3c, 0xf9, 0xe8, 0x84, 0xa6, 0x11, 0x1d, 0xa3, 0x92,
        0xe1, 0x8a, 0x98, 0xc1, 0xfb, 0x31, 0xf1, 0xfc, 0x0a, 0x36, 0xab, 0x94, 0xa0, 0x39, 0xb6,
        0x3a, 0xb3, 0xe4, 0x7d, 0xe3, 0x28, 0xb2, 0xd1, 0x10, 0xb8, 0x08, 0x6d, 0xc7, 0xdd, 0xea,
        0x10, 0x3a, 0xe3, 0x41, 0x2c, 0x83, 0xfb, 0x3f, 0xc1, 0x32, 0xfc, 0xa1, 0xdb, 0xcb, 0x2e,
        0xb6, 0x10, 0x9d, 0x17, 0xf3, 0xfc, 0x30, 0x70, 0x23, 0x67, 0x62, 0x1d, 0xc3, 0x4e, 0x63,
        0x8b, 0xc3, 0x26, 0xa2, 0x24, 0x70, 0x90, 0x0e,
    ];

    type Xof = KmacXof256;

    #[inline]
    fn seed_xof(key: Option<&[u8]>) -> Self::Xof {
        KmacXof256::new_keyed(key.unwrap_or_default(), SEED_CUSTOMIZATION)
    }

    #[inline]
    fn generate_xof(key: &[u8]) -> Self::Xof {
        KmacXof256::new_keyed(key, GENERATE_CUSTOMIZATION)
    }
}

define_fke! {
    /// KMAC-DRNG with a 64-byte key.
    ///
    /// At most [`Self::MAX_CHUNK`] bytes of output come from a
    /// single key. Larger requests are split and the key is
    /// replaced before each piece.
    KmacDrng, KmacParams, 64
}
