//! KMACXOF256 per NIST [SP 800-185].
//!
//! [SP 800-185]: https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-185.pdf

use core::fmt;

use sha3::{
    digest::{core_api::CoreWrapper, ExtendableOutput, Update},
    CShake256Core,
};
use sha3_utils::{bytepad_blocks, encode_string, right_encode};

use crate::{
    xof::{KeyedXof, Xof, XofReader},
    zeroize::{wipe_flat, ZeroizeOnDrop},
};

/// The rate in bytes of cSHAKE256.
const RATE: usize = 136;

/// KMACXOF256: KMAC256 with arbitrary-length output.
///
/// Keys of at least [`Self::MIN_KEY_SIZE`] bytes go through
/// [`sha3_kmac::KmacXof256`]. That crate refuses shorter keys,
/// but SP 800-185 allows them (KMAC-DRNG seeds its first key
/// with an empty one), so those are absorbed into cSHAKE256
/// directly.
#[derive(Clone)]
pub struct KmacXof256 {
    inner: Inner,
}

#[derive(Clone)]
enum Inner {
    Kmac(sha3_kmac::KmacXof256),
    ShortKey(sha3::CShake256),
}

impl KmacXof256 {
    /// The smallest key [`sha3_kmac`] accepts.
    pub const MIN_KEY_SIZE: usize = sha3_kmac::KmacXof256::MIN_KEY_SIZE;

    /// Creates a KMACXOF256 instance with the key `key` and
    /// customization string `s`.
    pub fn new(key: &[u8], s: &[u8]) -> Self {
        let inner = match sha3_kmac::KmacXof256::new(key, s) {
            Ok(kmac) => Inner::Kmac(kmac),
            Err(sha3_kmac::InvalidLength) => Inner::ShortKey(short_key(key, s)),
        };
        Self { inner }
    }
}

/// `cSHAKE256(bytepad(encode_string(K), 136) || ..., "KMAC", S)`
/// for keys below [`KmacXof256::MIN_KEY_SIZE`].
fn short_key(key: &[u8], s: &[u8]) -> sha3::CShake256 {
    let mut cshake = CoreWrapper::from_core(CShake256Core::new_with_function_name(b"KMAC", s));
    let (head, mid, tail) = bytepad_blocks::<RATE>(encode_string(key));
    cshake.update(&head);
    for block in mid {
        cshake.update(block);
    }
    if let Some(tail) = tail {
        cshake.update(&tail);
    }
    cshake
}

impl Xof for KmacXof256 {
    const NAME: &'static str = "KMACXOF256";
    const RATE: usize = RATE;

    type Reader = KmacXof256Reader;

    #[inline]
    fn update(&mut self, data: &[u8]) {
        match &mut self.inner {
            Inner::Kmac(kmac) => kmac.update(data),
            Inner::ShortKey(cshake) => cshake.update(data),
        }
    }

    #[inline]
    fn finalize_xof(self) -> Self::Reader {
        // `self` is wiped when it drops, so finalize a copy.
        let reader = match self.inner.clone() {
            Inner::Kmac(kmac) => kmac.finalize_xof(),
            Inner::ShortKey(mut cshake) => {
                cshake.update(right_encode(0).as_bytes());
                cshake.finalize_xof()
            }
        };
        KmacXof256Reader { reader }
    }
}

impl KeyedXof for KmacXof256 {
    #[inline]
    fn new_keyed(key: &[u8], s: &[u8]) -> Self {
        Self::new(key, s)
    }
}

impl ZeroizeOnDrop for KmacXof256 {}
impl Drop for KmacXof256 {
    fn drop(&mut self) {
        match &mut self.inner {
            // SAFETY: both variants hold a Keccak sponge and a
            // block buffer of integers, so all-zero is valid.
            Inner::Kmac(kmac) => unsafe { wipe_flat(kmac) },
            // SAFETY: see above.
            Inner::ShortKey(cshake) => unsafe { wipe_flat(cshake) },
        }
    }
}

impl fmt::Debug for KmacXof256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KmacXof256").finish_non_exhaustive()
    }
}

/// An [`XofReader`] for [`KmacXof256`].
pub struct KmacXof256Reader {
    reader: sha3::CShake256Reader,
}

impl XofReader for KmacXof256Reader {
    #[inline]
    fn read(&mut self, out: &mut [u8]) {
        sha3::digest::XofReader::read(&mut self.reader, out);
    }
}

impl ZeroizeOnDrop for KmacXof256Reader {}
impl Drop for KmacXof256Reader {
    fn drop(&mut self) {
        // SAFETY: the reader is plain integer data and is never
        // read again after this point.
        unsafe { wipe_flat(&mut self.reader) }
    }
}

impl fmt::Debug for KmacXof256Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KmacXof256Reader").finish_non_exhaustive()
    }
}
