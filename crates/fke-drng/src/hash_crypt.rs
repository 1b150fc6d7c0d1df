//! hash_crypt: an Encrypt-then-MAC AEAD built from a DRNG and
//! a MAC.
//!
//! The key (and optional IV) seed the DRNG. The DRNG then
//! produces a MAC key the size of the MAC's output followed by
//! the keystream, 64 bytes at a time. The ciphertext is the plaintext XORed with
//! the keystream and the tag is the MAC over the AAD and the
//! ciphertext.
//!
//! ```text
//! seed(DRNG, key, iv)
//! K_auth = generate(DRNG, TAG_SIZE)
//! ct     = pt ^ generate(DRNG, len(pt))
//! tag    = MAC(K_auth, aad || ct)
//! ```
//!
//! # Streaming
//!
//! [`HashCrypt::encrypt`] and [`HashCrypt::decrypt`] may be
//! called any number of times between [`HashCrypt::setkey`]
//! and the final tag operation. The result is the same as a
//! single call over the concatenated data.
//!
//! # Warning
//!
//! [`HashCrypt::decrypt`] writes plaintext before the tag is
//! checked. The plaintext must be discarded if
//! [`HashCrypt::decrypt_authenticate`] fails.

use core::{cmp, fmt, mem};

use fke_core::{
    hmac::Hmac,
    mac::Mac,
    rust::Sha512,
    timecop, xor_into,
    zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing},
};
use tracing::debug;

use crate::{
    drng::Drng,
    error::{Error, Result},
    hash_drbg::HashDrbgSha512,
    selftest::{self, Algorithm},
    util::const_assert,
};

/// The size in bytes of a keystream block.
const KEYSTREAM_BLOCK: usize = 64;

/// The largest supported tag.
pub const MAX_TAG_SIZE: usize = 64;

const_assert!(<Hmac<Sha512> as Mac>::TAG_SIZE <= MAX_TAG_SIZE);
const_assert!(MAX_TAG_SIZE <= KEYSTREAM_BLOCK);

/// hash_crypt with Hash_DRBG-SHA-512 and HMAC-SHA-512.
pub type HashCryptSha512 = HashCrypt<HashDrbgSha512, Hmac<Sha512>>;

/// An Encrypt-then-MAC AEAD over the DRNG `D` and MAC `M`.
///
/// # Example
///
/// ```
/// use fke_drng::HashCryptSha512;
///
/// let key = [0x42u8; 32];
/// let iv = [0x24u8; 16];
/// let pt = b"attack at dawn";
///
/// let mut ct = [0u8; 14];
/// let mut tag = [0u8; 32];
/// let mut enc = HashCryptSha512::new();
/// enc.setkey(&key, &iv)?;
/// enc.encrypt_oneshot(pt, &mut ct, b"header", &mut tag)?;
///
/// let mut got = [0u8; 14];
/// let mut dec = HashCryptSha512::new();
/// dec.setkey(&key, &iv)?;
/// dec.decrypt_oneshot(&ct, &mut got, b"header", &tag)?;
/// assert_eq!(&got, pt);
/// # Ok::<(), fke_drng::Error>(())
/// ```
pub struct HashCrypt<D, M> {
    drbg: D,
    auth: Option<M>,
    keystream: [u8; KEYSTREAM_BLOCK],
    ptr: usize,
}

impl<D: Drng, M: Mac> HashCrypt<D, M> {
    /// Creates an unkeyed cryptor.
    pub fn new() -> Self {
        Self {
            drbg: D::new(),
            auth: None,
            keystream: [0u8; KEYSTREAM_BLOCK],
            ptr: KEYSTREAM_BLOCK,
        }
    }

    /// Keys the cryptor with `key` and the optional `iv`.
    ///
    /// Calling `setkey` again without [`zero`][Self::zero]
    /// reseeds the DRNG, so the result depends on every key
    /// set so far.
    ///
    /// Returns [`Error::InvalidArgument`] if `key` is empty.
    /// Any other failure leaves the cryptor unkeyed, as after
    /// [`zero`][Self::zero].
    pub fn setkey(&mut self, key: &[u8], iv: &[u8]) -> Result<()> {
        selftest::run(Algorithm::HashCrypt, selftest)?;
        self.setkey_unchecked(key, iv)
    }

    fn setkey_unchecked(&mut self, key: &[u8], iv: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(Error::InvalidArgument("empty key"));
        }
        timecop::poison(key);

        if let Err(err) = self.rekey(key, iv) {
            self.zero();
            return Err(err);
        }
        debug!(drng = D::NAME, mac = M::NAME, "keyed");
        Ok(())
    }

    fn rekey(&mut self, key: &[u8], iv: &[u8]) -> Result<()> {
        self.auth = None;
        self.drbg.seed(key, iv)?;

        // The MAC key is one digest's worth of output.
        let mut buf = Zeroizing::new([0u8; MAX_TAG_SIZE]);
        let auth_key = buf
            .get_mut(..M::TAG_SIZE)
            .ok_or(Error::InvalidArgument("MAC output too large"))?;
        self.drbg.generate(&[], auth_key)?;
        self.auth = Some(M::new(auth_key)?);
        drop(buf);

        self.drbg.generate(&[], &mut self.keystream)?;
        self.ptr = 0;
        Ok(())
    }

    fn auth(&mut self) -> Result<&mut M> {
        self.auth
            .as_mut()
            .ok_or(Error::InvalidArgument("key not set"))
    }

    /// Adds associated data to the tag.
    ///
    /// This is both `enc_init` and `dec_init`.
    pub fn add_aad(&mut self, aad: &[u8]) -> Result<()> {
        self.auth()?.update(aad);
        Ok(())
    }

    /// XORs the keystream into `data`, refilling the keystream
    /// block whenever it is exhausted.
    ///
    /// If a refill fails the cryptor is unkeyed, since `data`
    /// is then only partly transformed.
    fn crypt(&mut self, data: &mut [u8]) -> Result<()> {
        let res = self.crypt_inner(data);
        if res.is_err() {
            self.zero();
        }
        res
    }

    fn crypt_inner(&mut self, data: &mut [u8]) -> Result<()> {
        let mut rest = data;
        while !rest.is_empty() {
            if self.ptr >= KEYSTREAM_BLOCK {
                self.drbg.generate(&[], &mut self.keystream)?;
                self.ptr = 0;
            }
            let ks = self.keystream.get(self.ptr..).unwrap_or_default();
            let n = cmp::min(rest.len(), ks.len());
            let (head, tail) = mem::take(&mut rest).split_at_mut(n);
            xor_into(head, ks);
            self.ptr = self.ptr.saturating_add(n);
            rest = tail;
        }
        Ok(())
    }

    /// Encrypts `pt` into `ct` and adds the ciphertext to the
    /// tag.
    ///
    /// `pt` and `ct` must be the same length.
    pub fn encrypt(&mut self, pt: &[u8], ct: &mut [u8]) -> Result<()> {
        if pt.len() != ct.len() {
            return Err(Error::InvalidArgument("plaintext and ciphertext lengths differ"));
        }
        ct.copy_from_slice(pt);
        self.encrypt_in_place(ct)
    }

    /// Encrypts `data` in place and adds the ciphertext to the
    /// tag.
    ///
    /// On error `data` must be discarded and the cryptor must be
    /// keyed again.
    pub fn encrypt_in_place(&mut self, data: &mut [u8]) -> Result<()> {
        // Fail before touching `data` if there is no key.
        self.auth()?;
        self.crypt(data)?;
        self.auth()?.update(data);
        Ok(())
    }

    /// Writes the tag to `tag`.
    ///
    /// `tag` may be shorter than the MAC's output, in which case
    /// it receives a prefix of the full tag. The MAC is then
    /// rekeyed with the same authentication key.
    ///
    /// Returns [`Error::InvalidArgument`] if `tag` is empty or
    /// longer than the MAC's output.
    pub fn encrypt_tag(&mut self, tag: &mut [u8]) -> Result<()> {
        check_tag_len::<M>(tag.len())?;
        let mut full = self.auth()?.tag_reset();
        tag.copy_from_slice(&full.as_ref()[..tag.len()]);
        full.zeroize();
        timecop::unpoison(tag);
        Ok(())
    }

    /// Adds `ct` to the tag and decrypts it into `pt`.
    ///
    /// `ct` and `pt` must be the same length.
    pub fn decrypt(&mut self, ct: &[u8], pt: &mut [u8]) -> Result<()> {
        if pt.len() != ct.len() {
            return Err(Error::InvalidArgument("plaintext and ciphertext lengths differ"));
        }
        pt.copy_from_slice(ct);
        self.decrypt_in_place(pt)
    }

    /// Adds `data` to the tag and decrypts it in place.
    ///
    /// On error `data` must be discarded and the cryptor must be
    /// keyed again.
    pub fn decrypt_in_place(&mut self, data: &mut [u8]) -> Result<()> {
        self.auth()?.update(data);
        self.crypt(data)
    }

    /// Checks `tag` against the tag computed so far, in
    /// constant time.
    ///
    /// Returns [`Error::InvalidArgument`] if `tag` is empty or
    /// longer than the MAC's output and
    /// [`Error::Authentication`] if it does not match.
    pub fn decrypt_authenticate(&mut self, tag: &[u8]) -> Result<()> {
        check_tag_len::<M>(tag.len())?;
        self.auth()?
            .verify(tag)
            .map_err(|_| Error::Authentication)
    }

    /// Adds `aad`, encrypts `pt` into `ct`, and writes the tag.
    pub fn encrypt_oneshot(
        &mut self,
        pt: &[u8],
        ct: &mut [u8],
        aad: &[u8],
        tag: &mut [u8],
    ) -> Result<()> {
        self.add_aad(aad)?;
        self.encrypt(pt, ct)?;
        self.encrypt_tag(tag)
    }

    /// Adds `aad`, decrypts `ct` into `pt`, and checks the tag.
    ///
    /// `pt` must be discarded if this returns an error.
    pub fn decrypt_oneshot(
        &mut self,
        ct: &[u8],
        pt: &mut [u8],
        aad: &[u8],
        tag: &[u8],
    ) -> Result<()> {
        self.add_aad(aad)?;
        self.decrypt(ct, pt)?;
        self.decrypt_authenticate(tag)
    }

    /// Wipes the DRNG, the keystream and the MAC.
    pub fn zero(&mut self) {
        self.drbg.zero();
        self.keystream.zeroize();
        self.ptr = KEYSTREAM_BLOCK;
        self.auth = None;
    }
}

fn check_tag_len<M: Mac>(len: usize) -> Result<()> {
    if len == 0 {
        Err(Error::InvalidArgument("empty tag"))
    } else if len > M::TAG_SIZE || len > MAX_TAG_SIZE {
        Err(Error::InvalidArgument("tag too long"))
    } else {
        Ok(())
    }
}

impl<D: Drng, M: Mac> Default for HashCrypt<D, M> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<D, M> ZeroizeOnDrop for HashCrypt<D, M> {}
impl<D, M> Drop for HashCrypt<D, M> {
    fn drop(&mut self) {
        // `drbg` and `auth` wipe themselves.
        self.keystream.zeroize();
    }
}

impl<D: Drng, M: Mac> fmt::Debug for HashCrypt<D, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashCrypt")
            .field("drng", &D::NAME)
            .field("mac", &M::NAME)
            .field("keyed", &self.auth.is_some())
            .finish_non_exhaustive()
    }
}

const KAT_INPUT: [u8; 64] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2a, 0x2b, 0x2c,
    0x2d, 0x2e, 0x2f, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x3b,
    0x3c, 0x3d, 0x3e, 0x3f,
];

const KAT_CT: [u8; 64] = [
    0x5d, 0xe0, 0xac, 0xbc, 0xca, 0x5e, 0xb7, 0x7c, 0x8b, 0x4e, 0xf0, 0x3a, 0xcc, 0x46, 0xe1,
    0x8b, 0x9e, 0x8c, 0x12, 0x8e, 0xd0, 0xbe, 0x61, 0xd7, 0xe7, 0xeb, 0x55, 0x5b, 0x1c, 0x96,
    0xbe, 0xd5, 0xe4, 0x2e, 0x4f, 0xd4, 0x42, 0x9d, 0xa0, 0x73, 0x63, 0x0f, 0x05, 0x5b, 0x90,
    0x21, 0x89, 0xb7, 0x1b, 0x97, 0xde, 0x93, 0x38, 0x41, 0x17, 0xe9, 0xc7, 0x52, 0xb5, 0x84,
    0x1c, 0x71, 0x01, 0x0c,
];

const KAT_TAG: [u8; 64] = [
    0xdf, 0xcd, 0x29, 0x7a, 0x28, 0x82, 0x78, 0xfa, 0xfe, 0x14, 0x36, 0x36, 0xae, 0x60, 0x4b,
    0xcb, 0xac, 0x89, 0x92, 0xa7, 0x0e, 0xa8, 0x53, 0xbe, 0x00, 0x02, 0x92, 0x22, 0x20, 0x65,
    0x77, 0x0e, 0xe9, 0xb4, 0x94, 0x74, 0xdb, 0xab, 0xaa, 0x53, 0xdc, 0xff, 0x2f, 0x59, 0x1a,
    0xc9, 0x38, 0xb1, 0xad, 0x33, 0x27, 0x69, 0x77, 0x48, 0xcd, 0xbd, 0x88, 0x72, 0xbe, 0xe0,
    0x7c, 0xca, 0x3e, 0xb8,
];

/// Encrypts and decrypts the known answer with
/// [`HashCryptSha512`].
fn selftest() -> bool {
    let mut hc = HashCryptSha512::new();
    let mut ct = [0u8; KAT_CT.len()];
    let mut tag = [0u8; KAT_TAG.len()];
    let encrypted = hc
        .setkey_unchecked(&KAT_INPUT, &[])
        .and_then(|()| hc.encrypt_oneshot(&KAT_INPUT, &mut ct, &KAT_INPUT, &mut tag));
    if encrypted.is_err() || ct != KAT_CT || tag != KAT_TAG {
        return false;
    }

    hc.zero();
    let mut pt = [0u8; KAT_INPUT.len()];
    let decrypted = hc
        .setkey_unchecked(&KAT_INPUT, &[])
        .and_then(|()| hc.decrypt_oneshot(&ct, &mut pt, &KAT_INPUT, &tag));
    decrypted.is_ok() && pt == KAT_INPUT
}
