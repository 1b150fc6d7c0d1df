//! Hash_DRBG per NIST [SP 800-90A] section 10.1.1.
//!
//! [SP 800-90A]: https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-90Ar1.pdf

use core::{fmt, marker::PhantomData};

use fke_core::{
    hash::Hash,
    rust::{Sha256, Sha512},
    timecop,
    zeroize::{Zeroize, ZeroizeOnDrop},
};
use tracing::{debug, trace};

use crate::{
    drng::Drng,
    error::{Error, Result},
    selftest::{self, Algorithm},
    util::{const_assert, debug as unsafe_debug, Hex},
};

/// The largest `seedlen` of any supported hash.
const MAX_SEED_LEN: usize = 111;

/// The maximum number of bytes per generate request.
const MAX_REQUEST: usize = 1 << 16;

/// The reseed interval.
const MAX_RESEED_COUNTER: u64 = 1 << 48;

/// A [`Hash`] that can drive a [`HashDrbg`].
pub trait DrbgHash: Hash {
    /// `seedlen` in bytes from SP 800-90A table 2.
    const SEED_LEN: usize;

    #[doc(hidden)]
    const ALGORITHM: Algorithm;

    #[doc(hidden)]
    const KAT: Kat;
}

/// A known answer for [`DrbgHash`].
#[doc(hidden)]
#[derive(Debug)]
pub struct Kat {
    seed: &'static [u8],
    expected: &'static [u8],
}

const KAT_SEED: [u8; 64] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2a, 0x2b, 0x2c,
    0x2d, 0x2e, 0x2f, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x3b,
    0x3c, 0x3d, 0x3e, 0x3f,
];

impl DrbgHash for Sha256 {
    const SEED_LEN: usize = 55;
    const ALGORITHM: Algorithm = Algorithm::HashDrbgSha256;
    const KAT: Kat = Kat {
        seed: &[0, 1, 2, 3, 4, 5, 6, 7, 8],
        expected: &[
            0x6e, 0x99, 0x77, 0x3b, 0xac, 0xb8, 0xdc, 0x53, 0xfd, 0xd3, 0x77, 0x68, 0xe8, 0x82,
            0xbd, 0x97, 0x19, 0xff, 0x19, 0xa1, 0x2d, 0xe6, 0xfb, 0xb0, 0x58, 0xec, 0xbf, 0x49,
            0xec, 0x52, 0x90, 0x52, 0xef, 0xd1, 0x06, 0x07, 0x08, 0x3d, 0xbb, 0xe3, 0x69, 0xa3,
            0x21, 0x09, 0x62, 0xb2, 0xd9, 0xbe,
        ],
    };
}

impl DrbgHash for Sha512 {
    const SEED_LEN: usize = 111;
    const ALGORITHM: Algorithm = Algorithm::HashDrbgSha512;
    const KAT: Kat = Kat {
        seed: &KAT_SEED,
        expected: &[
            0x3b, 0xb8, 0x22, 0x8b, 0x71, 0x04, 0xd7, 0x5c, 0xd7, 0x9c, 0xd6, 0x27, 0x2d, 0x43,
            0x7e, 0xa4, 0x88, 0x24, 0x9e, 0x8e, 0x41, 0xfb, 0x43, 0x0a, 0x98, 0x80, 0xcc, 0x5d,
            0x29, 0x52, 0xc2, 0xfe, 0x92, 0xf5, 0xe2, 0x54, 0xaf, 0x9d, 0x15, 0x10, 0x83, 0x8f,
            0x83, 0xc4, 0xc0, 0xb7, 0x7e, 0xf4, 0xf3, 0x10, 0x2d, 0x20, 0x17, 0x3f, 0x8a, 0xa2,
            0xea, 0x98, 0x1d, 0x3e, 0x25, 0xf6, 0x30, 0x5c,
        ],
    };
}

const_assert!(<Sha256 as DrbgHash>::SEED_LEN <= MAX_SEED_LEN);
const_assert!(<Sha512 as DrbgHash>::SEED_LEN <= MAX_SEED_LEN);

/// Hash_DRBG-SHA-256.
pub type HashDrbgSha256 = HashDrbg<Sha256>;

/// Hash_DRBG-SHA-512.
pub type HashDrbgSha512 = HashDrbg<Sha512>;

/// Hash_DRBG over the hash `H`.
pub struct HashDrbg<H> {
    v: [u8; MAX_SEED_LEN],
    c: [u8; MAX_SEED_LEN],
    reseed_counter: u64,
    seeded: bool,
    _hash: PhantomData<H>,
}

impl<H: DrbgHash> HashDrbg<H> {
    /// Returns the number of generate requests since the last
    /// (re)seed, plus one.
    pub const fn reseed_counter(&self) -> u64 {
        self.reseed_counter
    }

    fn seed_unchecked(&mut self, seed: &[u8], pers: &[u8]) {
        timecop::poison(seed);

        let n = H::SEED_LEN;
        let mut tmp = [0u8; MAX_SEED_LEN];
        if self.seeded {
            debug!(drng = Self::NAME, "reseeding");
            // V = Hash_df(0x01 || V || seed || pers)
            hash_df::<H>(&[&[0x01], &self.v[..n], seed, pers], &mut tmp[..n]);
        } else {
            debug!(drng = Self::NAME, "instantiating");
            // V = Hash_df(seed || pers)
            hash_df::<H>(&[seed, pers], &mut tmp[..n]);
        }
        self.v[..n].copy_from_slice(&tmp[..n]);
        tmp.zeroize();

        // C = Hash_df(0x00 || V)
        hash_df::<H>(&[&[0x00], &self.v[..n]], &mut self.c[..n]);

        self.reseed_counter = 1;
        self.seeded = true;

        unsafe_debug!("{} V: {}", Self::NAME, Hex(&self.v[..n]));
    }

    fn generate_unchecked(&mut self, addtl: &[u8], out: &mut [u8]) -> Result<()> {
        if !self.seeded {
            debug!(drng = Self::NAME, "generating from an unseeded state");
        }
        trace!(drng = Self::NAME, len = out.len(), "generating");

        for chunk in out.chunks_mut(MAX_REQUEST) {
            self.generate_request(addtl, chunk)?;
        }
        timecop::unpoison(out);
        Ok(())
    }

    /// A single SP 800-90A generate request.
    fn generate_request(&mut self, addtl: &[u8], out: &mut [u8]) -> Result<()> {
        if self.reseed_counter > MAX_RESEED_COUNTER {
            return Err(Error::Overflow);
        }

        let n = H::SEED_LEN;
        let v = &mut self.v[..n];

        if !addtl.is_empty() {
            // w = Hash(0x02 || V || addtl), V = V + w
            let w = H::hash_multi([&[0x02][..], &*v, addtl]);
            add_be(v, w.as_ref());
        }

        // Hashgen
        let mut data = [0u8; MAX_SEED_LEN];
        let data = &mut data[..n];
        data.copy_from_slice(v);
        for chunk in out.chunks_mut(H::DIGEST_SIZE) {
            let d = H::hash(data);
            chunk.copy_from_slice(&d.as_ref()[..chunk.len()]);
            add_be(data, &[1]);
        }
        data.zeroize();

        // V = V + Hash(0x03 || V) + C + reseed_counter
        let h = H::hash_multi([&[0x03][..], &*v]);
        add_be(v, h.as_ref());
        add_be(v, &self.c[..n]);
        add_be(v, &self.reseed_counter.to_be_bytes());
        self.reseed_counter = self.reseed_counter.wrapping_add(1);

        Ok(())
    }

    fn selftest() -> bool {
        let kat = &H::KAT;
        let mut drng = Self::new();
        drng.seed_unchecked(kat.seed, &[]);
        let mut buf = [0u8; 64];
        let Some(got) = buf.get_mut(..kat.expected.len()) else {
            return false;
        };
        let ok = drng.generate_unchecked(&[], got).is_ok() && got == kat.expected;
        buf.zeroize();
        ok
    }
}

impl<H: DrbgHash> Drng for HashDrbg<H> {
    const NAME: &'static str = H::ALGORITHM.name();

    #[inline]
    fn new() -> Self {
        Self {
            v: [0u8; MAX_SEED_LEN],
            c: [0u8; MAX_SEED_LEN],
            reseed_counter: 1,
            seeded: false,
            _hash: PhantomData,
        }
    }

    fn seed(&mut self, seed: &[u8], pers: &[u8]) -> Result<()> {
        selftest::run(H::ALGORITHM, Self::selftest)?;
        self.seed_unchecked(seed, pers);
        Ok(())
    }

    fn generate(&mut self, addtl: &[u8], out: &mut [u8]) -> Result<()> {
        selftest::run(H::ALGORITHM, Self::selftest)?;
        self.generate_unchecked(addtl, out)
    }

    fn zero(&mut self) {
        self.v.zeroize();
        self.c.zeroize();
        self.reseed_counter = 1;
        self.seeded = false;
    }

    #[inline]
    fn is_seeded(&self) -> bool {
        self.seeded
    }
}

impl<H: DrbgHash> Default for HashDrbg<H> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<H> ZeroizeOnDrop for HashDrbg<H> {}
impl<H> Drop for HashDrbg<H> {
    fn drop(&mut self) {
        self.v.zeroize();
        self.c.zeroize();
    }
}

impl<H: DrbgHash> fmt::Debug for HashDrbg<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashDrbg")
            .field("hash", &H::NAME)
            .field("seeded", &self.seeded)
            .field("reseed_counter", &self.reseed_counter)
            .finish_non_exhaustive()
    }
}

/// Hash_df per SP 800-90A section 10.3.1.
///
/// Fills `out` with
/// `Hash(counter || bits(out) || inputs...)` for
/// `counter = 1, 2, ...`.
fn hash_df<H: Hash>(inputs: &[&[u8]], out: &mut [u8]) {
    // `out` is at most `MAX_SEED_LEN` bytes.
    #[allow(clippy::cast_possible_truncation)]
    let nbits = (out.len() as u32).wrapping_mul(8).to_be_bytes();
    for (i, chunk) in out.chunks_mut(H::DIGEST_SIZE).enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let counter = (i as u8).wrapping_add(1);
        let mut h = H::new();
        h.update(&[counter]);
        h.update(&nbits);
        for input in inputs {
            h.update(input);
        }
        let d = h.digest();
        chunk.copy_from_slice(&d.as_ref()[..chunk.len()]);
    }
}

/// Computes `dst = (dst + src) mod 2^(8*len(dst))` where both
/// are big endian and `src` is no longer than `dst`.
fn add_be(dst: &mut [u8], src: &[u8]) {
    let mut carry = 0u16;
    let mut src = src.iter().rev();
    for d in dst.iter_mut().rev() {
        let s = src.next().copied().unwrap_or(0);
        let sum = u16::from(*d)
            .wrapping_add(u16::from(s))
            .wrapping_add(carry);
        *d = sum.to_be_bytes()[1];
        carry = sum >> 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_drng;

    test_drng!(hash_drbg_sha256, HashDrbgSha256);
    test_drng!(hash_drbg_sha512, HashDrbgSha512);

    const SEED: [u8; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn test_add_be() {
        let mut v = [0x00, 0xff, 0xff];
        add_be(&mut v, &[1]);
        assert_eq!(v, [0x01, 0x00, 0x00]);

        let mut v = [0xff, 0xff, 0xff];
        add_be(&mut v, &[0x00, 0x02]);
        assert_eq!(v, [0x00, 0x00, 0x01]);

        let mut v = [0x12, 0x34];
        add_be(&mut v, &[0x01, 0x01]);
        assert_eq!(v, [0x13, 0x35]);
    }

    #[test]
    fn test_selftests() {
        assert!(HashDrbgSha256::selftest());
        assert!(HashDrbgSha512::selftest());
    }

    #[test]
    fn test_sha512_pers() {
        let want = hex::decode(
            "b35cdb7edc3e43278a2e945fb34dd49f542a53cc25b5722491ae315e3a85e1ac\
             01ba80febb0f8867db6a81cf4fa8af5edb04530bff9a1d09f988c9b7d708df87\
             c4a1d2679359adba0fe7d48ec301c49b",
        )
        .expect("valid hex");
        let mut d = HashDrbgSha512::from_seed(&SEED, b"pers").expect("seed");
        let got = d.bytes::<80>(&[]).expect("generate");
        assert_eq!(got[..], want[..]);
    }

    #[test]
    fn test_sha256_addtl() {
        let want = hex::decode("df566ea02f238e13820079979683f0bc4bbd4595502c20f7037754a4036e18da")
            .expect("valid hex");
        let mut d = HashDrbgSha256::from_seed(&SEED, &[]).expect("seed");
        let first = d.bytes::<48>(&[]).expect("generate");
        assert_eq!(first[..], Sha256::KAT.expected[..]);
        assert_eq!(d.reseed_counter(), 2);
        let got = d.bytes::<32>(b"addtl").expect("generate");
        assert_eq!(got[..], want[..]);
        assert_eq!(d.reseed_counter(), 3);
    }

    #[test]
    fn test_sha256_reseed() {
        let want = hex::decode("c32b918837685ca89a316a9ba5f7af222c52e4a163113da81a1e98e23d142535")
            .expect("valid hex");
        let mut d = HashDrbgSha256::from_seed(&SEED, &[]).expect("seed");
        d.seed(&[0xff; 4], b"pers").expect("reseed");
        assert_eq!(d.reseed_counter(), 1);
        let got = d.bytes::<32>(&[]).expect("generate");
        assert_eq!(got[..], want[..]);
    }

    #[test]
    fn test_reseed_counter_overflow() {
        let mut d = HashDrbgSha256::from_seed(&SEED, &[]).expect("seed");
        d.reseed_counter = MAX_RESEED_COUNTER;
        d.bytes::<16>(&[]).expect("last request before reseed");
        let err = d.bytes::<16>(&[]).expect_err("should overflow");
        assert_eq!(err, Error::Overflow);
        assert_eq!(err.errno().code(), libc::EOVERFLOW);

        d.seed(&SEED, &[]).expect("reseed");
        d.bytes::<16>(&[]).expect("generate after reseed");
    }

    /// Requests larger than the per-request limit are split,
    /// each piece advancing the reseed counter.
    #[test]
    fn test_large_request_is_split() {
        let mut d = HashDrbgSha512::from_seed(&SEED, &[]).expect("seed");
        let mut out = vec![0u8; MAX_REQUEST * 2 + 1];
        d.generate(&[], &mut out).expect("generate");
        assert_eq!(d.reseed_counter(), 4);

        let mut e = HashDrbgSha512::from_seed(&SEED, &[]).expect("seed");
        let mut first = vec![0u8; MAX_REQUEST];
        e.generate(&[], &mut first).expect("generate");
        assert_eq!(out[..MAX_REQUEST], first[..]);
    }
}
