//! ChaCha20-DRNG.
//!
//! The state is a ChaCha20 state: a 32-byte key, a 32-bit
//! block counter and a 96-bit nonce. Output is raw ChaCha20
//! keystream. After every request the key is replaced with
//! unused keystream and the nonce is incremented, per RFC 8439
//! section 4.
//!
//! Seed material is XORed into the key 32 bytes at a time, each
//! piece followed by a key update.

use core::fmt;

use fke_core::{
    chacha20::{self, BLOCK_SIZE, KEY_SIZE},
    timecop, xor_into,
    zeroize::{Zeroize, ZeroizeOnDrop},
};
use tracing::{debug, trace};

use crate::{
    drng::Drng,
    error::Result,
    selftest::{self, Algorithm},
    util::{debug as unsafe_debug, Hex},
};

const KEY_WORDS: usize = KEY_SIZE / 4;
const BLOCK_WORDS: usize = BLOCK_SIZE / 4;

/// The first 32 bytes of keystream from the all-zero state.
const SELFTEST: [u8; 32] = [
    0x76, 0xb8, 0xe0, 0xad, 0xa0, 0xf1, 0x3d, 0x90, 0x40, 0x5d, 0x6a, 0xe5, 0x53, 0x86, 0xbd,
    0x28, 0xbd, 0xd2, 0x19, 0xb8, 0xa0, 0x8d, 0xed, 0x1a, 0xa8, 0x36, 0xef, 0xcc, 0x8b, 0x77,
    0x0d, 0xc7,
];

/// ChaCha20-DRNG.
pub struct ChaCha20Drng {
    key: [u8; KEY_SIZE],
    /// Word 0 is the block counter, words 1..4 are the nonce.
    counter: [u32; 4],
    seeded: bool,
}

impl ChaCha20Drng {
    /// Writes the next keystream block to `out` and advances
    /// the block counter.
    fn block(&mut self, out: &mut [u8; BLOCK_SIZE]) {
        chacha20::block(&self.key, &self.counter, out);
        self.counter[0] = self.counter[0].wrapping_add(1);
    }

    /// Replaces the key with keystream that was not handed out.
    ///
    /// `used` is the number of words of `buf` that were
    /// released. If fewer than [`KEY_WORDS`] words remain, a
    /// fresh block is used instead.
    fn update(&mut self, buf: &[u8; BLOCK_SIZE], used: usize) {
        if used > BLOCK_WORDS - KEY_WORDS {
            let mut tmp = [0u8; BLOCK_SIZE];
            self.block(&mut tmp);
            xor_into(&mut self.key, &tmp[..KEY_SIZE]);
            tmp.zeroize();
        } else {
            let start = used.saturating_mul(4);
            if let Some(rest) = buf.get(start..start.saturating_add(KEY_SIZE)) {
                xor_into(&mut self.key, rest);
            }
        }

        // The block counter is left alone: its start value is
        // unspecified.
        let [_, n0, n1, n2] = &mut self.counter;
        *n0 = n0.wrapping_add(1);
        if *n0 == 0 {
            *n1 = n1.wrapping_add(1);
            if *n1 == 0 {
                *n2 = n2.wrapping_add(1);
            }
        }
    }

    /// XORs `data` into the key 32 bytes at a time.
    fn absorb(&mut self, data: &[u8]) {
        const UNUSED: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];
        for piece in data.chunks(KEY_SIZE) {
            xor_into(&mut self.key, piece);
            self.update(&UNUSED, BLOCK_WORDS);
        }
    }

    fn seed_unchecked(&mut self, seed: &[u8], pers: &[u8]) {
        timecop::poison(seed);
        if self.seeded {
            debug!(drng = Self::NAME, "reseeding");
        } else {
            debug!(drng = Self::NAME, "instantiating");
        }
        self.seeded = true;

        self.absorb(seed);
        self.absorb(pers);

        unsafe_debug!("{} key: {}", Self::NAME, Hex(&self.key));
    }

    fn generate_unchecked(&mut self, addtl: &[u8], out: &mut [u8]) {
        if !self.seeded {
            debug!(drng = Self::NAME, "generating from an unseeded state");
        }
        trace!(drng = Self::NAME, len = out.len(), "generating");

        self.absorb(addtl);

        let mut buf = [0u8; BLOCK_SIZE];
        let mut used = BLOCK_WORDS;
        for chunk in out.chunks_mut(BLOCK_SIZE) {
            self.block(&mut buf);
            let n = chunk.len();
            chunk.copy_from_slice(&buf[..n]);
            if n < BLOCK_SIZE {
                used = n.div_ceil(4);
            }
        }
        self.update(&buf, used);
        buf.zeroize();

        timecop::unpoison(out);
    }

    fn selftest() -> bool {
        let mut drng = Self::new();
        let mut got = [0u8; SELFTEST.len()];
        drng.generate_unchecked(&[], &mut got);
        got == SELFTEST
    }
}

impl Drng for ChaCha20Drng {
    const NAME: &'static str = "ChaCha20-DRNG";

    #[inline]
    fn new() -> Self {
        Self {
            key: [0u8; KEY_SIZE],
            counter: [0; 4],
            seeded: false,
        }
    }

    fn seed(&mut self, seed: &[u8], pers: &[u8]) -> Result<()> {
        selftest::run(Algorithm::ChaCha20Drng, Self::selftest)?;
        self.seed_unchecked(seed, pers);
        Ok(())
    }

    fn generate(&mut self, addtl: &[u8], out: &mut [u8]) -> Result<()> {
        selftest::run(Algorithm::ChaCha20Drng, Self::selftest)?;
        self.generate_unchecked(addtl, out);
        Ok(())
    }

    fn zero(&mut self) {
        self.key.zeroize();
        self.counter.zeroize();
        self.seeded = false;
    }

    #[inline]
    fn is_seeded(&self) -> bool {
        self.seeded
    }
}

impl Default for ChaCha20Drng {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ZeroizeOnDrop for ChaCha20Drng {}
impl Drop for ChaCha20Drng {
    fn drop(&mut self) {
        self.zero();
    }
}

impl fmt::Debug for ChaCha20Drng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChaCha20Drng")
            .field("seeded", &self.seeded)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_drng;

    test_drng!(chacha20_drng, ChaCha20Drng);

    const SEED: [u8; 9] = [0, 1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn test_zero_state() {
        let mut d = ChaCha20Drng::new();
        let got = d.bytes::<32>(&[]).expect("generate");
        assert_eq!(got, SELFTEST);
        assert!(ChaCha20Drng::selftest());
    }

    #[test]
    fn test_known_answer() {
        let want1 = hex::decode(
            "c413102cb6c583fc79e8600049dc844e643c7d02d9790a3087ef52866d7c9b41\
             47bef5b91e62f8247df6e75484e554fc733c650aab54b1b7856b51a3e501307f\
             a9e062485c4455404f2140b7ff9d6189dfddfe0852a12de5e3fcc53de88007fe\
             01a4151f",
        )
        .expect("valid hex");
        let want2 = hex::decode("0c6354eb084ce9f1a7af1e4461b57bb9").expect("valid hex");

        let mut d = ChaCha20Drng::from_seed(&SEED, &[]).expect("seed");
        let got = d.bytes::<100>(&[]).expect("generate");
        assert_eq!(got[..], want1[..]);
        let got = d.bytes::<16>(&[]).expect("generate");
        assert_eq!(got[..], want2[..]);
    }

    /// The update step increments the nonce and carries into
    /// the upper words, but never touches the block counter.
    #[test]
    fn test_update_counters() {
        let mut d = ChaCha20Drng::new();
        d.counter = [7, u32::MAX, u32::MAX, 0];
        d.update(&[0u8; BLOCK_SIZE], 0);
        assert_eq!(d.counter, [7, 0, 0, 1]);

        d.update(&[0u8; BLOCK_SIZE], 8);
        assert_eq!(d.counter, [7, 1, 0, 1]);

        // A fresh block advances the block counter.
        d.update(&[0u8; BLOCK_SIZE], BLOCK_WORDS);
        assert_eq!(d.counter, [8, 2, 0, 1]);
    }

    /// With a partial block of `4*used` bytes the key absorbs
    /// the eight words that follow.
    #[test]
    fn test_update_uses_unreleased_words() {
        let buf: [u8; BLOCK_SIZE] = core::array::from_fn(|i| i as u8);
        for used in [0, 1, 8] {
            let mut d = ChaCha20Drng::new();
            d.update(&buf, used);
            assert_eq!(d.key[..], buf[used * 4..used * 4 + KEY_SIZE], "used = {used}");
        }
    }

    #[test]
    fn test_empty_generate_updates_key() {
        let mut d = ChaCha20Drng::from_seed(&SEED, &[]).expect("seed");
        let before = d.key;
        d.generate(&[], &mut []).expect("generate");
        assert_ne!(before, d.key);
    }

    #[test]
    fn test_zero_resets_counters() {
        let mut d = ChaCha20Drng::from_seed(&SEED, &[]).expect("seed");
        d.bytes::<200>(&[]).expect("generate");
        d.zero();
        assert_eq!(d.key, [0u8; KEY_SIZE]);
        assert_eq!(d.counter, [0; 4]);
        assert!(!d.is_seeded());
        assert_eq!(d.bytes::<32>(&[]).expect("generate"), SELFTEST);
    }
}
