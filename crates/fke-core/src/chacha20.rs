//! The raw ChaCha20 block function per [RFC 8439].
//!
//! # Warning
//!
//! This is a low-level module. You should not be using it
//! directly unless you are implementing a DRNG.
//!
//! [RFC 8439]: https://www.rfc-editor.org/rfc/rfc8439

use ::chacha20::{
    cipher::{
        consts::U10, generic_array::GenericArray, KeyIvInit, StreamCipherCore,
        StreamCipherSeekCore,
    },
    ChaChaCore,
};

/// ChaCha with 20 rounds (10 double rounds).
type ChaCha20Core = ChaChaCore<U10>;

/// The size in bytes of a ChaCha20 key.
pub const KEY_SIZE: usize = 32;

/// The size in bytes of a ChaCha20 keystream block.
pub const BLOCK_SIZE: usize = 64;

/// Computes one ChaCha20 keystream block.
///
/// `counter[0]` is the 32-bit block counter and
/// `counter[1..4]` is the 96-bit nonce, each word in host
/// order. The block is serialized little endian into `out`.
pub fn block(key: &[u8; KEY_SIZE], counter: &[u32; 4], out: &mut [u8; BLOCK_SIZE]) {
    let mut nonce = [0u8; 12];
    for (chunk, word) in nonce.chunks_exact_mut(4).zip(&counter[1..]) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    let mut core = ChaCha20Core::new(key.into(), (&nonce).into());
    core.set_block_pos(counter[0]);
    core.write_keystream_block(GenericArray::from_mut_slice(&mut out[..]));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_zero_state() {
        let want = hex::decode(
            "76b8e0ada0f13d90405d6ae55386bd28bdd219b8a08ded1aa836efcc8b770dc7\
             da41597c5157488d7724e03fb8d84a376a43b8f41518a11cc387b669b2ee6586",
        )
        .expect("valid hex");
        let mut got = [0u8; BLOCK_SIZE];
        block(&[0u8; KEY_SIZE], &[0; 4], &mut got);
        assert_eq!(got[..], want[..]);
    }

    /// RFC 8439 section 2.3.2.
    #[test]
    fn test_block_rfc8439() {
        let key: [u8; KEY_SIZE] = core::array::from_fn(|i| i as u8);
        let counter = [1, 0x0900_0000, 0x4a00_0000, 0];
        let want = hex::decode(
            "10f1e7e4d13b5915500fdd1fa32071c4c7d1f4c733c068030422aa9ac3d46c4e\
             d2826446079faa0914c2d705d98b02a2b5129cd1de164eb9cbd083e8a2503c4e",
        )
        .expect("valid hex");
        let mut got = [0u8; BLOCK_SIZE];
        block(&key, &counter, &mut got);
        assert_eq!(got[..], want[..]);
    }

    #[test]
    fn test_block_counter_matters() {
        let key = [7u8; KEY_SIZE];
        let mut a = [0u8; BLOCK_SIZE];
        let mut b = [0u8; BLOCK_SIZE];
        block(&key, &[0, 0, 0, 0], &mut a);
        block(&key, &[0, 1, 0, 0], &mut b);
        assert_ne!(a, b);
        block(&key, &[1, 0, 0, 0], &mut b);
        assert_ne!(a, b);
    }
}
