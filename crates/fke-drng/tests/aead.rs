//! Property tests for hash_crypt.

use std::mem;

use fke_drng::{Error, HashCryptSha512, MAX_TAG_SIZE};
use proptest::{collection::vec, prelude::*, sample::Index};

fn keyed(key: &[u8], iv: &[u8]) -> HashCryptSha512 {
    let mut hc = HashCryptSha512::new();
    hc.setkey(key, iv).expect("setkey should succeed");
    hc
}

fn seal(key: &[u8], iv: &[u8], aad: &[u8], pt: &[u8], tag_len: usize) -> (Vec<u8>, Vec<u8>) {
    let mut ct = vec![0u8; pt.len()];
    let mut tag = vec![0u8; tag_len];
    keyed(key, iv)
        .encrypt_oneshot(pt, &mut ct, aad, &mut tag)
        .expect("encrypt should succeed");
    (ct, tag)
}

fn open(key: &[u8], iv: &[u8], aad: &[u8], ct: &[u8], tag: &[u8]) -> Result<Vec<u8>, Error> {
    let mut pt = vec![0u8; ct.len()];
    keyed(key, iv).decrypt_oneshot(ct, &mut pt, aad, tag)?;
    Ok(pt)
}

proptest! {
    #[test]
    fn proptest_round_trip(
        key in vec(any::<u8>(), 1..80),
        iv in vec(any::<u8>(), 0..32),
        aad in vec(any::<u8>(), 0..64),
        pt in vec(any::<u8>(), 0..300),
        tag_len in 1..=MAX_TAG_SIZE,
    ) {
        let (ct, tag) = seal(&key, &iv, &aad, &pt, tag_len);
        let got = open(&key, &iv, &aad, &ct, &tag);
        prop_assert_eq!(got, Ok(pt));
    }

    #[test]
    fn proptest_tamper(
        key in vec(any::<u8>(), 1..80),
        aad in vec(any::<u8>(), 1..64),
        pt in vec(any::<u8>(), 1..300),
        // Shorter tags are forged by chance too often to assert
        // on random input. See `test_short_tag_tamper`.
        tag_len in 8..=MAX_TAG_SIZE,
        target in 0..3u8,
        idx in any::<Index>(),
        bit in 0..8u8,
    ) {
        let (mut ct, mut tag) = seal(&key, b"", &aad, &pt, tag_len);
        let mut aad = aad;
        let buf = match target {
            0 => &mut ct,
            1 => &mut tag,
            _ => &mut aad,
        };
        let i = idx.index(buf.len());
        buf[i] ^= 1 << bit;

        let got = open(&key, b"", &aad, &ct, &tag);
        prop_assert_eq!(got, Err(Error::Authentication));
    }

    /// Encrypting in arbitrary pieces matches a single call.
    #[test]
    fn proptest_streaming(
        key in vec(any::<u8>(), 1..80),
        aad in vec(any::<u8>(), 0..64),
        pt in vec(any::<u8>(), 0..500),
        pieces in vec(0..130usize, 0..10),
    ) {
        let (want_ct, want_tag) = seal(&key, b"", &aad, &pt, MAX_TAG_SIZE);

        let mut hc = keyed(&key, b"");
        hc.add_aad(&aad).expect("aad");
        let mut ct = pt.clone();
        let mut rest = &mut ct[..];
        for n in pieces {
            let n = n.min(rest.len());
            let (head, tail) = mem::take(&mut rest).split_at_mut(n);
            hc.encrypt_in_place(head).expect("encrypt");
            rest = tail;
        }
        hc.encrypt_in_place(rest).expect("encrypt");
        let mut tag = [0u8; MAX_TAG_SIZE];
        hc.encrypt_tag(&mut tag).expect("tag");

        prop_assert_eq!(&ct, &want_ct);
        prop_assert_eq!(&tag[..], &want_tag[..]);

        // And decrypting in pieces recovers the plaintext.
        let mut hc = keyed(&key, b"");
        hc.add_aad(&aad).expect("aad");
        let mut got = ct.clone();
        for chunk in got.chunks_mut(7) {
            hc.decrypt_in_place(chunk).expect("decrypt");
        }
        prop_assert_eq!(hc.decrypt_authenticate(&tag), Ok(()));
        prop_assert_eq!(got, pt);
    }

    /// Different keys never decrypt each other's messages.
    #[test]
    fn proptest_wrong_key(
        key in vec(any::<u8>(), 1..80),
        other in vec(any::<u8>(), 1..80),
        pt in vec(any::<u8>(), 0..100),
    ) {
        prop_assume!(key != other);
        let (ct, tag) = seal(&key, b"", b"", &pt, 16);
        prop_assert_eq!(open(&other, b"", b"", &ct, &tag), Err(Error::Authentication));
    }
}

#[test]
fn test_tag_after_tag_is_empty_message() {
    let key = b"key";
    let mut hc = keyed(key, b"");
    let mut first = [0u8; 32];
    hc.encrypt_oneshot(b"hello", &mut [0u8; 5], b"aad", &mut first)
        .expect("encrypt");

    // The MAC restarts with the same key, so a second tag with
    // no input authenticates an empty message.
    let mut second = [0u8; 32];
    hc.encrypt_tag(&mut second).expect("tag");
    assert_ne!(first, second);

    let mut hc = keyed(key, b"");
    let mut discard = [0u8; 32];
    hc.encrypt_tag(&mut discard).expect("tag");
    assert_eq!(discard, second);
}

const SHORT_AAD: &[u8] = b"header";
const SHORT_PT: &[u8; 32] = b"attack at dawn, bring snacks!!!!";

/// Seals [`SHORT_PT`], flips one ciphertext bit and opens it
/// with a `tag_len`-byte tag.
fn open_flipped(key: &[u8], tag_len: usize, byte: usize, bit: u8) -> Result<Vec<u8>, Error> {
    let (mut ct, tag) = seal(key, b"", SHORT_AAD, SHORT_PT, tag_len);
    ct[byte] ^= 1 << bit;
    open(key, b"", SHORT_AAD, &ct, &tag)
}

#[test]
fn test_short_tag_tamper() {
    let key = b"short tag key";
    for tag_len in [1, 2, 4] {
        assert_eq!(
            open_flipped(key, tag_len, 0, 0),
            Err(Error::Authentication),
            "tag_len = {tag_len}"
        );
    }
}

/// A one-byte tag only gives 8 bits of forgery resistance.
/// For this key flipping bit 7 of byte 20 keeps the first tag
/// byte, but not the second.
#[test]
fn test_one_byte_tag_forgery() {
    let key = b"short tag key 2";
    assert!(open_flipped(key, 1, 20, 7).is_ok());
    assert_eq!(open_flipped(key, 2, 20, 7), Err(Error::Authentication));
}
