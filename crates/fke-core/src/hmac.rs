//! HMAC per [FIPS PUB 198-1]
//!
//! # Warning
//!
//! This is a low-level module. You should not be using it
//! directly unless you are implementing an AEAD.
//!
//! [FIPS PUB 198-1]: https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.198-1.pdf

#![forbid(unsafe_code)]

use core::{
    borrow::{Borrow, BorrowMut},
    cmp, fmt, mem,
};

use crate::{
    hash::Hash,
    mac::{Mac, MacError},
    zeroize::Zeroize,
};

/// HMAC per [FIPS PUB 198-1] for some hash `H`.
///
/// The keyed initial states are retained so that
/// [`Mac::tag_reset`] can rekey without the original key.
///
/// [FIPS PUB 198-1]: https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.198-1.pdf
#[derive(Clone)]
pub struct Hmac<H> {
    /// H(ipad).
    ipad: H,
    /// H(opad).
    opad: H,
    /// H(ipad || text...).
    inner: H,
}

impl<H: Hash> Hmac<H> {
    /// Creates an HMAC using the provided `key`.
    pub fn new(key: &[u8]) -> Self {
        let mut key = {
            let mut tmp = H::Block::default();
            let tmp_len = tmp.borrow().len();
            if key.len() <= tmp_len {
                // Steps 1 and 3
                tmp.borrow_mut()[..key.len()].copy_from_slice(key);
            } else {
                // Step 2
                let d = H::hash(key);
                let d = d.as_ref();
                let n = cmp::min(d.len(), tmp_len);
                tmp.borrow_mut()[..n].copy_from_slice(&d[..n]);
            };
            tmp
        };

        // Step 4: K_0 ^ ipad (0x36)
        for v in key.borrow_mut() {
            *v ^= 0x36;
        }
        let mut ipad = H::new();
        ipad.update(key.borrow());

        // Step 7: K_0 ^ opad (0x5c)
        for v in key.borrow_mut() {
            *v ^= 0x36 ^ 0x5c;
        }
        let mut opad = H::new();
        opad.update(key.borrow());

        key.zeroize();

        Self {
            inner: ipad.clone(),
            ipad,
            opad,
        }
    }
}

impl<H: Hash> Mac for Hmac<H> {
    const NAME: &'static str = "HMAC";
    const TAG_SIZE: usize = H::DIGEST_SIZE;

    type Tag = H::Digest;

    #[inline]
    fn new(key: &[u8]) -> Result<Self, MacError> {
        Ok(Self::new(key))
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        // Step 5: H((K_0 ^ ipad) || text)
        self.inner.update(data)
    }

    fn tag_reset(&mut self) -> Self::Tag {
        let inner = mem::replace(&mut self.inner, self.ipad.clone());
        // Step 6
        let d = inner.digest();
        let mut outer = self.opad.clone();
        // Step 8: (K_0 ^ opad) || H((K_0 ^ ipad) || text)
        outer.update(d.as_ref());
        // Step 9: H((K_0 ^ opad) || H((K_0 ^ ipad) || text))
        outer.digest()
    }
}

impl<H> fmt::Debug for Hmac<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hmac").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rust::{Sha256, Sha512},
        test_mac,
    };

    test_mac!(hmac_sha256, Hmac<Sha256>);
    test_mac!(hmac_sha512, Hmac<Sha512>);

    fn hmac<H: Hash>(key: &[u8], data: &[u8]) -> H::Digest {
        let mut m = Hmac::<H>::new(key);
        Mac::update(&mut m, data);
        m.tag_reset()
    }

    struct Vector {
        key: &'static [u8],
        data: &'static [u8],
        sha256: &'static str,
        sha512: &'static str,
    }

    /// From RFC 4231, test cases 1, 2 and 6.
    const VECTORS: &[Vector] = &[
        Vector {
            key: &[0x0b; 20],
            data: b"Hi There",
            sha256: "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7",
            sha512: "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde\
                     daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854",
        },
        Vector {
            key: b"Jefe",
            data: b"what do ya want for nothing?",
            sha256: "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
            sha512: "164b7a7bfcf819e2e395fbe73b56e0a387bd64222e831fd610270cd7ea250554\
                     9758bf75c05a994a6d034f65f8f0e6fdcaeab1a34d4a6b4b636e070a38bce737",
        },
        Vector {
            key: &[0xaa; 131],
            data: b"Test Using Larger Than Block-Size Key - Hash Key First",
            sha256: "60e431591ee0b67f0d8a26aacbf5b77f8e0bc6213728c5140546040f0ee37f54",
            sha512: "80b24263c7c1a3ebb71493c1dd7be8b49b46d1f41b4aeec1121b013783f8f352\
                     6b56d037e05f2598bd0fd2215d6a1e5295e64f73f63f0aec8b915a985d786598",
        },
    ];

    #[test]
    fn test_hmac_rfc4231() {
        for (i, v) in VECTORS.iter().enumerate() {
            let got = hmac::<Sha256>(v.key, v.data);
            assert_eq!(hex::encode(got.as_ref()), v.sha256, "#{i}");

            let got = hmac::<Sha512>(v.key, v.data);
            assert_eq!(hex::encode(got.as_ref()), v.sha512, "#{i}");
        }
    }
}
