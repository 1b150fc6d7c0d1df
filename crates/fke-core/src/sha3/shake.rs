//! SHAKE per [FIPS 202].
//!
//! [FIPS 202]: https://csrc.nist.gov/pubs/fips/202/final

use core::fmt;

use sha3::digest::{ExtendableOutputReset, Update};

use crate::{
    xof::{NewXof, Xof, XofReader},
    zeroize::{wipe_flat, ZeroizeOnDrop},
};

macro_rules! impl_shake {
    ($name:ident, $reader:ident, $rate:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Default)]
        pub struct $name {
            shake: sha3::$name,
        }

        impl $name {
            /// Creates a new SHAKE instance.
            #[inline]
            pub fn new() -> Self {
                let shake = sha3::$name::default();
                Self { shake }
            }
        }

        impl Xof for $name {
            const NAME: &'static str = $doc;
            const RATE: usize = $rate;

            type Reader = $reader;

            #[inline]
            fn update(&mut self, data: &[u8]) {
                Update::update(&mut self.shake, data);
            }

            #[inline]
            fn finalize_xof(mut self) -> Self::Reader {
                $reader {
                    reader: self.shake.finalize_xof_reset(),
                }
            }
        }

        impl NewXof for $name {
            #[inline]
            fn new() -> Self {
                Self::new()
            }
        }

        impl ZeroizeOnDrop for $name {}
        impl Drop for $name {
            fn drop(&mut self) {
                // SAFETY: the Keccak sponge is an array of
                // integers, so all-zero is a valid state.
                unsafe { wipe_flat(&mut self.shake) }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }

        #[doc = "An [`XofReader`] for"]
        #[doc = concat!("[`", stringify!($name), "`].")]
        pub struct $reader {
            reader: sha3::$reader,
        }

        impl XofReader for $reader {
            #[inline]
            fn read(&mut self, out: &mut [u8]) {
                sha3::digest::XofReader::read(&mut self.reader, out);
            }
        }

        impl ZeroizeOnDrop for $reader {}
        impl Drop for $reader {
            fn drop(&mut self) {
                // SAFETY: the reader is plain integer data and is
                // never read again after this point.
                unsafe { wipe_flat(&mut self.reader) }
            }
        }

        impl fmt::Debug for $reader {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($reader)).finish_non_exhaustive()
            }
        }
    };
}
impl_shake!(Shake128, Shake128Reader, 168, "SHAKE128");
impl_shake!(Shake256, Shake256Reader, 136, "SHAKE256");

#[cfg(test)]
mod tests {
    use super::{Shake128, Shake256};
    use crate::test_xof;

    test_xof!(shake128, Shake128);
    test_xof!(shake256, Shake256);

    #[test]
    fn test_shake256_empty() {
        use crate::xof::Xof;

        let want = hex::decode("46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f")
            .expect("valid hex");
        let mut got = [0u8; 32];
        Shake256::new().finalize_xof_into(&mut got);
        assert_eq!(got[..], want[..]);
    }
}
