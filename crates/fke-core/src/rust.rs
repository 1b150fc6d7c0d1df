//! RustCrypto implementations of the [`Hash`] capability.

use core::fmt;

use sha2::digest::{FixedOutputReset, Update};

use crate::{
    hash::{Block, Digest, Hash},
    zeroize::{wipe_flat, ZeroizeOnDrop},
};

macro_rules! sha2_impl {
    ($name:ident, $doc:expr, $digest_size:literal, $block_size:literal) => {
        #[doc = concat!($doc, ".")]
        #[derive(Clone, Default)]
        pub struct $name(sha2::$name);

        impl Hash for $name {
            const NAME: &'static str = $doc;
            const DIGEST_SIZE: usize = $digest_size;
            const BLOCK_SIZE: usize = $block_size;

            type Digest = Digest<$digest_size>;
            type Block = Block<$block_size>;

            #[inline]
            fn new() -> Self {
                Self(sha2::$name::default())
            }

            #[inline]
            fn update(&mut self, data: &[u8]) {
                Update::update(&mut self.0, data)
            }

            #[inline]
            fn digest(mut self) -> Self::Digest {
                let mut out = [0u8; $digest_size];
                out.copy_from_slice(&self.0.finalize_fixed_reset());
                Digest::from_array(out)
            }
        }

        impl ZeroizeOnDrop for $name {}
        impl Drop for $name {
            fn drop(&mut self) {
                // SAFETY: the SHA-2 cores are plain integer arrays
                // and counters, so all-zero is a valid state.
                unsafe { wipe_flat(&mut self.0) }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name)).finish_non_exhaustive()
            }
        }
    };
}
sha2_impl!(Sha256, "SHA-256", 32, 64);
sha2_impl!(Sha512, "SHA-512", 64, 128);
