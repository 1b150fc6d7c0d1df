//! [`rand_core`] support.

#![cfg(feature = "rand_compat")]
#![cfg_attr(docsrs, doc(cfg(feature = "rand_compat")))]

use core::num::NonZeroU32;

use rand_core::{CryptoRng, RngCore};

use crate::{drng::Drng, error::Error};

/// Adapts a [`Drng`] to [`RngCore`].
///
/// Every call is a separate request without additional input,
/// so the DRNG's state is updated after each one.
///
/// # Example
///
/// ```
/// use fke_drng::{rand_compat::DrngRng, Drng, Xdrbg256};
/// use rand_core::RngCore;
///
/// let mut rng = DrngRng::new(Xdrbg256::from_seed(b"seed", b"")?);
/// let _ = rng.next_u64();
/// # Ok::<(), fke_drng::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct DrngRng<D>(D);

impl<D> DrngRng<D> {
    /// Wraps `drng`.
    pub const fn new(drng: D) -> Self {
        Self(drng)
    }

    /// Returns the wrapped DRNG.
    pub fn into_inner(self) -> D {
        self.0
    }
}

impl<D> AsMut<D> for DrngRng<D> {
    fn as_mut(&mut self) -> &mut D {
        &mut self.0
    }
}

impl<D: Drng> CryptoRng for DrngRng<D> {}

impl<D: Drng> RngCore for DrngRng<D> {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    /// # Panics
    ///
    /// Panics if the DRNG fails, which only happens when it
    /// must be reseeded or failed its selftest.
    #[allow(clippy::panic)]
    fn fill_bytes(&mut self, dst: &mut [u8]) {
        if let Err(err) = self.0.generate(&[], dst) {
            panic!("{}: {err}", D::NAME);
        }
    }

    fn try_fill_bytes(&mut self, dst: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.generate(&[], dst).map_err(to_rand_error)
    }
}

fn to_rand_error(err: Error) -> rand_core::Error {
    #[allow(clippy::cast_sign_loss)]
    let code = err.errno().code() as u32;
    match NonZeroU32::new(code) {
        Some(code) => rand_core::Error::from(code),
        None => rand_core::Error::from(NonZeroU32::MIN),
    }
}

#[cfg(all(test, feature = "xdrbg"))]
mod tests {
    use rand::Rng;

    use super::*;
    use crate::Xdrbg256;

    #[test]
    fn test_matches_generate() {
        let mut d = Xdrbg256::from_seed(b"seed", b"").expect("seed");
        let want = d.bytes::<32>(&[]).expect("generate");

        let mut rng = DrngRng::new(Xdrbg256::from_seed(b"seed", b"").expect("seed"));
        let mut got = [0u8; 32];
        rng.try_fill_bytes(&mut got).expect("fill");
        assert_eq!(got, want);
    }

    #[test]
    fn test_rng_ext() {
        let mut rng = DrngRng::new(Xdrbg256::from_seed(b"seed", b"").expect("seed"));
        let x: u64 = rng.r#gen();
        let y: u64 = rng.r#gen();
        assert_ne!(x, y);
        let n = rng.gen_range(10..20);
        assert!((10..20).contains(&n));
    }
}
