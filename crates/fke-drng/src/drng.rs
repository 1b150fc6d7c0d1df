//! The DRNG capability.

use crate::error::Result;

/// A deterministic random number generator.
///
/// A `Drng` starts out unseeded. The first call to
/// [`seed`][Drng::seed] instantiates it and later calls reseed
/// it, mixing the new material into the existing state.
/// [`zero`][Drng::zero] wipes the state and returns the DRNG to
/// the unseeded state, after which it can be reused.
///
/// Every implementation wipes its state on drop.
pub trait Drng: Sized {
    /// The human readable name of the DRNG.
    const NAME: &'static str;

    /// Creates an unseeded DRNG.
    fn new() -> Self;

    /// Instantiates or reseeds the DRNG with `seed` and the
    /// personalization string `pers`.
    fn seed(&mut self, seed: &[u8], pers: &[u8]) -> Result<()>;

    /// Fills `out` with random bytes, mixing in the additional
    /// input `addtl`.
    fn generate(&mut self, addtl: &[u8], out: &mut [u8]) -> Result<()>;

    /// Wipes the state.
    fn zero(&mut self);

    /// Reports whether the DRNG has been seeded since it was
    /// created or last zeroed.
    fn is_seeded(&self) -> bool;

    /// Returns a DRNG instantiated with `seed` and `pers`.
    fn from_seed(seed: &[u8], pers: &[u8]) -> Result<Self> {
        let mut d = Self::new();
        d.seed(seed, pers)?;
        Ok(d)
    }

    /// Returns `N` random bytes.
    fn bytes<const N: usize>(&mut self, addtl: &[u8]) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.generate(addtl, &mut out)?;
        Ok(out)
    }
}
