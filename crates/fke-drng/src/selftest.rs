//! Known-answer tests that run once per process.
//!
//! Each algorithm is checked against a fixed vector the first
//! time it is keyed. The result is cached for the lifetime of
//! the process.
//!
//! Without the `fips` feature a failure is logged and the
//! algorithm remains usable. With it, every later attempt to
//! key the algorithm returns [`Error::SelftestFailed`].

use core::fmt;

use spin::Once;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// The algorithms that carry a selftest.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Algorithm {
    /// XDRBG-128.
    Xdrbg128,
    /// XDRBG-256.
    Xdrbg256,
    /// KMAC-DRNG.
    KmacDrng,
    /// ChaCha20-DRNG.
    ChaCha20Drng,
    /// Hash_DRBG with SHA-256.
    HashDrbgSha256,
    /// Hash_DRBG with SHA-512.
    HashDrbgSha512,
    /// hash_crypt with SHA-512.
    HashCrypt,
}

impl Algorithm {
    const COUNT: usize = 7;

    /// Returns the human readable name of the algorithm.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Xdrbg128 => "XDRBG-128",
            Self::Xdrbg256 => "XDRBG-256",
            Self::KmacDrng => "KMAC-DRNG",
            Self::ChaCha20Drng => "ChaCha20-DRNG",
            Self::HashDrbgSha256 => "Hash_DRBG-SHA-256",
            Self::HashDrbgSha512 => "Hash_DRBG-SHA-512",
            Self::HashCrypt => "hash_crypt-SHA-512",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The outcome of a selftest.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Status {
    /// The selftest has not run yet.
    Untested,
    /// The selftest passed.
    Passed,
    /// The selftest failed.
    Failed,
}

static REGISTRY: [Once<bool>; Algorithm::COUNT] = [const { Once::new() }; Algorithm::COUNT];

/// Runs `test` for `alg` unless it has already run in this
/// process.
///
/// `test` returns whether the computed output matched the
/// expected output.
pub fn run<F>(alg: Algorithm, test: F) -> Result<()>
where
    F: FnOnce() -> bool,
{
    let passed = *REGISTRY[alg.index()].call_once(|| {
        let ok = test();
        if ok {
            debug!(%alg, "selftest passed");
        } else {
            error!(%alg, "selftest failed");
        }
        ok
    });
    if passed || cfg!(not(feature = "fips")) {
        Ok(())
    } else {
        Err(Error::SelftestFailed(alg))
    }
}

/// Reports the selftest status of `alg`.
pub fn status(alg: Algorithm) -> Status {
    match REGISTRY[alg.index()].get() {
        None => Status::Untested,
        Some(true) => Status::Passed,
        Some(false) => Status::Failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_indices() {
        let all = [
            Algorithm::Xdrbg128,
            Algorithm::Xdrbg256,
            Algorithm::KmacDrng,
            Algorithm::ChaCha20Drng,
            Algorithm::HashDrbgSha256,
            Algorithm::HashDrbgSha512,
            Algorithm::HashCrypt,
        ];
        assert_eq!(all.len(), Algorithm::COUNT);
        for (i, alg) in all.into_iter().enumerate() {
            assert_eq!(alg.index(), i, "{alg}");
        }
    }
}
