//! [`Drng`] tests.

use crate::drng::Drng;

/// Invokes `callback` for each DRNG test.
#[macro_export]
macro_rules! for_each_drng_test {
    ($callback:ident) => {
        $crate::test_util::__apply! {
            $callback,
            test_deterministic,
            test_seeded_flag,
            test_output_changes,
            test_request_updates_state,
            test_reseed_accumulates,
            test_pers_matters,
            test_addtl_matters,
            test_zero,
            test_empty_request,
            test_large_request,
        }
    };
}
pub use for_each_drng_test;

/// Performs all of the tests in this module.
///
/// # Example
///
/// ```
/// use fke_drng::{test_drng, Xdrbg256};
///
/// test_drng!(xdrbg256, Xdrbg256);
/// ```
#[macro_export]
macro_rules! test_drng {
    ($name:ident, $drng:ty) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;

            $crate::test_drng!($drng);
        }
    };
    ($drng:ty) => {
        macro_rules! __drng_test {
            ($test:ident) => {
                #[test]
                fn $test() {
                    $crate::test_util::drng::$test::<$drng>()
                }
            };
        }
        $crate::for_each_drng_test!(__drng_test);
    };
}
pub use test_drng;

const SEED: &[u8] = b"not a great source of entropy, but a deterministic one";

fn seeded<D: Drng>(seed: &[u8], pers: &[u8]) -> D {
    D::from_seed(seed, pers).expect("seed should succeed")
}

fn generate<D: Drng, const N: usize>(d: &mut D, addtl: &[u8]) -> [u8; N] {
    d.bytes::<N>(addtl).expect("generate should succeed")
}

/// The same inputs produce the same outputs.
pub fn test_deterministic<D: Drng>() {
    let mut a = seeded::<D>(SEED, b"pers");
    let mut b = seeded::<D>(SEED, b"pers");
    for addtl in [&b""[..], &b"addtl"[..], &[0xa5; 300][..]] {
        assert_eq!(generate::<D, 97>(&mut a, addtl), generate::<D, 97>(&mut b, addtl));
    }
    a.seed(b"more", b"").expect("reseed");
    b.seed(b"more", b"").expect("reseed");
    assert_eq!(generate::<D, 32>(&mut a, b""), generate::<D, 32>(&mut b, b""));
}

/// `is_seeded` tracks `seed` and `zero`.
pub fn test_seeded_flag<D: Drng>() {
    let mut d = D::new();
    assert!(!d.is_seeded());
    d.seed(SEED, b"").expect("seed");
    assert!(d.is_seeded());
    d.seed(SEED, b"").expect("reseed");
    assert!(d.is_seeded());
    d.zero();
    assert!(!d.is_seeded());
}

/// Consecutive requests never repeat.
pub fn test_output_changes<D: Drng>() {
    let mut d = seeded::<D>(SEED, b"");
    let x = generate::<D, 64>(&mut d, b"");
    let y = generate::<D, 64>(&mut d, b"");
    let z = generate::<D, 64>(&mut d, b"");
    assert_ne!(x, y);
    assert_ne!(y, z);
    assert_ne!(x, z);
}

/// Every request ends with a state update, so splitting a
/// request in two changes everything after the split.
pub fn test_request_updates_state<D: Drng>() {
    let mut a = seeded::<D>(SEED, b"");
    let mut b = seeded::<D>(SEED, b"");

    let whole = generate::<D, 64>(&mut a, b"");
    let first = generate::<D, 32>(&mut b, b"");
    let second = generate::<D, 32>(&mut b, b"");

    assert_eq!(whole[..32], first[..]);
    assert_ne!(whole[32..], second[..]);
}

/// Reseeding mixes new material into the state instead of
/// replacing it.
pub fn test_reseed_accumulates<D: Drng>() {
    let mut a = seeded::<D>(SEED, b"");
    a.seed(b"second seed", b"").expect("reseed");
    let mut b = seeded::<D>(b"second seed", b"");
    let mut c = seeded::<D>(SEED, b"");

    let x = generate::<D, 32>(&mut a, b"");
    assert_ne!(x, generate::<D, 32>(&mut b, b""));
    assert_ne!(x, generate::<D, 32>(&mut c, b""));
}

/// The personalization string is bound into the state.
pub fn test_pers_matters<D: Drng>() {
    let mut a = seeded::<D>(SEED, b"");
    let mut b = seeded::<D>(SEED, b"pers");
    let mut c = seeded::<D>(SEED, b"other pers");
    let x = generate::<D, 32>(&mut a, b"");
    let y = generate::<D, 32>(&mut b, b"");
    let z = generate::<D, 32>(&mut c, b"");
    assert_ne!(x, y);
    assert_ne!(y, z);
}

/// Additional input changes the output.
pub fn test_addtl_matters<D: Drng>() {
    let mut a = seeded::<D>(SEED, b"");
    let mut b = seeded::<D>(SEED, b"");
    let mut c = seeded::<D>(SEED, b"");
    let x = generate::<D, 32>(&mut a, b"");
    let y = generate::<D, 32>(&mut b, b"addtl");
    let z = generate::<D, 32>(&mut c, b"other addtl");
    assert_ne!(x, y);
    assert_ne!(y, z);
}

/// `zero` returns the DRNG to its initial state.
pub fn test_zero<D: Drng>() {
    let mut fresh = seeded::<D>(SEED, b"pers");
    let want = generate::<D, 48>(&mut fresh, b"");

    let mut d = seeded::<D>(b"something else", b"");
    let _ = generate::<D, 100>(&mut d, b"");
    d.zero();
    d.seed(SEED, b"pers").expect("seed");
    assert_eq!(generate::<D, 48>(&mut d, b""), want);
}

/// Empty requests succeed.
pub fn test_empty_request<D: Drng>() {
    let mut d = seeded::<D>(SEED, b"");
    d.generate(b"", &mut []).expect("empty request");
    d.generate(b"addtl", &mut []).expect("empty request");
}

/// Requests larger than any internal chunk succeed and are not
/// trivially repetitive.
pub fn test_large_request<D: Drng>() {
    let mut d = seeded::<D>(SEED, b"");
    let mut out = vec![0u8; 3 * (1 << 16) + 17];
    d.generate(b"", &mut out).expect("large request");

    let (head, tail) = out.split_at(out.len() / 2);
    assert_ne!(head[..4096], tail[..4096]);
    assert!(out.iter().any(|&b| b != 0));
}
