//! [`Hash`] tests.
//!
//! Hash_DRBG feeds its hash in uneven pieces (`hash_df` and
//! `hashgen` prepend counters and lengths), so most of these
//! check that the split does not matter.

use super::INPUT;
use crate::hash::Hash;

/// Invokes `callback` for each hash test.
///
/// # Example
///
/// ```
/// use fke_core::rust::Sha512;
///
/// macro_rules! run_test {
///     ($test:ident) => {
///         fke_core::test_util::hash::$test::<Sha512>();
///     };
/// }
/// fke_core::for_each_hash_test!(run_test);
/// ```
#[macro_export]
macro_rules! for_each_hash_test {
    ($callback:ident) => {
        $crate::__apply! {
            $callback,
            test_split_anywhere,
            test_hash_multi,
            test_block_boundaries,
        }
    };
}
pub use for_each_hash_test;

/// Expands into one `#[test]` per hash test.
///
/// # Example
///
/// ```
/// use fke_core::{test_hash, rust::Sha512};
///
/// test_hash!(sha512, Sha512);
/// ```
#[macro_export]
macro_rules! test_hash {
    ($name:ident, $hash:ty) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;

            $crate::test_hash!($hash);
        }
    };
    ($hash:ty) => {
        macro_rules! __hash_test {
            ($test:ident) => {
                #[test]
                fn $test() {
                    $crate::test_util::hash::$test::<$hash>()
                }
            };
        }
        $crate::for_each_hash_test!(__hash_test);
    };
}
pub use test_hash;

/// Splitting the input at any point around a block boundary
/// gives the one-shot digest.
pub fn test_split_anywhere<T: Hash>() {
    let want = T::hash(INPUT);
    assert_eq!(want.as_ref().len(), T::DIGEST_SIZE);

    let b = T::BLOCK_SIZE;
    for at in [0, 1, b - 1, b, b + 1, INPUT.len()] {
        let (head, tail) = INPUT.split_at(at);
        let mut h = T::new();
        h.update(head);
        h.update(tail);
        crate::assert_ct_eq!(want, h.digest(), "split at {at}");
    }

    let mut h = T::new();
    for c in INPUT {
        h.update(&[*c]);
    }
    crate::assert_ct_eq!(want, h.digest());
}

/// `hash_multi` is the digest of the concatenation, and empty
/// parts are ignored.
pub fn test_hash_multi<T: Hash>() {
    let (a, b) = INPUT.split_at(INPUT.len() / 3);
    let want = T::hash(INPUT);
    crate::assert_ct_eq!(want, T::hash_multi([a, &[][..], b]));
    crate::assert_ct_eq!(want, T::hash_multi([&[][..], INPUT]));
}

/// Messages whose lengths straddle the padding and block
/// boundaries all hash differently.
pub fn test_block_boundaries<T: Hash>() {
    let b = T::BLOCK_SIZE;
    let lens = [0, 1, b - 9, b - 8, b - 1, b, b + 1, 2 * b];
    let digests: Vec<_> = lens.iter().map(|&n| T::hash(&INPUT[..n])).collect();
    for (i, x) in digests.iter().enumerate() {
        for (j, y) in digests.iter().enumerate().skip(i + 1) {
            crate::assert_ct_ne!(*x, *y, "lengths {} and {}", lens[i], lens[j]);
        }
    }

    // A zero byte is not the empty message.
    crate::assert_ct_ne!(T::hash(&[]), T::hash(&[0]));
}
