//! [`Mac`] tests.

use super::INPUT;
use crate::mac::{Mac, MacError};

/// Invokes `callback` for each MAC test.
#[macro_export]
macro_rules! for_each_mac_test {
    ($callback:ident) => {
        $crate::__apply! {
            $callback,
            test_default,
            test_reset,
            test_different_keys,
            test_verify_prefix,
        }
    };
}
pub use for_each_mac_test;

/// Performs all of the tests in this module.
///
/// # Example
///
/// ```
/// use fke_core::{hmac::Hmac, rust::Sha512, test_mac};
///
/// test_mac!(hmac_sha512, Hmac<Sha512>);
/// ```
#[macro_export]
macro_rules! test_mac {
    ($name:ident, $mac:ty) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;

            $crate::test_mac!($mac);
        }
    };
    ($mac:ty) => {
        macro_rules! __mac_test {
            ($test:ident) => {
                #[test]
                fn $test() {
                    $crate::test_util::mac::$test::<$mac>()
                }
            };
        }
        $crate::for_each_mac_test!(__mac_test);
    };
}
pub use test_mac;

const KEY: &[u8] = b"a key long enough for any MAC in this crate, at least";

fn mac_of<T: Mac>(key: &[u8], data: &[u8]) -> T::Tag {
    let mut m = T::new(key).expect("valid key");
    m.update(data);
    m.tag_reset()
}

/// The basic tests for a MAC.
pub fn test_default<T: Mac>() {
    let want = mac_of::<T>(KEY, INPUT);
    assert_eq!(want.as_ref().len(), T::TAG_SIZE);

    let got = {
        let mut m = T::new(KEY).expect("valid key");
        for c in INPUT {
            m.update(&[*c]);
        }
        m.tag_reset()
    };
    crate::assert_ct_eq!(want, got);

    let mut modified = INPUT.to_vec();
    modified[0] += 1;
    crate::assert_ct_ne!(want, mac_of::<T>(KEY, &modified));
}

/// `tag_reset` returns the MAC to its keyed initial state.
pub fn test_reset<T: Mac>() {
    let want = mac_of::<T>(KEY, INPUT);

    let mut m = T::new(KEY).expect("valid key");
    m.update(b"something else entirely");
    let _ = m.tag_reset();
    m.update(INPUT);
    crate::assert_ct_eq!(want, m.tag_reset());

    m.update(INPUT);
    crate::assert_ct_eq!(want, m.tag_reset());
}

/// Different keys produce different tags.
pub fn test_different_keys<T: Mac>() {
    let a = mac_of::<T>(KEY, INPUT);
    let b = mac_of::<T>(&KEY[1..], INPUT);
    crate::assert_ct_ne!(a, b);
}

/// `verify` accepts the full tag and its prefixes and rejects
/// anything else.
pub fn test_verify_prefix<T: Mac>() {
    let tag = mac_of::<T>(KEY, INPUT);
    let tag = tag.as_ref();

    let mut m = T::new(KEY).expect("valid key");
    for n in [1, T::TAG_SIZE / 2, T::TAG_SIZE] {
        m.update(INPUT);
        assert_eq!(m.verify(&tag[..n]), Ok(()), "prefix {n}");
    }

    m.update(INPUT);
    assert_eq!(m.verify(&[]), Err(MacError::Verification));

    let mut bad = tag.to_vec();
    bad[0] ^= 1;
    m.update(INPUT);
    assert_eq!(m.verify(&bad), Err(MacError::Verification));

    let mut long = tag.to_vec();
    long.push(0);
    m.update(INPUT);
    assert_eq!(m.verify(&long), Err(MacError::Verification));
}
