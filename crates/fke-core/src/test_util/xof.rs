//! [`Xof`] tests.

use super::INPUT;
use crate::xof::{NewXof, Xof, XofReader};

/// Invokes `callback` for each XOF test.
#[macro_export]
macro_rules! for_each_xof_test {
    ($callback:ident) => {
        $crate::__apply! {
            $callback,
            test_xof_basic,
            test_xof_stream,
        }
    };
}
pub use for_each_xof_test;

/// Performs all of the tests in this module.
///
/// # Example
///
/// ```
/// use fke_core::{test_xof, sha3::Shake256};
///
/// test_xof!(shake256, Shake256);
/// ```
#[macro_export]
macro_rules! test_xof {
    ($name:ident, $xof:ty) => {
        mod $name {
            #[allow(unused_imports)]
            use super::*;

            $crate::test_xof!($xof);
        }
    };
    ($xof:ty) => {
        macro_rules! __xof_test {
            ($test:ident) => {
                #[test]
                fn $test() {
                    $crate::test_util::xof::$test::<$xof>()
                }
            };
        }
        $crate::for_each_xof_test!(__xof_test);
    };
}
pub use test_xof;

fn xof_of<T: NewXof>(data: &[u8]) -> [u8; 96] {
    let mut x = T::new();
    x.update(data);
    x.finalize_xof().read_fixed()
}

/// Incremental absorption matches one-shot absorption and the
/// output depends on the input.
pub fn test_xof_basic<T: NewXof>() {
    let want = xof_of::<T>(INPUT);

    let mut x = T::new();
    for c in INPUT {
        x.update(&[*c]);
    }
    let got: [u8; 96] = x.finalize_xof().read_fixed();
    assert_eq!(want, got);

    let mut modified = INPUT.to_vec();
    modified[0] += 1;
    assert_ne!(want, xof_of::<T>(&modified));
}

/// Reading in pieces across rate boundaries continues the same
/// stream.
pub fn test_xof_stream<T: NewXof>() {
    let mut whole = vec![0u8; T::RATE * 3 + 7];
    {
        let mut x = T::new();
        x.update(INPUT);
        x.finalize_xof_into(&mut whole);
    }

    let mut pieces = vec![0u8; whole.len()];
    let mut r = {
        let mut x = T::new();
        x.update(INPUT);
        x.finalize_xof()
    };
    let mut off = 0;
    for n in [1, T::RATE - 1, 2, T::RATE, 33] {
        r.read(&mut pieces[off..off + n]);
        off += n;
    }
    r.read(&mut pieces[off..]);
    assert_eq!(whole, pieces);
}
