#![forbid(unsafe_code)]

/// Like [`assert!`], but forces a compile-time error.
macro_rules! const_assert {
    ($($tt:tt)*) => {
        #[allow(clippy::arithmetic_side_effects, reason = "compile time arithmetic")]
        const _: () = { ::const_format::assertcp!($($tt)*); };
    }
}
pub(crate) use const_assert;

/// XORs `src` into `dst`.
///
/// Only the common prefix of the two slices is touched.
#[inline]
pub fn xor_into(dst: &mut [u8], src: &[u8]) {
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= s;
    }
}
