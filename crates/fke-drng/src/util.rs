// Just depends on features
#![allow(unused_macros)]

macro_rules! const_assert {
    ($($tt:tt)*) => {
        #[allow(clippy::arithmetic_side_effects, reason = "compile time arithmetic")]
        const _: () = { ::const_format::assertcp!($($tt)*); };
    }
}
#[allow(unused_imports)]
pub(crate) use const_assert;

/// Similar to [`tracing::debug`], but only emits events when
/// the `unsafe_debug` feature is enabled.
///
/// Events from this macro may contain key-derived material.
macro_rules! debug {
    ($($arg:tt)+) => (
        cfg_if::cfg_if! {
            if #[cfg(feature = "unsafe_debug")] {
                ::tracing::debug!(target: "fke_drng::unsafe_debug", $($arg)+)
            } else {
                if false {
                    ::core::format_args!($($arg)+);
                }
            }
        }
    );
}
#[allow(unused_imports)]
pub(crate) use debug;

/// Formats a short fingerprint of secret material for
/// [`debug!`].
pub(crate) struct Hex<'a>(pub &'a [u8]);

impl core::fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for b in self.0.iter().take(8) {
            write!(f, "{b:02x}")?;
        }
        if self.0.len() > 8 {
            write!(f, "..")?;
        }
        Ok(())
    }
}
