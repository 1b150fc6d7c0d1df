//! Utilities for testing DRNG implementations.
//!
//! If you implement [`Drng`][crate::Drng] it is **very highly**
//! recommended that you use these tests.

#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::panic)]
#![cfg(any(test, feature = "test_util"))]
#![cfg_attr(docsrs, doc(cfg(feature = "test_util")))]
#![forbid(unsafe_code)]

pub mod drng;

pub use drng::test_drng;
#[doc(hidden)]
pub use fke_core::__apply;
