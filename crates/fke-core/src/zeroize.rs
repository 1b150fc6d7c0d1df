//! Secure wiping of secret material.

pub use ::zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Overwrites the memory backing `v` with zeros using
/// volatile writes.
///
/// This is for RustCrypto cores (Keccak sponges, SHA-2 block
/// buffers, ChaCha20 states) that do not implement
/// [`Zeroize`] themselves.
///
/// # Safety
///
/// - `T` must not own heap memory, references or pointers.
/// - An all-zero bit pattern must be a valid `T`, including
///   for whatever `Drop` implementation `T` has.
#[inline]
pub unsafe fn wipe_flat<T>(v: &mut T) {
    // SAFETY: `v` is a valid, aligned, exclusive reference and
    // the caller guarantees that all-zero is a valid `T`.
    unsafe { ::zeroize::zeroize_flat_type(v as *mut T) }
}
