//! Support for libc's `errno`.

use core::fmt;

/// libc's `errno`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Errno(::errno::Errno);

#[allow(missing_docs)]
impl Errno {
    pub const EINVAL: Self = Self(::errno::Errno(libc::EINVAL));
    pub const EBADMSG: Self = Self(::errno::Errno(libc::EBADMSG));
    pub const ERANGE: Self = Self(::errno::Errno(libc::ERANGE));
    pub const EOVERFLOW: Self = Self(::errno::Errno(libc::EOVERFLOW));
    pub const EOPNOTSUPP: Self = Self(::errno::Errno(libc::EOPNOTSUPP));
}

impl Errno {
    /// Returns the underlying code.
    #[inline]
    pub const fn code(&self) -> i32 {
        self.0.0
    }

    /// Returns the negated code, as returned by C style
    /// interfaces.
    #[inline]
    pub const fn to_neg(&self) -> i32 {
        self.0.0.wrapping_neg()
    }
}

impl core::error::Error for Errno {}

impl fmt::Debug for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Errno> for i32 {
    #[inline]
    fn from(err: Errno) -> Self {
        err.code()
    }
}
