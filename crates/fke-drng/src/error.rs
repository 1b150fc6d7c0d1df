#![forbid(unsafe_code)]

pub use fke_core::mac::MacError;

use crate::{errno::Errno, selftest::Algorithm};

/// Shorthand for `Result`s that use [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Encompasses the different errors directly returned by this
/// crate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument was invalid.
    ///
    /// It describes why the argument is invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The ciphertext could not be authenticated.
    #[error("authentication failure")]
    Authentication,
    /// A tunable parameter is out of range.
    #[error("out of range: {0}")]
    OutOfRange(&'static str),
    /// The DRNG must be reseeded before it can produce more
    /// output.
    #[error("reseed counter overflow")]
    Overflow,
    /// The algorithm was not compiled in.
    #[error("not supported: {0}")]
    NotSupported(&'static str),
    /// The algorithm failed its known-answer test.
    #[error("selftest failed: {0}")]
    SelftestFailed(Algorithm),
    /// A MAC failure.
    #[error(transparent)]
    Mac(#[from] MacError),
}

impl Error {
    /// Returns the POSIX error code that corresponds to this
    /// error.
    ///
    /// Callers that speak the C convention return the negated
    /// code.
    pub const fn errno(&self) -> Errno {
        match self {
            Self::InvalidArgument(_) => Errno::EINVAL,
            Self::Authentication => Errno::EBADMSG,
            Self::OutOfRange(_) => Errno::ERANGE,
            Self::Overflow => Errno::EOVERFLOW,
            Self::NotSupported(_) | Self::SelftestFailed(_) => Errno::EOPNOTSUPP,
            Self::Mac(MacError::Verification) => Errno::EBADMSG,
            Self::Mac(MacError::InsecureKey) => Errno::EINVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        let tests = [
            (Error::InvalidArgument("x"), libc::EINVAL),
            (Error::Authentication, libc::EBADMSG),
            (Error::OutOfRange("x"), libc::ERANGE),
            (Error::Overflow, libc::EOVERFLOW),
            (Error::NotSupported("x"), libc::EOPNOTSUPP),
            (Error::SelftestFailed(Algorithm::HashCrypt), libc::EOPNOTSUPP),
            (Error::Mac(MacError::Verification), libc::EBADMSG),
            (Error::Mac(MacError::InsecureKey), libc::EINVAL),
        ];
        for (err, want) in tests {
            assert_eq!(err.errno().code(), want, "{err}");
        }
    }
}
