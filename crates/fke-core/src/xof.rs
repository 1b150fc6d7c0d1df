//! eXtendable Output Function ([XOF]).
//!
//! [XOF]: https://csrc.nist.gov/glossary/term/extendable_output_function

/// An extendable output function (XOF).
///
/// Examples of XOFs include SHAKE-128 and SHAKE-256.
pub trait Xof: Sized {
    /// The human readable name of the XOF.
    const NAME: &'static str;

    /// The rate (block size) in bytes of the underlying sponge.
    const RATE: usize;

    /// Reads output bytes.
    type Reader: XofReader;

    /// Updates the running hash with `data`.
    fn update(&mut self, data: &[u8]);

    /// Returns the output of the XOF.
    ///
    /// Successive calls to [`XofReader::read`] continue the
    /// same output stream.
    fn finalize_xof(self) -> Self::Reader;

    /// Writes the XOF output to `out`.
    fn finalize_xof_into(self, out: &mut [u8]) {
        self.finalize_xof().read(out);
    }
}

/// An unkeyed XOF that can be created from nothing.
pub trait NewXof: Xof {
    /// Creates a fresh XOF instance.
    fn new() -> Self;
}

/// A keyed XOF, such as KMACXOF256.
///
/// The key and the customization string are both part of the
/// initial state. An empty key is permitted.
pub trait KeyedXof: Xof {
    /// Creates a keyed XOF with the customization string `s`.
    fn new_keyed(key: &[u8], s: &[u8]) -> Self;
}

/// Output bytes from an XOF.
pub trait XofReader {
    /// Reads output bytes from the XOF into `out`.
    fn read(&mut self, out: &mut [u8]);

    /// Reads `N` output bytes from the XOF into `out`.
    fn read_fixed<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        self.read(&mut out);
        out
    }
}
