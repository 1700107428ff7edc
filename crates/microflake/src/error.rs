use core::fmt;

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `microflake` can emit.
///
/// Encoding and generation are infallible; errors only surface when decoding
/// untrusted strings or when converting an embedded timestamp to a point in
/// time.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The input contained a byte outside the base62 alphabet.
    ///
    /// The identifier is malformed and cannot be decoded.
    InvalidCharacter {
        /// The offending byte.
        byte: u8,
        /// Its position within the input string.
        index: usize,
    },

    /// The decoded value does not fit in the identifier's 160 bits.
    ///
    /// Inputs longer than the canonical encoding, or 27-character strings
    /// above the 160-bit ceiling, land here.
    DecodeOverflow,

    /// The embedded timestamp, converted to milliseconds, exceeds the range
    /// that downstream consumers can represent losslessly.
    ///
    /// This signals a clock decades in the future or a corrupted identifier.
    TimestampOverflow {
        /// The out-of-range millisecond value.
        millis: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { byte, index } => {
                write!(f, "invalid base62 byte {byte:#04x} at index {index}")
            }
            Self::DecodeOverflow => write!(f, "decoded value exceeds 160 bits"),
            Self::TimestampOverflow { millis } => {
                write!(f, "timestamp {millis} ms is outside the representable range")
            }
        }
    }
}

impl core::error::Error for Error {}
