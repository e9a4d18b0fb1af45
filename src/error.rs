//! Common error types used throughout the crate.

use std::fmt;

use anybytes::view::ViewError;

/// Result type used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type covering failures across seqpack alphabets and containers.
#[derive(Debug)]
pub enum Error {
    /// A character has no lossless mapping into the target alphabet.
    InvalidCharAssignment {
        /// Name of the alphabet type that rejected the character.
        type_name: &'static str,
        /// The offending character.
        character: char,
    },
    /// An argument was malformed or violated a domain bound.
    InvalidArgument(String),
    /// An index was not smaller than the logical size.
    OutOfRange {
        /// Requested position.
        index: usize,
        /// Logical size at the time of the request.
        len: usize,
    },
    /// A value does not fit into the requested integer type.
    Overflow(String),
    /// Deserialized metadata was malformed or inconsistent.
    InvalidMetadata(String),
    /// Wrapper around [`anybytes::view::ViewError`] values.
    View(ViewError),
}

impl Error {
    /// Creates an [`Error::InvalidCharAssignment`] for the alphabet `T`.
    pub fn invalid_char<T: ?Sized>(character: char) -> Self {
        Self::InvalidCharAssignment {
            type_name: std::any::type_name::<T>(),
            character,
        }
    }

    /// Creates an [`Error::InvalidArgument`] with the provided message.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an [`Error::OutOfRange`] for `index` against `len`.
    pub const fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Creates an [`Error::Overflow`] with the provided message.
    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    /// Creates an [`Error::InvalidMetadata`] with the provided message.
    pub fn invalid_metadata(msg: impl Into<String>) -> Self {
        Self::InvalidMetadata(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCharAssignment {
                type_name,
                character,
            } => write!(
                f,
                "assigning {character:?} to an alphabet of type {type_name} would incur information loss"
            ),
            Error::InvalidArgument(msg) => write!(f, "{msg}"),
            Error::OutOfRange { index, len } => {
                write!(f, "index must be less than len()={len}, but got {index}.")
            }
            Error::Overflow(msg) => write!(f, "{msg}"),
            Error::InvalidMetadata(msg) => write!(f, "{msg}"),
            Error::View(err) => write!(f, "view error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidCharAssignment { .. }
            | Error::InvalidArgument(_)
            | Error::OutOfRange { .. }
            | Error::Overflow(_)
            | Error::InvalidMetadata(_) => None,
            Error::View(err) => Some(err),
        }
    }
}

impl From<ViewError> for Error {
    fn from(err: ViewError) -> Self {
        Error::View(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message() {
        assert_eq!(
            Error::out_of_range(5, 3).to_string(),
            "index must be less than len()=3, but got 5."
        );
    }

    #[test]
    fn invalid_char_names_the_type() {
        let e = Error::invalid_char::<u8>('x');
        assert!(matches!(
            e,
            Error::InvalidCharAssignment {
                type_name: "u8",
                character: 'x'
            }
        ));
        assert_eq!(
            e.to_string(),
            "assigning 'x' to an alphabet of type u8 would incur information loss"
        );
    }
}
