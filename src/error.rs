//! Error types for nbtio operations.

use std::io;

use thiserror::Error;

/// Result type for nbtio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for nbtio operations.
///
/// None of these are recovered inside the codec. After any error the
/// position of the underlying stream is unspecified and the reader or writer
/// that produced it should be abandoned.
#[derive(Error, Debug)]
pub enum Error {
    /// The stream ended before a primitive was complete.
    #[error("unexpected end of stream")]
    UnexpectedEof,

    /// A tag-type marker outside the defined range.
    #[error("NBT tag type out of range: {0}")]
    InvalidTagType(u8),

    /// A fixed-width string length prefix decoded to a negative value.
    #[error("negative string length: {0}")]
    NegativeStringLength(i16),

    /// A VarInt ran past its maximum byte count or does not fit its width.
    #[error("varint overflow: longer than {max_bytes} bytes or out of range")]
    VarintOverflow { max_bytes: usize },

    /// String bytes are not valid UTF-8.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// A string is too long for the length prefix of the current wire variant.
    #[error("string of {len} bytes exceeds the limit of {max} bytes")]
    StringTooLong { len: usize, max: usize },

    /// `skip` was asked to move backwards.
    #[error("cannot skip a negative number of bytes: {0}")]
    NegativeSkip(i64),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The stream ran out of bytes.
    EndOfStream,
    /// Decoded data violates the wire format.
    Format,
    /// The caller passed an argument the codec does not accept.
    Contract,
    /// The underlying stream failed.
    Io,
}

impl Error {
    /// Creates a string-too-long error.
    pub fn string_too_long(len: usize, max: usize) -> Self {
        Self::StringTooLong { len, max }
    }

    /// Maps a failed read. A short read becomes [`Error::UnexpectedEof`].
    pub(crate) fn from_read(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEof
        } else {
            Self::Io(err)
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnexpectedEof => ErrorKind::EndOfStream,
            Error::InvalidTagType(_)
            | Error::NegativeStringLength(_)
            | Error::VarintOverflow { .. }
            | Error::InvalidUtf8 => ErrorKind::Format,
            Error::StringTooLong { .. } | Error::NegativeSkip(_) => ErrorKind::Contract,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns true if the stream ended early.
    pub fn is_eof(&self) -> bool {
        self.kind() == ErrorKind::EndOfStream
    }
}
