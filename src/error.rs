//! Error taxonomy.
//!
//! The original C library reports failures as a single `cifex_result_t`
//! enum, with I/O failures folded in by tagging `errno` into the high bit
//! (`cifex_errno = 0x8000`, see `cifex_errno_result`/`cifex_get_errno`).
//! Rust already has a sum type for "one of several distinct failure
//! domains", so `CifexError` just says so directly instead of reusing a
//! spare bit of an integer.

use thiserror::Error;

/// Failures that originate from the CIF grammar or image domain itself, as
/// opposed to the underlying I/O transport.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// The input handed to [`crate::decode`] was empty, so there was
    /// nothing to slurp a single `CIF:` byte from.
    #[error("empty image file")]
    EmptyImageFile,
    /// A required literal, separator, or numeral was not found where the
    /// grammar demands it.
    #[error("syntax error")]
    SyntaxError,
    /// `WERSJA` parsed to zero.
    #[error("invalid version")]
    InvalidVersion,
    /// `WERSJA` named a version newer than this library understands.
    #[error("unsupported version")]
    UnsupportedVersion,
    /// `bitów_na_piksel` is not a whole number of bytes, or does not
    /// correspond to a known channel layout.
    #[error("invalid bits per pixel")]
    InvalidBpp,
    /// A `METADANE` line had a mandatory prefix and separator but no key
    /// bytes before the next separator.
    #[error("empty metadata key")]
    EmptyMetadataKey,
    /// A metadata key given to the encoder contains an ASCII space, which
    /// would be indistinguishable from the key/value separator on re-read.
    #[error("metadata key contains a space")]
    InvalidMetadataKey,
    /// A metadata value given to the encoder contains a line feed, which
    /// would be indistinguishable from the end of the `METADANE` line.
    #[error("metadata value contains a line feed")]
    InvalidMetadataValue,
    /// A pixel channel numeral parsed to a value greater than 255.
    #[error("channel value out of range")]
    ChannelOutOfRange,
    /// `emit_number` was asked to spell out a value of 1,000,000 or more.
    #[error("number too large to spell out")]
    NumberTooLarge,
    /// Encoding was asked to write a file without the `polish` flag set.
    #[error("missing language flag")]
    MissingLanguage,
}

/// The top-level error type returned by both the decoder and the encoder.
#[derive(Error, Debug)]
pub enum CifexError {
    /// A domain/grammar-level failure.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A decode failure, stamped with the position in the input at which it was
/// detected.
///
/// `line` is the 1-based line on which the offending token starts; `byte`
/// is the 0-based byte offset into the buffer. Both refer to the position
/// the cursor had reached when the failure was raised, which for pixel
/// errors is the first offending pixel, not the last (see
/// [`crate::pixels`]).
#[derive(Debug, Error)]
#[error("{error} at line {line}, byte {byte}")]
pub struct DecodeError {
    pub error: CifexError,
    pub line: usize,
    pub byte: usize,
}
