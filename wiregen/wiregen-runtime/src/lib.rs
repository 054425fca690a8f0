//! Support facilities for decoders generated by `wiregen`.
//!
//! Generated units import at most three items from this crate, depending on
//! the field kinds they contain:
//!
//! - [`Buf`] — big-endian fixed-width reads (`try_get_i32`, ...)
//! - [`read_uvarint`] — unsigned varint length and count prefixes
//! - [`DecodeError`] — error construction for null, length and nesting
//!   failures
//!
//! Every generated decode routine returns `Result<_, DecodeError>`.

mod error;
mod varint;

pub use bytes::Buf;
pub use error::{DecodeError, VarintError};
pub use varint::{MAX_VARINT_BYTES, read_uvarint};

/// Wire value of a 2-byte string length prefix that marks a null string
/// (`-1` as a signed 16-bit integer).
pub const STRING_NULL_LENGTH: u16 = 0xFFFF;

/// Largest string length representable by a signed 16-bit prefix.
pub const MAX_STRING_LENGTH: u16 = i16::MAX as u16;

/// Wire value of a compact (varint, length + 1) prefix that marks a null
/// array or byte sequence.
pub const COMPACT_NULL: u32 = 0;

/// Deepest chain of self-referencing records a decoder follows before
/// failing with [`DecodeError::NestingTooDeep`].
pub const MAX_NESTING_DEPTH: usize = 64;
