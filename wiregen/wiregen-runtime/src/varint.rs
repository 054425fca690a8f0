use bytes::Buf;

use crate::error::{DecodeError, VarintError};

/// Maximum number of bytes a 32-bit unsigned varint can occupy.
/// ceil(32 / 7) = 5 bytes.
pub const MAX_VARINT_BYTES: usize = 5;

/// Read an unsigned base-128 varint (least significant group first) and
/// advance `buf` past it.
///
/// # Wire format examples
///
/// | Value   | Encoded bytes        |
/// |---------|----------------------|
/// | 0       | `[0x00]`             |
/// | 3       | `[0x03]`             |
/// | 127     | `[0x7F]`             |
/// | 128     | `[0x80, 0x01]`       |
/// | 300     | `[0xAC, 0x02]`       |
///
/// # Errors
///
/// [`DecodeError::VarintReadFailure`] when the input ends mid-varint or the
/// value does not fit in 32 bits. On error the number of consumed bytes is
/// unspecified.
pub fn read_uvarint<B: Buf>(buf: &mut B) -> Result<u32, DecodeError> {
    let mut result: u32 = 0;

    for i in 0..MAX_VARINT_BYTES {
        if !buf.has_remaining() {
            return Err(VarintError::Truncated { read: i }.into());
        }
        let byte = buf.get_u8();

        // The fifth group only has room for the top 4 bits.
        if i == MAX_VARINT_BYTES - 1 && byte > 0x0F {
            return Err(VarintError::TooLong.into());
        }

        result |= u32::from(byte & 0x7F) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }

    Err(VarintError::TooLong.into())
}
