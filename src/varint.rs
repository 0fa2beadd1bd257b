//! Variable-length integers (LEB128) with ZigZag mapping for signed values.
//!
//! Each byte carries seven data bits, least significant group first, and a
//! continuation flag in its high bit. Group order never depends on the byte
//! order a [`Reader`](crate::Reader) or [`Writer`](crate::Writer) is
//! configured with.
//!
//! Decoding is bounded: at most [`MAX_VARINT32_BYTES`] bytes are consumed for
//! a 32-bit value and [`MAX_VARINT64_BYTES`] for a 64-bit one, and a value
//! that would not fit its width is rejected instead of wrapping.
//!
//! # Example
//!
//! ```rust
//! use nbtio::varint;
//!
//! let mut buf = Vec::new();
//! varint::write_i32(&mut buf, -300).unwrap();
//! assert_eq!(buf, [0xd7, 0x04]);
//! assert_eq!(varint::read_i32(&mut buf.as_slice()).unwrap(), -300);
//! ```

use std::io::{Read, Write};

use crate::error::{Error, Result};

/// Maximum number of bytes for a varint-encoded 32-bit value.
/// ceil(32/7) = 5.
pub const MAX_VARINT32_BYTES: usize = 5;

/// Maximum number of bytes for a varint-encoded 64-bit value.
/// ceil(64/7) = 10.
pub const MAX_VARINT64_BYTES: usize = 10;

/// Encodes a signed integer using ZigZag encoding.
#[inline]
pub fn zigzag_encode_32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Encodes a signed 64-bit integer using ZigZag encoding.
#[inline]
pub fn zigzag_encode_64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Decodes a ZigZag encoded integer.
#[inline]
pub fn zigzag_decode_32(n: u32) -> i32 {
    ((n >> 1) as i32) ^ (-((n & 1) as i32))
}

/// Decodes a ZigZag encoded 64-bit integer.
#[inline]
pub fn zigzag_decode_64(n: u64) -> i64 {
    ((n >> 1) as i64) ^ (-((n & 1) as i64))
}

/// Returns the number of bytes `value` takes once varint-encoded.
#[inline]
pub fn encoded_len_u32(value: u32) -> usize {
    encoded_len_u64(value as u64)
}

/// Returns the number of bytes `value` takes once varint-encoded.
#[inline]
pub fn encoded_len_u64(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Writes an unsigned varint.
pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    write_raw(writer, value as u64)
}

/// Writes a signed varint using ZigZag encoding.
pub fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    write_raw(writer, zigzag_encode_32(value) as u64)
}

/// Writes an unsigned 64-bit varint.
pub fn write_u64<W: Write>(writer: &mut W, value: u64) -> Result<()> {
    write_raw(writer, value)
}

/// Writes a signed 64-bit varint using ZigZag encoding.
pub fn write_i64<W: Write>(writer: &mut W, value: i64) -> Result<()> {
    write_raw(writer, zigzag_encode_64(value))
}

/// Reads an unsigned varint.
pub fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    Ok(read_raw(reader, MAX_VARINT32_BYTES, u32::BITS)? as u32)
}

/// Reads a signed varint using ZigZag decoding.
pub fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    Ok(zigzag_decode_32(read_u32(reader)?))
}

/// Reads an unsigned 64-bit varint.
pub fn read_u64<R: Read>(reader: &mut R) -> Result<u64> {
    read_raw(reader, MAX_VARINT64_BYTES, u64::BITS)
}

/// Reads a signed 64-bit varint using ZigZag decoding.
pub fn read_i64<R: Read>(reader: &mut R) -> Result<i64> {
    Ok(zigzag_decode_64(read_u64(reader)?))
}

fn write_raw<W: Write>(writer: &mut W, mut value: u64) -> Result<()> {
    let mut buf = [0u8; MAX_VARINT64_BYTES];
    let mut i = 0;

    while value > 0x7f {
        buf[i] = (value as u8 & 0x7f) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    i += 1;

    writer.write_all(&buf[..i])?;
    Ok(())
}

fn read_raw<R: Read>(reader: &mut R, max_bytes: usize, width: u32) -> Result<u64> {
    let mut result: u64 = 0;
    let mut byte = [0u8; 1];

    for i in 0..max_bytes {
        reader.read_exact(&mut byte).map_err(Error::from_read)?;
        let b = byte[0];
        let shift = 7 * i as u32;
        let group = (b & 0x7f) as u64;

        // The last permitted byte must terminate the sequence and may only
        // carry the bits still missing from the target width.
        if i == max_bytes - 1 && (b & 0x80 != 0 || group >> (width - shift) != 0) {
            log::debug!("rejecting varint wider than {width} bits");
            return Err(Error::VarintOverflow { max_bytes });
        }

        result |= group << shift;
        if b & 0x80 == 0 {
            return Ok(result);
        }
    }

    Err(Error::VarintOverflow { max_bytes })
}
