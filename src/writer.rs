//! NBT primitive encoder.

use std::io::Write;

use byteorder::{ByteOrder, NativeEndian};

use crate::error::{Error, Result};
use crate::options::{Endianness, Options};
use crate::swap::{swap16, swap32, swap64};
use crate::types::TagType;
use crate::varint;

/// Size of the scratch buffer used for primitives and short strings.
const BUFFER_SIZE: usize = 256;

/// Longest string, in UTF-8 bytes, the fixed-width variant can carry.
pub const MAX_STRING_LENGTH: usize = 32767;

/// Longest string, in UTF-8 bytes, the compact variant can carry.
pub const MAX_COMPACT_STRING_LENGTH: usize = u8::MAX as usize;

/// Largest slice handed to a single `write_all` call by [`Writer::write_bytes`].
pub const MAX_WRITE_CHUNK: usize = 512 * 1024 * 1024;

/// Writer encodes NBT primitives to a byte stream.
///
/// Byte order is fixed at construction. The scratch buffer is overwritten by
/// every call and holds nothing between calls.
pub struct Writer<W: Write> {
    inner: W,
    options: Options,
    swap: bool,
    buffer: [u8; BUFFER_SIZE],
}

impl<W: Write> Writer<W> {
    /// Creates a new writer over `inner`.
    pub fn new(inner: W, options: Options) -> Self {
        Self {
            inner,
            swap: options.endianness.needs_swap(),
            options,
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Returns the options this writer encodes with.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Returns the byte order of fixed-width fields.
    pub fn endianness(&self) -> Endianness {
        self.options.endianness
    }

    /// Returns true if 32-bit integers and string lengths use the compact encoding.
    pub fn is_compact(&self) -> bool {
        self.options.compact
    }

    /// Switches between the fixed-width and compact wire variants.
    ///
    /// Meant to be called before the first write; a stream that mixes both
    /// variants cannot be read back.
    pub fn set_compact(&mut self, compact: bool) {
        self.options.compact = compact;
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Returns a mutable reference to the underlying writer.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consumes this Writer, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(Error::from)
    }

    fn write_scratch(&mut self, len: usize) -> Result<()> {
        self.inner.write_all(&self.buffer[..len]).map_err(Error::from)
    }

    /// Writes a raw byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buffer[0] = value;
        self.write_scratch(1)
    }

    /// Writes a signed byte.
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_u8(value as u8)
    }

    /// Writes a tag-type marker.
    pub fn write_tag_type(&mut self, tag: TagType) -> Result<()> {
        self.write_u8(tag as u8)
    }

    /// Writes an unsigned 16-bit integer in the configured byte order.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        let value = if self.swap { swap16(value) } else { value };
        NativeEndian::write_u16(&mut self.buffer[..2], value);
        self.write_scratch(2)
    }

    /// Writes a signed 16-bit integer in the configured byte order.
    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_u16(value as u16)
    }

    fn write_fixed32(&mut self, value: u32) -> Result<()> {
        let value = if self.swap { swap32(value) } else { value };
        NativeEndian::write_u32(&mut self.buffer[..4], value);
        self.write_scratch(4)
    }

    fn write_fixed64(&mut self, value: u64) -> Result<()> {
        let value = if self.swap { swap64(value) } else { value };
        NativeEndian::write_u64(&mut self.buffer[..8], value);
        self.write_scratch(8)
    }

    /// Writes a 32-bit signed integer.
    ///
    /// Compact mode writes a ZigZag VarInt, otherwise four bytes in the
    /// configured byte order.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        if self.options.compact {
            self.write_var_int(value)
        } else {
            self.write_fixed32(value as u32)
        }
    }

    /// Writes a ZigZag VarInt regardless of mode.
    pub fn write_var_int(&mut self, value: i32) -> Result<()> {
        varint::write_i32(&mut self.inner, value)
    }

    /// Writes a 64-bit signed integer. Always fixed-width.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_fixed64(value as u64)
    }

    /// Writes a 32-bit float (IEEE 754).
    pub fn write_f32(&mut self, value: f32) -> Result<()> {
        self.write_fixed32(value.to_bits())
    }

    /// Writes a 64-bit float (IEEE 754).
    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.write_fixed64(value.to_bits())
    }

    /// Writes a length-prefixed UTF-8 string.
    ///
    /// The prefix is one byte in compact mode and an unsigned 16-bit value
    /// otherwise. Strings longer than the prefix allows are rejected rather
    /// than truncated.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        let len = bytes.len();
        let max = if self.options.compact {
            MAX_COMPACT_STRING_LENGTH
        } else {
            MAX_STRING_LENGTH
        };
        if len > max {
            log::debug!("refusing to write {len} byte string, limit is {max}");
            return Err(Error::string_too_long(len, max));
        }

        let prefix = if self.options.compact {
            self.buffer[0] = len as u8;
            1
        } else {
            let len = if self.swap {
                swap16(len as u16)
            } else {
                len as u16
            };
            NativeEndian::write_u16(&mut self.buffer[..2], len);
            2
        };

        if prefix + len <= BUFFER_SIZE {
            self.buffer[prefix..prefix + len].copy_from_slice(bytes);
            return self.write_scratch(prefix + len);
        }

        self.write_scratch(prefix)?;
        log::trace!("writing {len} byte string in chunks");
        let mut rest = value;
        while !rest.is_empty() {
            let mut end = rest.len().min(BUFFER_SIZE);
            // Never split a code point across two writes.
            while !rest.is_char_boundary(end) {
                end -= 1;
            }
            let (chunk, tail) = rest.split_at(end);
            self.inner.write_all(chunk.as_bytes())?;
            rest = tail;
        }
        Ok(())
    }

    /// Writes raw bytes, at most [`MAX_WRITE_CHUNK`] per underlying call.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.write_chunked(data, MAX_WRITE_CHUNK)
    }

    fn write_chunked(&mut self, data: &[u8], chunk_size: usize) -> Result<()> {
        if data.len() > chunk_size {
            log::trace!("writing {} byte payload in chunks", data.len());
        }
        for chunk in data.chunks(chunk_size) {
            self.inner.write_all(chunk)?;
        }
        Ok(())
    }
}
