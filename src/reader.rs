//! NBT primitive decoder.

use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{ByteOrder, NativeEndian};

use crate::error::{Error, Result};
use crate::options::{Endianness, Options};
use crate::swap::{swap16, swap32, swap64};
use crate::types::{TagSelector, TagType};
use crate::varint;

/// Strings shorter than this are decoded through a reusable buffer.
const STRING_BUFFER_SIZE: usize = 64;

/// Size of the discard buffer used to skip on streams that cannot seek.
const SKIP_BUFFER_SIZE: usize = 8 * 1024;

type SeekFn<R> = fn(&mut R, i64) -> io::Result<u64>;

fn seek_forward<R: Seek>(inner: &mut R, count: i64) -> io::Result<u64> {
    inner.seek(SeekFrom::Current(count))
}

/// Reader decodes NBT primitives from a byte stream.
///
/// Byte order is fixed at construction. Every variable-length primitive has
/// both a decode and a skip entry point so a tree walker can bypass payloads
/// it does not want, optionally guided by a [`TagSelector`].
pub struct Reader<'s, R: Read> {
    inner: R,
    options: Options,
    swap: bool,
    seek: Option<SeekFn<R>>,
    buffer: [u8; 8],
    string_buffer: [u8; STRING_BUFFER_SIZE],
    skip_buffer: Option<Box<[u8]>>,
    selector: Option<&'s (dyn TagSelector + Sync)>,
}

impl<'s, R: Read> Reader<'s, R> {
    /// Creates a reader over a stream that can only be read sequentially.
    ///
    /// [`skip`](Self::skip) reads and discards bytes.
    pub fn new(inner: R, options: Options) -> Self {
        Self {
            inner,
            swap: options.endianness.needs_swap(),
            options,
            seek: None,
            buffer: [0; 8],
            string_buffer: [0; STRING_BUFFER_SIZE],
            skip_buffer: None,
            selector: None,
        }
    }

    /// Installs a selective-skip hook.
    pub fn with_selector(mut self, selector: &'s (dyn TagSelector + Sync)) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Replaces the selective-skip hook.
    pub fn set_selector(&mut self, selector: Option<&'s (dyn TagSelector + Sync)>) {
        self.selector = selector;
    }

    /// Removes the selective-skip hook.
    pub fn clear_selector(&mut self) {
        self.selector = None;
    }

    /// Returns the installed selective-skip hook, if any.
    pub fn selector(&self) -> Option<&'s (dyn TagSelector + Sync)> {
        self.selector
    }

    /// Asks the installed selector about a tag. Without one, every tag is selected.
    pub fn selects(&self, tag_type: TagType, name: &str) -> bool {
        self.selector
            .map_or(true, |selector| selector.select(tag_type, name))
    }

    /// Returns the options this reader decodes with.
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
    /// Must match the options the stream was written with.
    pub fn set_compact(&mut self, compact: bool) {
        self.options.compact = compact;
    }

    /// Returns true if [`skip`](Self::skip) moves the stream position directly.
    pub fn is_seekable(&self) -> bool {
        self.seek.is_some()
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the underlying reader.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consumes this Reader, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self, len: usize) -> Result<()> {
        self.inner
            .read_exact(&mut self.buffer[..len])
            .map_err(Error::from_read)
    }

    /// Reads a raw byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.fill(1)?;
        Ok(self.buffer[0])
    }

    /// Reads a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a tag-type marker.
    pub fn read_tag_type(&mut self) -> Result<TagType> {
        let value = self.read_u8()?;
        TagType::from_u8(value).ok_or_else(|| {
            log::debug!("tag type {value} out of range");
            Error::InvalidTagType(value)
        })
    }

    /// Reads an unsigned 16-bit integer in the configured byte order.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.fill(2)?;
        let value = NativeEndian::read_u16(&self.buffer[..2]);
        Ok(if self.swap { swap16(value) } else { value })
    }

    /// Reads a signed 16-bit integer in the configured byte order.
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    fn read_fixed32(&mut self) -> Result<u32> {
        self.fill(4)?;
        let value = NativeEndian::read_u32(&self.buffer[..4]);
        Ok(if self.swap { swap32(value) } else { value })
    }

    fn read_fixed64(&mut self) -> Result<u64> {
        self.fill(8)?;
        let value = NativeEndian::read_u64(&self.buffer[..8]);
        Ok(if self.swap { swap64(value) } else { value })
    }

    /// Reads a 32-bit signed integer.
    ///
    /// Compact mode reads a ZigZag VarInt, otherwise four bytes in the
    /// configured byte order.
    pub fn read_i32(&mut self) -> Result<i32> {
        if self.options.compact {
            self.read_var_int()
        } else {
            Ok(self.read_fixed32()? as i32)
        }
    }

    /// Reads a ZigZag VarInt regardless of mode.
    pub fn read_var_int(&mut self) -> Result<i32> {
        varint::read_i32(&mut self.inner)
    }

    /// Reads a 64-bit signed integer. Always fixed-width.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_fixed64()? as i64)
    }

    /// Reads a 32-bit float (IEEE 754).
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_fixed32()?))
    }

    /// Reads a 64-bit float (IEEE 754).
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_fixed64()?))
    }

    fn read_string_length(&mut self) -> Result<usize> {
        if self.options.compact {
            return Ok(self.read_u8()? as usize);
        }
        let length = self.read_i16()?;
        if length < 0 {
            log::debug!("negative string length {length}");
            return Err(Error::NegativeStringLength(length));
        }
        Ok(length as usize)
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let mut value = String::new();
        self.read_string_into(&mut value)?;
        Ok(value)
    }

    /// Reads a length-prefixed UTF-8 string into `out`, replacing its contents.
    ///
    /// Reusing `out` across calls avoids a fresh allocation per string.
    pub fn read_string_into(&mut self, out: &mut String) -> Result<()> {
        let length = self.read_string_length()?;

        if length < STRING_BUFFER_SIZE {
            let bytes = &mut self.string_buffer[..length];
            self.inner.read_exact(bytes).map_err(Error::from_read)?;
            let value = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
            out.clear();
            out.push_str(value);
            return Ok(());
        }

        let mut data = std::mem::take(out).into_bytes();
        data.clear();
        data.resize(length, 0);
        self.inner.read_exact(&mut data).map_err(Error::from_read)?;
        *out = String::from_utf8(data).map_err(|_| Error::InvalidUtf8)?;
        Ok(())
    }

    /// Skips a length-prefixed string without decoding it.
    pub fn skip_string(&mut self) -> Result<()> {
        let length = self.read_string_length()?;
        self.skip(length as i64)
    }

    /// Fills `buf` completely from the stream.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf).map_err(Error::from_read)
    }

    /// Reads `length` raw bytes.
    ///
    /// The buffer grows as data arrives, so a corrupt length field cannot
    /// force a huge allocation up front.
    pub fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        (&mut self.inner)
            .take(length as u64)
            .read_to_end(&mut data)?;
        if data.len() < length {
            return Err(Error::UnexpectedEof);
        }
        Ok(data)
    }

    /// Advances the stream by `count` bytes.
    ///
    /// Seekable streams move their position directly. Others are read into a
    /// discard buffer that is allocated on first use.
    pub fn skip(&mut self, count: i64) -> Result<()> {
        if count < 0 {
            return Err(Error::NegativeSkip(count));
        }
        if let Some(seek) = self.seek {
            seek(&mut self.inner, count)?;
            return Ok(());
        }
        if count == 0 {
            return Ok(());
        }

        let buffer = self.skip_buffer.get_or_insert_with(|| {
            log::trace!("allocating {SKIP_BUFFER_SIZE} byte skip buffer");
            vec![0u8; SKIP_BUFFER_SIZE].into_boxed_slice()
        });

        let mut remaining = count as u64;
        while remaining > 0 {
            let want = remaining.min(SKIP_BUFFER_SIZE as u64) as usize;
            match self.inner.read(&mut buffer[..want]) {
                Ok(0) => return Err(Error::UnexpectedEof),
                Ok(n) => remaining -= n as u64,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Io(e)),
            }
        }
        Ok(())
    }
}

impl<'s, R: Read + Seek> Reader<'s, R> {
    /// Creates a reader over a seekable stream.
    ///
    /// [`skip`](Self::skip) seeks instead of reading. Seeking past the end is
    /// not an error here; the next read reports it.
    pub fn new_seekable(inner: R, options: Options) -> Self {
        let mut reader = Self::new(inner, options);
        reader.seek = Some(seek_forward::<R>);
        reader
    }
}
