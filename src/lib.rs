//! nbtio - streaming primitive codec for NBT tagged-value data.
//!
//! [`Reader`] and [`Writer`] translate between a byte stream and the
//! primitives an NBT tree is built from: fixed-width integers, IEEE-754
//! floats, length-prefixed UTF-8 strings and tag-type markers. Two wire
//! variants are supported, selected through [`Options`]:
//!
//! * fixed-width, in big- or little-endian byte order;
//! * compact, where 32-bit integers are ZigZag VarInts and string lengths
//!   are a single byte.
//!
//! The stream carries no marker saying which variant it uses.
//!
//! # Example
//!
//! ```rust
//! use nbtio::{Options, Reader, Result, TagType, Writer};
//!
//! fn main() -> Result<()> {
//!     let options = Options::little_endian().with_compact(true);
//!
//!     // Encoding
//!     let mut writer = Writer::new(Vec::new(), options);
//!     writer.write_tag_type(TagType::Int)?;
//!     writer.write_string("level")?;
//!     writer.write_i32(-42)?;
//!     let data = writer.into_inner();
//!
//!     // Decoding
//!     let mut reader = Reader::new(data.as_slice(), options);
//!     assert_eq!(reader.read_tag_type()?, TagType::Int);
//!     if reader.selects(TagType::Int, "level") {
//!         reader.skip_string()?;
//!         assert_eq!(reader.read_i32()?, -42);
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod options;
mod reader;
pub mod swap;
mod types;
pub mod varint;
mod writer;

pub use error::{Error, ErrorKind, Result};
pub use options::{Endianness, Options};
pub use reader::Reader;
pub use types::{TagSelector, TagType};
pub use writer::{Writer, MAX_COMPACT_STRING_LENGTH, MAX_STRING_LENGTH, MAX_WRITE_CHUNK};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Marshal encodes primitives into a new buffer using a custom encoder function.
pub fn marshal<F>(options: Options, encoder: F) -> Result<Vec<u8>>
where
    F: FnOnce(&mut Writer<Vec<u8>>) -> Result<()>,
{
    let mut writer = Writer::new(Vec::new(), options);
    encoder(&mut writer)?;
    Ok(writer.into_inner())
}

/// Unmarshal decodes a value from a buffer using a custom decoder function.
///
/// The reader skips by seeking, so skipped payloads cost nothing.
pub fn unmarshal<T, F>(data: &[u8], options: Options, decoder: F) -> Result<T>
where
    F: FnOnce(&mut Reader<'_, std::io::Cursor<&[u8]>>) -> Result<T>,
{
    let mut reader = Reader::new_seekable(std::io::Cursor::new(data), options);
    decoder(&mut reader)
}
