//! Codec configuration shared by [`Reader`](crate::Reader) and
//! [`Writer`](crate::Writer).
//!
//! Two settings select the wire variant:
//!
//! * **byte order** of every fixed-width field;
//! * **compact** mode, where 32-bit integers are ZigZag VarInts and string
//!   lengths are a single byte.
//!
//! Nothing in the stream records either setting. The reader must be built
//! with the options the writer used.

/// Byte order of fixed-width fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    Big,
    Little,
}

impl Endianness {
    /// Byte order of the host.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Endianness = Endianness::Big;

    /// Byte order of the host.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Endianness = Endianness::Little;

    /// Returns true if values must be byte-swapped between host and wire.
    #[inline]
    pub const fn needs_swap(self) -> bool {
        !matches!(
            (self, Self::NATIVE),
            (Endianness::Big, Endianness::Big) | (Endianness::Little, Endianness::Little)
        )
    }
}

/// Wire variant selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Options {
    pub endianness: Endianness,
    pub compact: bool,
}

impl Options {
    /// Creates options for the given byte order, fixed-width integers.
    pub const fn new(endianness: Endianness) -> Self {
        Self {
            endianness,
            compact: false,
        }
    }

    /// Big-endian, fixed-width integers.
    pub const fn big_endian() -> Self {
        Self::new(Endianness::Big)
    }

    /// Little-endian, fixed-width integers.
    pub const fn little_endian() -> Self {
        Self::new(Endianness::Little)
    }

    /// Sets compact mode.
    pub const fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::big_endian()
    }
}
