//! Tag-type markers and the selective-skip hook.

/// NBT tag types.
///
/// On the wire a tag type is a single byte. Values above [`TagType::MAX`]
/// are rejected by [`Reader::read_tag_type`](crate::Reader::read_tag_type).
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TagType {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagType {
    /// The highest defined tag type.
    ///
    /// `LongArray` (12) is the last tag current NBT defines. Some older
    /// readers stopped at `IntArray` (11) and would reject streams carrying
    /// long arrays; bytes above 12 are rejected here.
    pub const MAX: TagType = TagType::LongArray;

    /// Converts a u8 to a TagType.
    pub const fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            _ => return None,
        })
    }

    /// Returns `true` for tags whose payload has a fixed size.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::End
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    pub const fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::IntArray | Self::LongArray)
    }

    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// Size of the payload in the fixed-width wire variant, if it is fixed.
    ///
    /// In compact mode an `Int` payload is a VarInt and has no fixed size.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Self::End => Some(0),
            Self::Byte => Some(1),
            Self::Short => Some(2),
            Self::Int | Self::Float => Some(4),
            Self::Long | Self::Double => Some(8),
            _ => None,
        }
    }
}

impl TryFrom<u8> for TagType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Self::from_u8(value).ok_or(value)
    }
}

impl From<TagType> for u8 {
    fn from(tag: TagType) -> u8 {
        tag as u8
    }
}

/// Decides whether a tag should be decoded or skipped.
///
/// A tree walker asks the selector once per tag, passing the tag type and
/// its name (empty for list elements and the unnamed root). Returning
/// `false` means the walker should take the skip path for that payload.
pub trait TagSelector {
    fn select(&self, tag_type: TagType, name: &str) -> bool;
}

impl<F> TagSelector for F
where
    F: Fn(TagType, &str) -> bool,
{
    fn select(&self, tag_type: TagType, name: &str) -> bool {
        self(tag_type, name)
    }
}
