use crate::{Error, cold_path};

/// Tag types of the binary NBT format.
///
/// Booleans have no tag of their own and are written as [`Tag::Byte`]; the
/// array tags are accepted on input and decoded to lists.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Tag {
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

impl Tag {
    /// Returns `true` for the fixed-size numeric tags.
    ///
    /// # Example
    ///
    /// ```
    /// use dataview::Tag;
    ///
    /// assert!(Tag::Int.is_primitive());
    /// assert!(!Tag::String.is_primitive());
    /// ```
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Float | Self::Double
        )
    }

    pub const fn is_array(self) -> bool {
        matches!(self, Self::ByteArray | Self::IntArray | Self::LongArray)
    }

    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// Payload size of a primitive tag, or element size of an array tag.
    pub(crate) const fn size(self) -> usize {
        match self {
            Self::Byte | Self::ByteArray => 1,
            Self::Short => 2,
            Self::Int | Self::Float | Self::IntArray => 4,
            Self::Long | Self::Double | Self::LongArray => 8,
            Self::End | Self::String | Self::List | Self::Compound => 0,
        }
    }
}

impl TryFrom<u8> for Tag {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        Ok(match value {
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
            _ => {
                cold_path();
                return Err(Error::InvalidTagType(value));
            }
        })
    }
}

impl From<Tag> for u8 {
    #[inline]
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}
