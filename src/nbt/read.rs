use std::{io::Read, marker::PhantomData};

use zerocopy::byteorder;

use crate::{
    BigEndian, ByteOrder, DataContainer, DataList, DataQuery, DataValue, DataView, Error,
    LittleEndian, Result, SafetyMode, Tag, cold_path, util::MAX_DEPTH,
};

struct Reader<'a, O: ByteOrder> {
    data: &'a [u8],
    pos: usize,
    safety: SafetyMode,
    _marker: PhantomData<O>,
}

macro_rules! check_bounds {
    ($reader:expr, $extra:expr) => {
        if $reader.remaining() < $extra {
            cold_path();
            return Err(Error::EndOfFile);
        }
    };
}

impl<'a, O: ByteOrder> Reader<'a, O> {
    fn new(data: &'a [u8], safety: SafetyMode) -> Self {
        Self {
            data,
            pos: 0,
            safety,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        check_bounds!(self, len);
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0; N];
        bytes.copy_from_slice(self.take(N)?);
        Ok(bytes)
    }

    #[inline]
    fn byte(&mut self) -> Result<u8> {
        Ok(self.array::<1>()?[0])
    }

    #[inline]
    fn length(&mut self) -> Result<usize> {
        Ok(byteorder::U32::<O>::from_bytes(self.array()?).get() as usize)
    }

    fn string(&mut self) -> Result<String> {
        let len = byteorder::U16::<O>::from_bytes(self.array()?).get() as usize;
        let bytes = self.take(len)?;
        Ok(simd_cesu8::mutf8::decode_lossy(bytes).into_owned())
    }

    fn payload(&mut self, tag: Tag, depth: usize) -> Result<DataValue> {
        Ok(match tag {
            Tag::End => {
                cold_path();
                return Err(Error::InvalidTagType(Tag::End as u8));
            }
            Tag::Byte => DataValue::Byte(self.byte()? as i8),
            Tag::Short => DataValue::Short(byteorder::I16::<O>::from_bytes(self.array()?).get()),
            Tag::Int => DataValue::Int(byteorder::I32::<O>::from_bytes(self.array()?).get()),
            Tag::Long => DataValue::Long(byteorder::I64::<O>::from_bytes(self.array()?).get()),
            Tag::Float => DataValue::Float(byteorder::F32::<O>::from_bytes(self.array()?).get()),
            Tag::Double => DataValue::Double(byteorder::F64::<O>::from_bytes(self.array()?).get()),
            Tag::String => DataValue::String(self.string()?),
            Tag::ByteArray | Tag::IntArray | Tag::LongArray => DataValue::List(self.array_list(tag)?),
            Tag::List => DataValue::List(self.list(depth + 1)?),
            Tag::Compound => {
                let container = DataContainer::with_safety(self.safety);
                self.compound(&container, depth + 1)?;
                DataValue::View(container.into_view())
            }
        })
    }

    fn array_list(&mut self, tag: Tag) -> Result<DataList> {
        let len = self.length()?;
        check_bounds!(self, len.saturating_mul(tag.size()));
        let element = match tag {
            Tag::ByteArray => Tag::Byte,
            Tag::IntArray => Tag::Int,
            _ => Tag::Long,
        };
        let mut values = Vec::with_capacity(len);
        for _ in 0..len {
            values.push(self.payload(element, 0)?);
        }
        Ok(DataList::from(values))
    }

    fn list(&mut self, depth: usize) -> Result<DataList> {
        if depth > MAX_DEPTH {
            cold_path();
            return Err(Error::NestingTooDeep(MAX_DEPTH));
        }
        let tag = self.byte()?;
        let len = self.length()?;
        if tag == Tag::End as u8 {
            if len != 0 {
                cold_path();
                return Err(Error::InvalidTagType(tag));
            }
            return Ok(DataList::new());
        }
        let tag = Tag::try_from(tag)?;
        // Every element takes at least one byte.
        let mut values = Vec::with_capacity(len.min(self.remaining()));
        for _ in 0..len {
            values.push(self.payload(tag, depth)?);
        }
        Ok(DataList::from(values))
    }

    fn compound(&mut self, view: &DataView, depth: usize) -> Result<()> {
        if depth > MAX_DEPTH {
            cold_path();
            return Err(Error::NestingTooDeep(MAX_DEPTH));
        }
        loop {
            let tag = self.byte()?;
            if tag == Tag::End as u8 {
                return Ok(());
            }
            let tag = Tag::try_from(tag)?;
            let name = self.string()?;
            if tag == Tag::Compound {
                let child = view.create_view(DataQuery::from_parts([name]))?;
                self.compound(&child, depth + 1)?;
            } else {
                // Decoded values are owned by this tree alone.
                let value = self.payload(tag, depth)?;
                view.store_owned(&name, value);
            }
        }
    }
}

/// Decodes a root compound into a container with the default safety mode.
///
/// # Errors
///
/// - [`Error::EndOfFile`] if the input is truncated
/// - [`Error::InvalidTagType`] if the root is not a compound or a tag is unknown
/// - [`Error::TrailingData`] if bytes remain after the root compound
/// - [`Error::NestingTooDeep`] if lists and compounds nest too deeply
#[inline]
pub fn read_container<O: ByteOrder>(bytes: &[u8]) -> Result<DataContainer> {
    read_container_with::<O>(bytes, SafetyMode::default())
}

/// Decodes a root compound into a container using `safety`.
///
/// Compounds nested in lists become standalone containers with the same mode.
pub fn read_container_with<O: ByteOrder>(bytes: &[u8], safety: SafetyMode) -> Result<DataContainer> {
    let mut reader = Reader::<O>::new(bytes, safety);
    let tag = reader.byte()?;
    if tag != Tag::Compound as u8 {
        cold_path();
        return Err(Error::InvalidTagType(tag));
    }
    let name = reader.string()?;
    let container = DataContainer::with_safety(safety);
    reader.compound(&container, 0)?;
    if reader.remaining() > 0 {
        cold_path();
        return Err(Error::TrailingData(reader.remaining()));
    }
    log::debug!(
        "read {} bytes of NBT into {:?} ({} entries)",
        bytes.len(),
        name,
        container.len()
    );
    Ok(container)
}

#[inline]
pub fn read_container_be(bytes: &[u8]) -> Result<DataContainer> {
    read_container::<BigEndian>(bytes)
}

#[inline]
pub fn read_container_le(bytes: &[u8]) -> Result<DataContainer> {
    read_container::<LittleEndian>(bytes)
}

/// Reads `reader` to its end and decodes the bytes like [`read_container`].
pub fn read_container_from_reader<O: ByteOrder>(mut reader: impl Read) -> Result<DataContainer> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(Error::IO)?;
    read_container::<O>(&bytes)
}
