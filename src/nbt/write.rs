use std::io::Write;

use zerocopy::byteorder;

use crate::{
    BigEndian, ByteOrder, DataList, DataValue, DataView, Error, LittleEndian, Result, Tag,
    cold_path, util::MAX_DEPTH,
};

fn tag_of(value: &DataValue) -> Result<Tag> {
    Ok(match value {
        DataValue::Boolean(_) | DataValue::Byte(_) => Tag::Byte,
        DataValue::Short(_) => Tag::Short,
        DataValue::Int(_) => Tag::Int,
        DataValue::Long(_) => Tag::Long,
        DataValue::Float(_) => Tag::Float,
        DataValue::Double(_) => Tag::Double,
        DataValue::String(_) => Tag::String,
        DataValue::List(_) => Tag::List,
        DataValue::View(_) => Tag::Compound,
        DataValue::Object(object) => {
            cold_path();
            return Err(Error::UnsupportedValue(object.type_name()));
        }
    })
}

#[inline]
fn write_string<O: ByteOrder>(value: &str, out: &mut Vec<u8>) -> Result<()> {
    let encoded = simd_cesu8::mutf8::encode(value);
    if encoded.len() > u16::MAX as usize {
        cold_path();
        return Err(Error::StringTooLong(encoded.len()));
    }
    out.extend_from_slice(&byteorder::U16::<O>::new(encoded.len() as u16).to_bytes());
    out.extend_from_slice(&encoded);
    Ok(())
}

fn write_payload<O: ByteOrder>(value: &DataValue, out: &mut Vec<u8>, depth: usize) -> Result<()> {
    match value {
        DataValue::Boolean(value) => out.push(u8::from(*value)),
        DataValue::Byte(value) => out.push(*value as u8),
        DataValue::Short(value) => {
            out.extend_from_slice(&byteorder::I16::<O>::new(*value).to_bytes())
        }
        DataValue::Int(value) => out.extend_from_slice(&byteorder::I32::<O>::new(*value).to_bytes()),
        DataValue::Long(value) => {
            out.extend_from_slice(&byteorder::I64::<O>::new(*value).to_bytes())
        }
        DataValue::Float(value) => {
            out.extend_from_slice(&byteorder::F32::<O>::new(*value).to_bytes())
        }
        DataValue::Double(value) => {
            out.extend_from_slice(&byteorder::F64::<O>::new(*value).to_bytes())
        }
        DataValue::String(value) => write_string::<O>(value, out)?,
        DataValue::List(list) => write_list::<O>(list, out, depth + 1)?,
        DataValue::View(view) => write_compound::<O>(view, out, depth + 1)?,
        DataValue::Object(object) => {
            cold_path();
            return Err(Error::UnsupportedValue(object.type_name()));
        }
    }
    Ok(())
}

fn write_list<O: ByteOrder>(list: &DataList, out: &mut Vec<u8>, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        cold_path();
        return Err(Error::NestingTooDeep(MAX_DEPTH));
    }
    let values = list.borrow();
    if values.len() > i32::MAX as usize {
        cold_path();
        return Err(Error::ListTooLong(values.len()));
    }
    let tag = match values.first() {
        Some(first) => tag_of(first)?,
        None => Tag::End,
    };
    out.push(tag as u8);
    out.extend_from_slice(&byteorder::U32::<O>::new(values.len() as u32).to_bytes());
    for value in values.iter() {
        let actual = tag_of(value)?;
        if actual != tag {
            cold_path();
            return Err(Error::TagMismatch(tag as u8, actual as u8));
        }
        write_payload::<O>(value, out, depth)?;
    }
    Ok(())
}

fn write_compound<O: ByteOrder>(view: &DataView, out: &mut Vec<u8>, depth: usize) -> Result<()> {
    if depth > MAX_DEPTH {
        cold_path();
        return Err(Error::NestingTooDeep(MAX_DEPTH));
    }
    for (name, value) in view.snapshot() {
        out.push(tag_of(&value)? as u8);
        write_string::<O>(&name, out)?;
        write_payload::<O>(&value, out, depth)?;
    }
    out.push(Tag::End as u8);
    Ok(())
}

/// Encodes `view` as a root compound with an empty name.
///
/// Only `view`'s subtree is written, so a view deeper in a tree encodes like
/// a container of its own.
///
/// # Errors
///
/// - [`Error::UnsupportedValue`] if the tree holds an opaque object
/// - [`Error::TagMismatch`] if a list mixes value kinds
/// - [`Error::StringTooLong`] if a key or string exceeds 65535 encoded bytes
/// - [`Error::NestingTooDeep`] if lists and views nest too deeply
pub fn write_container<O: ByteOrder>(view: &DataView) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(128);
    out.push(Tag::Compound as u8);
    write_string::<O>("", &mut out)?;
    write_compound::<O>(view, &mut out, 0)?;
    log::debug!(
        "wrote {} ({} entries) as {} bytes of NBT",
        view.current_path(),
        view.len(),
        out.len()
    );
    Ok(out)
}

/// Encodes `view` in big-endian byte order, the layout of Java edition files.
#[inline]
pub fn write_container_be(view: &DataView) -> Result<Vec<u8>> {
    write_container::<BigEndian>(view)
}

/// Encodes `view` in little-endian byte order.
#[inline]
pub fn write_container_le(view: &DataView) -> Result<Vec<u8>> {
    write_container::<LittleEndian>(view)
}

/// Encodes `view` and writes the bytes to `writer`.
///
/// Nothing is written if encoding fails.
pub fn write_container_to_writer<O: ByteOrder>(
    writer: &mut impl Write,
    view: &DataView,
) -> Result<()> {
    let bytes = write_container::<O>(view)?;
    writer.write_all(&bytes).map_err(Error::IO)
}
