use crate::varint::{read_varint, write_varint};
use anyhow::Result;
use std::io::{Read, Write};
use tagwire_types::wire::{WireReader, WireType, WireWriter, STOP};

pub const BOOL_FALSE: u8 = 1;
pub const BOOL_TRUE: u8 = 2;

const MAX_DELTA: u16 = 15;
const MAX_PACKED_COUNT: usize = 14;
const COUNT_FOLLOWS: u8 = 0x0F;

/// The low nibble of a struct field header.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FieldType {
    BoolFalse,
    BoolTrue,
    Value(WireType),
}

impl FieldType {
    pub fn from_bool(b: bool) -> Self {
        if b {
            Self::BoolTrue
        } else {
            Self::BoolFalse
        }
    }

    /// The declared field type this header is valid for.
    pub fn wire_type(self) -> WireType {
        match self {
            Self::BoolFalse | Self::BoolTrue => WireType::Bool,
            Self::Value(wire_type) => wire_type,
        }
    }

    fn to_nibble(self) -> u8 {
        match self {
            Self::BoolFalse => BOOL_FALSE,
            Self::BoolTrue => BOOL_TRUE,
            Self::Value(wire_type) => wire_type.to_wire(),
        }
    }

    fn from_nibble(nibble: u8, offset: usize) -> Result<Self> {
        let field_type = match nibble {
            BOOL_FALSE => Self::BoolFalse,
            BOOL_TRUE => Self::BoolTrue,
            _ => Self::Value(WireType::from_wire(nibble, offset)?),
        };
        Ok(field_type)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FieldHeader {
    pub field_type: FieldType,
    /// Wider than a schema tag, since a delta may carry it past `u16::MAX`.
    pub tag: u32,
}

pub fn ser_field_header<W: Write>(
    w: &mut WireWriter<W>,
    last_tag: u16,
    tag: u16,
    field_type: FieldType,
) -> Result<()> {
    let nibble = field_type.to_nibble();
    match tag.checked_sub(last_tag) {
        Some(delta @ 1..=MAX_DELTA) => w.write_u8(((delta as u8) << 4) | nibble),
        _ => {
            w.write_u8(nibble)?;
            w.write_all(&tag.to_be_bytes())
        }
    }
}

/// Returns `None` on the stop byte.
pub fn deser_field_header<R: Read>(
    r: &mut WireReader<R>,
    last_tag: u32,
) -> Result<Option<FieldHeader>> {
    let offset = r.offset();
    let byte = r.read_u8()?;
    let (delta, nibble) = (byte >> 4, byte & 0x0F);
    if nibble == STOP {
        return Ok(None);
    }
    let field_type = FieldType::from_nibble(nibble, offset)?;
    let tag = match delta {
        0 => u32::from(u16::from_be_bytes(r.read_array()?)),
        delta => last_tag + u32::from(delta),
    };
    Ok(Some(FieldHeader { field_type, tag }))
}

/// Header of a list or set.
pub fn ser_seq_header<W: Write>(
    w: &mut WireWriter<W>,
    elem_wire_type: WireType,
    count: usize,
) -> Result<()> {
    let nibble = elem_wire_type.to_wire();
    if count <= MAX_PACKED_COUNT {
        w.write_u8(((count as u8) << 4) | nibble)
    } else {
        w.write_u8((COUNT_FOLLOWS << 4) | nibble)?;
        write_varint(w, count as u64)
    }
}

/// Returns the element count. The element wire type is not checked against the schema.
pub fn deser_seq_header<R: Read>(r: &mut WireReader<R>) -> Result<u64> {
    let byte = r.read_u8()?;
    let count = match byte >> 4 {
        COUNT_FOLLOWS => read_varint(r)?,
        count => u64::from(count),
    };
    Ok(count)
}

pub fn pack_kv_types(key: WireType, val: WireType) -> u8 {
    (key.to_wire() << 4) | val.to_wire()
}
