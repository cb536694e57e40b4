use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use tagwire_types::error::CodecError;
use tagwire_types::schema::{StructRef, Type};
use tagwire_types::value::Value;
use tagwire_types::wire::{
    decode_utf16, decode_utf8, CodecConfig, StructAssembler, WireReader, WireType, STOP,
};
use tracing::trace;

/// Elements preallocated per container, however large a count the stream announces.
const PREALLOC_LEN: usize = 1024;

pub(crate) struct BinaryReader<'c, R> {
    r: WireReader<R>,
    config: &'c CodecConfig,
    depth: usize,
}

impl<'c, R: Read> BinaryReader<'c, R> {
    pub fn new(r: WireReader<R>, config: &'c CodecConfig) -> Self {
        Self {
            r,
            config,
            depth: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.r.offset()
    }

    pub fn deser_value(&mut self, ty: &Type) -> Result<Value> {
        let value = match ty {
            Type::Bool => Value::Bool(self.r.read_u8()? != 0),
            Type::I8 => Value::I8(i8::from_be_bytes(self.r.read_array()?)),
            Type::I16 => Value::I16(i16::from_be_bytes(self.r.read_array()?)),
            Type::I32 => Value::I32(i32::from_be_bytes(self.r.read_array()?)),
            Type::I64 => Value::I64(i64::from_be_bytes(self.r.read_array()?)),
            Type::Double => Value::Double(f64::from_be_bytes(self.r.read_array()?)),
            Type::Binary => Value::Binary(self.deser_dynalen_body()?.1),
            Type::String => {
                let (offset, body) = self.deser_dynalen_body()?;
                Value::String(decode_utf8(body, offset)?)
            }
            Type::Utf16String => {
                let (offset, body) = self.deser_dynalen_body()?;
                Value::String(decode_utf16(&body, offset)?)
            }
            Type::Struct(sref) => self.descend(|this| this.deser_struct(sref))?,
            Type::List(elem_ty) => self.descend(|this| {
                let count = this.deser_seq_header()?;
                let mut items = Vec::with_capacity(count.min(PREALLOC_LEN));
                for _ in 0..count {
                    items.push(this.deser_value(elem_ty)?);
                }
                Ok(Value::List(items))
            })?,
            Type::Set(elem_ty) => self.descend(|this| {
                let count = this.deser_seq_header()?;
                let mut items = BTreeSet::new();
                for _ in 0..count {
                    items.insert(this.deser_value(elem_ty)?);
                }
                Ok(Value::Set(items))
            })?,
            Type::Map(key_ty, val_ty) => self.descend(|this| {
                /* key_wire_type, val_wire_type. Not checked against the schema. */
                let _ = this.r.read_array::<2>()?;

                /* count */
                let count = this.deser_count()?;
                this.config.check_container_len(count as u64, this.r.offset())?;

                /* entries */
                let mut entries = BTreeMap::new();
                for _ in 0..count {
                    let k = this.deser_value(key_ty)?;
                    let v = this.deser_value(val_ty)?;
                    entries.insert(k, v);
                }
                Ok(Value::Map(entries))
            })?,
            Type::Service(_) => {
                return Err(CodecError::UnencodableType {
                    type_name: ty.to_string(),
                }
                .into())
            }
        };
        Ok(value)
    }

    fn deser_struct(&mut self, sref: &StructRef) -> Result<Value> {
        let offset_before = self.r.offset();
        let mut asm = StructAssembler::new(sref.resolve()?);

        loop {
            /* wire_type */
            let offset = self.r.offset();
            let wire_type = self.r.read_u8()?;
            if wire_type == STOP {
                break;
            }
            WireType::from_wire(wire_type, offset)?;

            /* tag */
            let tag = u16::from_be_bytes(self.r.read_array()?);
            let idx = asm.slot_for_tag(u32::from(tag), offset)?;
            asm.check_wire_type(idx, wire_type, offset)?;

            /* value */
            let schema = asm.schema();
            let field = &schema.fields()[idx];
            let value = self.deser_value(field.ty()).with_context(|| {
                format!("Decoding field `{}` of struct `{}`", field.name(), schema.name())
            })?;
            asm.fill(idx, value);
        }

        trace!(
            struct_name = asm.schema().name(),
            r_len = self.r.offset() - offset_before,
            "decoded struct"
        );
        Ok(Value::Struct(asm.finish()?))
    }

    /// Returns the element count. The element wire type is not checked against the schema.
    fn deser_seq_header(&mut self) -> Result<usize> {
        let _elem_wire_type = self.r.read_u8()?;
        let count = self.deser_count()?;
        let len = self.config.check_container_len(count as u64, self.r.offset())?;
        Ok(len)
    }

    /// Returns the offset of the body, and the body.
    fn deser_dynalen_body(&mut self) -> Result<(usize, Vec<u8>)> {
        let len = self.deser_count()?;
        let offset = self.r.offset();
        let len = self.config.check_bytes_len(len as u64, offset)?;
        let body = self.r.read_bytes(len)?;
        Ok((offset, body))
    }

    /// A length or count: an i32 that must not be negative.
    fn deser_count(&mut self) -> Result<u32> {
        let offset = self.r.offset();
        let count = i32::from_be_bytes(self.r.read_array()?);
        let count = u32::try_from(count).map_err(|_| CodecError::NegativeLength {
            len: i64::from(count),
            offset,
        })?;
        Ok(count)
    }

    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.config.check_depth(self.depth + 1)?;
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }
}
