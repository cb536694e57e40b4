use crate::header::{deser_field_header, deser_seq_header, FieldType, BOOL_TRUE};
use crate::varint::{read_varint, zigzag_to_int};
use anyhow::{Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use tagwire_types::error::CodecError;
use tagwire_types::schema::{StructRef, Type};
use tagwire_types::value::Value;
use tagwire_types::wire::{decode_utf16, decode_utf8, CodecConfig, StructAssembler, WireReader};
use tracing::trace;

/// Elements preallocated per container, however large a count the stream announces.
const PREALLOC_LEN: usize = 1024;

pub(crate) struct CompactReader<'c, R> {
    r: WireReader<R>,
    config: &'c CodecConfig,
    depth: usize,
}

impl<'c, R: Read> CompactReader<'c, R> {
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
            Type::Bool => Value::Bool(self.r.read_u8()? == BOOL_TRUE),
            Type::I8 => Value::I8(i8::from_be_bytes(self.r.read_array()?)),
            Type::I16 => {
                let (offset, i) = self.deser_zigzag()?;
                Value::I16(i16::try_from(i).map_err(|_| overflow(ty, i, offset))?)
            }
            Type::I32 => {
                let (offset, i) = self.deser_zigzag()?;
                Value::I32(i32::try_from(i).map_err(|_| overflow(ty, i, offset))?)
            }
            Type::I64 => Value::I64(self.deser_zigzag()?.1),
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
                let count = this.deser_seq_count()?;
                let mut items = Vec::with_capacity(count.min(PREALLOC_LEN));
                for _ in 0..count {
                    items.push(this.deser_value(elem_ty)?);
                }
                Ok(Value::List(items))
            })?,
            Type::Set(elem_ty) => self.descend(|this| {
                let count = this.deser_seq_count()?;
                let mut items = BTreeSet::new();
                for _ in 0..count {
                    items.insert(this.deser_value(elem_ty)?);
                }
                Ok(Value::Set(items))
            })?,
            Type::Map(key_ty, val_ty) => self.descend(|this| {
                /* count */
                let offset = this.r.offset();
                let count = read_varint(&mut this.r)?;
                let count = this.config.check_container_len(count, offset)?;

                /* kv_types. Not checked against the schema. */
                if count > 0 {
                    let _ = this.r.read_u8()?;
                }

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
        let mut last_tag = 0;

        loop {
            /* header */
            let offset = self.r.offset();
            let header = match deser_field_header(&mut self.r, last_tag)? {
                None => break,
                Some(header) => header,
            };
            let idx = asm.slot_for_tag(header.tag, offset)?;
            asm.check_wire_type(idx, header.field_type.wire_type().to_wire(), offset)?;
            last_tag = header.tag;

            /* value */
            let value = match header.field_type {
                FieldType::BoolFalse => Value::Bool(false),
                FieldType::BoolTrue => Value::Bool(true),
                FieldType::Value(_) => {
                    let schema = asm.schema();
                    let field = &schema.fields()[idx];
                    self.deser_value(field.ty()).with_context(|| {
                        format!("Decoding field `{}` of struct `{}`", field.name(), schema.name())
                    })?
                }
            };
            asm.fill(idx, value);
        }

        trace!(
            struct_name = asm.schema().name(),
            r_len = self.r.offset() - offset_before,
            "decoded struct"
        );
        Ok(Value::Struct(asm.finish()?))
    }

    fn deser_seq_count(&mut self) -> Result<usize> {
        let offset = self.r.offset();
        let count = deser_seq_header(&mut self.r)?;
        let count = self.config.check_container_len(count, offset)?;
        Ok(count)
    }

    /// Returns the offset of the body, and the body.
    fn deser_dynalen_body(&mut self) -> Result<(usize, Vec<u8>)> {
        let offset = self.r.offset();
        let len = read_varint(&mut self.r)?;
        let len = self.config.check_bytes_len(len, offset)?;
        let offset = self.r.offset();
        let body = self.r.read_bytes(len)?;
        Ok((offset, body))
    }

    /// Returns the offset of the varint, and its value.
    fn deser_zigzag(&mut self) -> Result<(usize, i64)> {
        let offset = self.r.offset();
        let u = read_varint(&mut self.r)?;
        Ok((offset, zigzag_to_int(u)))
    }

    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.config.check_depth(self.depth + 1)?;
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }
}

fn overflow(ty: &Type, value: i64, offset: usize) -> CodecError {
    CodecError::IntegerOverflow {
        type_name: ty.to_string(),
        value,
        offset,
    }
}
