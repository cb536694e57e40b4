use crate::header::{pack_kv_types, ser_field_header, ser_seq_header, FieldType};
use crate::header::{BOOL_FALSE, BOOL_TRUE};
use crate::varint::{int_to_zigzag, long_to_zigzag, write_varint};
use anyhow::{Context, Result};
use std::io::Write;
use tagwire_types::error::{CodecError, TypeMismatch};
use tagwire_types::schema::{StructRef, StructType, Type};
use tagwire_types::value::{StructValue, Value};
use tagwire_types::wire::{
    bound_schema, encode_utf16, CodecConfig, WireType, WireWriter, WriteLen, STOP,
};
use tracing::trace;

pub(crate) struct CompactWriter<'c, W> {
    w: WireWriter<W>,
    config: &'c CodecConfig,
    depth: usize,
}

impl<'c, W: Write> CompactWriter<'c, W> {
    pub fn new(w: WireWriter<W>, config: &'c CodecConfig) -> Self {
        Self {
            w,
            config,
            depth: 0,
        }
    }

    pub fn finish(self) -> Result<WriteLen> {
        self.w.finish()
    }

    pub fn ser_value(&mut self, ty: &Type, value: &Value) -> Result<()> {
        match (ty, value) {
            (Type::Bool, Value::Bool(b)) => {
                self.w.write_u8(if *b { BOOL_TRUE } else { BOOL_FALSE })
            }
            (Type::I8, Value::I8(i)) => self.w.write_all(&i.to_be_bytes()),
            (Type::I16, Value::I16(i)) => {
                write_varint(&mut self.w, u64::from(int_to_zigzag(i32::from(*i))))
            }
            (Type::I32, Value::I32(i)) => write_varint(&mut self.w, u64::from(int_to_zigzag(*i))),
            (Type::I64, Value::I64(i)) => write_varint(&mut self.w, long_to_zigzag(*i)),
            (Type::Double, Value::Double(d)) => self.w.write_all(&d.to_be_bytes()),
            (Type::Binary, Value::Binary(b)) => self.ser_dynalen_body(b),
            (Type::String, Value::String(s)) => self.ser_dynalen_body(s.as_bytes()),
            (Type::Utf16String, Value::String(s)) => self.ser_dynalen_body(&encode_utf16(s)),
            (Type::Struct(sref), Value::Struct(sv)) => self.ser_struct(sref, sv),
            (Type::List(elem_ty), Value::List(items)) => self.ser_seq(elem_ty, items.len(), items),
            (Type::Set(elem_ty), Value::Set(items)) => self.ser_seq(elem_ty, items.len(), items),
            (Type::Map(key_ty, val_ty), Value::Map(entries)) => {
                self.descend(|this| {
                    /* count */
                    write_varint(&mut this.w, entries.len() as u64)?;

                    /* kv_types. An empty map has nothing to disambiguate. */
                    if !entries.is_empty() {
                        let kv_types = pack_kv_types(
                            WireType::try_from(&**key_ty)?,
                            WireType::try_from(&**val_ty)?,
                        );
                        this.w.write_u8(kv_types)?;
                    }

                    /* entries */
                    for (k, v) in entries {
                        this.ser_value(key_ty, k)?;
                        this.ser_value(val_ty, v)?;
                    }
                    Ok(())
                })
            }
            (Type::Service(_), _) => Err(CodecError::UnencodableType {
                type_name: ty.to_string(),
            }
            .into()),
            (ty, value) => Err(CodecError::from(TypeMismatch::new(ty, value)).into()),
        }
    }

    pub fn ser_bound_struct(&mut self, sv: &StructValue) -> Result<()> {
        self.descend(|this| this.ser_struct_fields(sv.schema(), sv))
    }

    fn ser_struct(&mut self, sref: &StructRef, sv: &StructValue) -> Result<()> {
        let schema = bound_schema(sref, sv)?;
        self.descend(|this| this.ser_struct_fields(&schema, sv))
    }

    /// Fields are stored in ascending tag order, so deltas are positive
    /// except where a gap exceeds a nibble.
    fn ser_struct_fields(&mut self, schema: &StructType, sv: &StructValue) -> Result<()> {
        let w_len_before = *self.w.w_len();
        let mut last_tag = 0;
        let mut packed_bools = 0usize;

        for (field, value) in sv.iter() {
            /* header */
            let field_type = match (field.ty(), value) {
                (Type::Bool, Value::Bool(b)) => FieldType::from_bool(*b),
                (ty, _) => FieldType::Value(WireType::try_from(ty)?),
            };
            ser_field_header(&mut self.w, last_tag, field.tag(), field_type)?;
            last_tag = field.tag();

            /* value */
            if let FieldType::Value(_) = field_type {
                self.ser_value(field.ty(), value).with_context(|| {
                    format!("Encoding field `{}` of struct `{}`", field.name(), schema.name())
                })?;
            } else {
                packed_bools += 1;
            }
        }

        /* stop */
        self.w.write_u8(STOP)?;

        trace!(
            struct_name = schema.name(),
            fields = schema.fields().len(),
            packed_bools,
            w_len = *self.w.w_len() - w_len_before,
            "encoded struct"
        );
        Ok(())
    }

    fn ser_seq<'v>(
        &mut self,
        elem_ty: &Type,
        count: usize,
        items: impl IntoIterator<Item = &'v Value>,
    ) -> Result<()> {
        self.descend(|this| {
            ser_seq_header(&mut this.w, WireType::try_from(elem_ty)?, count)?;
            for item in items {
                this.ser_value(elem_ty, item)?;
            }
            Ok(())
        })
    }

    fn ser_dynalen_body(&mut self, buf: &[u8]) -> Result<()> {
        write_varint(&mut self.w, buf.len() as u64)?;
        self.w.write_all(buf)
    }

    fn descend(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        self.config.check_depth(self.depth + 1)?;
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }
}
