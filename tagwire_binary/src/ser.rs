use anyhow::{Context, Result};
use std::io::Write;
use tagwire_types::error::{CodecError, TypeMismatch};
use tagwire_types::schema::{StructRef, StructType, Type};
use tagwire_types::value::{StructValue, Value};
use tagwire_types::wire::{
    bound_schema, encode_utf16, CodecConfig, WireType, WireWriter, WriteLen, STOP,
};
use tracing::trace;

pub(crate) struct BinaryWriter<'c, W> {
    w: WireWriter<W>,
    config: &'c CodecConfig,
    depth: usize,
}

impl<'c, W: Write> BinaryWriter<'c, W> {
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
            (Type::Bool, Value::Bool(b)) => self.w.write_u8(u8::from(*b)),
            (Type::I8, Value::I8(i)) => self.w.write_all(&i.to_be_bytes()),
            (Type::I16, Value::I16(i)) => self.w.write_all(&i.to_be_bytes()),
            (Type::I32, Value::I32(i)) => self.w.write_all(&i.to_be_bytes()),
            (Type::I64, Value::I64(i)) => self.w.write_all(&i.to_be_bytes()),
            (Type::Double, Value::Double(d)) => self.w.write_all(&d.to_be_bytes()),
            (Type::Binary, Value::Binary(b)) => self.ser_dynalen_body(b),
            (Type::String, Value::String(s)) => self.ser_dynalen_body(s.as_bytes()),
            (Type::Utf16String, Value::String(s)) => self.ser_dynalen_body(&encode_utf16(s)),
            (Type::Struct(sref), Value::Struct(sv)) => self.ser_struct(sref, sv),
            (Type::List(elem_ty), Value::List(items)) => self.ser_seq(elem_ty, items.len(), items),
            (Type::Set(elem_ty), Value::Set(items)) => self.ser_seq(elem_ty, items.len(), items),
            (Type::Map(key_ty, val_ty), Value::Map(entries)) => {
                self.descend(|this| {
                    /* key_wire_type, val_wire_type */
                    this.w.write_u8(WireType::try_from(&**key_ty)?.to_wire())?;
                    this.w.write_u8(WireType::try_from(&**val_ty)?.to_wire())?;

                    /* count */
                    let count = this.wire_count(entries.len())?;
                    this.w.write_all(&count.to_be_bytes())?;

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

    fn ser_struct_fields(&mut self, schema: &StructType, sv: &StructValue) -> Result<()> {
        let w_len_before = *self.w.w_len();

        for (field, value) in sv.iter() {
            /* wire_type, tag */
            self.w.write_u8(WireType::try_from(field.ty())?.to_wire())?;
            self.w.write_all(&field.tag().to_be_bytes())?;

            /* value */
            self.ser_value(field.ty(), value).with_context(|| {
                format!("Encoding field `{}` of struct `{}`", field.name(), schema.name())
            })?;
        }

        /* stop */
        self.w.write_u8(STOP)?;

        trace!(
            struct_name = schema.name(),
            fields = schema.fields().len(),
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
            /* elem_wire_type, count */
            this.w.write_u8(WireType::try_from(elem_ty)?.to_wire())?;
            let count = this.wire_count(count)?;
            this.w.write_all(&count.to_be_bytes())?;

            /* elems */
            for item in items {
                this.ser_value(elem_ty, item)?;
            }
            Ok(())
        })
    }

    fn ser_dynalen_body(&mut self, buf: &[u8]) -> Result<()> {
        let len = self.wire_count(buf.len())?;
        self.w.write_all(&len.to_be_bytes())?;
        self.w.write_all(buf)
    }

    /// Lengths and counts travel as a non-negative i32.
    fn wire_count(&self, len: usize) -> Result<i32, CodecError> {
        i32::try_from(len).map_err(|_| CodecError::LengthLimitExceeded {
            len: len as u64,
            max: i32::MAX as u64,
            offset: *self.w.w_len(),
        })
    }

    fn descend(&mut self, f: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        self.config.check_depth(self.depth + 1)?;
        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }
}
