use crate::error::CodecError;
use crate::schema::{StructRef, StructType};
use crate::value::{StructValue, Value};
use crate::wire::WireType;
use anyhow::Result;
use std::sync::Arc;

/// Resolves the schema a struct value is about to be encoded under, and checks
/// that the value is bound to that very schema.
pub fn bound_schema(sref: &StructRef, sv: &StructValue) -> Result<Arc<StructType>> {
    let schema = sref.resolve()?;
    if !Arc::ptr_eq(&schema, sv.schema()) {
        return Err(CodecError::SchemaMismatch {
            expected: schema.name().to_string(),
            found: sv.schema().name().to_string(),
        }
        .into());
    }
    Ok(schema)
}

/// Collects the fields of one struct as a decoder reads them off the stream.
pub struct StructAssembler {
    schema: Arc<StructType>,
    slots: Vec<Option<Value>>,
}

impl StructAssembler {
    pub fn new(schema: Arc<StructType>) -> Self {
        let slots = vec![None; schema.fields().len()];
        Self { schema, slots }
    }

    pub fn schema(&self) -> &Arc<StructType> {
        &self.schema
    }

    /// The field that `tag`, read at `offset`, names. It must exist, and must
    /// not have been read before within this struct.
    pub fn slot_for_tag(&self, tag: u32, offset: usize) -> Result<usize, CodecError> {
        let found = u16::try_from(tag)
            .ok()
            .and_then(|tag| self.schema.field_by_tag(tag));
        let (idx, field) = found.ok_or_else(|| CodecError::UnknownFieldTag {
            struct_name: self.schema.name().to_string(),
            tag,
            offset,
        })?;
        if self.slots[idx].is_some() {
            return Err(CodecError::DuplicateFieldTag {
                struct_name: self.schema.name().to_string(),
                tag: field.tag(),
                offset,
            });
        }
        Ok(idx)
    }

    /// The wire type a field header announced must be the field's own.
    pub fn check_wire_type(&self, idx: usize, found: u8, offset: usize) -> Result<(), CodecError> {
        let field = &self.schema.fields()[idx];
        let expected = WireType::try_from(field.ty())?;
        if expected.to_wire() != found {
            return Err(CodecError::WireTypeMismatch {
                struct_name: self.schema.name().to_string(),
                field: field.name().to_string(),
                expected,
                found,
                offset,
            });
        }
        Ok(())
    }

    pub fn fill(&mut self, idx: usize, value: Value) {
        self.slots[idx] = Some(value);
    }

    /// Fields the stream did not carry take their defaults.
    pub fn finish(self) -> Result<StructValue> {
        let sv = StructValue::from_slots(&self.schema, self.slots)?;
        Ok(sv)
    }
}
