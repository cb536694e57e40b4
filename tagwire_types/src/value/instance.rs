use crate::error::SchemaError;
use crate::schema::{Field, StructType, Type};
use crate::value::Value;
use crate::wire::{Codec, WriteLen};
use anyhow::{anyhow, Result};
use std::cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd};
use std::fmt;
use std::io::{Cursor, Read, Write};
use std::sync::Arc;

/// An instance of a [`StructType`]. Holds exactly one value per schema field,
/// each conforming to the field's type.
#[derive(Clone)]
pub struct StructValue {
    schema: Arc<StructType>,
    /* Parallel to `schema.fields()`. */
    values: Vec<Value>,
}

/* Construction. */
impl StructValue {
    /// Every field at its default.
    pub fn with_defaults(schema: &Arc<StructType>) -> Result<Self, SchemaError> {
        Self::from_slots(schema, vec![None; schema.fields().len()])
    }

    /// Fields named in `values` take the given value; the rest take their default.
    pub fn new<K, I>(schema: &Arc<StructType>, values: I) -> Result<Self, SchemaError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut slots = vec![None; schema.fields().len()];
        for (name, value) in values {
            let name = name.as_ref();
            let idx = schema
                .field_index(name)
                .ok_or_else(|| SchemaError::UnknownField {
                    struct_name: schema.name().to_string(),
                    field: name.to_string(),
                })?;
            if slots[idx].is_some() {
                return Err(SchemaError::FieldGivenTwice {
                    struct_name: schema.name().to_string(),
                    field: name.to_string(),
                });
            }
            slots[idx] = Some(value);
        }
        Self::from_slots(schema, slots)
    }

    /// `slots` is parallel to `schema.fields()`. Present values are checked
    /// against their fields; absent ones are filled from the fields' defaults.
    pub(crate) fn from_slots(
        schema: &Arc<StructType>,
        slots: Vec<Option<Value>>,
    ) -> Result<Self, SchemaError> {
        if slots.len() != schema.fields().len() {
            return Err(SchemaError::SlotCount {
                struct_name: schema.name().to_string(),
                expected: schema.fields().len(),
                found: slots.len(),
            });
        }
        let values = schema
            .fields()
            .iter()
            .zip(slots)
            .map(|(field, slot)| {
                let value = match slot {
                    Some(value) => value,
                    None => field.default_value()?,
                };
                check_field(schema, field, &value)?;
                Ok(value)
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;
        Ok(Self {
            schema: Arc::clone(schema),
            values,
        })
    }
}

fn check_field(schema: &StructType, field: &Field, value: &Value) -> Result<(), SchemaError> {
    field
        .ty()
        .check(value)
        .map_err(|source| SchemaError::FieldValue {
            struct_name: schema.name().to_string(),
            field: field.name().to_string(),
            source,
        })
}

/* Field access. */
impl StructValue {
    pub fn schema(&self) -> &Arc<StructType> {
        &self.schema
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.field_index(name).map(|idx| &self.values[idx])
    }

    /// Replaces a field's value, returning the previous one.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Value, SchemaError> {
        let value = value.into();
        let idx = self
            .schema
            .field_index(name)
            .ok_or_else(|| SchemaError::UnknownField {
                struct_name: self.schema.name().to_string(),
                field: name.to_string(),
            })?;
        check_field(&self.schema, &self.schema.fields()[idx], &value)?;
        Ok(std::mem::replace(&mut self.values[idx], value))
    }

    /// Fields in ascending tag order, alongside their values.
    pub fn iter(&self) -> impl Iterator<Item = (&Field, &Value)> {
        self.schema.fields().iter().zip(self.values.iter())
    }
}

/* De/Serialization. */
impl StructValue {
    pub fn serialize<C: Codec>(&self, codec: &C) -> Result<Vec<u8>> {
        let mut buf = vec![];
        self.serialize_to(codec, &mut buf)?;
        Ok(buf)
    }

    pub fn serialize_to<C: Codec, W: Write>(&self, codec: &C, w: &mut W) -> Result<WriteLen> {
        codec.encode_struct(self, w)
    }

    pub fn deserialize<C: Codec>(codec: &C, schema: &Arc<StructType>, buf: &[u8]) -> Result<Self> {
        let mut r = Cursor::new(buf);
        Self::deserialize_from(codec, schema, &mut r)
    }

    pub fn deserialize_from<C: Codec, R: Read>(
        codec: &C,
        schema: &Arc<StructType>,
        r: &mut R,
    ) -> Result<Self> {
        let value = codec.decode(&Type::from(schema), r)?;
        let describe = value.describe();
        value
            .into_struct()
            .ok_or_else(|| anyhow!("Decoding struct `{}` produced {}", schema.name(), describe))
    }
}

/* Values of two distinct schemas never compare equal, even when the schemas share a name. */
impl Ord for StructValue {
    fn cmp(&self, other: &StructValue) -> Ordering {
        self.schema
            .name()
            .cmp(other.schema.name())
            .then_with(|| Arc::as_ptr(&self.schema).cmp(&Arc::as_ptr(&other.schema)))
            .then_with(|| self.values.cmp(&other.values))
    }
}
impl PartialOrd for StructValue {
    fn partial_cmp(&self, other: &StructValue) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for StructValue {
    fn eq(&self, other: &StructValue) -> bool {
        self.cmp(other).is_eq()
    }
}
impl Eq for StructValue {}

impl fmt::Debug for StructValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct(self.schema.name());
        for (field, value) in self.iter() {
            dbg.field(field.name(), value);
        }
        dbg.finish()
    }
}
