use crate::error::SchemaError;
use crate::value::StructValue;
use derive_more::{Deref, Into};
use itertools::Itertools;
use std::error::Error;
use std::fmt;

/// A struct instance whose schema is declared as an exception.
/// Encodes like any struct; implements [`Error`] so it can be raised.
#[derive(Deref, Into, Clone, PartialEq, Eq, Debug)]
pub struct Exception(StructValue);

impl TryFrom<StructValue> for Exception {
    type Error = SchemaError;
    fn try_from(sv: StructValue) -> Result<Self, SchemaError> {
        if !sv.schema().is_exception() {
            return Err(SchemaError::NotAnException {
                struct_name: sv.schema().name().to_string(),
            });
        }
        Ok(Self(sv))
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .0
            .iter()
            .format_with(", ", |(field, value), cb| cb(&format_args!("{}: {value:?}", field.name())));
        write!(f, "{}({fields})", self.0.schema().name())
    }
}

impl Error for Exception {}
