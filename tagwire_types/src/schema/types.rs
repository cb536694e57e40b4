use crate::error::{SchemaError, TypeMismatch};
use crate::schema::StructType;
use crate::value::{StructValue, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::{Arc, Weak};

#[derive(Clone, PartialEq)]
pub enum Type {
    Bool,
    /// Also known as `byte`.
    I8,
    I16,
    I32,
    I64,
    Double,
    /// Raw bytes.
    Binary,
    /// UTF-8 text.
    String,
    /// Text carried as UTF-16 on the wire.
    Utf16String,
    Struct(StructRef),
    List(Box<Type>),
    Set(Box<Type>),
    Map(Box<Type>, Box<Type>),
    /// Marks an RPC service. Carries no values.
    Service(Arc<ServiceType>),
}

impl Type {
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }
    pub fn set(elem: Type) -> Self {
        Type::Set(Box::new(elem))
    }
    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Box::new(key), Box::new(value))
    }
    pub fn service(name: impl Into<String>) -> Self {
        Type::Service(Arc::new(ServiceType { name: name.into() }))
    }

    /// Whether values of this type can exist, i.e. no service marker occurs within it.
    pub fn is_value_type(&self) -> bool {
        match self {
            Type::Service(_) => false,
            Type::List(elem) | Type::Set(elem) => elem.is_value_type(),
            Type::Map(key, value) => key.is_value_type() && value.is_value_type(),
            _ => true,
        }
    }

    pub fn zero_value(&self) -> Result<Value, SchemaError> {
        let value = match self {
            Type::Bool => Value::Bool(false),
            Type::I8 => Value::I8(0),
            Type::I16 => Value::I16(0),
            Type::I32 => Value::I32(0),
            Type::I64 => Value::I64(0),
            Type::Double => Value::Double(0.0),
            Type::Binary => Value::Binary(vec![]),
            Type::String | Type::Utf16String => Value::String(String::new()),
            Type::Struct(sref) => Value::Struct(StructValue::with_defaults(&sref.resolve()?)?),
            Type::List(_) => Value::List(vec![]),
            Type::Set(_) => Value::Set(BTreeSet::new()),
            Type::Map(_, _) => Value::Map(BTreeMap::new()),
            Type::Service(_) => {
                return Err(SchemaError::NoZeroValue {
                    type_name: self.to_string(),
                })
            }
        };
        Ok(value)
    }

    /// Deep conformance check: containers are checked element by element.
    /// Struct values are checked for being bound to this very schema; their
    /// fields were checked when they were set.
    pub fn check(&self, value: &Value) -> Result<(), TypeMismatch> {
        match (self, value) {
            (Type::Bool, Value::Bool(_))
            | (Type::I8, Value::I8(_))
            | (Type::I16, Value::I16(_))
            | (Type::I32, Value::I32(_))
            | (Type::I64, Value::I64(_))
            | (Type::Double, Value::Double(_))
            | (Type::Binary, Value::Binary(_))
            | (Type::String, Value::String(_))
            | (Type::Utf16String, Value::String(_)) => Ok(()),
            (Type::Struct(sref), Value::Struct(sv)) if sref.points_to(sv.schema()) => Ok(()),
            (Type::List(elem), Value::List(items)) => items.iter().try_for_each(|v| elem.check(v)),
            (Type::Set(elem), Value::Set(items)) => items.iter().try_for_each(|v| elem.check(v)),
            (Type::Map(key_ty, val_ty), Value::Map(entries)) => {
                entries.iter().try_for_each(|(k, v)| {
                    key_ty.check(k)?;
                    val_ty.check(v)
                })
            }
            _ => Err(TypeMismatch::new(self, value)),
        }
    }
}

impl From<Arc<StructType>> for Type {
    fn from(schema: Arc<StructType>) -> Self {
        Type::Struct(StructRef::from(schema))
    }
}
impl From<&Arc<StructType>> for Type {
    fn from(schema: &Arc<StructType>) -> Self {
        Type::from(Arc::clone(schema))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::I8 => f.write_str("byte"),
            Type::I16 => f.write_str("i16"),
            Type::I32 => f.write_str("i32"),
            Type::I64 => f.write_str("i64"),
            Type::Double => f.write_str("double"),
            Type::Binary => f.write_str("binary"),
            Type::String => f.write_str("string"),
            Type::Utf16String => f.write_str("utf16"),
            Type::Struct(sref) => f.write_str(sref.name()),
            Type::List(elem) => write!(f, "list<{elem}>"),
            Type::Set(elem) => write!(f, "set<{elem}>"),
            Type::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Type::Service(svc) => write!(f, "service {}", svc.name),
        }
    }
}
impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl TypeMismatch {
    pub fn new(expected: &Type, found: &Value) -> Self {
        Self {
            expected: expected.to_string(),
            found: found.describe(),
        }
    }
}

/// A reference from a [`Type`] to a struct schema.
///
/// A struct that refers to itself holds a non-owning reference, handed out by
/// [`crate::schema::StructBuilder::build_recursive`]. It resolves for as long as
/// the struct's schema is alive, which is always the case while a value of
/// that schema is being walked.
#[derive(Clone)]
pub struct StructRef {
    name: Arc<str>,
    target: Target,
}

#[derive(Clone)]
enum Target {
    Owned(Arc<StructType>),
    Cyclic(Weak<StructType>),
}

impl StructRef {
    pub(crate) fn cyclic(name: Arc<str>, schema: Weak<StructType>) -> Self {
        Self {
            name,
            target: Target::Cyclic(schema),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_cyclic(&self) -> bool {
        matches!(self.target, Target::Cyclic(_))
    }

    pub fn resolve(&self) -> Result<Arc<StructType>, SchemaError> {
        match &self.target {
            Target::Owned(schema) => Ok(Arc::clone(schema)),
            Target::Cyclic(schema) => schema.upgrade().ok_or(SchemaError::UnresolvedStruct {
                struct_name: self.name.to_string(),
            }),
        }
    }

    pub fn points_to(&self, schema: &Arc<StructType>) -> bool {
        self.as_ptr() == Arc::as_ptr(schema)
    }

    fn as_ptr(&self) -> *const StructType {
        match &self.target {
            Target::Owned(schema) => Arc::as_ptr(schema),
            Target::Cyclic(schema) => schema.as_ptr(),
        }
    }
}

impl From<Arc<StructType>> for StructRef {
    fn from(schema: Arc<StructType>) -> Self {
        Self {
            name: Arc::from(schema.name()),
            target: Target::Owned(schema),
        }
    }
}

/* Two refs are equal iff they point at the same schema. */
impl PartialEq for StructRef {
    fn eq(&self, other: &Self) -> bool {
        self.as_ptr() == other.as_ptr()
    }
}

#[derive(PartialEq, Eq, Debug)]
pub struct ServiceType {
    name: String,
}
impl ServiceType {
    pub fn name(&self) -> &str {
        &self.name
    }
}
