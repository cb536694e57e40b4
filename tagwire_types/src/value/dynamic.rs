use crate::value::StructValue;
use derive_more::From;
use std::cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd};
use std::collections::{BTreeMap, BTreeSet};

#[derive(From, Clone, Debug)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Double(f64),
    Binary(Vec<u8>),
    String(String),
    Struct(StructValue),
    List(Vec<Value>),
    Set(BTreeSet<Value>),
    Map(BTreeMap<Value, Value>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(String::from(s))
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum ValueKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    Double,
    Binary,
    String,
    Struct,
    List,
    Set,
    Map,
}
impl From<&Value> for ValueKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(_) => ValueKind::Bool,
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::Double(_) => ValueKind::Double,
            Value::Binary(_) => ValueKind::Binary,
            Value::String(_) => ValueKind::String,
            Value::Struct(_) => ValueKind::Struct,
            Value::List(_) => ValueKind::List,
            Value::Set(_) => ValueKind::Set,
            Value::Map(_) => ValueKind::Map,
        }
    }
}

impl Value {
    /// Human readable kind, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Value::Struct(sv) => format!("struct `{}`", sv.schema().name()),
            _ => format!("{:?}", ValueKind::from(self)).to_lowercase(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
    /// Any integer kind, widened.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I8(i) => Some(i64::from(*i)),
            Value::I16(i) => Some(i64::from(*i)),
            Value::I32(i) => Some(i64::from(*i)),
            Value::I64(i) => Some(*i),
            _ => None,
        }
    }
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }
    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(sv) => Some(sv),
            _ => None,
        }
    }
    pub fn into_struct(self) -> Option<StructValue> {
        match self {
            Value::Struct(sv) => Some(sv),
            _ => None,
        }
    }
}

/// Values of the same kind compare by content, doubles by [`f64::total_cmp`].
/// Values of different kinds compare by kind.
impl Ord for Value {
    fn cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Self::Bool(slf), Self::Bool(oth)) => slf.cmp(oth),
            (Self::I8(slf), Self::I8(oth)) => slf.cmp(oth),
            (Self::I16(slf), Self::I16(oth)) => slf.cmp(oth),
            (Self::I32(slf), Self::I32(oth)) => slf.cmp(oth),
            (Self::I64(slf), Self::I64(oth)) => slf.cmp(oth),
            (Self::Double(slf), Self::Double(oth)) => slf.total_cmp(oth),
            (Self::Binary(slf), Self::Binary(oth)) => slf.cmp(oth),
            (Self::String(slf), Self::String(oth)) => slf.cmp(oth),
            (Self::Struct(slf), Self::Struct(oth)) => slf.cmp(oth),
            (Self::List(slf), Self::List(oth)) => slf.cmp(oth),
            (Self::Set(slf), Self::Set(oth)) => slf.cmp(oth),
            (Self::Map(slf), Self::Map(oth)) => slf.cmp(oth),
            _ => ValueKind::from(self).cmp(&ValueKind::from(other)),
        }
    }
}
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.cmp(other).is_eq()
    }
}
impl Eq for Value {}
