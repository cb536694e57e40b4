use crate::wire::WireType;
use thiserror::Error;

/// A value handed to an encoder, or to a struct constructor, that does not
/// conform to the type it is being used as.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a value of type `{expected}`, found {found}")]
pub struct TypeMismatch {
    pub expected: String,
    pub found: String,
}

/// Errors raised while a schema is defined, or while an instance is bound to one.
/// These are programming errors; they never come out of decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field `{field}` of struct `{struct_name}` has tag {tag}; tags start at 1")]
    InvalidTag {
        struct_name: String,
        field: String,
        tag: u16,
    },

    #[error("field `{field}` of struct `{struct_name}` reuses tag {tag}, already taken by `{existing}`")]
    DuplicateTag {
        struct_name: String,
        field: String,
        tag: u16,
        existing: String,
    },

    #[error("struct `{struct_name}` already has a field named `{field}`")]
    DuplicateName { struct_name: String, field: String },

    #[error("field `{field}` of struct `{struct_name}` uses `{type_name}`, which carries no values")]
    NotAValueType {
        struct_name: String,
        field: String,
        type_name: String,
    },

    #[error("type `{type_name}` has no zero value")]
    NoZeroValue { type_name: String },

    #[error("field `{field}` of struct `{struct_name}` embeds its own struct directly; wrap it in a container")]
    DirectSelfReference { struct_name: String, field: String },

    #[error("struct `{struct_name}` is referenced after its schema was dropped")]
    UnresolvedStruct { struct_name: String },

    #[error("struct `{struct_name}` has no field named `{field}`")]
    UnknownField { struct_name: String, field: String },

    #[error("field `{field}` of struct `{struct_name}` was given more than once")]
    FieldGivenTwice { struct_name: String, field: String },

    #[error("field `{field}` of struct `{struct_name}`: {source}")]
    FieldValue {
        struct_name: String,
        field: String,
        #[source]
        source: TypeMismatch,
    },

    #[error("struct `{struct_name}` has {expected} fields, {found} values were given")]
    SlotCount {
        struct_name: String,
        expected: usize,
        found: usize,
    },

    #[error("struct `{struct_name}` is not declared as an exception")]
    NotAnException { struct_name: String },
}

/// Errors raised by a codec while encoding or decoding.
///
/// Offsets count bytes consumed from the start of the decode call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("stream ended at offset {offset}: needed {expected} bytes, {available} available")]
    StreamUnderrun {
        offset: usize,
        expected: usize,
        available: usize,
    },

    #[error("struct `{struct_name}` has no field with tag {tag} (offset {offset})")]
    UnknownFieldTag {
        struct_name: String,
        tag: u32,
        offset: usize,
    },

    #[error("unsupported wire type identifier {wire_type} at offset {offset}")]
    UnsupportedWireType { wire_type: u8, offset: usize },

    #[error("type `{type_name}` has no wire representation")]
    UnencodableType { type_name: String },

    #[error("unterminated or oversized varint at offset {offset}")]
    MalformedVarint { offset: usize },

    #[error("negative length {len} at offset {offset}")]
    NegativeLength { len: i64, offset: usize },

    #[error("length {len} exceeds the limit of {max} (offset {offset})")]
    LengthLimitExceeded { len: u64, max: u64, offset: usize },

    #[error("nesting deeper than {max} levels")]
    DepthLimitExceeded { max: usize },

    #[error("{value} does not fit in `{type_name}` (offset {offset})")]
    IntegerOverflow {
        type_name: String,
        value: i64,
        offset: usize,
    },

    #[error("invalid {encoding} text at offset {offset}")]
    InvalidText {
        encoding: &'static str,
        offset: usize,
    },

    #[error("field `{field}` of struct `{struct_name}` expects wire type {expected:?}, stream has {found} (offset {offset})")]
    WireTypeMismatch {
        struct_name: String,
        field: String,
        expected: WireType,
        found: u8,
        offset: usize,
    },

    #[error("struct `{struct_name}` repeats tag {tag} (offset {offset})")]
    DuplicateFieldTag {
        struct_name: String,
        tag: u16,
        offset: usize,
    },

    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),

    #[error("value is bound to struct `{found}`, not to the schema of `{expected}`")]
    SchemaMismatch { expected: String, found: String },
}
