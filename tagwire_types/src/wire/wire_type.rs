use crate::error::CodecError;
use crate::schema::Type;
use derive_more::{Deref, From};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Terminates the field list of a struct.
pub const STOP: u8 = 0;

#[derive(From, Deref, Clone, Copy, PartialEq, Eq, Debug)]
pub struct WireTypeInt(u8);
impl From<WireType> for WireTypeInt {
    fn from(wire_type: WireType) -> Self {
        Self(wire_type as u8)
    }
}

/// We keep discriminants explicit, since they are the wire contract and
/// must never follow enum declaration order.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum WireType {
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
}
impl WireType {
    /// Parses a wire identifier read at `offset`. [`STOP`] is not a wire type.
    pub fn from_wire(int: u8, offset: usize) -> Result<Self, CodecError> {
        WireType::from_u8(int).ok_or(CodecError::UnsupportedWireType {
            wire_type: int,
            offset,
        })
    }

    pub fn to_wire(self) -> u8 {
        *WireTypeInt::from(self)
    }
}

impl TryFrom<&Type> for WireType {
    type Error = CodecError;
    fn try_from(ty: &Type) -> Result<Self, CodecError> {
        let wire_type = match ty {
            Type::Bool => WireType::Bool,
            Type::I8 => WireType::Byte,
            Type::I16 => WireType::I16,
            Type::I32 => WireType::I32,
            Type::I64 => WireType::I64,
            Type::Double => WireType::Double,
            Type::Binary | Type::String | Type::Utf16String => WireType::String,
            Type::Struct(_) => WireType::Struct,
            Type::List(_) => WireType::List,
            Type::Set(_) => WireType::Set,
            Type::Map(_, _) => WireType::Map,
            Type::Service(_) => {
                return Err(CodecError::UnencodableType {
                    type_name: ty.to_string(),
                })
            }
        };
        Ok(wire_type)
    }
}
