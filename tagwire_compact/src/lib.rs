//! # Compact format
//!
//! The size-optimized wire format. Integers are zigzag varints, field tags are
//! deltas against the previous field, and boolean fields live in their header.
//!
//! ```text
//! bool                    u8              2 = true, 1 = false
//! byte                    i8
//! i16 / i32 / i64         varint          zigzag
//! double                  f64             big-endian IEEE-754
//! binary / string / utf16 {
//!     len:                    varint
//!     body:                   [u8; len]
//! }
//! ```
//!
//! A struct walks its fields in ascending tag order. The previous tag starts at 0
//! within each struct, nested or not.
//!
//! ```text
//! struct {
//!     field_0: either {
//!         header:         u8          (delta << 4) | field_type    if 1 <= delta <= 15
//!     } or {
//!         header:         u8          field_type
//!         tag:            u16
//!     }
//!     value:          <the field's type>      absent for bool fields
//!     ...
//!     stop:           u8          0
//! }
//!
//! field_type: 1 = bool false, 2 = bool true, otherwise the shared wire type.
//!
//! list / set {
//!     header: either {
//!         u8                      (count << 4) | elem_wire_type   if count <= 14
//!     } or {
//!         u8                      0xF0 | elem_wire_type
//!         count:  varint
//!     }
//!     elems:  [<elem type>; count]
//! }
//!
//! map {
//!     count:      varint
//!     kv_types:   u8          (key_wire_type << 4) | val_wire_type    only if count > 0
//!     entries:    [{ key: <key type>, value: <value type> }; count]
//! }
//! ```

mod codec;
mod deser;
mod header;
mod ser;
pub mod varint;

pub use codec::*;
