//! # Binary format
//!
//! The verbose, fixed-width wire format. All integers are big-endian.
//!
//! Scalars carry no type prefix of their own; the schema says what to read.
//!
//! ```text
//! bool                    u8              1 = true, 0 = false
//! byte                    i8
//! i16 / i32 / i64         i16 / i32 / i64
//! double                  f64             IEEE-754
//! binary / string / utf16 {
//!     len:                    i32             >= 0
//!     body:                   [u8; len]       UTF-8 (or UTF-16) for text
//! }
//! ```
//!
//! A struct is a run of tagged fields, in ascending tag order, closed by a stop byte.
//!
//! ```text
//! struct {
//!     field_0: {
//!         wire_type:      u8
//!         tag:            u16
//!         value:          <the field's type>
//!     }
//!     ...
//!     stop:           u8          0
//! }
//!
//! list / set {
//!     elem_wire_type: u8
//!     count:          i32
//!     elems:          [<elem type>; count]
//! }
//!
//! map {
//!     key_wire_type:  u8
//!     val_wire_type:  u8
//!     count:          i32
//!     entries:        [{ key: <key type>, value: <value type> }; count]
//! }
//! ```

mod codec;
mod deser;
mod ser;

pub use codec::*;
