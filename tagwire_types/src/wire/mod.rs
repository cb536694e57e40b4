//! # Stream contract
//!
//! Every codec reads from a [`std::io::Read`] and writes to a [`std::io::Write`],
//! through the thin [`WireReader`] and [`WireWriter`] adaptors. They track how many
//! bytes went by, and turn short reads into [`crate::error::CodecError::StreamUnderrun`].
//!
//! Values on the wire are identified by a [`WireType`], encoded in one byte
//! (or in one nibble, by the compact format). The identifiers are shared by all
//! codecs:
//!
//! ```text
//! stop    0     byte    3     i16     6     i64    10     struct 12     set  14
//!               double  4     i32     8     string 11     map    13     list 15
//! bool    2
//! ```
//!
//! UTF-8 text, UTF-16 text and raw bytes all travel as `string`; only the schema
//! tells them apart.

mod assembler;
mod codec;
mod io;
mod text;
mod wire_type;

pub use assembler::*;
pub use codec::*;
pub use io::*;
pub use text::*;
pub use wire_type::*;

mod test;
