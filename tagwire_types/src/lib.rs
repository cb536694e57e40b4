//! Schema model, values, and the codec contract shared by every wire format.
//!
//! A schema is built once out of [`schema::Type`]s and [`schema::StructType`]s,
//! and is then handed to any [`wire::Codec`] together with a [`value::Value`].
//! The codecs live in their own crates; this crate only knows how bytes are
//! framed on a stream ([`wire::WireReader`], [`wire::WireWriter`]) and which
//! wire identifiers exist ([`wire::WireType`]).

pub mod error;
pub mod schema;
pub mod value;
pub mod wire;
