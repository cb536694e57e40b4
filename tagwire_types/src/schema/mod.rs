//! # Schema model
//!
//! A [`Type`] describes the shape of a value independently of any wire format.
//! Scalars are plain variants; containers are parametrized by their element
//! types when the `Type` is constructed; structs refer to a shared [`StructType`].
//!
//! ```text
//! let person = StructType::builder("Person")
//!     .field("name", Type::String, 1)?
//!     .field("friends", Type::set(Type::String), 2)?
//!     .build();
//! let ty = Type::from(person);
//! ```
//!
//! A struct's fields are fixed once it is built. Tags are validated as fields are
//! added, so a bad schema fails before any instance exists.

mod structs;
mod types;

pub use structs::*;
pub use types::*;
