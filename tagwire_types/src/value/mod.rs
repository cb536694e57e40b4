//! Values bound to a schema.
//!
//! A [`Value`] mirrors [`crate::schema::Type`] one variant per kind of data;
//! UTF-8 and UTF-16 text are both held as [`Value::String`]. A [`StructValue`]
//! is a bag of field values tied to the [`crate::schema::StructType`] it was
//! built from.

mod dynamic;
mod exception;
mod instance;

pub use dynamic::*;
pub use exception::*;
pub use instance::*;
