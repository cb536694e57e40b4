pub mod concurrent;
pub mod foo;
pub mod helpers;
pub mod scalars;
pub mod structs;
