//! Runtime data model definitions.
//!
//! Entities describe their fields here so accessors can be built and
//! type-checked without a concrete Rust type in hand (configuration-driven
//! intervals go through this path).
pub mod entity;
pub mod field;
