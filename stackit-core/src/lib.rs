//! STACKIT Core
//!
//! Core library shared by the STACKIT provider crates: the attribute value
//! model, composite identifiers, provider traits and attribute schemas.

pub mod mapping;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod value;

pub use value::Attr;
