//! Domain module for the Request List
//!
//! Contains core entities, view state value objects, the derivation pipeline
//! and errors.

pub mod entities;
pub mod errors;
pub mod value_objects;
pub mod view;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
