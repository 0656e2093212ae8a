//! # Shared Types Crate
//!
//! Chain primitives and request vocabulary used across the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, hashes, request kinds and status
//!   codes are defined once here and reused by the core and the adapters.
//! - **Typed Boundary**: contract rows cross crate boundaries as [`RawRecord`],
//!   never as positional tuples.

pub mod entities;
pub mod errors;
pub mod requests;

pub use entities::*;
pub use errors::*;
pub use requests::*;
