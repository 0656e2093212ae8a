//! # Ecosystem Board Test Suite
//!
//! Cross-crate scenarios: the request list controller driven against the
//! in-memory board contract, and the runtime wired end to end.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs   # Derivation and action scenarios
//!     ├── guards.rs      # Signer gating, owner guard, failure handling
//!     └── runtime.rs     # Board wiring, CLI commands, shared pending flag
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p board-tests
//!
//! # By category
//! cargo test -p board-tests integration::scenarios::
//! cargo test -p board-tests integration::guards::
//! ```

#[cfg(test)]
mod integration;
