//! Application layer: controller orchestration and shared pending state.

pub mod controller;
pub mod pending;

pub use controller::{ActionOutcome, RefreshOutcome, RequestListController};
pub use pending::{PendingFlag, PendingGuard};
