//! # EB-01: Request List Subsystem
//!
//! Client-side controller that turns the contract's raw request list into a
//! filtered, paginated, sorted view and turns row actions into contract
//! transactions followed by a re-fetch.
//!
//! ## Architecture
//!
//! - **Domain**: Core entities (Request, RequestId), view state value objects,
//!   the derivation pipeline and errors
//! - **Ports**: Inbound (RequestListApi) and Outbound (ContractGateway, WalletSession)
//! - **Application**: RequestListController orchestration and the shared PendingFlag
//!
//! ## Derivation Order
//!
//! ```text
//! raw ──search──▶ status filter ──▶ page slice ──▶ sort page ──▶ ListView
//! ```
//!
//! Sorting happens after slicing: each page is ordered on its own.

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::controller::{ActionOutcome, RefreshOutcome, RequestListController};
pub use application::pending::{PendingFlag, PendingGuard};
pub use config::{ConfigError, RequestListConfig};
pub use domain::entities::*;
pub use domain::errors::{BoardError, DecodeError, GatewayError};
pub use domain::value_objects::*;
pub use domain::view::ListView;
pub use ports::inbound::RequestListApi;
pub use ports::outbound::{ContractGateway, PendingTx, WalletSession};
