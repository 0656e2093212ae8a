//! Ports module for the Request List
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::RequestListApi;
pub use outbound::{ContractGateway, PendingTx, WalletSession};
