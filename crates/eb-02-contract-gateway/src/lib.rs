//! # EB-02: Contract Gateway
//!
//! Adapters for the request list's outbound ports.
//!
//! ## Modules
//!
//! - `abi`: Solidity ABI codec for the board contract's call shapes
//! - `contract`: per-kind function signatures and call data
//! - `rpc`: JSON-RPC transport over HTTP
//! - `gateway`: [`RpcContractGateway`], the on-chain [`ContractGateway`]
//! - `wallet`: [`RpcWalletSession`] and [`LocalWalletSession`]
//! - `in_memory`: [`InMemoryBoardContract`] for demo mode and tests
//! - `config`: [`GatewayConfig`] from environment variables
//!
//! ```text
//! ContractGateway ──▶ RpcContractGateway ──▶ abi/contract ──▶ JsonRpcClient ──▶ node
//!                └──▶ InMemoryBoardContract
//! ```
//!
//! [`ContractGateway`]: eb_01_request_list::ContractGateway

pub mod abi;
pub mod config;
pub mod contract;
pub mod errors;
pub mod gateway;
pub mod in_memory;
pub mod rpc;
pub mod wallet;

pub use config::{ConfigError, GatewayConfig};
pub use errors::{AbiError, RpcError};
pub use gateway::RpcContractGateway;
pub use in_memory::{InMemoryBoardContract, JournalEntry};
pub use rpc::{JsonRpcClient, RpcTransport};
pub use wallet::{LocalWalletSession, RpcWalletSession};
