//! Outbound Ports (Driven Ports / SPI)
//!
//! The contract deployment and the wallet are external collaborators. The
//! controller only sees them through these traits.

use async_trait::async_trait;
use shared_types::{Address, RawRecord, RequestKind, RequestStatus, TxHash};

use crate::domain::errors::GatewayError;

/// A submitted transaction awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTx {
    pub hash: TxHash,
    pub kind: RequestKind,
    /// Short name of the contract call, for logs.
    pub call: &'static str,
}

impl PendingTx {
    pub fn new(hash: TxHash, kind: RequestKind, call: &'static str) -> Self {
        Self { hash, kind, call }
    }
}

/// Typed access to the request board contract.
///
/// Mutating calls return as soon as the transaction is accepted; callers
/// must follow up with [`ContractGateway::wait`].
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// Full record list for one kind.
    async fn list(&self, kind: RequestKind) -> Result<Vec<RawRecord>, GatewayError>;

    /// Submit a new request.
    async fn add(
        &self,
        kind: RequestKind,
        title: &str,
        description: &str,
    ) -> Result<PendingTx, GatewayError>;

    /// Upvote the request at `index`.
    async fn upvote(&self, kind: RequestKind, index: u64) -> Result<PendingTx, GatewayError>;

    /// Move the request at `index` to `status`.
    async fn set_status(
        &self,
        kind: RequestKind,
        index: u64,
        status: RequestStatus,
    ) -> Result<PendingTx, GatewayError>;

    /// Resolve once the transaction is included; fail on revert.
    async fn wait(&self, tx: &PendingTx) -> Result<(), GatewayError>;

    /// Account recorded as contract owner.
    async fn owner_address(&self) -> Result<Address, GatewayError>;
}

/// Wallet connection state and signer capability.
#[async_trait]
pub trait WalletSession: Send + Sync {
    fn is_connected(&self) -> bool;

    fn signer_available(&self) -> bool;

    /// Connected account, if any.
    fn address(&self) -> Option<Address>;

    /// Open or restore the wallet connection.
    async fn connect(&self) -> Result<(), GatewayError>;
}
