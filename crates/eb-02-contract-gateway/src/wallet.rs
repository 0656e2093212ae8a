//! Wallet session adapters
//!
//! [`RpcWalletSession`] asks the node for its unlocked accounts and signs
//! through `eth_sendTransaction`. [`LocalWalletSession`] is a fixed account
//! for demo mode and tests.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use eb_01_request_list::{GatewayError, WalletSession};
use parking_lot::RwLock;
use serde_json::{json, Value};
use shared_types::Address;
use tracing::{info, warn};

use crate::rpc::RpcTransport;

/// Wallet backed by the node's account list.
pub struct RpcWalletSession<T: RpcTransport + ?Sized> {
    transport: Arc<T>,
    account: RwLock<Option<Address>>,
}

impl<T: RpcTransport + ?Sized> RpcWalletSession<T> {
    /// Disconnected until [`WalletSession::connect`] succeeds.
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            account: RwLock::new(None),
        }
    }

    /// Already connected as `account`.
    pub fn with_account(transport: Arc<T>, account: Address) -> Self {
        Self {
            transport,
            account: RwLock::new(Some(account)),
        }
    }

    pub fn disconnect(&self) {
        *self.account.write() = None;
    }

    async fn accounts(&self, method: &str) -> Result<Vec<Address>, GatewayError> {
        let value = self.transport.request(method, json!([])).await?;
        parse_accounts(value)
    }
}

fn parse_accounts(value: Value) -> Result<Vec<Address>, GatewayError> {
    let entries: Vec<String> =
        serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
    entries
        .iter()
        .map(|s| Address::from_str(s).map_err(|e| GatewayError::Decode(e.to_string())))
        .collect()
}

#[async_trait]
impl<T: RpcTransport + ?Sized> WalletSession for RpcWalletSession<T> {
    fn is_connected(&self) -> bool {
        self.account.read().is_some()
    }

    fn signer_available(&self) -> bool {
        self.is_connected()
    }

    fn address(&self) -> Option<Address> {
        *self.account.read()
    }

    async fn connect(&self) -> Result<(), GatewayError> {
        let accounts = match self.accounts("eth_requestAccounts").await {
            Ok(accounts) => accounts,
            Err(e) => {
                warn!(error = %e, "eth_requestAccounts failed, falling back to eth_accounts");
                self.accounts("eth_accounts").await?
            }
        };

        let account = accounts.first().copied().ok_or(GatewayError::NoSigner)?;
        *self.account.write() = Some(account);
        info!(account = %account, "Wallet connected");
        Ok(())
    }
}

/// Fixed-account wallet with a toggleable connection.
#[derive(Debug)]
pub struct LocalWalletSession {
    address: Address,
    has_signer: bool,
    connected: AtomicBool,
}

impl LocalWalletSession {
    /// Connected, able to sign.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            has_signer: true,
            connected: AtomicBool::new(true),
        }
    }

    /// Not yet connected; `connect` brings it up.
    pub fn disconnected(address: Address) -> Self {
        Self {
            connected: AtomicBool::new(false),
            ..Self::new(address)
        }
    }

    /// Connected but unable to sign.
    pub fn read_only(address: Address) -> Self {
        Self {
            has_signer: false,
            ..Self::new(address)
        }
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletSession for LocalWalletSession {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn signer_available(&self) -> bool {
        self.has_signer && self.is_connected()
    }

    fn address(&self) -> Option<Address> {
        self.is_connected().then_some(self.address)
    }

    async fn connect(&self) -> Result<(), GatewayError> {
        self.set_connected(true);
        Ok(())
    }
}
