//! JSON-RPC backed [`ContractGateway`]
//!
//! Reads go through `eth_call` against `latest`. Mutations go through
//! `eth_sendTransaction`, so the node (or the wallet behind it) signs.
//! Confirmation polls `eth_getTransactionReceipt`.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eb_01_request_list::{ContractGateway, GatewayError, PendingTx, WalletSession};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use shared_types::{Address, RawRecord, RequestKind, RequestStatus, TxHash};
use tracing::{debug, info, warn};

use crate::abi;
use crate::config::GatewayConfig;
use crate::contract::{self, ContractCall};
use crate::rpc::{CallRequest, JsonRpcClient, RpcTransport, TransactionReceipt};

/// Gateway talking to a deployed board contract over JSON-RPC.
pub struct RpcContractGateway<T: RpcTransport + ?Sized = JsonRpcClient> {
    transport: Arc<T>,
    wallet: Arc<dyn WalletSession>,
    contract: Address,
    poll_interval: Duration,
    max_attempts: u32,
}

impl<T: RpcTransport + ?Sized> RpcContractGateway<T> {
    pub fn new(transport: Arc<T>, wallet: Arc<dyn WalletSession>, config: &GatewayConfig) -> Self {
        Self {
            transport,
            wallet,
            contract: config.contract_address,
            poll_interval: config.receipt_poll_interval(),
            max_attempts: config.receipt_max_attempts,
        }
    }

    pub fn contract_address(&self) -> Address {
        self.contract
    }

    async fn request<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<R, GatewayError> {
        let value = self.transport.request(method, params).await?;
        serde_json::from_value(value).map_err(|e| GatewayError::Decode(format!("{method}: {e}")))
    }

    /// Read-only call; returns raw return data.
    async fn call(&self, call: ContractCall) -> Result<Vec<u8>, GatewayError> {
        let request = CallRequest {
            from: self.wallet.address(),
            to: self.contract,
            data: abi::to_hex(&call.data),
        };
        let result: String = self
            .request("eth_call", json!([request, "latest"]))
            .await?;
        Ok(abi::from_hex(&result)?)
    }

    /// Submit a transaction from the wallet's account.
    async fn send(&self, kind: RequestKind, call: ContractCall) -> Result<PendingTx, GatewayError> {
        let from = self.wallet.address().ok_or(GatewayError::NoSigner)?;
        let request = CallRequest {
            from: Some(from),
            to: self.contract,
            data: abi::to_hex(&call.data),
        };
        let hash: String = self
            .request("eth_sendTransaction", json!([request]))
            .await?;
        let hash = TxHash::from_str(&hash).map_err(|e| GatewayError::Decode(e.to_string()))?;

        info!(kind = %kind, tx_hash = %hash, call = call.signature, "Transaction sent");
        Ok(PendingTx::new(hash, kind, call.signature))
    }
}

#[async_trait]
impl<T: RpcTransport + ?Sized> ContractGateway for RpcContractGateway<T> {
    async fn list(&self, kind: RequestKind) -> Result<Vec<RawRecord>, GatewayError> {
        let data = self.call(contract::list_call(kind)).await?;
        let records = abi::decode_record_list(&data)?;
        debug!(kind = %kind, count = records.len(), "Fetched request list");
        Ok(records)
    }

    async fn add(
        &self,
        kind: RequestKind,
        title: &str,
        description: &str,
    ) -> Result<PendingTx, GatewayError> {
        self.send(kind, contract::add_call(kind, title, description))
            .await
    }

    async fn upvote(&self, kind: RequestKind, index: u64) -> Result<PendingTx, GatewayError> {
        self.send(kind, contract::upvote_call(kind, index)).await
    }

    async fn set_status(
        &self,
        kind: RequestKind,
        index: u64,
        status: RequestStatus,
    ) -> Result<PendingTx, GatewayError> {
        self.send(kind, contract::set_status_call(kind, index, status))
            .await
    }

    async fn wait(&self, tx: &PendingTx) -> Result<(), GatewayError> {
        for attempt in 1..=self.max_attempts {
            let receipt: Option<TransactionReceipt> = self
                .request("eth_getTransactionReceipt", json!([tx.hash.to_string()]))
                .await?;

            match receipt {
                Some(receipt) if receipt.succeeded() => {
                    debug!(tx_hash = %tx.hash, attempt, block = ?receipt.block_number, "Receipt found");
                    return Ok(());
                }
                Some(_) => {
                    warn!(tx_hash = %tx.hash, call = tx.call, "Transaction reverted");
                    return Err(GatewayError::Reverted {
                        reason: format!("{} reverted", tx.call),
                    });
                }
                None if attempt < self.max_attempts => tokio::time::sleep(self.poll_interval).await,
                None => {}
            }
        }
        Err(GatewayError::Timeout {
            attempts: self.max_attempts,
        })
    }

    async fn owner_address(&self) -> Result<Address, GatewayError> {
        let data = self.call(contract::owner_call()).await?;
        Ok(abi::decode_address(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{encode_record_list, encode_tokens, Token};
    use crate::errors::RpcError;
    use crate::rpc::mocks::ScriptedTransport;
    use crate::wallet::LocalWalletSession;
    use shared_types::U256;

    fn gateway(
        transport: &Arc<ScriptedTransport>,
        wallet: Arc<dyn WalletSession>,
    ) -> RpcContractGateway<ScriptedTransport> {
        let config = GatewayConfig {
            receipt_poll_interval_ms: 10,
            receipt_max_attempts: 3,
            ..Default::default()
        };
        RpcContractGateway::new(Arc::clone(transport), wallet, &config)
    }

    fn signer() -> Arc<dyn WalletSession> {
        Arc::new(LocalWalletSession::new(Address::from_low_u64_be(0xAA)))
    }

    fn tx_hash_hex(n: u64) -> String {
        TxHash::from_low_u64_be(n).to_string()
    }

    #[tokio::test]
    async fn test_list_decodes_records() {
        let records = vec![RawRecord {
            id: U256::zero(),
            title: "Alpha".into(),
            description: "first".into(),
            status: U256::from(1),
            votes: U256::from(4),
            raised_by: Address::from_low_u64_be(9),
        }];
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(json!(abi::to_hex(&encode_record_list(&records))));

        let gateway = gateway(&transport, signer());
        assert_eq!(gateway.list(RequestKind::Integration).await.unwrap(), records);

        let (method, params) = transport.requests.lock()[0].clone();
        assert_eq!(method, "eth_call");
        assert_eq!(params[1], json!("latest"));
        assert_eq!(
            params[0]["data"],
            json!(abi::to_hex(&contract::list_call(RequestKind::Integration).data))
        );
    }

    #[tokio::test]
    async fn test_send_without_account_is_no_signer() {
        let transport = Arc::new(ScriptedTransport::new());
        let wallet: Arc<dyn WalletSession> = Arc::new(LocalWalletSession::disconnected(
            Address::from_low_u64_be(0xAA),
        ));
        let gateway = gateway(&transport, wallet);

        let err = gateway.upvote(RequestKind::Integration, 1).await.unwrap_err();
        assert_eq!(err, GatewayError::NoSigner);
        assert!(transport.methods().is_empty());
    }

    #[tokio::test]
    async fn test_upvote_sends_transaction() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(json!(tx_hash_hex(5)));
        let gateway = gateway(&transport, signer());

        let tx = gateway.upvote(RequestKind::ProblemReport, 2).await.unwrap();
        assert_eq!(tx.hash, TxHash::from_low_u64_be(5));
        assert_eq!(tx.call, "upVotePR(uint256)");

        let (method, params) = transport.requests.lock()[0].clone();
        assert_eq!(method, "eth_sendTransaction");
        assert_eq!(
            params[0]["from"],
            json!(Address::from_low_u64_be(0xAA).to_checksum())
        );
    }

    #[tokio::test]
    async fn test_wait_polls_until_receipt() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .reply(Value::Null)
            .reply(json!({"transactionHash": tx_hash_hex(1), "status": "0x1"}));
        let gateway = gateway(&transport, signer());

        let tx = PendingTx::new(TxHash::from_low_u64_be(1), RequestKind::Integration, "upVoteIR(uint256)");
        gateway.wait(&tx).await.unwrap();
        assert_eq!(transport.methods().len(), 2);
    }

    #[tokio::test]
    async fn test_wait_reports_revert() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(json!({"transactionHash": tx_hash_hex(1), "status": "0x0"}));
        let gateway = gateway(&transport, signer());

        let tx = PendingTx::new(TxHash::from_low_u64_be(1), RequestKind::Integration, "updateIRStatus(uint256,uint8)");
        assert!(matches!(
            gateway.wait(&tx).await,
            Err(GatewayError::Reverted { .. })
        ));
    }

    #[tokio::test]
    async fn test_wait_times_out() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .reply(Value::Null)
            .reply(Value::Null)
            .reply(Value::Null);
        let gateway = gateway(&transport, signer());

        let tx = PendingTx::new(TxHash::from_low_u64_be(1), RequestKind::Integration, "upVoteIR(uint256)");
        assert_eq!(
            gateway.wait(&tx).await,
            Err(GatewayError::Timeout { attempts: 3 })
        );
        assert_eq!(transport.methods().len(), 3);
    }

    #[tokio::test]
    async fn test_owner_address() {
        let owner = Address::from_low_u64_be(0xAA);
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(json!(abi::to_hex(&encode_tokens(&[Token::Address(owner)]))));
        let gateway = gateway(&transport, signer());

        assert_eq!(gateway.owner_address().await.unwrap(), owner);
    }

    #[tokio::test]
    async fn test_call_revert_maps_to_reverted() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail(RpcError::Rpc {
            code: 3,
            message: "execution reverted".into(),
            data: Some(abi::to_hex(&abi::encode_revert_reason("Only owner"))),
        });
        let gateway = gateway(&transport, signer());

        let err = gateway
            .set_status(RequestKind::Integration, 0, RequestStatus::Done)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Reverted {
                reason: "Only owner".into()
            }
        );
    }
}
