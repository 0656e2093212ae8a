//! # Wiring
//!
//! Builds the shared pending flag, the wallet session, the gateway and one
//! request list controller per kind.
//!
//! ```text
//! RuntimeConfig ──▶ WalletSession ──▶ ContractGateway ──┬──▶ Integrations controller
//!                                                       └──▶ Problem reports controller
//! ```

use std::sync::Arc;

use eb_01_request_list::{
    ContractGateway, PendingFlag, RequestListApi, RequestListController, WalletSession,
};
use eb_02_contract_gateway::{
    InMemoryBoardContract, JsonRpcClient, LocalWalletSession, RpcContractGateway,
    RpcWalletSession,
};
use shared_types::{Address, RawRecord, RequestKind, RequestStatus, U256};
use tracing::{info, warn};

use crate::config::RuntimeConfig;

/// Controller over type-erased ports.
pub type BoardController = RequestListController<dyn ContractGateway, dyn WalletSession>;

/// Everything a command needs.
pub struct Board {
    pub pending: Arc<PendingFlag>,
    pub wallet: Arc<dyn WalletSession>,
    pub gateway: Arc<dyn ContractGateway>,
    integrations: BoardController,
    problem_reports: BoardController,
}

impl Board {
    /// Wire from explicit ports.
    pub fn new(
        config: &RuntimeConfig,
        gateway: Arc<dyn ContractGateway>,
        wallet: Arc<dyn WalletSession>,
    ) -> Self {
        let pending = PendingFlag::new();
        let controller = |kind| {
            RequestListController::new(
                kind,
                config.request_list.clone(),
                Arc::clone(&gateway),
                Arc::clone(&wallet),
                Arc::clone(&pending),
            )
        };
        let integrations = controller(RequestKind::Integration);
        let problem_reports = controller(RequestKind::ProblemReport);

        Self {
            pending,
            wallet,
            gateway,
            integrations,
            problem_reports,
        }
    }

    /// Wire against a node, or the in-memory contract in demo mode.
    pub fn from_config(config: &RuntimeConfig) -> anyhow::Result<Self> {
        if config.demo {
            let owner = demo_owner();
            let wallet: Arc<dyn WalletSession> =
                Arc::new(LocalWalletSession::new(config.from.unwrap_or(owner)));
            let contract = InMemoryBoardContract::new(owner, Arc::clone(&wallet));
            seed_demo(&contract);
            info!(owner = %owner, "Demo mode: in-memory board contract");
            return Ok(Self::new(config, Arc::new(contract), wallet));
        }

        let transport = Arc::new(JsonRpcClient::new(
            config.gateway.rpc_url.clone(),
            config.gateway.http_timeout(),
        )?);
        let wallet: Arc<dyn WalletSession> = match config.from {
            Some(account) => Arc::new(RpcWalletSession::with_account(
                Arc::clone(&transport),
                account,
            )),
            None => Arc::new(RpcWalletSession::new(Arc::clone(&transport))),
        };
        let gateway = RpcContractGateway::new(transport, Arc::clone(&wallet), &config.gateway);
        info!(
            rpc_url = %config.gateway.rpc_url,
            contract = %config.gateway.contract_address,
            chain_id = config.gateway.chain_id,
            "Connected gateway"
        );
        Ok(Self::new(config, Arc::new(gateway), wallet))
    }

    pub fn controller(&self, kind: RequestKind) -> &BoardController {
        match kind {
            RequestKind::Integration => &self.integrations,
            RequestKind::ProblemReport => &self.problem_reports,
        }
    }

    /// Bring the wallet up and let both controllers observe it.
    ///
    /// A wallet that cannot connect leaves the board read-less but usable:
    /// actions decline and lists stay empty.
    pub async fn start(&self) {
        for kind in RequestKind::ALL {
            let controller = self.controller(kind);
            let result = if self.wallet.is_connected() {
                controller.refresh().await.map(Some)
            } else {
                controller.connect().await
            };
            if let Err(e) = result {
                warn!(kind = %kind, error = %e, "Initial load failed");
            }
        }
    }

    pub fn shutdown(&self) {
        self.integrations.dispose();
        self.problem_reports.dispose();
    }
}

/// Owner account of the demo contract.
pub fn demo_owner() -> Address {
    Address::from_low_u64_be(0x0B0A_2D00)
}

/// Sample requests for demo mode.
pub fn seed_demo(contract: &InMemoryBoardContract) {
    let rows: [(RequestKind, &str, &str, RequestStatus, u64, u64); 8] = [
        (RequestKind::Integration, "Chainlink price feeds", "Expose oracle prices to dApps", RequestStatus::InReview, 14, 0x11),
        (RequestKind::Integration, "Uniswap v3 deployment", "Canonical DEX deployment on the network", RequestStatus::New, 9, 0x12),
        (RequestKind::Integration, "The Graph indexing", "Hosted subgraph support", RequestStatus::Done, 21, 0x13),
        (RequestKind::Integration, "Safe multisig", "Gnosis Safe contracts and UI", RequestStatus::Deferred, 4, 0x14),
        (RequestKind::Integration, "Alpha wallet", "Mobile wallet listing", RequestStatus::Rejected, 1, 0x15),
        (RequestKind::ProblemReport, "Explorer shows wrong gas", "Gas used column is off by one block", RequestStatus::New, 3, 0x21),
        (RequestKind::ProblemReport, "RPC timeouts at peak", "pre-rpc drops requests above 50 rps", RequestStatus::InReview, 11, 0x22),
        (RequestKind::ProblemReport, "Faucet spam", "Faucet drained by scripted requests", RequestStatus::Hidden, 2, 0x23),
    ];

    for (kind, title, description, status, votes, raised_by) in rows {
        contract.seed(
            kind,
            RawRecord {
                id: U256::zero(),
                title: title.to_string(),
                description: description.to_string(),
                status: U256::from(status.code()),
                votes: U256::from(votes),
                raised_by: Address::from_low_u64_be(raised_by),
            },
        );
    }
}
