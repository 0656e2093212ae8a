//! Controller + in-memory contract fixtures shared by the scenario files.

mod guards;
mod runtime;
mod scenarios;

use std::sync::Arc;

use eb_01_request_list::{
    PendingFlag, RequestListConfig, RequestListController, WalletSession,
};
use eb_02_contract_gateway::{InMemoryBoardContract, LocalWalletSession};
use shared_types::{Address, RawRecord, RequestKind, RequestStatus, U256};

pub(crate) const OWNER: u64 = 0x0A11CE;
pub(crate) const MEMBER: u64 = 0x0B0B;

pub(crate) type Controller = RequestListController<InMemoryBoardContract, LocalWalletSession>;

pub(crate) struct Fixture {
    pub contract: Arc<InMemoryBoardContract>,
    pub wallet: Arc<LocalWalletSession>,
    pub pending: Arc<PendingFlag>,
}

impl Fixture {
    /// Contract owned by `OWNER`, wallet acting as `wallet`.
    pub fn new(wallet: LocalWalletSession) -> Self {
        Self::owned_by(Address::from_low_u64_be(OWNER), wallet)
    }

    pub fn owned_by(owner: Address, wallet: LocalWalletSession) -> Self {
        let wallet = Arc::new(wallet);
        let sender: Arc<dyn WalletSession> = Arc::clone(&wallet) as Arc<dyn WalletSession>;
        let contract = Arc::new(InMemoryBoardContract::new(owner, sender));
        Self {
            contract,
            wallet,
            pending: PendingFlag::new(),
        }
    }

    pub fn as_member() -> Self {
        Self::new(LocalWalletSession::new(Address::from_low_u64_be(MEMBER)))
    }

    pub fn as_owner() -> Self {
        Self::new(LocalWalletSession::new(Address::from_low_u64_be(OWNER)))
    }

    pub fn controller(&self, kind: RequestKind) -> Controller {
        self.controller_with(kind, RequestListConfig::default())
    }

    pub fn controller_with(&self, kind: RequestKind, config: RequestListConfig) -> Controller {
        RequestListController::new(
            kind,
            config,
            Arc::clone(&self.contract),
            Arc::clone(&self.wallet),
            Arc::clone(&self.pending),
        )
    }

    pub fn seed(&self, kind: RequestKind, title: &str, status: RequestStatus, votes: u64) -> u64 {
        self.contract.seed(
            kind,
            RawRecord {
                id: U256::zero(),
                title: title.to_string(),
                description: format!("{title} description"),
                status: U256::from(status.code()),
                votes: U256::from(votes),
                raised_by: Address::from_low_u64_be(MEMBER),
            },
        )
    }

    /// `IR-0 Alpha (New, 2 votes)` and `IR-1 Beta (Done, 5 votes)`.
    pub fn seed_alpha_beta(&self) {
        self.seed(RequestKind::Integration, "Alpha", RequestStatus::New, 2);
        self.seed(RequestKind::Integration, "Beta", RequestStatus::Done, 5);
    }
}
