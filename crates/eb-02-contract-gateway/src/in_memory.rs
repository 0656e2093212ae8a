//! In-memory board contract
//!
//! Deterministic stand-in for the deployed contract, used by demo mode and
//! the cross-crate tests. Transactions take effect when sent; `wait`
//! confirms any hash it issued, once. Every call is journaled so callers can
//! assert that nothing reached the contract.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eb_01_request_list::{ContractGateway, GatewayError, PendingTx, WalletSession};
use parking_lot::Mutex;
use shared_types::{Address, RawRecord, RequestKind, RequestStatus, TxHash, U256};
use tracing::debug;

use crate::contract;

/// One call as seen by the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    List(RequestKind),
    Add { kind: RequestKind, title: String },
    Upvote { kind: RequestKind, index: u64 },
    SetStatus {
        kind: RequestKind,
        index: u64,
        status: RequestStatus,
    },
    Wait(TxHash),
    Owner,
}

impl JournalEntry {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            JournalEntry::Add { .. } | JournalEntry::Upvote { .. } | JournalEntry::SetStatus { .. }
        )
    }
}

#[derive(Default)]
struct BoardState {
    integrations: Vec<RawRecord>,
    problem_reports: Vec<RawRecord>,
    next_tx: u64,
    issued: HashSet<TxHash>,
    journal: Vec<JournalEntry>,
    fail_next_call: Option<String>,
    fail_next_list: Option<String>,
    next_list_delay: Option<Duration>,
}

impl BoardState {
    fn records(&self, kind: RequestKind) -> &Vec<RawRecord> {
        match kind {
            RequestKind::Integration => &self.integrations,
            RequestKind::ProblemReport => &self.problem_reports,
        }
    }

    fn records_mut(&mut self, kind: RequestKind) -> &mut Vec<RawRecord> {
        match kind {
            RequestKind::Integration => &mut self.integrations,
            RequestKind::ProblemReport => &mut self.problem_reports,
        }
    }

    fn record_mut(&mut self, kind: RequestKind, index: u64) -> Result<&mut RawRecord, GatewayError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.records_mut(kind).get_mut(i))
            .ok_or_else(|| GatewayError::Reverted {
                reason: "Invalid index".to_string(),
            })
    }

    fn take_failure(&mut self) -> Result<(), GatewayError> {
        match self.fail_next_call.take() {
            Some(reason) => Err(GatewayError::Injected(reason)),
            None => Ok(()),
        }
    }

    fn issue(&mut self, kind: RequestKind, signature: &'static str) -> PendingTx {
        self.next_tx += 1;
        let hash = TxHash::from_low_u64_be(self.next_tx);
        self.issued.insert(hash);
        PendingTx::new(hash, kind, signature)
    }
}

/// Board contract simulated in process.
pub struct InMemoryBoardContract {
    owner: Address,
    wallet: Arc<dyn WalletSession>,
    state: Mutex<BoardState>,
}

impl InMemoryBoardContract {
    /// `wallet` supplies `msg.sender` for mutating calls.
    pub fn new(owner: Address, wallet: Arc<dyn WalletSession>) -> Self {
        Self {
            owner,
            wallet,
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Append a record directly, bypassing the journal. Its id is the next
    /// index for the kind; the one passed in is ignored.
    pub fn seed(&self, kind: RequestKind, mut record: RawRecord) -> u64 {
        let mut state = self.state.lock();
        let records = state.records_mut(kind);
        let index = records.len() as u64;
        record.id = U256::from(index);
        records.push(record);
        index
    }

    /// Current records for one kind.
    pub fn records(&self, kind: RequestKind) -> Vec<RawRecord> {
        self.state.lock().records(kind).clone()
    }

    pub fn journal(&self) -> Vec<JournalEntry> {
        self.state.lock().journal.clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.state
            .lock()
            .journal
            .iter()
            .filter(|e| e.is_mutation())
            .count()
    }

    pub fn clear_journal(&self) {
        self.state.lock().journal.clear();
    }

    /// The next call of any kind fails with `GatewayError::Injected`.
    pub fn fail_next_call(&self, reason: impl Into<String>) {
        self.state.lock().fail_next_call = Some(reason.into());
    }

    /// The next `list` fails with `GatewayError::Injected`.
    pub fn fail_next_list(&self, reason: impl Into<String>) {
        self.state.lock().fail_next_list = Some(reason.into());
    }

    /// The next `list` snapshots the records immediately but answers only
    /// after `delay`.
    pub fn delay_next_list(&self, delay: Duration) {
        self.state.lock().next_list_delay = Some(delay);
    }

    fn sender(&self) -> Result<Address, GatewayError> {
        self.wallet.address().ok_or(GatewayError::NoSigner)
    }
}

#[async_trait]
impl ContractGateway for InMemoryBoardContract {
    async fn list(&self, kind: RequestKind) -> Result<Vec<RawRecord>, GatewayError> {
        let (records, delay) = {
            let mut state = self.state.lock();
            state.journal.push(JournalEntry::List(kind));
            state.take_failure()?;
            if let Some(reason) = state.fail_next_list.take() {
                return Err(GatewayError::Injected(reason));
            }
            (state.records(kind).clone(), state.next_list_delay.take())
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        debug!(kind = %kind, call = contract::binding(kind).list, count = records.len(), "In-memory list");
        Ok(records)
    }

    async fn add(
        &self,
        kind: RequestKind,
        title: &str,
        description: &str,
    ) -> Result<PendingTx, GatewayError> {
        let sender = self.sender();
        let mut state = self.state.lock();
        state.journal.push(JournalEntry::Add {
            kind,
            title: title.to_string(),
        });
        state.take_failure()?;
        let sender = sender?;

        let records = state.records_mut(kind);
        let index = records.len() as u64;
        records.push(RawRecord {
            id: U256::from(index),
            title: title.to_string(),
            description: description.to_string(),
            status: U256::from(RequestStatus::New.code()),
            votes: U256::zero(),
            raised_by: sender,
        });
        Ok(state.issue(kind, contract::binding(kind).add))
    }

    async fn upvote(&self, kind: RequestKind, index: u64) -> Result<PendingTx, GatewayError> {
        let sender = self.sender();
        let mut state = self.state.lock();
        state.journal.push(JournalEntry::Upvote { kind, index });
        state.take_failure()?;
        sender?;

        let record = state.record_mut(kind, index)?;
        record.votes += U256::one();
        Ok(state.issue(kind, contract::binding(kind).upvote))
    }

    async fn set_status(
        &self,
        kind: RequestKind,
        index: u64,
        status: RequestStatus,
    ) -> Result<PendingTx, GatewayError> {
        let sender = self.sender();
        let mut state = self.state.lock();
        state.journal.push(JournalEntry::SetStatus {
            kind,
            index,
            status,
        });
        state.take_failure()?;

        if !sender?.same_account(&self.owner) {
            return Err(GatewayError::Reverted {
                reason: "Only owner".to_string(),
            });
        }
        let record = state.record_mut(kind, index)?;
        record.status = U256::from(status.code());
        Ok(state.issue(kind, contract::binding(kind).set_status))
    }

    async fn wait(&self, tx: &PendingTx) -> Result<(), GatewayError> {
        let mut state = self.state.lock();
        state.journal.push(JournalEntry::Wait(tx.hash));
        state.take_failure()?;
        if state.issued.remove(&tx.hash) {
            Ok(())
        } else {
            Err(GatewayError::UnknownTransaction(tx.hash))
        }
    }

    async fn owner_address(&self) -> Result<Address, GatewayError> {
        let mut state = self.state.lock();
        state.journal.push(JournalEntry::Owner);
        state.take_failure()?;
        Ok(self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::LocalWalletSession;

    const OWNER: u64 = 0xAA;

    fn contract_as(sender: u64) -> InMemoryBoardContract {
        let wallet = Arc::new(LocalWalletSession::new(Address::from_low_u64_be(sender)));
        InMemoryBoardContract::new(Address::from_low_u64_be(OWNER), wallet)
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let contract = contract_as(0x01);
        let tx = contract
            .add(RequestKind::Integration, "Alpha", "first")
            .await
            .unwrap();
        contract.wait(&tx).await.unwrap();

        let records = contract.list(RequestKind::Integration).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, U256::zero());
        assert_eq!(records[0].raised_by, Address::from_low_u64_be(0x01));
        assert!(contract
            .list(RequestKind::ProblemReport)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_upvote_increments() {
        let contract = contract_as(0x01);
        contract.add(RequestKind::ProblemReport, "Bug", "crash").await.unwrap();
        contract.upvote(RequestKind::ProblemReport, 0).await.unwrap();
        contract.upvote(RequestKind::ProblemReport, 0).await.unwrap();
        assert_eq!(contract.records(RequestKind::ProblemReport)[0].votes, U256::from(2));
    }

    #[tokio::test]
    async fn test_unknown_index_reverts() {
        let contract = contract_as(0x01);
        assert!(matches!(
            contract.upvote(RequestKind::Integration, 3).await,
            Err(GatewayError::Reverted { .. })
        ));
    }

    #[tokio::test]
    async fn test_set_status_is_owner_only() {
        let contract = contract_as(0x01);
        contract.add(RequestKind::Integration, "Alpha", "first").await.unwrap();
        let err = contract
            .set_status(RequestKind::Integration, 0, RequestStatus::Done)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::Reverted {
                reason: "Only owner".into()
            }
        );

        let owner = contract_as(OWNER);
        owner.add(RequestKind::Integration, "Alpha", "first").await.unwrap();
        owner
            .set_status(RequestKind::Integration, 0, RequestStatus::Done)
            .await
            .unwrap();
        assert_eq!(owner.records(RequestKind::Integration)[0].status, U256::from(3));
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let contract = contract_as(0x01);
        contract.fail_next_call("boom");
        assert_eq!(
            contract.list(RequestKind::Integration).await,
            Err(GatewayError::Injected("boom".into()))
        );
        assert!(contract.list(RequestKind::Integration).await.is_ok());

        contract.fail_next_list("list down");
        assert!(contract.list(RequestKind::Integration).await.is_err());
        assert!(contract.add(RequestKind::Integration, "A", "B").await.is_ok());
    }

    #[tokio::test]
    async fn test_wait_confirms_each_hash_once() {
        let contract = contract_as(0x01);
        let tx = contract
            .add(RequestKind::Integration, "Alpha", "first")
            .await
            .unwrap();

        contract.fail_next_call("node busy");
        assert!(contract.wait(&tx).await.is_err());
        assert!(contract.wait(&tx).await.is_ok());
        assert_eq!(
            contract.wait(&tx).await,
            Err(GatewayError::UnknownTransaction(tx.hash))
        );
    }

    #[tokio::test]
    async fn test_wait_rejects_unknown_hash() {
        let contract = contract_as(0x01);
        let tx = PendingTx::new(TxHash::from_low_u64_be(99), RequestKind::Integration, "x");
        assert_eq!(
            contract.wait(&tx).await,
            Err(GatewayError::UnknownTransaction(tx.hash))
        );
    }

    #[tokio::test]
    async fn test_journal_and_seed() {
        let contract = contract_as(0x01);
        let index = contract.seed(
            RequestKind::Integration,
            RawRecord {
                id: U256::from(42),
                title: "Seeded".into(),
                description: "from fixture".into(),
                status: U256::from(2),
                votes: U256::from(7),
                raised_by: Address::from_low_u64_be(3),
            },
        );
        assert_eq!(index, 0);
        assert_eq!(contract.records(RequestKind::Integration)[0].id, U256::zero());
        assert!(contract.journal().is_empty());

        contract.upvote(RequestKind::Integration, 0).await.unwrap();
        contract.owner_address().await.unwrap();
        assert_eq!(contract.mutation_count(), 1);
        assert_eq!(contract.journal().len(), 2);

        contract.clear_journal();
        assert!(contract.journal().is_empty());
    }

    #[tokio::test]
    async fn test_mutation_without_sender() {
        let wallet = Arc::new(LocalWalletSession::disconnected(Address::from_low_u64_be(1)));
        let contract = InMemoryBoardContract::new(Address::from_low_u64_be(OWNER), wallet);
        assert_eq!(
            contract.add(RequestKind::Integration, "A", "B").await,
            Err(GatewayError::NoSigner)
        );
    }
}
