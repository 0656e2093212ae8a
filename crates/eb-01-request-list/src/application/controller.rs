//! Request List Controller - Core orchestration
//!
//! One controller per request kind. Holds the last fetched collection and
//! the view state, derives [`ListView`]s on demand and turns row actions
//! into contract transactions followed by a re-fetch.
//!
//! Locks are never held across an `.await`; concurrent refreshes and actions
//! are allowed and reconciled by a refresh sequence number.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Serialize;
use shared_types::{RawRecord, RequestKind, RequestStatus, TxHash};
use tracing::{debug, error, info, warn};

use crate::application::pending::PendingFlag;
use crate::config::RequestListConfig;
use crate::domain::entities::{Request, RequestId};
use crate::domain::errors::{BoardError, GatewayError};
use crate::domain::value_objects::{
    Column, PageSize, RowAction, Selection, SortDescriptor, SortDirection, StatusFilter, ViewState,
};
use crate::domain::view::{derive_view, ListView};
use crate::ports::inbound::RequestListApi;
use crate::ports::outbound::{ContractGateway, PendingTx, WalletSession};

/// Result of a refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefreshOutcome {
    /// The collection was replaced with `count` requests.
    Applied { count: usize },
    /// No signer available; nothing fetched.
    Skipped,
    /// A newer refresh started, or the controller was disposed, before this
    /// one finished. The result was discarded.
    Stale,
}

/// Result of a row action or submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionOutcome {
    /// No signer available; nothing was sent.
    Declined,
    /// Transaction included on chain and a refresh was attempted.
    Confirmed(TxHash),
}

struct ControllerState {
    raw: Vec<Request>,
    view: ViewState,
    connected: bool,
    last_error: Option<String>,
}

/// Request list controller, generic over the contract gateway and the
/// wallet session.
pub struct RequestListController<G, W>
where
    G: ContractGateway + ?Sized,
    W: WalletSession + ?Sized,
{
    kind: RequestKind,
    config: RequestListConfig,
    gateway: Arc<G>,
    wallet: Arc<W>,
    pending: Arc<PendingFlag>,
    state: RwLock<ControllerState>,
    refresh_seq: AtomicU64,
    disposed: AtomicBool,
}

impl<G, W> RequestListController<G, W>
where
    G: ContractGateway + ?Sized,
    W: WalletSession + ?Sized,
{
    pub fn new(
        kind: RequestKind,
        config: RequestListConfig,
        gateway: Arc<G>,
        wallet: Arc<W>,
        pending: Arc<PendingFlag>,
    ) -> Self {
        let view = ViewState {
            rows_per_page: config.rows_per_page,
            sort: config.default_sort,
            ..ViewState::default()
        };
        let connected = wallet.is_connected();

        Self {
            kind,
            config,
            gateway,
            wallet,
            pending,
            state: RwLock::new(ControllerState {
                raw: Vec::new(),
                view,
                connected,
                last_error: None,
            }),
            refresh_seq: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Stop applying refresh results. In-flight work still runs to completion.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
        debug!(kind = %self.kind, "Controller disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Message of the most recent failure, for an error banner.
    pub fn last_error(&self) -> Option<String> {
        self.state.read().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.state.write().last_error = None;
    }

    /// Snapshot of the current view state.
    pub fn view_state(&self) -> ViewState {
        self.state.read().view.clone()
    }

    fn record_error(&self, err: &GatewayError) {
        self.state.write().last_error = Some(err.to_string());
    }

    fn update_view(&self, f: impl FnOnce(&mut ViewState)) {
        let mut state = self.state.write();
        f(&mut state.view);
    }

    fn decode(&self, records: Vec<RawRecord>) -> Vec<Request> {
        records
            .into_iter()
            .filter_map(|raw| match Request::from_raw(self.kind, raw) {
                Ok(request) => Some(request),
                Err(e) => {
                    warn!(kind = %self.kind, error = %e, "Skipping undecodable record");
                    None
                }
            })
            .collect()
    }

    /// Fail unless the connected wallet owns the contract.
    async fn ensure_owner(&self) -> Result<(), BoardError> {
        let owner = match self.gateway.owner_address().await {
            Ok(owner) => owner,
            Err(e) => {
                error!(kind = %self.kind, error = %e, "Owner lookup failed");
                self.record_error(&e);
                return Err(e.into());
            }
        };
        let wallet = self.wallet.address();
        match wallet {
            Some(account) if account.same_account(&owner) => Ok(()),
            _ => {
                warn!(
                    kind = %self.kind,
                    wallet = ?wallet.map(|w| w.to_checksum()),
                    owner = %owner,
                    "Status change refused: wallet is not the contract owner"
                );
                Err(BoardError::Unauthorized { wallet, owner })
            }
        }
    }

    /// Send, confirm, then refresh.
    ///
    /// The pending flag is held from before the send until confirmation or
    /// failure. A failed follow-up refresh does not undo a confirmed
    /// transaction; it is only logged and recorded.
    async fn transact<F>(&self, send: F) -> Result<ActionOutcome, BoardError>
    where
        F: Future<Output = Result<PendingTx, GatewayError>> + Send,
    {
        let confirmed = {
            let _guard = self.pending.begin();
            match send.await {
                Ok(tx) => {
                    debug!(kind = %self.kind, tx_hash = %tx.hash, call = tx.call, "Transaction submitted");
                    self.gateway.wait(&tx).await.map(|()| tx)
                }
                Err(e) => Err(e),
            }
        };

        let tx = match confirmed {
            Ok(tx) => tx,
            Err(e) => {
                error!(kind = %self.kind, error = %e, "Transaction failed");
                self.record_error(&e);
                return Err(e.into());
            }
        };

        info!(kind = %self.kind, tx_hash = %tx.hash, call = tx.call, "Transaction confirmed");

        if let Err(e) = self.refresh().await {
            warn!(kind = %self.kind, error = %e, "Refresh after confirmed transaction failed");
        }
        Ok(ActionOutcome::Confirmed(tx.hash))
    }
}

#[async_trait]
impl<G, W> RequestListApi for RequestListController<G, W>
where
    G: ContractGateway + ?Sized,
    W: WalletSession + ?Sized,
{
    async fn refresh(&self) -> Result<RefreshOutcome, BoardError> {
        if !self.wallet.signer_available() {
            debug!(kind = %self.kind, "Refresh skipped: no signer");
            return Ok(RefreshOutcome::Skipped);
        }

        let seq = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let records = match self.gateway.list(self.kind).await {
            Ok(records) => records,
            Err(e) => {
                let mut state = self.state.write();
                if self.is_disposed() || self.refresh_seq.load(Ordering::SeqCst) != seq {
                    debug!(kind = %self.kind, seq, error = %e, "Stale refresh failed");
                } else {
                    error!(kind = %self.kind, seq, error = %e, "Failed to fetch requests");
                    state.last_error = Some(e.to_string());
                }
                return Err(e.into());
            }
        };
        let requests = self.decode(records);

        let mut state = self.state.write();
        if self.is_disposed() || self.refresh_seq.load(Ordering::SeqCst) != seq {
            debug!(kind = %self.kind, seq, "Discarding stale refresh result");
            return Ok(RefreshOutcome::Stale);
        }
        let count = requests.len();
        state.raw = requests;
        info!(kind = %self.kind, seq, count, "Request list refreshed");
        Ok(RefreshOutcome::Applied { count })
    }

    async fn on_connection_changed(
        &self,
        connected: bool,
    ) -> Result<Option<RefreshOutcome>, BoardError> {
        let was_connected = {
            let mut state = self.state.write();
            std::mem::replace(&mut state.connected, connected)
        };

        if connected && !was_connected {
            info!(kind = %self.kind, "Wallet connected");
            return self.refresh().await.map(Some);
        }
        if !connected && was_connected {
            info!(kind = %self.kind, "Wallet disconnected");
        }
        Ok(None)
    }

    async fn connect(&self) -> Result<Option<RefreshOutcome>, BoardError> {
        if let Err(e) = self.wallet.connect().await {
            warn!(kind = %self.kind, error = %e, "Wallet connection failed");
            self.record_error(&e);
            return Err(e.into());
        }
        self.on_connection_changed(true).await
    }

    async fn perform_action(
        &self,
        action: RowAction,
        row_id: &str,
    ) -> Result<ActionOutcome, BoardError> {
        if !self.wallet.signer_available() {
            warn!(kind = %self.kind, row_id, "Action declined: no signer");
            return Ok(ActionOutcome::Declined);
        }

        let index = RequestId::parse_index(self.kind, row_id).map_err(|e| {
            warn!(kind = %self.kind, row_id, "Malformed row id");
            e
        })?;

        match action {
            RowAction::Upvote => {
                debug!(kind = %self.kind, index, "Upvoting");
                self.transact(self.gateway.upvote(self.kind, index)).await
            }
            RowAction::SetStatus(RequestStatus::Unknown(code)) => {
                Err(BoardError::UndefinedStatus(code))
            }
            RowAction::SetStatus(status) => {
                if self.config.enforce_owner_for_status {
                    self.ensure_owner().await?;
                }
                debug!(kind = %self.kind, index, status = %status, "Changing status");
                self.transact(self.gateway.set_status(self.kind, index, status))
                    .await
            }
        }
    }

    async fn submit_request(
        &self,
        title: &str,
        description: &str,
    ) -> Result<ActionOutcome, BoardError> {
        if !self.wallet.signer_available() {
            warn!(kind = %self.kind, "Submission declined: no signer");
            return Ok(ActionOutcome::Declined);
        }

        let title = title.trim();
        let description = description.trim();
        if title.is_empty() {
            return Err(BoardError::InvalidSubmission("title is empty".into()));
        }
        if description.is_empty() {
            return Err(BoardError::InvalidSubmission("description is empty".into()));
        }

        debug!(kind = %self.kind, title, "Submitting new request");
        self.transact(self.gateway.add(self.kind, title, description))
            .await
    }

    fn set_search_text(&self, text: &str) {
        self.update_view(|view| {
            view.search_text = text.to_string();
            view.page = 1;
        });
    }

    fn set_status_filter(&self, filter: StatusFilter) {
        self.update_view(|view| {
            view.status_filter = filter;
            view.page = 1;
        });
    }

    fn set_visible_columns(&self, columns: BTreeSet<Column>) {
        self.update_view(|view| view.visible_columns = columns);
    }

    fn set_sort(&self, column: Column, direction: SortDirection) {
        self.update_view(|view| view.sort = SortDescriptor::new(column, direction));
    }

    fn set_rows_per_page(&self, size: PageSize) {
        self.update_view(|view| {
            view.rows_per_page = size;
            view.page = 1;
        });
    }

    fn set_page(&self, page: usize) {
        self.update_view(|view| view.page = page);
    }

    fn set_selection(&self, selection: Selection) {
        self.update_view(|view| view.selection = selection);
    }

    fn view(&self) -> ListView {
        let state = self.state.read();
        let view = derive_view(
            self.kind,
            &state.raw,
            &state.view,
            self.pending.is_pending(),
        );
        debug!(
            kind = %self.kind,
            filtered = view.filtered_count,
            page = view.page,
            page_count = view.page_count,
            "Derived view"
        );
        view
    }
}
