//! Inbound Ports (Driving Ports / API)
//!
//! What the presentation layer calls on a request list.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::application::controller::{ActionOutcome, RefreshOutcome};
use crate::domain::errors::BoardError;
use crate::domain::value_objects::{
    Column, PageSize, RowAction, Selection, SortDirection, StatusFilter,
};
use crate::domain::view::ListView;

/// Primary Request List API
#[async_trait]
pub trait RequestListApi: Send + Sync {
    /// Re-fetch the full collection for this kind and replace it wholesale.
    async fn refresh(&self) -> Result<RefreshOutcome, BoardError>;

    /// Record a connection change. A disconnected → connected transition
    /// triggers a refresh.
    async fn on_connection_changed(
        &self,
        connected: bool,
    ) -> Result<Option<RefreshOutcome>, BoardError>;

    /// Connect the wallet, then refresh if the connection came up.
    async fn connect(&self) -> Result<Option<RefreshOutcome>, BoardError>;

    /// Upvote or change status of one row, then refresh.
    ///
    /// `row_id` is the displayed id (`IR-3`) or a bare index (`3`).
    async fn perform_action(
        &self,
        action: RowAction,
        row_id: &str,
    ) -> Result<ActionOutcome, BoardError>;

    /// Create a new request, then refresh.
    async fn submit_request(
        &self,
        title: &str,
        description: &str,
    ) -> Result<ActionOutcome, BoardError>;

    fn set_search_text(&self, text: &str);

    fn set_status_filter(&self, filter: StatusFilter);

    fn set_visible_columns(&self, columns: BTreeSet<Column>);

    fn set_sort(&self, column: Column, direction: SortDirection);

    fn set_rows_per_page(&self, size: PageSize);

    fn set_page(&self, page: usize);

    fn set_selection(&self, selection: Selection);

    /// Derived view for the current state.
    fn view(&self) -> ListView;
}
