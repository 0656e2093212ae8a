//! Value objects for the Request List view state
//!
//! Everything the user controls about a list: search text, status filter,
//! visible columns, sort, paging and selection.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared_types::RequestStatus;

use crate::domain::entities::RequestId;
use crate::domain::errors::BoardError;

// =============================================================================
// COLUMNS
// =============================================================================

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Id,
    Title,
    Description,
    Status,
    Votes,
    RaisedBy,
    Actions,
}

impl Column {
    /// Canonical column order.
    pub const ALL: [Column; 7] = [
        Column::Id,
        Column::Title,
        Column::Description,
        Column::Status,
        Column::Votes,
        Column::RaisedBy,
        Column::Actions,
    ];

    /// Header text.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
            Self::Votes => "Votes",
            Self::RaisedBy => "Raised By",
            Self::Actions => "Actions",
        }
    }

    /// Stable key.
    pub fn uid(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Votes => "votes",
            Self::RaisedBy => "raisedby",
            Self::Actions => "actions",
        }
    }

    /// Whether the header offers sorting on this column.
    pub fn sortable(&self) -> bool {
        matches!(self, Self::Id | Self::Title | Self::Status | Self::Votes)
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "");
        Self::ALL
            .into_iter()
            .find(|c| c.uid() == key)
            .ok_or_else(|| format!("Unknown column: {s}"))
    }
}

// =============================================================================
// SORTING
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("Unknown sort direction: {other}")),
        }
    }
}

/// Column plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(column: Column, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

impl Default for SortDescriptor {
    fn default() -> Self {
        Self::new(Column::Status, SortDirection::Ascending)
    }
}

impl FromStr for SortDescriptor {
    type Err = String;

    /// `column` or `column:asc|desc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, direction) = match s.split_once(':') {
            Some((column, direction)) => (column.parse()?, direction.parse()?),
            None => (s.parse()?, SortDirection::Ascending),
        };
        Ok(Self::new(column, direction))
    }
}

// =============================================================================
// FILTERING & SELECTION
// =============================================================================

/// Status filter: everything, or an explicit set of statuses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(BTreeSet<RequestStatus>),
}

impl StatusFilter {
    pub fn only(statuses: impl IntoIterator<Item = RequestStatus>) -> Self {
        Self::Only(statuses.into_iter().collect())
    }

    /// True when the filter lets every row through: `All`, or a set that
    /// covers all six defined statuses.
    pub fn is_total(&self) -> bool {
        match self {
            Self::All => true,
            Self::Only(set) => RequestStatus::ALL.iter().all(|s| set.contains(s)),
        }
    }

    pub fn matches(&self, status: RequestStatus) -> bool {
        if self.is_total() {
            return true;
        }
        match self {
            Self::Only(set) => set.contains(&status),
            Self::All => true,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    /// `all` or a comma-separated list of codes or names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        let statuses = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse::<RequestStatus>)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self::Only(statuses))
    }
}

/// Row selection. Display-only; never sent to the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    All,
    Keys(BTreeSet<RequestId>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Keys(BTreeSet::new())
    }
}

impl Selection {
    pub fn contains(&self, id: &RequestId) -> bool {
        match self {
            Self::All => true,
            Self::Keys(keys) => keys.contains(id),
        }
    }
}

// =============================================================================
// PAGING
// =============================================================================

/// Supported rows-per-page values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    #[default]
    Ten,
    Fifteen,
    Twenty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::Fifteen, PageSize::Twenty];

    pub fn rows(&self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Fifteen => 15,
            Self::Twenty => 20,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = BoardError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            10 => Ok(Self::Ten),
            15 => Ok(Self::Fifteen),
            20 => Ok(Self::Twenty),
            other => Err(BoardError::InvalidPageSize(other)),
        }
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.rows()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows())
    }
}

// =============================================================================
// VIEW STATE
// =============================================================================

/// User-controlled parameters driving the derivation pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_text: String,
    pub status_filter: StatusFilter,
    pub visible_columns: BTreeSet<Column>,
    pub sort: SortDescriptor,
    /// 1-based
    pub page: usize,
    pub rows_per_page: PageSize,
    pub selection: Selection,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            status_filter: StatusFilter::All,
            visible_columns: Column::ALL.into_iter().collect(),
            sort: SortDescriptor::default(),
            page: 1,
            rows_per_page: PageSize::Ten,
            selection: Selection::default(),
        }
    }
}

// =============================================================================
// ROW ACTIONS
// =============================================================================

/// A row-level mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowAction {
    Upvote,
    SetStatus(RequestStatus),
}

impl FromStr for RowAction {
    type Err = BoardError;

    /// Menu keys: `upvote` or `status-N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "upvote" {
            return Ok(Self::Upvote);
        }
        let code = s
            .strip_prefix("status-")
            .and_then(|code| code.parse::<u64>().ok())
            .ok_or_else(|| BoardError::UnknownAction(s.to_string()))?;
        match RequestStatus::from_code(code) {
            RequestStatus::Unknown(code) => Err(BoardError::UndefinedStatus(code)),
            status => Ok(Self::SetStatus(status)),
        }
    }
}
