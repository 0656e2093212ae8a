//! Configuration for the Request List Subsystem

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{PageSize, SortDescriptor};

/// Request list configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestListConfig {
    /// Rows per page for a freshly created controller
    pub rows_per_page: PageSize,
    /// Initial sort
    pub default_sort: SortDescriptor,
    /// Refuse status changes client-side unless the wallet owns the contract
    pub enforce_owner_for_status: bool,
}

impl Default for RequestListConfig {
    fn default() -> Self {
        Self {
            rows_per_page: PageSize::Ten,
            default_sort: SortDescriptor::default(),
            enforce_owner_for_status: false,
        }
    }
}

impl RequestListConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_sort.column.sortable() {
            return Err(ConfigError::UnsortableColumn(
                self.default_sort.column.uid().to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Column {0} cannot be used as the default sort")]
    UnsortableColumn(String),
}
