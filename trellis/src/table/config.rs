//! Table configuration types.

use std::collections::HashSet;
use std::time::Duration;

use thiserror::Error;

use crate::record::Column;

/// Quiet period before a header click changes the sort.
pub const DEFAULT_SORT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Quiet period before selection changes reach `on_row_select`.
pub const DEFAULT_SELECT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Per-table configuration.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Show row checkboxes and allow selection.
    pub selectable: bool,

    /// Sort requests within this window collapse into the last one.
    pub sort_debounce: Duration,

    /// Selection notifications within this window collapse into the last one.
    pub select_debounce: Duration,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            selectable: false,
            sort_debounce: DEFAULT_SORT_DEBOUNCE,
            select_debounce: DEFAULT_SELECT_DEBOUNCE,
        }
    }
}

impl TableConfig {
    /// Enable row selection.
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    pub fn sort_debounce(mut self, delay: Duration) -> Self {
        self.sort_debounce = delay;
        self
    }

    pub fn select_debounce(mut self, delay: Duration) -> Self {
        self.select_debounce = delay;
        self
    }
}

/// Errors that can occur when configuring a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two columns share a key.
    #[error("Duplicate column key '{0}'")]
    DuplicateColumnKey(String),
}

/// Check that column keys are unique.
pub(super) fn validate_columns(columns: &[Column]) -> Result<(), TableError> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) {
            return Err(TableError::DuplicateColumnKey(column.key.clone()));
        }
    }
    Ok(())
}
