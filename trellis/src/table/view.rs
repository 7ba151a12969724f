//! Presentation snapshot of a table.

use crate::sort::SortIndicator;

/// Text shown while data is loading.
pub const LOADING_MESSAGE: &str = "Loading data...";
/// Heading of the empty state.
pub const EMPTY_TITLE: &str = "No data available";
/// Body of the empty state.
pub const EMPTY_DESCRIPTION: &str = "There are no records to display at this time.";

/// Which of the mutually exclusive table states to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    /// Data is loading; any rows are ignored.
    Loading,
    /// The last load failed.
    Failed { message: String },
    /// There are no rows.
    Empty,
    /// Normal table.
    Rows(TableBody),
}

impl TableView {
    pub fn is_loading(&self) -> bool {
        matches!(self, TableView::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TableView::Empty)
    }

    pub fn body(&self) -> Option<&TableBody> {
        match self {
            TableView::Rows(body) => Some(body),
            _ => None,
        }
    }
}

/// Tri-state checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Unchecked,
    Checked,
    Indeterminate,
}

/// Action offered by the selection banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerAction {
    SelectAll,
    DeselectAll,
}

impl BannerAction {
    pub fn label(self) -> &'static str {
        match self {
            BannerAction::SelectAll => "Select All",
            BannerAction::DeselectAll => "Deselect All",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBody {
    pub header: HeaderView,
    pub rows: Vec<RowView>,
    /// Present when the table is selectable and something is selected.
    pub banner: Option<SelectionBanner>,
    pub footer: FooterView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    /// Select-all checkbox, present when the table is selectable.
    pub select_all: Option<CheckState>,
    pub cells: Vec<HeaderCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub key: String,
    pub title: String,
    pub sortable: bool,
    /// Sort icon; `None` for columns that cannot be sorted.
    pub indicator: Option<SortIndicator>,
    /// Accessible label for the sort control.
    pub sort_label: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Render key, unique per row even when ids repeat.
    pub key: String,
    pub selected: bool,
    /// Row checkbox, present when the table is selectable.
    pub checkbox: Option<CheckState>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionBanner {
    pub message: String,
    pub action: BannerAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FooterView {
    pub showing: String,
    /// "N selected", present when the table is selectable.
    pub selected: Option<String>,
}
