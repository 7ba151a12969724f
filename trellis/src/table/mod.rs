//! Data table component.
//!
//! [`DataTable`] combines the sort engine and the selection set over a
//! caller-supplied record collection, and derives a [`TableView`] for
//! rendering.

mod config;
mod state;
mod view;

pub use config::{DEFAULT_SELECT_DEBOUNCE, DEFAULT_SORT_DEBOUNCE, TableConfig, TableError};
pub use state::{DataTable, TableId};
pub use view::{
    BannerAction, CheckState, EMPTY_DESCRIPTION, EMPTY_TITLE, FooterView, HeaderCell, HeaderView,
    LOADING_MESSAGE, RowView, SelectionBanner, TableBody, TableView,
};
