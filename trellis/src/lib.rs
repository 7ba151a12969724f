//! Headless state for a text input and a sortable, selectable data table.
//!
//! The crate holds the interaction logic only; rendering is left to the
//! host, which reads [`table::TableView`] and [`input::InputView`] snapshots.
//!
//! - [`sort`]: tri-state column sorting over any [`record::Record`] type.
//! - [`selection`]: identity-keyed row selection with select-all semantics.
//! - [`debounce`]: delay-and-coalesce wrappers for callbacks and values.
//! - [`table`] and [`input`]: the two widgets built on top of them.

pub mod debounce;
pub mod format;
pub mod input;
pub mod record;
pub mod resource;
pub mod selection;
pub mod sort;
pub mod table;
pub mod validation;

pub mod prelude {
    pub use crate::debounce::{DebounceError, DebouncedValue, Debouncer};
    pub use crate::input::{
        InputConfig, InputField, InputKind, InputProps, InputSize, InputVariant, InputView,
    };
    pub use crate::record::{Column, Record, Value};
    pub use crate::resource::{Resource, ResourceError, ResourceState};
    pub use crate::selection::Selection;
    pub use crate::sort::{SortDirection, SortIndicator, SortState, sort_records};
    pub use crate::table::{CheckState, DataTable, TableConfig, TableError, TableView};
    pub use crate::validation::{FieldErrors, FieldRules, validate_field};
}
