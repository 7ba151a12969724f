//! Data table state.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, trace, warn};

use crate::debounce::Debouncer;
use crate::format::{format_row_count, format_showing, format_sort_direction};
use crate::record::{Column, Record};
use crate::resource::ResourceState;
use crate::selection::Selection;
use crate::sort::{SortState, sort_records};

use super::config::{TableConfig, TableError, validate_columns};
use super::view::{
    BannerAction, CheckState, FooterView, HeaderCell, HeaderView, RowView, SelectionBanner,
    TableBody, TableView,
};

/// Unique identifier for a DataTable instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// Internal state for the DataTable.
#[derive(Debug)]
struct TableInner<R: Record> {
    columns: Vec<Column>,
    /// Rows in the order the caller supplied them.
    data: Vec<R>,
    loading: bool,
    /// Message of the last failed load.
    load_error: Option<String>,
    sort: SortState,
    selection: Selection<R>,
}

impl<R: Record> TableInner<R> {
    fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            data: Vec::new(),
            loading: false,
            load_error: None,
            sort: SortState::Unsorted,
            selection: Selection::new(),
        }
    }

    /// Apply a header click. Returns true if the sort changed.
    fn apply_sort(&mut self, key: &str) -> bool {
        let Some(column) = self.columns.iter().find(|c| c.key == key) else {
            debug!("Sort requested on unknown column {}", key);
            return false;
        };
        let next = self.sort.request(column);
        if next == self.sort {
            return false;
        }
        debug!("Sort {:?} -> {:?}", self.sort, next);
        self.sort = next;
        true
    }

    fn sorted_rows(&self) -> Vec<R> {
        sort_records(&self.data, &self.columns, &self.sort)
    }

    fn view(&self, selectable: bool) -> TableView {
        if self.loading {
            return TableView::Loading;
        }
        if let Some(message) = &self.load_error {
            return TableView::Failed {
                message: message.clone(),
            };
        }
        if self.data.is_empty() {
            return TableView::Empty;
        }

        let rows = self.sorted_rows();
        let total = rows.len();
        let selected = self.selection.len();
        let all_selected = self.selection.all_selected(total);

        let select_all = selectable.then(|| {
            if self.selection.indeterminate(total) {
                CheckState::Indeterminate
            } else if all_selected {
                CheckState::Checked
            } else {
                CheckState::Unchecked
            }
        });

        let cells = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                key: column.key.clone(),
                title: column.title.clone(),
                sortable: column.sortable,
                indicator: column.sortable.then(|| self.sort.indicator(&column.key)),
                sort_label: column.sortable.then(|| {
                    let direction = if self.sort.key() == Some(column.key.as_str()) {
                        self.sort.direction()
                    } else {
                        None
                    };
                    format_sort_direction(direction)
                }),
            })
            .collect();

        let row_views = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let is_selected = self.selection.is_selected(row);
                RowView {
                    key: format!("{:?}-{}", row.id(), index),
                    selected: is_selected,
                    checkbox: selectable.then_some(if is_selected {
                        CheckState::Checked
                    } else {
                        CheckState::Unchecked
                    }),
                    cells: self
                        .columns
                        .iter()
                        .map(|column| cell_text(row, column))
                        .collect(),
                }
            })
            .collect();

        let banner = (selectable && selected > 0).then(|| SelectionBanner {
            message: format_row_count(selected),
            action: if all_selected {
                BannerAction::DeselectAll
            } else {
                BannerAction::SelectAll
            },
        });

        TableView::Rows(TableBody {
            header: HeaderView {
                select_all,
                cells,
            },
            rows: row_views,
            banner,
            footer: FooterView {
                showing: format_showing(total),
                selected: selectable.then(|| format!("{} selected", selected)),
            },
        })
    }
}

/// Display text for one cell.
///
/// A column reading a field the record does not have is a configuration
/// bug: it panics in debug builds and renders blank otherwise.
fn cell_text<R: Record>(row: &R, column: &Column) -> String {
    match row.field(&column.data_index) {
        Some(value) => value.to_string(),
        None => {
            if cfg!(debug_assertions) {
                panic!(
                    "column '{}' reads unknown field '{}' on {:?}",
                    column.key, column.data_index, row
                );
            }
            warn!(
                "Column {} reads unknown field {}, rendering blank",
                column.key, column.data_index
            );
            String::new()
        }
    }
}

type RowSelectNotifier<R> = Debouncer<Vec<R>>;

/// A sortable, selectable table over caller-supplied records.
///
/// `DataTable<R>` owns the sort and selection state for one table:
/// - Header clicks go through [`request_sort`](Self::request_sort), which is
///   debounced; rapid clicks collapse into the last requested column.
/// - Selection changes apply immediately. The caller hears about them
///   through `on_row_select`, debounced.
/// - [`view`](Self::view) derives the loading / failed / empty / rows
///   presentation.
///
/// Replacing the data never touches the selection. Ids that disappear stay
/// selected until toggled or cleared.
///
/// Pending timers are cancelled by [`destroy`](Self::destroy) or on drop.
///
/// # Example
///
/// ```ignore
/// let table = DataTable::new(columns, TableConfig::default().selectable())?
///     .on_row_select(|rows: Vec<User>| log::info!("{} selected", rows.len()));
///
/// table.set_data(users);
/// table.request_sort("name");
/// table.toggle_row(&users[0]);
/// ```
pub struct DataTable<R: Record> {
    id: TableId,
    config: TableConfig,
    inner: Arc<RwLock<TableInner<R>>>,
    /// Dirty flag for re-render.
    dirty: Arc<AtomicBool>,
    sort_requests: Debouncer<String>,
    row_select: Option<RowSelectNotifier<R>>,
}

impl<R: Record> DataTable<R> {
    /// Create an empty table. Fails if two columns share a key.
    pub fn new(columns: Vec<Column>, config: TableConfig) -> Result<Self, TableError> {
        validate_columns(&columns)?;

        let inner = Arc::new(RwLock::new(TableInner::new(columns)));
        let dirty = Arc::new(AtomicBool::new(false));

        let weak = Arc::downgrade(&inner);
        let dirty_for_sort = Arc::clone(&dirty);
        let sort_requests = Debouncer::new(config.sort_debounce, move |key: String| {
            if let Some(inner) = weak.upgrade()
                && let Ok(mut guard) = inner.write()
                && guard.apply_sort(&key)
            {
                dirty_for_sort.store(true, Ordering::SeqCst);
            }
        });

        Ok(Self {
            id: TableId::new(),
            config,
            inner,
            dirty,
            sort_requests,
            row_select: None,
        })
    }

    /// Set the initial rows.
    pub fn with_data(self, data: Vec<R>) -> Self {
        self.set_data(data);
        self
    }

    /// Register the selection callback.
    ///
    /// It receives the full selection, in selection order, after the
    /// selection has been quiet for `select_debounce`.
    pub fn on_row_select<F>(mut self, f: F) -> Self
    where
        F: Fn(Vec<R>) + Send + Sync + 'static,
    {
        self.row_select = Some(Debouncer::new(self.config.select_debounce, f));
        self
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    /// Get the ID as a string.
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn is_selectable(&self) -> bool {
        self.config.selectable
    }

    fn read<U>(&self, f: impl FnOnce(&TableInner<R>) -> U) -> Option<U> {
        self.inner.read().ok().map(|guard| f(&*guard))
    }

    fn write<U>(&self, f: impl FnOnce(&mut TableInner<R>) -> U) -> Option<U> {
        self.inner.write().ok().map(|mut guard| {
            let result = f(&mut *guard);
            self.dirty.store(true, Ordering::SeqCst);
            result
        })
    }

    // -------------------------------------------------------------------------
    // Columns and data
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> Vec<Column> {
        self.read(|inner| inner.columns.clone()).unwrap_or_default()
    }

    /// Replace the columns. Fails if two columns share a key.
    pub fn set_columns(&self, columns: Vec<Column>) -> Result<(), TableError> {
        validate_columns(&columns)?;
        self.write(|inner| inner.columns = columns);
        Ok(())
    }

    /// Rows in the order the caller supplied them.
    pub fn data(&self) -> Vec<R> {
        self.read(|inner| inner.data.clone()).unwrap_or_default()
    }

    /// Replace the rows. Sort and selection are kept; a previous load
    /// failure is dropped.
    pub fn set_data(&self, data: Vec<R>) {
        self.write(|inner| {
            trace!("Table {} data replaced with {} rows", self.id, data.len());
            inner.data = data;
            inner.load_error = None;
        });
    }

    pub fn len(&self) -> usize {
        self.read(|inner| inner.data.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.read(|inner| inner.loading).unwrap_or(false)
    }

    /// Starting a load also clears the previous load failure.
    pub fn set_loading(&self, loading: bool) {
        self.write(|inner| {
            inner.loading = loading;
            if loading {
                inner.load_error = None;
            }
        });
    }

    /// Mirror a load into the table.
    ///
    /// Loading shows the spinner, ready replaces the rows, and an error
    /// shows the failure state. Idle leaves the table as it is.
    pub fn apply_resource(&self, state: &ResourceState<Vec<R>>) {
        self.write(|inner| match state {
            ResourceState::Idle => {}
            ResourceState::Loading => {
                inner.loading = true;
                inner.load_error = None;
            }
            ResourceState::Ready(rows) => {
                inner.loading = false;
                inner.load_error = None;
                inner.data = rows.clone();
            }
            ResourceState::Error(err) => {
                inner.loading = false;
                inner.load_error = Some(err.message.clone());
            }
        });
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort_state(&self) -> SortState {
        self.read(|inner| inner.sort.clone()).unwrap_or_default()
    }

    /// Header click on column `key`.
    ///
    /// Clicks on unknown or non-sortable columns are ignored and do not
    /// restart the debounce window. Returns true if the click was accepted.
    pub fn request_sort(&self, key: &str) -> bool {
        let sortable = self
            .read(|inner| inner.columns.iter().any(|c| c.key == key && c.sortable))
            .unwrap_or(false);
        if !sortable {
            trace!("Table {} ignoring sort click on {}", self.id, key);
            return false;
        }

        match self.sort_requests.call(key.to_string()) {
            Ok(()) => true,
            Err(e) => {
                warn!("Table {} dropped sort request on {}: {}", self.id, key, e);
                false
            }
        }
    }

    /// Apply a header click immediately, bypassing the debounce.
    /// Returns true if the sort changed.
    pub fn apply_sort(&self, key: &str) -> bool {
        self.write(|inner| inner.apply_sort(key)).unwrap_or(false)
    }

    pub fn clear_sort(&self) {
        self.write(|inner| inner.sort = SortState::Unsorted);
    }

    /// Rows in display order.
    pub fn sorted_rows(&self) -> Vec<R> {
        self.read(TableInner::sorted_rows).unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn is_selected(&self, record: &R) -> bool {
        self.read(|inner| inner.selection.is_selected(record))
            .unwrap_or(false)
    }

    /// Selected records, in selection order.
    pub fn selected_rows(&self) -> Vec<R> {
        self.read(|inner| inner.selection.records())
            .unwrap_or_default()
    }

    pub fn selected_count(&self) -> usize {
        self.read(|inner| inner.selection.len()).unwrap_or(0)
    }

    /// Every displayed row is selected.
    pub fn all_selected(&self) -> bool {
        self.read(|inner| inner.selection.all_selected(inner.data.len()))
            .unwrap_or(false)
    }

    /// Some, but not all, displayed rows are selected.
    pub fn indeterminate(&self) -> bool {
        self.read(|inner| inner.selection.indeterminate(inner.data.len()))
            .unwrap_or(false)
    }

    /// Row click or row checkbox. Returns true if the row is now selected.
    /// Ignored when the table is not selectable.
    pub fn toggle_row(&self, record: &R) -> bool {
        if !self.config.selectable {
            return false;
        }
        let selected = self
            .write(|inner| inner.selection.toggle(record))
            .unwrap_or(false);
        self.notify_selection();
        selected
    }

    /// Header checkbox or banner action over the displayed rows.
    /// Ignored when the table is not selectable.
    pub fn toggle_all(&self) {
        if !self.config.selectable {
            return;
        }
        let changed = self
            .write(|inner| {
                let universe = inner.sorted_rows();
                inner.selection.toggle_all(&universe)
            })
            .unwrap_or(false);
        if changed {
            self.notify_selection();
        }
    }

    /// Deselect everything, including ids no longer in the data.
    pub fn clear_selection(&self) {
        let removed = self
            .write(|inner| inner.selection.clear())
            .unwrap_or(0);
        if removed > 0 {
            self.notify_selection();
        }
    }

    fn notify_selection(&self) {
        let Some(row_select) = &self.row_select else {
            return;
        };
        let rows = self.selected_rows();
        if let Err(e) = row_select.call(rows) {
            warn!("Table {} dropped selection notification: {}", self.id, e);
        }
    }

    // -------------------------------------------------------------------------
    // Presentation and lifecycle
    // -------------------------------------------------------------------------

    /// Snapshot for rendering.
    pub fn view(&self) -> TableView {
        self.read(|inner| inner.view(self.config.selectable))
            .unwrap_or(TableView::Loading)
    }

    /// Check if the table changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Cancel pending sort requests and selection notifications.
    /// Returns false if already destroyed.
    pub fn destroy(&self) -> bool {
        let sort = self.sort_requests.cancel();
        let select = self
            .row_select
            .as_ref()
            .is_some_and(|row_select| row_select.cancel());
        if sort || select {
            debug!("Table {} destroyed", self.id);
        }
        sort || select
    }
}

impl<R: Record> fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
