use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;
use trellis::record::{Column, Record, Value};
use trellis::resource::{ResourceError, ResourceState};
use trellis::sort::{SortDirection, SortIndicator, SortState};
use trellis::table::{BannerAction, CheckState, DataTable, TableConfig, TableError, TableView};

#[derive(Debug, Clone, PartialEq)]
struct User {
    id: u32,
    name: &'static str,
    age: i64,
    role: &'static str,
}

impl Record for User {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, data_index: &str) -> Option<Value> {
        match data_index {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.into()),
            "age" => Some(self.age.into()),
            "role" => Some(self.role.into()),
            _ => None,
        }
    }
}

fn user(id: u32, name: &'static str, age: i64, role: &'static str) -> User {
    User { id, name, age, role }
}

fn users() -> Vec<User> {
    vec![
        user(1, "Carol", 35, "admin"),
        user(2, "alice", 28, "user"),
        user(3, "Bob", 35, "user"),
    ]
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name").sortable(),
        Column::new("years", "Age").data_index("age").sortable(),
        Column::new("role", "Role"),
    ]
}

fn ids(rows: &[User]) -> Vec<u32> {
    rows.iter().map(|u| u.id).collect()
}

fn selectable_table() -> DataTable<User> {
    DataTable::new(columns(), TableConfig::default().selectable())
        .unwrap()
        .with_data(users())
}

#[test]
fn test_duplicate_column_keys_rejected() {
    let columns = vec![Column::new("name", "Name"), Column::new("name", "Other")];
    let err = DataTable::<User>::new(columns, TableConfig::default()).unwrap_err();
    assert_eq!(err, TableError::DuplicateColumnKey("name".to_string()));

    let table = selectable_table();
    let err = table
        .set_columns(vec![Column::new("a", "A"), Column::new("a", "B")])
        .unwrap_err();
    assert_eq!(err.to_string(), "Duplicate column key 'a'");
    assert_eq!(table.columns().len(), 3);
}

#[test]
fn test_apply_sort_cycles_through_directions() {
    let table = selectable_table();
    assert_eq!(ids(&table.sorted_rows()), vec![1, 2, 3]);

    assert!(table.apply_sort("years"));
    assert_eq!(
        table.sort_state(),
        SortState::sorted("years", SortDirection::Ascending)
    );
    // Equal ages keep input order.
    assert_eq!(ids(&table.sorted_rows()), vec![2, 1, 3]);

    assert!(table.apply_sort("years"));
    assert_eq!(ids(&table.sorted_rows()), vec![1, 3, 2]);

    assert!(table.apply_sort("years"));
    assert_eq!(table.sort_state(), SortState::Unsorted);
    assert_eq!(ids(&table.sorted_rows()), vec![1, 2, 3]);

    // Data order is untouched throughout.
    assert_eq!(ids(&table.data()), vec![1, 2, 3]);
}

#[test]
fn test_switching_columns_restarts_ascending() {
    let table = selectable_table();
    table.apply_sort("years");
    table.apply_sort("years");
    assert!(table.apply_sort("name"));
    assert_eq!(
        table.sort_state(),
        SortState::sorted("name", SortDirection::Ascending)
    );
}

#[test]
fn test_non_sortable_and_unknown_columns_ignored() {
    let table = selectable_table();
    assert!(!table.apply_sort("role"));
    assert!(!table.apply_sort("missing"));
    assert_eq!(table.sort_state(), SortState::Unsorted);
}

#[tokio::test(start_paused = true)]
async fn test_request_sort_collapses_rapid_clicks() {
    let table = selectable_table();

    assert!(table.request_sort("name"));
    sleep(Duration::from_millis(50)).await;
    assert!(table.request_sort("years"));
    assert_eq!(table.sort_state(), SortState::Unsorted);

    sleep(Duration::from_millis(199)).await;
    assert_eq!(table.sort_state(), SortState::Unsorted);

    sleep(Duration::from_millis(2)).await;
    assert_eq!(
        table.sort_state(),
        SortState::sorted("years", SortDirection::Ascending)
    );
}

#[tokio::test(start_paused = true)]
async fn test_request_sort_ignores_non_sortable_click() {
    let table = selectable_table();

    assert!(table.request_sort("name"));
    sleep(Duration::from_millis(150)).await;
    assert!(!table.request_sort("role"));
    sleep(Duration::from_millis(60)).await;

    assert_eq!(
        table.sort_state(),
        SortState::sorted("name", SortDirection::Ascending)
    );
}

#[tokio::test(start_paused = true)]
async fn test_selection_notification_is_debounced() {
    let seen: Arc<Mutex<Vec<Vec<u32>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let rows = users();
    let table = DataTable::new(columns(), TableConfig::default().selectable())
        .unwrap()
        .with_data(rows.clone())
        .on_row_select(move |selected: Vec<User>| {
            sink.lock().unwrap().push(ids(&selected));
        });

    assert!(table.toggle_row(&rows[2]));
    sleep(Duration::from_millis(50)).await;
    assert!(table.toggle_row(&rows[0]));
    sleep(Duration::from_millis(50)).await;
    assert!(table.toggle_row(&rows[1]));

    // Selection itself is immediate.
    assert_eq!(table.selected_count(), 3);
    assert!(seen.lock().unwrap().is_empty());

    sleep(Duration::from_millis(200)).await;
    assert_eq!(*seen.lock().unwrap(), vec![vec![3, 1, 2]]);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_all_cycle() {
    let table = selectable_table();
    let rows = users();

    table.toggle_row(&rows[0]);
    assert!(table.indeterminate());
    assert!(!table.all_selected());

    table.toggle_all();
    assert!(table.all_selected());
    assert!(!table.indeterminate());
    assert_eq!(table.selected_count(), 3);

    table.toggle_all();
    assert_eq!(table.selected_count(), 0);
    assert!(!table.all_selected());
    assert!(!table.indeterminate());
}

#[tokio::test(start_paused = true)]
async fn test_toggle_all_on_empty_table_is_noop() {
    let table = DataTable::<User>::new(columns(), TableConfig::default().selectable()).unwrap();
    table.toggle_all();
    assert_eq!(table.selected_count(), 0);
    assert!(!table.all_selected());
}

#[tokio::test(start_paused = true)]
async fn test_selection_survives_data_replacement() {
    let table = selectable_table();
    let rows = users();
    table.toggle_row(&rows[0]);

    table.set_data(vec![user(4, "Dan", 40, "user")]);
    assert_eq!(table.selected_count(), 1);
    assert_eq!(ids(&table.selected_rows()), vec![1]);

    // Size-based: one stale entry against one displayed row.
    assert!(table.all_selected());

    table.clear_selection();
    assert_eq!(table.selected_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_selection_tracks_identity_not_value() {
    let table = selectable_table();
    table.toggle_row(&user(2, "alice", 28, "user"));
    assert!(table.is_selected(&user(2, "Alice Renamed", 29, "admin")));
    assert!(!table.toggle_row(&user(2, "whatever", 0, "")));
    assert_eq!(table.selected_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_non_selectable_table_ignores_selection() {
    let seen = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&seen);
    let rows = users();
    let table = DataTable::new(columns(), TableConfig::default())
        .unwrap()
        .with_data(rows.clone())
        .on_row_select(move |_| *sink.lock().unwrap() += 1);

    assert!(!table.toggle_row(&rows[0]));
    table.toggle_all();
    sleep(Duration::from_millis(300)).await;

    assert_eq!(table.selected_count(), 0);
    assert_eq!(*seen.lock().unwrap(), 0);

    let view = table.view();
    let body = view.body().unwrap();
    assert_eq!(body.header.select_all, None);
    assert!(body.rows.iter().all(|row| row.checkbox.is_none()));
    assert!(body.banner.is_none());
    assert_eq!(body.footer.selected, None);
}

#[tokio::test(start_paused = true)]
async fn test_destroy_suppresses_pending_work() {
    let seen = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&seen);
    let rows = users();
    let table = DataTable::new(columns(), TableConfig::default().selectable())
        .unwrap()
        .with_data(rows.clone())
        .on_row_select(move |_| *sink.lock().unwrap() += 1);

    table.toggle_row(&rows[0]);
    table.request_sort("name");
    sleep(Duration::from_millis(100)).await;

    assert!(table.destroy());
    assert!(!table.destroy());
    sleep(Duration::from_millis(500)).await;

    assert_eq!(*seen.lock().unwrap(), 0);
    assert_eq!(table.sort_state(), SortState::Unsorted);
    assert!(!table.request_sort("name"));
}

#[test]
fn test_view_precedence() {
    let table = DataTable::<User>::new(columns(), TableConfig::default()).unwrap();
    assert_eq!(table.view(), TableView::Empty);

    table.set_data(users());
    table.set_loading(true);
    assert!(table.view().is_loading());

    table.apply_resource(&ResourceState::Error(ResourceError::new("timeout")));
    assert_eq!(
        table.view(),
        TableView::Failed {
            message: "timeout".to_string()
        }
    );

    table.apply_resource(&ResourceState::Loading);
    assert!(table.view().is_loading());

    table.apply_resource(&ResourceState::Ready(Vec::new()));
    assert!(table.view().is_empty());

    table.apply_resource(&ResourceState::Ready(users()));
    assert!(table.view().body().is_some());
    assert!(!table.is_loading());
}

#[test]
fn test_loading_wins_over_empty_data() {
    let table = DataTable::<User>::new(columns(), TableConfig::default().selectable()).unwrap();
    assert_eq!(table.view(), TableView::Empty);

    table.set_loading(true);
    assert_eq!(table.view(), TableView::Loading);

    table.set_loading(false);
    assert_eq!(table.view(), TableView::Empty);
}

#[test]
fn test_set_data_recovers_from_failed_load() {
    let table = DataTable::<User>::new(columns(), TableConfig::default()).unwrap();
    table.apply_resource(&ResourceState::Error(ResourceError::new("timeout")));
    assert!(matches!(table.view(), TableView::Failed { .. }));

    table.set_data(vec![user(1, "Carol", 35, "admin")]);
    table.set_loading(false);
    let view = table.view();
    assert_eq!(view.body().map(|body| body.rows.len()), Some(1));
}

#[test]
fn test_new_load_clears_failure() {
    let table = DataTable::<User>::new(columns(), TableConfig::default()).unwrap();
    table.apply_resource(&ResourceState::Error(ResourceError::new("timeout")));

    table.set_loading(true);
    assert!(table.view().is_loading());
    table.set_loading(false);
    assert_eq!(table.view(), TableView::Empty);
}

#[tokio::test(start_paused = true)]
async fn test_view_rows_banner_and_footer() {
    let table = selectable_table();
    let rows = users();
    table.apply_sort("name");
    table.toggle_row(&rows[1]);

    let view = table.view();
    let body = view.body().unwrap();

    assert_eq!(body.header.select_all, Some(CheckState::Indeterminate));
    let name = &body.header.cells[0];
    assert_eq!(name.indicator, Some(SortIndicator::Ascending));
    assert_eq!(name.sort_label, Some("Sort ascending"));
    let years = &body.header.cells[1];
    assert_eq!(years.indicator, Some(SortIndicator::Unsorted));
    assert_eq!(years.sort_label, Some("Sort"));
    let role = &body.header.cells[2];
    assert_eq!(role.indicator, None);
    assert_eq!(role.sort_label, None);

    // Case-sensitive ordering puts uppercase names first.
    let names: Vec<&str> = body.rows.iter().map(|r| r.cells[0].as_str()).collect();
    assert_eq!(names, vec!["Bob", "Carol", "alice"]);
    assert_eq!(body.rows[2].cells, vec!["alice", "28", "user"]);
    assert!(body.rows[2].selected);
    assert_eq!(body.rows[2].checkbox, Some(CheckState::Checked));
    assert_eq!(body.rows[0].checkbox, Some(CheckState::Unchecked));

    let banner = body.banner.as_ref().unwrap();
    assert_eq!(banner.message, "1 row selected");
    assert_eq!(banner.action, BannerAction::SelectAll);

    assert_eq!(body.footer.showing, "Showing 3 rows");
    assert_eq!(body.footer.selected.as_deref(), Some("1 selected"));

    table.toggle_all();
    let view = table.view();
    let body = view.body().unwrap();
    assert_eq!(body.header.select_all, Some(CheckState::Checked));
    let banner = body.banner.as_ref().unwrap();
    assert_eq!(banner.message, "3 rows selected");
    assert_eq!(banner.action, BannerAction::DeselectAll);
    assert_eq!(banner.action.label(), "Deselect All");
}

#[test]
fn test_row_keys_unique_with_duplicate_ids() {
    let table = DataTable::new(columns(), TableConfig::default())
        .unwrap()
        .with_data(vec![user(1, "A", 1, "x"), user(1, "B", 2, "y")]);
    let view = table.view();
    let body = view.body().unwrap();
    assert_ne!(body.rows[0].key, body.rows[1].key);
}

#[test]
fn test_dirty_flag() {
    let table = selectable_table();
    assert!(table.is_dirty());
    table.clear_dirty();
    assert!(!table.is_dirty());
    table.apply_sort("name");
    assert!(table.is_dirty());
}

#[test]
fn test_ids_are_unique() {
    let a = DataTable::<User>::new(columns(), TableConfig::default()).unwrap();
    let b = DataTable::<User>::new(columns(), TableConfig::default()).unwrap();
    assert_ne!(a.id(), b.id());
    assert!(a.id_string().starts_with("__table_"));
}
