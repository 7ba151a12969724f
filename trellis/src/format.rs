//! Display strings shared by the table and its host page.

use crate::sort::SortDirection;

/// Label for the selection banner.
pub fn format_row_count(count: usize) -> String {
    match count {
        0 => "No rows selected".to_string(),
        1 => "1 row selected".to_string(),
        n => format!("{} rows selected", n),
    }
}

/// Accessible label for a sortable header.
pub fn format_sort_direction(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Ascending) => "Sort ascending",
        Some(SortDirection::Descending) => "Sort descending",
        None => "Sort",
    }
}

/// Footer row count.
pub fn format_showing(count: usize) -> String {
    if count == 1 {
        "Showing 1 row".to_string()
    } else {
        format!("Showing {} rows", count)
    }
}
