//! Plain-text rendering of widget snapshots.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use trellis::input::{InputKind, InputView};
use trellis::sort::SortIndicator;
use trellis::table::{
    CheckState, EMPTY_DESCRIPTION, EMPTY_TITLE, LOADING_MESSAGE, TableBody, TableView,
};

const MAX_CELL_WIDTH: usize = 28;

fn display_width(s: &str) -> usize {
    s.width()
}

/// Cut `s` to at most `max_width` columns, ending in an ellipsis if cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

fn checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
    }
}

fn sort_icon(indicator: SortIndicator) -> &'static str {
    match indicator {
        SortIndicator::Unsorted => "↕",
        SortIndicator::Ascending => "↑",
        SortIndicator::Descending => "↓",
    }
}

pub fn render_table(view: &TableView) -> String {
    match view {
        TableView::Loading => format!("  ⟳ {}\n", LOADING_MESSAGE),
        TableView::Failed { message } => format!("  ✗ Failed to load data: {}\n", message),
        TableView::Empty => format!("  {}\n  {}\n", EMPTY_TITLE, EMPTY_DESCRIPTION),
        TableView::Rows(body) => render_body(body),
    }
}

fn render_body(body: &TableBody) -> String {
    let mut out = String::new();

    if let Some(banner) = &body.banner {
        out.push_str(&format!(
            "  {}  [{}]\n",
            banner.message,
            banner.action.label()
        ));
    }

    let header: Vec<String> = body
        .header
        .cells
        .iter()
        .map(|cell| match cell.indicator {
            Some(indicator) => format!("{} {}", cell.title, sort_icon(indicator)),
            None => cell.title.clone(),
        })
        .collect();
    let rows: Vec<Vec<String>> = body
        .rows
        .iter()
        .map(|row| {
            row.cells
                .iter()
                .map(|cell| truncate_to_width(cell, MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, title)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| display_width(cell.as_str()))
                .chain(std::iter::once(display_width(title)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |lead: &str, cells: &[String]| {
        let cells: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect();
        format!("  {}{}\n", lead, cells.join(" │ ").trim_end())
    };

    let header_lead = body
        .header
        .select_all
        .map(|state| format!("{} ", checkbox(state)))
        .unwrap_or_default();
    out.push_str(&line(&header_lead, &header));

    let rule_width: usize =
        display_width(&header_lead) + widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    out.push_str(&format!("  {}\n", "─".repeat(rule_width)));

    for (row, cells) in body.rows.iter().zip(&rows) {
        let lead = row
            .checkbox
            .map(|state| format!("{} ", checkbox(state)))
            .unwrap_or_default();
        out.push_str(&line(&lead, cells));
    }

    out.push_str(&format!("  {}", body.footer.showing));
    if let Some(selected) = &body.footer.selected {
        out.push_str(&format!(" · {}", selected));
    }
    out.push('\n');
    out
}

pub fn render_input(view: &InputView) -> String {
    let mut out = String::new();

    if let Some(label) = &view.label {
        out.push_str(&format!(
            "  {}{}\n",
            label,
            if view.required_marker { " *" } else { "" }
        ));
    }

    let shown = if view.value.is_empty() {
        format!("({})", view.placeholder)
    } else if view.kind == InputKind::Password {
        "•".repeat(view.value.chars().count())
    } else {
        truncate_to_width(&view.value, 48)
    };

    let mut trailing = Vec::new();
    if view.processing {
        trailing.push("⟳".to_string());
    }
    if view.clear_button {
        trailing.push("[×]".to_string());
    }
    if let Some(toggle) = &view.password_toggle {
        trailing.push(format!("[{}]", toggle.label));
    }

    let mut flags = Vec::new();
    if view.disabled {
        flags.push("disabled");
    }
    if view.focused {
        flags.push("focused");
    }
    if view.error {
        flags.push("error");
    }

    out.push_str(&format!(
        "  [{:?}/{:?}] {} {}",
        view.variant,
        view.size,
        shown,
        trailing.join(" ")
    ));
    if !flags.is_empty() {
        out.push_str(&format!(" <{}>", flags.join(", ")));
    }
    out = out.trim_end().to_string();
    out.push('\n');

    if let Some(message) = &view.error_message {
        out.push_str(&format!("  ! {}\n", message));
    } else if let Some(helper) = &view.helper_text {
        out.push_str(&format!("  {}\n", helper));
    }
    if let Some(count) = view.character_count {
        out.push_str(&format!("  {} characters\n", count));
    }
    out
}
