//! Render snapshot of an input field.

use super::props::{InputKind, InputSize, InputVariant};

/// Values longer than this many characters show a character count.
pub const CHARACTER_COUNT_THRESHOLD: usize = 50;

/// Password reveal button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordToggle {
    /// Whether the password is currently shown in clear text.
    pub revealed: bool,
    /// Disabled fields render the button but ignore clicks.
    pub enabled: bool,
    pub label: &'static str,
}

/// Everything a renderer needs to draw an input field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputView {
    pub id: String,
    pub label: Option<String>,
    /// Shown next to the label while the field is in error and enabled.
    pub required_marker: bool,
    pub value: String,
    /// Kind after applying the password reveal toggle.
    pub kind: InputKind,
    pub placeholder: String,
    pub variant: InputVariant,
    pub size: InputSize,
    pub disabled: bool,
    pub focused: bool,
    pub error: bool,
    /// Spinner in place of the trailing buttons.
    pub processing: bool,
    pub clear_button: bool,
    pub password_toggle: Option<PasswordToggle>,
    pub error_message: Option<String>,
    pub helper_text: Option<String>,
    /// Id of the element describing the field, for assistive tech.
    pub described_by: Option<&'static str>,
    pub character_count: Option<usize>,
}
