//! Input field properties and configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Quiet period before `debounced_value` catches up with typing.
pub const DEFAULT_VALUE_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long the clear button shows the processing state.
pub const DEFAULT_CLEAR_FEEDBACK: Duration = Duration::from_millis(100);

/// Visual style of the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputVariant {
    Filled,
    #[default]
    Outlined,
    Ghost,
}

/// Field size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSize {
    Sm,
    #[default]
    Md,
    Lg,
}

/// What kind of text the field holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Password,
    Email,
    Tel,
    Url,
}

/// Properties supplied by the hosting page.
///
/// `invalid` and `error_message` come from the page's validation; the field
/// only displays them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputProps {
    pub value: String,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub helper_text: Option<String>,
    pub error_message: Option<String>,
    pub disabled: bool,
    pub invalid: bool,
    pub variant: InputVariant,
    pub size: InputSize,
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub show_clear_button: bool,
    pub show_password_toggle: bool,
}

impl InputProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn invalid(mut self) -> Self {
        self.invalid = true;
        self
    }

    pub fn variant(mut self, variant: InputVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn size(mut self, size: InputSize) -> Self {
        self.size = size;
        self
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn show_clear_button(mut self) -> Self {
        self.show_clear_button = true;
        self
    }

    pub fn show_password_toggle(mut self) -> Self {
        self.show_password_toggle = true;
        self
    }
}

/// Timing configuration for an input field.
#[derive(Debug, Clone)]
pub struct InputConfig {
    /// Quiet period for the debounced value.
    pub value_debounce: Duration,
    /// Duration of the processing state after clearing.
    pub clear_feedback: Duration,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            value_debounce: DEFAULT_VALUE_DEBOUNCE,
            clear_feedback: DEFAULT_CLEAR_FEEDBACK,
        }
    }
}

impl InputConfig {
    pub fn value_debounce(mut self, delay: Duration) -> Self {
        self.value_debounce = delay;
        self
    }

    pub fn clear_feedback(mut self, delay: Duration) -> Self {
        self.clear_feedback = delay;
        self
    }
}
