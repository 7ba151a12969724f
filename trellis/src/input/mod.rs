//! Text input field.
//!
//! [`InputField`] holds the text, focus, password reveal and clear-button
//! state of one field. [`InputField::view`] turns that into an
//! [`InputView`] for whatever renders the page.

mod props;
mod state;
mod view;

pub use props::{
    DEFAULT_CLEAR_FEEDBACK, DEFAULT_VALUE_DEBOUNCE, InputConfig, InputKind, InputProps, InputSize,
    InputVariant,
};
pub use state::{InputField, InputId};
pub use view::{CHARACTER_COUNT_THRESHOLD, InputView, PasswordToggle};
