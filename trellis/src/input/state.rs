use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::{debug, trace};

use crate::debounce::{DebouncedValue, Debouncer};

use super::props::{InputConfig, InputKind, InputProps};
use super::view::{CHARACTER_COUNT_THRESHOLD, InputView, PasswordToggle};

/// Unique identifier for an InputField instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId(usize);

impl InputId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__input_{}", self.0)
    }
}

/// Internal state for an InputField
#[derive(Debug, Default)]
struct InputInner {
    props: InputProps,
    focused: bool,
    password_visible: bool,
    /// Set by `clear()` until the feedback delay passes
    processing: bool,
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.is_empty())
}

impl InputInner {
    fn has_error(&self) -> bool {
        self.props.invalid || non_empty(&self.props.error_message).is_some()
    }

    fn effective_kind(&self) -> InputKind {
        if self.props.kind == InputKind::Password && self.password_visible {
            InputKind::Text
        } else {
            self.props.kind
        }
    }

    fn placeholder_text(&self) -> String {
        let props = &self.props;
        if props.disabled {
            return "This field is disabled".to_string();
        }
        if self.processing {
            return "Processing...".to_string();
        }
        let fallback = match props.kind {
            InputKind::Email if props.value.is_empty() => "Enter your email address",
            InputKind::Password if props.value.is_empty() => "Enter your password",
            _ => "Enter text...",
        };
        props
            .placeholder
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }

    fn shows_clear_button(&self) -> bool {
        self.props.show_clear_button
            && !self.props.value.is_empty()
            && !self.props.disabled
            && !self.processing
    }

    fn shows_password_toggle(&self) -> bool {
        self.props.show_password_toggle && self.props.kind == InputKind::Password && !self.processing
    }

    fn character_count(&self) -> Option<usize> {
        let count = self.props.value.chars().count();
        (count > CHARACTER_COUNT_THRESHOLD && !self.props.disabled).then_some(count)
    }

    fn view(&self, id: String) -> InputView {
        let props = &self.props;
        let error_message = non_empty(&props.error_message).map(str::to_string);
        let helper_text = non_empty(&props.helper_text).map(str::to_string);
        let described_by = if error_message.is_some() {
            Some("error-message")
        } else if helper_text.is_some() {
            Some("helper-text")
        } else {
            None
        };

        InputView {
            id,
            label: props.label.clone(),
            required_marker: props.label.is_some() && self.has_error() && !props.disabled,
            value: props.value.clone(),
            kind: self.effective_kind(),
            placeholder: self.placeholder_text(),
            variant: props.variant,
            size: props.size,
            disabled: props.disabled,
            focused: self.focused,
            error: self.has_error(),
            processing: self.processing,
            clear_button: self.shows_clear_button(),
            password_toggle: self.shows_password_toggle().then(|| PasswordToggle {
                revealed: self.password_visible,
                enabled: !props.disabled,
                label: if self.password_visible {
                    "Hide password"
                } else {
                    "Show password"
                },
            }),
            error_message,
            helper_text,
            described_by,
            character_count: self.character_count(),
        }
    }
}

type ChangeCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// A text input field with its interaction state.
///
/// The field owns its text. User edits go through [`change`](Self::change)
/// and [`clear`](Self::clear), which emit `on_change`; disabled fields
/// ignore both. Validity is decided by the host and pushed in with
/// [`set_error_message`](Self::set_error_message) / [`set_invalid`](Self::set_invalid).
///
/// Focus and blur only affect the field's own state and emit nothing.
///
/// # Example
///
/// ```ignore
/// let email = InputField::new(
///     InputProps::new()
///         .label("Email Address")
///         .kind(InputKind::Email)
///         .show_clear_button(),
/// )
/// .on_change(|value| log::debug!("email is now {value}"));
///
/// email.change("admin@");
/// email.set_error_message(validate_field(&email.value(), InputKind::Email));
/// ```
pub struct InputField {
    id: InputId,
    inner: Arc<RwLock<InputInner>>,
    /// Dirty flag for re-render
    dirty: Arc<AtomicBool>,
    on_change: Option<ChangeCallback>,
    debounced: DebouncedValue<String>,
    clear_feedback: Debouncer<()>,
}

impl InputField {
    /// Create a field with default timing.
    pub fn new(props: InputProps) -> Self {
        Self::with_config(props, InputConfig::default())
    }

    pub fn with_config(props: InputProps, config: InputConfig) -> Self {
        let debounced = DebouncedValue::new(props.value.clone(), config.value_debounce);
        let inner = Arc::new(RwLock::new(InputInner {
            props,
            ..Default::default()
        }));
        let dirty = Arc::new(AtomicBool::new(false));

        let weak = Arc::downgrade(&inner);
        let dirty_for_feedback = Arc::clone(&dirty);
        let clear_feedback = Debouncer::new(config.clear_feedback, move |()| {
            if let Some(inner) = weak.upgrade()
                && let Ok(mut guard) = inner.write()
            {
                guard.processing = false;
                dirty_for_feedback.store(true, Ordering::SeqCst);
            }
        });

        Self {
            id: InputId::new(),
            inner,
            dirty,
            on_change: None,
            debounced,
            clear_feedback,
        }
    }

    /// Register the change callback.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(f));
        self
    }

    pub fn id(&self) -> InputId {
        self.id
    }

    /// Get the ID as a string (for node binding)
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    fn read<U>(&self, f: impl FnOnce(&InputInner) -> U) -> Option<U> {
        self.inner.read().ok().map(|guard| f(&*guard))
    }

    fn write(&self, f: impl FnOnce(&mut InputInner)) {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut *guard);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Get the current text value
    pub fn value(&self) -> String {
        self.read(|inner| inner.props.value.clone()).unwrap_or_default()
    }

    /// The value as of the last quiet period.
    pub fn debounced_value(&self) -> String {
        self.debounced.get()
    }

    pub fn props(&self) -> InputProps {
        self.read(|inner| inner.props.clone()).unwrap_or_default()
    }

    pub fn is_disabled(&self) -> bool {
        self.read(|inner| inner.props.disabled).unwrap_or(false)
    }

    pub fn is_focused(&self) -> bool {
        self.read(|inner| inner.focused).unwrap_or(false)
    }

    pub fn is_processing(&self) -> bool {
        self.read(|inner| inner.processing).unwrap_or(false)
    }

    pub fn is_password_visible(&self) -> bool {
        self.read(|inner| inner.password_visible).unwrap_or(false)
    }

    /// True when the host marked the field invalid or supplied an error message.
    pub fn has_error(&self) -> bool {
        self.read(InputInner::has_error).unwrap_or(false)
    }

    /// The kind the field behaves as, with the password reveal applied.
    pub fn effective_kind(&self) -> InputKind {
        self.read(InputInner::effective_kind).unwrap_or_default()
    }

    pub fn placeholder_text(&self) -> String {
        self.read(InputInner::placeholder_text).unwrap_or_default()
    }

    pub fn shows_clear_button(&self) -> bool {
        self.read(InputInner::shows_clear_button).unwrap_or(false)
    }

    pub fn shows_password_toggle(&self) -> bool {
        self.read(InputInner::shows_password_toggle).unwrap_or(false)
    }

    /// Character count, shown only for long values in enabled fields.
    pub fn character_count(&self) -> Option<usize> {
        self.read(InputInner::character_count).flatten()
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> InputView {
        let id = self.id_string();
        self.read(|inner| inner.view(id.clone()))
            .unwrap_or_else(|| InputInner::default().view(id))
    }

    // -------------------------------------------------------------------------
    // User interaction
    // -------------------------------------------------------------------------

    /// Apply a user edit. Returns false if the field is disabled.
    pub fn change(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        let mut accepted = false;
        self.write(|inner| {
            if !inner.props.disabled {
                inner.props.value = text.clone();
                accepted = true;
            }
        });

        if accepted {
            self.emit(text);
        } else {
            trace!("Ignoring change on disabled input {}", self.id);
        }
        accepted
    }

    /// Clear button. Empties the value and shows the processing state
    /// briefly. Returns false if the field is disabled.
    pub fn clear(&self) -> bool {
        let mut accepted = false;
        self.write(|inner| {
            if !inner.props.disabled {
                inner.props.value.clear();
                inner.processing = true;
                accepted = true;
            }
        });
        if !accepted {
            return false;
        }

        self.emit(String::new());
        if let Err(e) = self.clear_feedback.call(()) {
            debug!("Clear feedback not scheduled for {}: {}", self.id, e);
            self.write(|inner| inner.processing = false);
        }
        true
    }

    /// Reveal or hide a password. Returns false if the field is disabled.
    pub fn toggle_password_visibility(&self) -> bool {
        let mut toggled = false;
        self.write(|inner| {
            if !inner.props.disabled {
                inner.password_visible = !inner.password_visible;
                toggled = true;
            }
        });
        toggled
    }

    /// Returns false if the field is disabled.
    pub fn focus(&self) -> bool {
        let mut focused = false;
        self.write(|inner| {
            if !inner.props.disabled {
                inner.focused = true;
                focused = true;
            }
        });
        focused
    }

    pub fn blur(&self) {
        self.write(|inner| inner.focused = false);
    }

    fn emit(&self, value: String) {
        if let Some(on_change) = &self.on_change {
            on_change(&value);
        }
        if let Err(e) = self.debounced.set(value) {
            debug!("Debounced value not scheduled for {}: {}", self.id, e);
        }
    }

    // -------------------------------------------------------------------------
    // Host updates
    // -------------------------------------------------------------------------

    /// Set the value programmatically. Does not emit `on_change`.
    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        self.write(|inner| inner.props.value = value.clone());
        if let Err(e) = self.debounced.set(value) {
            debug!("Debounced value not scheduled for {}: {}", self.id, e);
        }
    }

    /// Replace all props, keeping focus, reveal, and processing state.
    pub fn set_props(&self, props: InputProps) {
        self.write(|inner| inner.props = props);
    }

    /// Show (or with `None`, remove) a validation message.
    pub fn set_error_message(&self, message: Option<String>) {
        self.write(|inner| inner.props.error_message = message);
    }

    pub fn set_invalid(&self, invalid: bool) {
        self.write(|inner| inner.props.invalid = invalid);
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.write(|inner| inner.props.disabled = disabled);
    }

    pub fn set_helper_text(&self, text: Option<String>) {
        self.write(|inner| inner.props.helper_text = text);
    }

    /// Check if the field changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst) || self.debounced.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
        self.debounced.clear_dirty();
    }

    /// Cancel pending timers. Returns false if already destroyed.
    pub fn destroy(&self) -> bool {
        let value = self.debounced.cancel();
        let feedback = self.clear_feedback.cancel();
        value || feedback
    }
}

impl fmt::Debug for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputField")
            .field("id", &self.id)
            .field("inner", &self.inner)
            .field("debounced", &self.debounced)
            .finish_non_exhaustive()
    }
}
