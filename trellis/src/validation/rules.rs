//! Built-in validation rules.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::input::InputKind;

/// Message for blank required fields.
pub const REQUIRED: &str = "This field is required";
/// Message for malformed email addresses.
pub const EMAIL_INVALID: &str = "Please enter a valid email address";
/// Message for short passwords.
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern"));

/// Loose email shape check: something, `@`, something, `.`, something.
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Passwords need at least [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Validate a value for an input of the given kind.
///
/// Returns the message to display, or `None` when the value is acceptable.
/// Every kind is required; email and password kinds add their format rule.
pub fn validate_field(value: &str, kind: InputKind) -> Option<String> {
    if value.trim().is_empty() {
        return Some(REQUIRED.to_string());
    }
    match kind {
        InputKind::Email if !validate_email(value) => Some(EMAIL_INVALID.to_string()),
        InputKind::Password if !validate_password(value) => Some(PASSWORD_TOO_SHORT.to_string()),
        _ => None,
    }
}

type Rule = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

/// Ordered list of rules for one text field.
///
/// Rules run in the order they were added; [`check`](Self::check) reports the
/// first failure.
#[derive(Default)]
pub struct FieldRules {
    rules: Vec<Rule>,
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom rule; `f` returns true when the value passes.
    pub fn rule<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.rules
            .push(Box::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Require the field to be non-blank.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() >= min, msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() <= max, msg)
    }

    /// Require an email-shaped value. Empty passes; combine with `required`.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_empty() || validate_email(v), msg)
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(self, pattern: &str, msg: impl Into<String>) -> Result<Self, regex::Error> {
        let re = Regex::new(pattern)?;
        Ok(self.rule(move |v| re.is_match(v), msg))
    }

    /// The first failing rule's message.
    pub fn check(&self, value: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| rule(value).err())
    }

    /// Every failing rule's message, in order.
    pub fn errors(&self, value: &str) -> Vec<String> {
        self.rules.iter().filter_map(|rule| rule(value).err()).collect()
    }
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("rules", &self.rules.len())
            .finish()
    }
}
