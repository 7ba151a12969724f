//! Field validation for input widgets.
//!
//! Inputs never decide their own validity. A host page runs these checks
//! and passes the outcome back through `invalid` / `error_message`.
//!
//! # Example
//!
//! ```
//! use trellis::input::InputKind;
//! use trellis::validation::{FieldErrors, FieldRules};
//!
//! let mut errors = FieldErrors::new();
//! errors.validate("email", "admin@", InputKind::Email);
//! assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
//!
//! let username = FieldRules::new()
//!     .required("Username is required")
//!     .min_length(3, "Username must be at least 3 characters");
//! assert_eq!(username.check("al"), Some("Username must be at least 3 characters".to_string()));
//! ```

mod errors;
mod rules;

pub use errors::FieldErrors;
pub use rules::{
    EMAIL_INVALID, FieldRules, MIN_PASSWORD_LENGTH, PASSWORD_TOO_SHORT, REQUIRED,
    validate_email, validate_field, validate_password,
};
