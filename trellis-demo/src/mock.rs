//! Fixture data for the demo page.

use trellis::input::{InputField, InputKind, InputProps, InputSize, InputVariant};
use trellis::record::{Column, Record, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
}

impl Record for User {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn field(&self, data_index: &str) -> Option<Value> {
        match data_index {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            "role" => Some(self.role.as_str().into()),
            "status" => Some(self.status.as_str().into()),
            _ => None,
        }
    }
}

fn user(id: u32, name: &str, email: &str, role: &str, status: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        status: status.to_string(),
    }
}

pub fn users() -> Vec<User> {
    vec![
        user(1, "John Doe", "john@example.com", "Admin", "Active"),
        user(2, "Jane Smith", "jane@example.com", "User", "Active"),
        user(3, "Bob Johnson", "bob@example.com", "User", "Inactive"),
        user(4, "Alice Brown", "alice@example.com", "Editor", "Active"),
        user(5, "Charlie Wilson", "charlie@example.com", "User", "Pending"),
    ]
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email").sortable(),
        Column::new("role", "Role"),
        Column::new("status", "Status").sortable(),
    ]
}

/// The field gallery: one entry per variant, size and state.
pub fn gallery() -> Vec<(&'static str, InputField)> {
    vec![
        (
            "outlined",
            InputField::new(
                InputProps::new()
                    .label("Full Name")
                    .value("John Doe")
                    .placeholder("Enter your full name")
                    .show_clear_button(),
            ),
        ),
        (
            "filled",
            InputField::new(
                InputProps::new()
                    .label("Job Title")
                    .value("Software Engineer")
                    .placeholder("Enter your job title")
                    .variant(InputVariant::Filled),
            ),
        ),
        (
            "ghost",
            InputField::new(
                InputProps::new()
                    .label("Location")
                    .value("New York, NY")
                    .placeholder("Enter your location")
                    .variant(InputVariant::Ghost),
            ),
        ),
        (
            "small",
            InputField::new(
                InputProps::new()
                    .label("Currency")
                    .value("USD")
                    .placeholder("Currency code")
                    .size(InputSize::Sm),
            ),
        ),
        (
            "large",
            InputField::new(
                InputProps::new()
                    .label("Description")
                    .value("Welcome to our amazing platform! We're excited to have you here.")
                    .placeholder("Enter a detailed description")
                    .size(InputSize::Lg),
            ),
        ),
        (
            "disabled",
            InputField::new(
                InputProps::new()
                    .label("Read Only")
                    .value("This content cannot be modified")
                    .placeholder("Read-only field")
                    .disabled(),
            ),
        ),
        (
            "error",
            InputField::new(
                InputProps::new()
                    .label("Email Address")
                    .value("admin@")
                    .kind(InputKind::Email)
                    .error_message("Please enter a valid email address with domain"),
            ),
        ),
        (
            "phone",
            InputField::new(
                InputProps::new()
                    .label("Phone")
                    .value("+1 (555) 123-4567")
                    .kind(InputKind::Tel)
                    .helper_text("Include country code for international numbers"),
            ),
        ),
    ]
}
