mod mock;
mod render;

use std::env;
use std::error::Error;
use std::fs::File;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use trellis::input::{InputField, InputKind, InputProps};
use trellis::resource::{Resource, ResourceError};
use trellis::table::{DataTable, TableConfig};
use trellis::validation::{FieldErrors, FieldRules};

use mock::User;
use render::{render_input, render_table};

fn init_logging() -> Result<(), Box<dyn Error>> {
    let level = env::var("TRELLIS_LOG")
        .ok()
        .and_then(|value| LevelFilter::from_str(&value).ok())
        .unwrap_or(LevelFilter::Debug);
    let log_file = File::create("trellis-demo.log")?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
}

fn show_field(name: &str, field: &InputField) {
    println!("- {}", name);
    print!("{}", render_input(&field.view()));
}

/// Wait out a debounce window so the pending update lands.
async fn settle(delay: Duration) {
    tokio::time::sleep(delay + Duration::from_millis(10)).await;
}

async fn fetch_users() -> Result<Vec<User>, ResourceError> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    Ok(mock::users())
}

async fn fetch_unreachable() -> Result<Vec<User>, ResourceError> {
    tokio::time::sleep(Duration::from_millis(500)).await;
    Err(ResourceError::new("Connection refused"))
}

async fn input_gallery() {
    section("Input Field: Variants, Sizes and States");
    let gallery = mock::gallery();
    for (name, field) in &gallery {
        show_field(name, field);
    }

    section("Input Field: Form");
    let mut errors = FieldErrors::new();

    let name_rules = FieldRules::new()
        .required("Name is required")
        .min_length(3, "Must be at least 3 characters long")
        .max_length(100, "Cannot exceed 100 characters");
    let name = InputField::new(
        InputProps::new()
            .label("Full Name")
            .placeholder("Enter your full name")
            .show_clear_button(),
    )
    .on_change(|value| debug!("Name changed to {:?}", value));
    name.focus();
    name.change("Al");
    name.set_error_message(name_rules.check(&name.value()));
    show_field("name (too short)", &name);
    name.change("Alexander Thompson");
    name.set_error_message(name_rules.check(&name.value()));
    name.blur();
    show_field("name", &name);

    let email = InputField::new(
        InputProps::new()
            .label("Email Address")
            .kind(InputKind::Email)
            .helper_text("We'll never share your email with anyone else")
            .show_clear_button(),
    );
    email.change("invalid.email@");
    email.set_error_message(errors.validate("email", &email.value(), InputKind::Email));
    show_field("email (invalid)", &email);
    email.change("sarah.johnson@company.com");
    email.set_error_message(errors.validate("email", &email.value(), InputKind::Email));
    show_field("email", &email);

    email.clear();
    show_field("email (just cleared)", &email);
    settle(trellis::input::DEFAULT_CLEAR_FEEDBACK).await;
    show_field("email (after clear)", &email);

    let password = InputField::new(
        InputProps::new()
            .label("Password")
            .kind(InputKind::Password)
            .helper_text("Use a mix of letters, numbers, and symbols")
            .show_password_toggle(),
    );
    password.change("short");
    password.set_error_message(errors.validate("password", &password.value(), InputKind::Password));
    show_field("password (too short)", &password);
    password.change("MySecureP@ssw0rd123!");
    password.set_error_message(errors.validate("password", &password.value(), InputKind::Password));
    password.toggle_password_visibility();
    show_field("password (revealed)", &password);

    let bio = InputField::new(InputProps::new().label("Bio"));
    bio.change(
        "Passionate software developer with 5+ years of experience in React, TypeScript, and Node.js.",
    );
    settle(trellis::input::DEFAULT_VALUE_DEBOUNCE).await;
    show_field("bio", &bio);
    info!("Bio settled at {} characters", bio.debounced_value().chars().count());

    println!();
    if errors.is_empty() {
        println!("Form is valid");
    } else {
        println!("Form has {} errors", errors.len());
    }

    for field in [&name, &email, &password, &bio] {
        field.destroy();
    }
    for (_, field) in &gallery {
        field.destroy();
    }
}

async fn table_demo() -> Result<(), Box<dyn Error>> {
    let config = TableConfig::default().selectable();
    let select_debounce = config.select_debounce;
    let sort_debounce = config.sort_debounce;

    let table = DataTable::new(mock::columns(), config)?.on_row_select(|rows: Vec<User>| {
        let names: Vec<&str> = rows.iter().map(|u| u.name.as_str()).collect();
        info!("Selected rows: {:?}", names);
        println!("  on_row_select -> {:?}", names);
    });

    section("Data Table: Loading");
    let users: Resource<Vec<User>> = Resource::new();
    let load = {
        let users = users.clone();
        tokio::spawn(async move { users.load(fetch_users()).await })
    };
    tokio::task::yield_now().await;
    table.apply_resource(&users.get());
    print!("{}", render_table(&table.view()));

    load.await?;
    table.apply_resource(&users.get());

    section("Data Table: Loaded");
    print!("{}", render_table(&table.view()));

    section("Data Table: Sorted by Name");
    table.request_sort("email");
    table.request_sort("name");
    settle(sort_debounce).await;
    print!("{}", render_table(&table.view()));

    section("Data Table: Sorted by Name, descending");
    table.request_sort("role");
    table.request_sort("name");
    settle(sort_debounce).await;
    print!("{}", render_table(&table.view()));

    section("Data Table: Selection");
    let rows = table.sorted_rows();
    for row in rows.iter().take(2) {
        table.toggle_row(row);
    }
    settle(select_debounce).await;
    print!("{}", render_table(&table.view()));

    section("Data Table: Select All");
    table.toggle_all();
    settle(select_debounce).await;
    print!("{}", render_table(&table.view()));

    table.toggle_all();
    settle(select_debounce).await;
    table.destroy();

    section("Data Table: Empty");
    let empty = DataTable::<User>::new(mock::columns(), TableConfig::default())?;
    print!("{}", render_table(&empty.view()));

    section("Data Table: Failed Load");
    let failing = DataTable::<User>::new(mock::columns(), TableConfig::default())?;
    let unreachable: Resource<Vec<User>> = Resource::new();
    unreachable.load(fetch_unreachable()).await;
    failing.apply_resource(&unreachable.get());
    print!("{}", render_table(&failing.view()));

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging()?;
    info!("Starting component library demo");

    input_gallery().await;
    table_demo().await?;

    info!("Demo finished");
    Ok(())
}
