//! Record trait, cell values, and column descriptors for table display.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A raw field value read from a [`Record`].
///
/// Values order totally so they can be handed to `slice::sort_by`:
/// - Kinds rank `Bool` < numbers < `Text`.
/// - `Int` and `Float` compare numerically with each other, exactly.
/// - NaN sorts after every other number and equal to itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    fn kind_rank(&self) -> u8 {
        match self {
            Value::Bool(_) => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::Text(_) => 2,
        }
    }

    /// Compare two values for sorting.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => compare_floats(*a, *b),
            (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
            (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).reverse(),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        // -0.0 and 0.0 are equal here, unlike `total_cmp`.
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Compare an integer with a float without rounding the integer.
fn compare_int_float(a: i64, b: f64) -> Ordering {
    if b.is_nan() {
        return Ordering::Less;
    }
    // 2^63: every i64 is below it and every i64 is at or above its negation.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if b >= BOUND {
        return Ordering::Less;
    }
    if b < -BOUND {
        return Ordering::Greater;
    }
    let whole = b.trunc();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(b - whole)).unwrap_or(Ordering::Equal),
        ordering => ordering,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// A row of tabular data with a stable identity.
///
/// Identity is the `id()` alone. Two records with the same id are the same
/// row to the selection set even if their other fields differ.
///
/// # Example
///
/// ```
/// use trellis::record::{Record, Value};
///
/// #[derive(Clone, Debug)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// impl Record for User {
///     type Id = u32;
///
///     fn id(&self) -> u32 {
///         self.id
///     }
///
///     fn field(&self, data_index: &str) -> Option<Value> {
///         match data_index {
///             "id" => Some(self.id.into()),
///             "name" => Some(self.name.as_str().into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// The identifier type, usually an integer or a string.
    type Id: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// Return the unique identifier for this record.
    fn id(&self) -> Self::Id;

    /// Read the field named by a column's `data_index`.
    ///
    /// Returns `None` only when the record has no such field.
    fn field(&self, data_index: &str) -> Option<Value>;
}

/// Column configuration.
///
/// `key` identifies the column within its table and must be unique there.
/// `data_index` names the record field the column reads; it defaults to the
/// key.
///
/// ```
/// use trellis::record::Column;
///
/// let columns = vec![
///     Column::new("name", "Name").sortable(),
///     Column::new("mail", "Email").data_index("email").sortable(),
///     Column::new("role", "Role"),
/// ];
/// assert_eq!(columns[1].data_index, "email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique key within the table.
    pub key: String,
    /// Header text.
    pub title: String,
    /// Record field this column displays and sorts by.
    #[serde(rename = "dataIndex")]
    pub data_index: String,
    /// Whether header clicks sort by this column.
    #[serde(default)]
    pub sortable: bool,
}

impl Column {
    /// Create a column whose data index equals its key.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            data_index: key.clone(),
            key,
            title: title.into(),
            sortable: false,
        }
    }

    /// Read a different record field than the key.
    pub fn data_index(mut self, field: impl Into<String>) -> Self {
        self.data_index = field.into();
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}
