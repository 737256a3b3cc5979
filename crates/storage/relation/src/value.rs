use std::collections::HashMap;
use std::fmt;

/// Data type tag of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 32-bit signed integer.
    Int,
    /// Variable-length ascii text.
    Text,
    /// Single-byte boolean; used by the catalog tables.
    Boolean,
}

impl fmt::Display for DataType {
    /// The catalog's on-disk spelling of the type tag.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int => "INT",
            DataType::Text => "TEXT",
            DataType::Boolean => "BOOLEAN",
        };
        write!(f, "{name}")
    }
}

impl TryFrom<&str> for DataType {
    type Error = ();

    /// Attempts to map a catalog type spelling back to its tag.
    fn try_from(v: &str) -> Result<Self, Self::Error> {
        match v {
            "INT" => Ok(DataType::Int),
            "TEXT" => Ok(DataType::Text),
            "BOOLEAN" => Ok(DataType::Boolean),
            _ => Err(()),
        }
    }
}

/// A tagged column value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Text(String),
    Bool(bool),
}

impl Value {
    /// The data type this value satisfies.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int(_) => DataType::Int,
            Value::Text(_) => DataType::Text,
            Value::Bool(_) => DataType::Boolean,
        }
    }
}

impl fmt::Display for Value {
    /// Query-result rendering: text is double-quoted, booleans print as
    /// `true`/`false`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// A row: column names mapped to their values. Caller-constructed and
/// short-lived; the schema order lives with the table, not the row.
pub type Row = HashMap<String, Value>;

/// Builds a [`Row`] from `(name, value)` pairs.
pub fn row_from<const N: usize>(entries: [(&str, Value); N]) -> Row {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
