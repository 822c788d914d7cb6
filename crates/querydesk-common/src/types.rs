use std::fmt;

use serde::{Deserialize, Serialize};

/// One structured record returned by query execution.
///
/// Key order follows the server's column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Describes one column of the uploaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub data_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            not_null: false,
            default_value: None,
            primary_key: false,
        }
    }
}

impl fmt::Display for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if self.primary_key {
            write!(f, " PRIMARY KEY")?;
        }
        if self.not_null {
            write!(f, " NOT NULL")?;
        }
        if let Some(ref default) = self.default_value {
            write!(f, " DEFAULT {default}")?;
        }
        Ok(())
    }
}

/// The remote operations a session can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Upload,
    FetchSchema,
    Generate,
    Regenerate,
    Execute,
    FormatAnswer,
}

impl Operation {
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Upload => "upload dataset",
            Operation::FetchSchema => "fetch schema",
            Operation::Generate => "generate query",
            Operation::Regenerate => "regenerate query",
            Operation::Execute => "run query",
            Operation::FormatAnswer => "format answer",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
