//! Intermediate parse tree for a single CREATE TABLE statement.
//!
//! The statement parser produces these closed shapes once; everything
//! downstream works on them instead of raw tokens.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStmt {
    pub name: String,
    pub elements: Vec<TableElement>,
    /// Value of the table-level COMMENT option, if any.
    pub comment: Option<String>,
}

/// One comma-separated element of a CREATE TABLE body.
#[derive(Debug, Clone, PartialEq)]
pub enum TableElement {
    Column(ColumnDef),
    PrimaryKey {
        columns: Vec<String>,
    },
    ForeignKey(ForeignKeyDef),
    Unique {
        name: Option<String>,
        columns: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub type_spec: TypeSpec,
    pub not_null: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub default: Option<String>,
    pub comment: Option<String>,
}

/// Declared column type plus its optional length/scale arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: String,
    pub length: Option<u64>,
    pub scale: Option<u64>,
}

impl TypeSpec {
    /// Render the display form: `VARCHAR(255)`, `DECIMAL(10,2)` (length
    /// defaults to 10 when only a scale is declared) or the bare keyword.
    pub fn format(&self) -> String {
        let name = self.name.to_uppercase();
        match (self.length, self.scale) {
            (length, Some(scale)) => format!("{}({},{})", name, length.unwrap_or(10), scale),
            (Some(length), None) => format!("{}({})", name, length),
            (None, None) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyDef {
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
    pub on_delete: Option<ReferentialAction>,
    pub on_update: Option<ReferentialAction>,
}

/// ON DELETE / ON UPDATE action of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReferentialAction {
    #[default]
    #[serde(rename = "NO ACTION")]
    NoAction,
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "RESTRICT")]
    Restrict,
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NoAction => "NO ACTION",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::Restrict => "RESTRICT",
            Self::SetDefault => "SET DEFAULT",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bare_type() {
        let spec = TypeSpec {
            name: "int".to_string(),
            length: None,
            scale: None,
        };
        assert_eq!(spec.format(), "INT");
    }

    #[test]
    fn test_format_with_length() {
        let spec = TypeSpec {
            name: "varchar".to_string(),
            length: Some(255),
            scale: None,
        };
        assert_eq!(spec.format(), "VARCHAR(255)");
    }

    #[test]
    fn test_format_with_scale() {
        let spec = TypeSpec {
            name: "decimal".to_string(),
            length: Some(12),
            scale: Some(2),
        };
        assert_eq!(spec.format(), "DECIMAL(12,2)");
    }

    #[test]
    fn test_format_scale_without_length() {
        let spec = TypeSpec {
            name: "decimal".to_string(),
            length: None,
            scale: Some(4),
        };
        assert_eq!(spec.format(), "DECIMAL(10,4)");
    }

    #[test]
    fn test_action_display() {
        assert_eq!(ReferentialAction::NoAction.to_string(), "NO ACTION");
        assert_eq!(ReferentialAction::SetNull.to_string(), "SET NULL");
    }
}
