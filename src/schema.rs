//! Table model built from the parse tree.

use crate::ast::{CreateTableStmt, ReferentialAction, TableElement};

/// One parsed CREATE TABLE statement.
///
/// Immutable after construction; display-name switching happens in the
/// graph layer, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Physical (schema) identifier.
    pub name: String,
    /// Display name from the table COMMENT option; equals `name` without one.
    pub logical_name: String,
    pub columns: Vec<Column>,
    /// Primary key column names in declaration order, if any.
    pub primary_key: Option<Vec<String>>,
    pub foreign_keys: Vec<ForeignKey>,
    pub indexes: Vec<Index>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Formatted declared type, e.g. `VARCHAR(255)`.
    pub type_name: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub comment: Option<String>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKey {
    pub columns: Vec<String>,
    pub ref_table: String,
    pub ref_columns: Vec<String>,
    pub on_delete: ReferentialAction,
    pub on_update: ReferentialAction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    pub kind: IndexKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Unique,
}

impl Table {
    /// Fold the parse tree of one statement into a table description.
    pub fn from_stmt(stmt: CreateTableStmt) -> Self {
        let mut columns: Vec<Column> = Vec::new();
        let mut primary_key: Vec<String> = Vec::new();
        let mut foreign_keys = Vec::new();
        let mut indexes = Vec::new();

        for element in stmt.elements {
            match element {
                TableElement::Column(def) => {
                    if def.primary_key {
                        primary_key.push(def.name.clone());
                    }
                    columns.push(Column {
                        name: def.name,
                        type_name: def.type_spec.format(),
                        // Nullability tracks NOT NULL alone; keeping primary
                        // keys NOT NULL in the DDL is the caller's job.
                        nullable: !def.not_null,
                        primary_key: def.primary_key,
                        auto_increment: def.auto_increment,
                        unique: def.unique,
                        comment: def.comment,
                        default: def.default,
                    });
                }
                TableElement::PrimaryKey { columns: names } => {
                    for name in &names {
                        if let Some(col) = columns.iter_mut().find(|c| &c.name == name) {
                            col.primary_key = true;
                        }
                        if !primary_key.contains(name) {
                            primary_key.push(name.clone());
                        }
                    }
                }
                TableElement::ForeignKey(fk) => {
                    foreign_keys.push(ForeignKey {
                        columns: fk.columns,
                        ref_table: fk.ref_table,
                        ref_columns: fk.ref_columns,
                        on_delete: fk.on_delete.unwrap_or_default(),
                        on_update: fk.on_update.unwrap_or_default(),
                    });
                }
                TableElement::Unique { name, columns: names } => {
                    for name in &names {
                        if let Some(col) = columns.iter_mut().find(|c| &c.name == name) {
                            col.unique = true;
                        }
                    }
                    indexes.push(Index {
                        name: name.unwrap_or_else(|| format!("unique_{}", names.join("_"))),
                        columns: names,
                        kind: IndexKind::Unique,
                    });
                }
            }
        }

        let logical_name = stmt.comment.unwrap_or_else(|| stmt.name.clone());

        Table {
            name: stmt.name,
            logical_name,
            columns,
            primary_key: if primary_key.is_empty() {
                None
            } else {
                Some(primary_key)
            },
            foreign_keys,
            indexes,
        }
    }
}

/// Extract a logical name from a column comment: the text before the first
/// parenthesis, so `사용자ID (PK)` yields `사용자ID`. `None` when nothing
/// usable remains.
pub fn extract_logical_name(comment: &str) -> Option<String> {
    let head = comment
        .split(['(', ')'])
        .next()
        .unwrap_or("")
        .trim();
    if head.is_empty() {
        None
    } else {
        Some(head.to_string())
    }
}
