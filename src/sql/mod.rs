//! DDL parsing: single CREATE TABLE statements and `;`-separated batches.

mod lexer;
pub(crate) mod parser;

pub use parser::SyntaxError;

use crate::schema::Table;
use log::warn;
use serde::Serialize;
use thiserror::Error;

/// Failure to parse one statement, carrying the offending statement
/// (truncated for display) and the underlying grammar error.
#[derive(Debug, Clone, Error)]
#[error("failed to parse statement `{statement}`: {source}")]
pub struct ParseError {
    pub statement: String,
    #[source]
    pub source: SyntaxError,
}

/// Per-statement failure entry of a batch parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementError {
    pub statement: String,
    pub error: String,
}

/// Result of parsing a batch: tables and failures, both in statement order.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    pub tables: Vec<Table>,
    pub errors: Vec<StatementError>,
}

/// Parse a single statement.
///
/// `Ok(None)` means the statement parsed but is not a CREATE TABLE, which
/// callers must distinguish from a malformed statement.
pub fn parse_one(statement: &str) -> Result<Option<Table>, ParseError> {
    match parser::parse_statement(statement) {
        Ok(Some(stmt)) => Ok(Some(Table::from_stmt(stmt))),
        Ok(None) => Ok(None),
        Err(source) => Err(ParseError {
            statement: truncate_statement(statement),
            source,
        }),
    }
}

/// Parse a `;`-separated batch of statements.
///
/// Statements are parsed independently; a malformed statement lands in
/// `errors` and does not stop the rest of the batch.
pub fn parse_many(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();

    let statements = text.split(';').map(str::trim).filter(|s| !s.is_empty());
    for statement in statements {
        match parse_one(statement) {
            Ok(Some(table)) => outcome.tables.push(table),
            Ok(None) => {}
            Err(err) => {
                warn!("skipping statement: {err}");
                outcome.errors.push(StatementError {
                    statement: err.statement,
                    error: err.source.to_string(),
                });
            }
        }
    }

    outcome
}

fn truncate_statement(statement: &str) -> String {
    let mut truncated: String = statement.chars().take(50).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_table() {
        let table = parse_one("CREATE TABLE users (id INT, name VARCHAR(50), age INT)")
            .unwrap()
            .unwrap();

        assert_eq!(table.name, "users");
        assert_eq!(table.columns.len(), 3);
    }

    #[test]
    fn test_parse_one_not_applicable() {
        let result = parse_one("CREATE INDEX idx_users_name ON users (name)").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_parse_one_error_carries_statement() {
        let long_tail = "x".repeat(80);
        let statement = format!("CREATE TABLE broken ({long_tail}");
        let err = parse_one(&statement).unwrap_err();

        assert_eq!(err.statement.chars().count(), 53);
        assert!(err.statement.ends_with("..."));
    }

    #[test]
    fn test_parse_many_partial_failure() {
        let ddl = "
            CREATE TABLE a (id INT);
            CREATE TABLE broken (id INT;
            CREATE TABLE b (id INT);
        ";
        let outcome = parse_many(ddl);

        assert_eq!(outcome.tables.len(), 2);
        assert_eq!(outcome.tables[0].name, "a");
        assert_eq!(outcome.tables[1].name, "b");
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].statement.starts_with("CREATE TABLE broken"));
    }

    #[test]
    fn test_parse_many_skips_empty_and_foreign_statements() {
        let ddl = ";;  ;\nCREATE TABLE a (id INT);\nDROP TABLE b;\n;";
        let outcome = parse_many(ddl);

        assert_eq!(outcome.tables.len(), 1);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_parse_many_users_orders() {
        let ddl = "CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(50) NOT NULL); \
                   CREATE TABLE orders (id INT PRIMARY KEY, user_id INT, \
                   FOREIGN KEY (user_id) REFERENCES users(id));";
        let outcome = parse_many(ddl);

        assert_eq!(outcome.tables.len(), 2);
        assert!(outcome.errors.is_empty());

        let orders = &outcome.tables[1];
        assert_eq!(orders.foreign_keys.len(), 1);
        assert_eq!(orders.foreign_keys[0].ref_table, "users");
    }
}
