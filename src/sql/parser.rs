//! Statement parser for CREATE TABLE.
//!
//! Produces the intermediate parse tree in `ast`; anything that is not a
//! CREATE TABLE statement parses to `None`.

use super::lexer::{Lexer, Token};
use crate::ast::{
    ColumnDef, CreateTableStmt, ForeignKeyDef, ReferentialAction, TableElement, TypeSpec,
};
use thiserror::Error;

/// Grammar-level failure inside a single statement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("expected {expected}, found {found:?}")]
    Expected { expected: String, found: Token },
    #[error("unexpected end of statement")]
    UnexpectedEof,
}

/// Parse one statement. `Ok(None)` when it is not a CREATE TABLE.
pub fn parse_statement(input: &str) -> Result<Option<CreateTableStmt>, SyntaxError> {
    let tokens = Lexer::new(input).tokenize();
    Parser::new(tokens).parse()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<String, SyntaxError> {
        match self.current() {
            Token::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            Token::Eof => Err(SyntaxError::UnexpectedEof),
            found => Err(SyntaxError::Expected {
                expected: expected.to_string(),
                found: found.clone(),
            }),
        }
    }

    fn parse(&mut self) -> Result<Option<CreateTableStmt>, SyntaxError> {
        if self.current() != &Token::Create {
            return Ok(None);
        }
        self.advance();

        // CREATE TEMPORARY TABLE
        if matches!(self.current(), Token::Ident(s) if s.eq_ignore_ascii_case("temporary")) {
            self.advance();
        }

        // CREATE INDEX, CREATE VIEW, ... are not table definitions
        if self.current() != &Token::Table {
            return Ok(None);
        }
        self.advance();

        // IF NOT EXISTS
        if self.current() == &Token::If {
            self.advance();
            if self.current() == &Token::Not {
                self.advance();
            }
            if self.current() == &Token::Exists {
                self.advance();
            }
        }

        let name = self.parse_table_name()?;

        if self.current() != &Token::LParen {
            return Err(SyntaxError::Expected {
                expected: "(".to_string(),
                found: self.current().clone(),
            });
        }
        self.advance();

        let elements = self.parse_table_body()?;
        let comment = self.parse_table_options();

        Ok(Some(CreateTableStmt {
            name,
            elements,
            comment,
        }))
    }

    /// Table identifier, with the schema part of `schema.table` discarded.
    fn parse_table_name(&mut self) -> Result<String, SyntaxError> {
        let first = self.expect_ident("table name")?;
        if self.current() == &Token::Dot {
            self.advance();
            return self.expect_ident("table name");
        }
        Ok(first)
    }

    fn parse_table_body(&mut self) -> Result<Vec<TableElement>, SyntaxError> {
        let mut elements = Vec::new();
        let mut constraint_name: Option<String> = None;

        loop {
            match self.current() {
                Token::RParen => {
                    self.advance();
                    break;
                }
                Token::Comma => {
                    self.advance();
                    constraint_name = None;
                }
                Token::Constraint => {
                    self.advance();
                    if let Token::Ident(name) = self.current() {
                        constraint_name = Some(name.clone());
                        self.advance();
                    }
                }
                Token::Primary => {
                    self.advance();
                    if self.current() != &Token::Key {
                        return Err(SyntaxError::Expected {
                            expected: "KEY".to_string(),
                            found: self.current().clone(),
                        });
                    }
                    self.advance();
                    let columns = self.parse_column_list()?;
                    elements.push(TableElement::PrimaryKey { columns });
                }
                Token::Foreign => {
                    self.advance();
                    let fk = self.parse_foreign_key()?;
                    elements.push(TableElement::ForeignKey(fk));
                }
                Token::Unique => {
                    self.advance();
                    if matches!(self.current(), Token::Key | Token::Index) {
                        self.advance();
                    }
                    let inline_name = match self.current() {
                        Token::Ident(name) => {
                            let name = name.clone();
                            self.advance();
                            Some(name)
                        }
                        _ => None,
                    };
                    let columns = self.parse_column_list()?;
                    elements.push(TableElement::Unique {
                        name: constraint_name.take().or(inline_name),
                        columns,
                    });
                }
                Token::Index | Token::Key => {
                    // Plain secondary indexes are not modeled
                    self.skip_until(&[Token::Comma, Token::RParen]);
                }
                Token::Check => {
                    self.advance();
                    self.skip_parenthesized();
                }
                Token::Ident(_) => {
                    let (column, inline_fk) = self.parse_column()?;
                    elements.push(TableElement::Column(column));
                    if let Some(fk) = inline_fk {
                        elements.push(TableElement::ForeignKey(fk));
                    }
                }
                Token::Eof => return Err(SyntaxError::UnexpectedEof),
                _ => {
                    self.advance();
                }
            }
        }

        Ok(elements)
    }

    fn parse_column(&mut self) -> Result<(ColumnDef, Option<ForeignKeyDef>), SyntaxError> {
        let name = self.expect_ident("column name")?;
        let type_spec = self.parse_type()?;

        let mut not_null = false;
        let mut primary_key = false;
        let mut auto_increment = false;
        let mut unique = false;
        let mut default = None;
        let mut comment = None;
        let mut inline_fk = None;

        loop {
            match self.current() {
                Token::Not => {
                    self.advance();
                    if self.current() == &Token::Null {
                        self.advance();
                        not_null = true;
                    }
                }
                Token::Null => {
                    // Explicitly nullable, which is already the default
                    self.advance();
                }
                Token::Primary => {
                    self.advance();
                    if self.current() == &Token::Key {
                        self.advance();
                    }
                    primary_key = true;
                }
                Token::Unique => {
                    self.advance();
                    if self.current() == &Token::Key {
                        self.advance();
                    }
                    unique = true;
                }
                Token::AutoIncrement => {
                    self.advance();
                    auto_increment = true;
                }
                Token::Default => {
                    self.advance();
                    default = Some(self.parse_default_value());
                }
                Token::Comment => {
                    self.advance();
                    if self.current() == &Token::Eq {
                        self.advance();
                    }
                    if let Token::Str(s) = self.current() {
                        comment = Some(s.clone());
                        self.advance();
                    }
                }
                Token::References => {
                    self.advance();
                    let (ref_table, ref_columns) = self.parse_reference()?;
                    let (on_delete, on_update) = self.parse_on_actions();
                    inline_fk = Some(ForeignKeyDef {
                        columns: vec![name.clone()],
                        ref_table,
                        ref_columns,
                        on_delete,
                        on_update,
                    });
                }
                Token::On => {
                    // e.g. ON UPDATE CURRENT_TIMESTAMP
                    self.parse_on_actions();
                }
                Token::Check => {
                    self.advance();
                    self.skip_parenthesized();
                }
                Token::Constraint => {
                    self.advance();
                    if let Token::Ident(_) = self.current() {
                        self.advance();
                    }
                }
                Token::Comma | Token::RParen | Token::Eof => break,
                _ => {
                    // UNSIGNED, CHARACTER SET, COLLATE, ...
                    self.advance();
                }
            }
        }

        Ok((
            ColumnDef {
                name,
                type_spec,
                not_null,
                primary_key,
                auto_increment,
                unique,
                default,
                comment,
            },
            inline_fk,
        ))
    }

    /// Type keyword with optional `(length)` or `(length,scale)` arguments.
    fn parse_type(&mut self) -> Result<TypeSpec, SyntaxError> {
        let name = self.expect_ident("column type")?;
        let mut length = None;
        let mut scale = None;

        if self.current() == &Token::LParen {
            self.advance();
            loop {
                match self.current() {
                    Token::Num(n) => {
                        let value = n.parse::<u64>().ok();
                        if length.is_none() {
                            length = value;
                        } else if scale.is_none() {
                            scale = value;
                        }
                        self.advance();
                    }
                    Token::Comma => {
                        self.advance();
                    }
                    Token::RParen => {
                        self.advance();
                        break;
                    }
                    Token::Eof => return Err(SyntaxError::UnexpectedEof),
                    _ => {
                        // ENUM('a','b') and friends carry no length
                        self.advance();
                    }
                }
            }
        }

        Ok(TypeSpec {
            name,
            length,
            scale,
        })
    }

    fn parse_default_value(&mut self) -> String {
        match self.current().clone() {
            Token::Str(s) => {
                self.advance();
                s
            }
            Token::Num(n) => {
                self.advance();
                n
            }
            Token::Null => {
                self.advance();
                "NULL".to_string()
            }
            Token::Ident(s) => {
                let mut val = s;
                self.advance();
                // Function calls like NOW()
                if self.current() == &Token::LParen {
                    self.advance();
                    val.push('(');
                    val.push_str(&self.collect_until_paren());
                    val.push(')');
                }
                val
            }
            Token::LParen => {
                self.advance();
                format!("({})", self.collect_until_paren())
            }
            _ => String::new(),
        }
    }

    fn collect_until_paren(&mut self) -> String {
        let mut parts = Vec::new();
        let mut depth = 1;

        loop {
            match self.current() {
                Token::LParen => {
                    depth += 1;
                    parts.push("(".to_string());
                    self.advance();
                }
                Token::RParen => {
                    depth -= 1;
                    self.advance();
                    if depth == 0 {
                        break;
                    }
                    parts.push(")".to_string());
                }
                Token::Ident(s) => {
                    parts.push(s.clone());
                    self.advance();
                }
                Token::Num(n) => {
                    parts.push(n.clone());
                    self.advance();
                }
                Token::Str(s) => {
                    parts.push(format!("'{}'", s));
                    self.advance();
                }
                Token::Comma => {
                    parts.push(",".to_string());
                    self.advance();
                }
                Token::Eof => break,
                _ => {
                    self.advance();
                }
            }
        }

        parts.join(" ")
    }

    fn parse_foreign_key(&mut self) -> Result<ForeignKeyDef, SyntaxError> {
        if self.current() != &Token::Key {
            return Err(SyntaxError::Expected {
                expected: "KEY".to_string(),
                found: self.current().clone(),
            });
        }
        self.advance();

        let columns = self.parse_column_list()?;

        if self.current() != &Token::References {
            return Err(SyntaxError::Expected {
                expected: "REFERENCES".to_string(),
                found: self.current().clone(),
            });
        }
        self.advance();

        let (ref_table, ref_columns) = self.parse_reference()?;
        let (on_delete, on_update) = self.parse_on_actions();

        Ok(ForeignKeyDef {
            columns,
            ref_table,
            ref_columns,
            on_delete,
            on_update,
        })
    }

    /// Referenced table and column list; the column list falls back to `id`
    /// when the reference omits it.
    fn parse_reference(&mut self) -> Result<(String, Vec<String>), SyntaxError> {
        let table = self.parse_table_name()?;
        let columns = if self.current() == &Token::LParen {
            self.parse_column_list()?
        } else {
            vec!["id".to_string()]
        };
        Ok((table, columns))
    }

    fn parse_column_list(&mut self) -> Result<Vec<String>, SyntaxError> {
        if self.current() != &Token::LParen {
            return Err(SyntaxError::Expected {
                expected: "(".to_string(),
                found: self.current().clone(),
            });
        }
        self.advance();

        let mut columns = Vec::new();
        loop {
            match self.current() {
                Token::Ident(name) => {
                    columns.push(name.clone());
                    self.advance();
                }
                Token::Comma => {
                    self.advance();
                }
                Token::RParen => {
                    self.advance();
                    break;
                }
                Token::Eof => return Err(SyntaxError::UnexpectedEof),
                _ => {
                    self.advance();
                }
            }
        }

        Ok(columns)
    }

    fn parse_on_actions(&mut self) -> (Option<ReferentialAction>, Option<ReferentialAction>) {
        let mut on_delete = None;
        let mut on_update = None;

        while self.current() == &Token::On {
            self.advance();
            let is_delete = match self.current() {
                Token::Delete => true,
                Token::Update => false,
                _ => continue,
            };
            self.advance();

            let action = self.parse_action();
            if is_delete {
                on_delete = action;
            } else {
                on_update = action;
            }
        }

        (on_delete, on_update)
    }

    fn parse_action(&mut self) -> Option<ReferentialAction> {
        match self.current() {
            Token::Cascade => {
                self.advance();
                Some(ReferentialAction::Cascade)
            }
            Token::Restrict => {
                self.advance();
                Some(ReferentialAction::Restrict)
            }
            Token::Set => {
                self.advance();
                match self.current() {
                    Token::Null => {
                        self.advance();
                        Some(ReferentialAction::SetNull)
                    }
                    Token::Default => {
                        self.advance();
                        Some(ReferentialAction::SetDefault)
                    }
                    _ => None,
                }
            }
            Token::No => {
                self.advance();
                if self.current() == &Token::Action {
                    self.advance();
                }
                Some(ReferentialAction::NoAction)
            }
            _ => None,
        }
    }

    /// COMMENT is the only table option that survives; everything else up to
    /// the end of the statement is skipped.
    fn parse_table_options(&mut self) -> Option<String> {
        let mut comment = None;

        loop {
            match self.current() {
                Token::Semicolon | Token::Eof => break,
                Token::Comment => {
                    self.advance();
                    if self.current() == &Token::Eq {
                        self.advance();
                    }
                    if let Token::Str(s) = self.current() {
                        comment = Some(s.clone());
                        self.advance();
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }

        comment
    }

    fn skip_parenthesized(&mut self) {
        if self.current() != &Token::LParen {
            return;
        }
        self.advance();
        let mut depth = 1;
        while depth > 0 {
            match self.current() {
                Token::LParen => {
                    depth += 1;
                    self.advance();
                }
                Token::RParen => {
                    depth -= 1;
                    self.advance();
                }
                Token::Eof => break,
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn skip_until(&mut self, tokens: &[Token]) {
        while !tokens.contains(self.current()) && self.current() != &Token::Eof {
            if self.current() == &Token::LParen {
                self.skip_parenthesized();
            } else {
                self.advance();
            }
        }
    }
}
