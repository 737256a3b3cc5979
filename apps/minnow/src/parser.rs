//! A minimal statement parser for the DDL subset the executor understands.
//!
//! Input arrives one lower-cased line at a time; a line may hold several
//! `;`-separated statements. The output is the `sql-exec` AST, so the
//! executor never sees raw text.

use sql_exec::ast::{
    ColumnDefinition, ColumnType, CreateStatement, DropStatement, ShowStatement, Statement,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("statement ended unexpectedly")]
    UnexpectedEnd,
    #[error("unexpected token '{found}'")]
    UnexpectedToken { found: String },
    #[error("expected {expected}, found '{found}'")]
    Expected {
        expected: &'static str,
        found: String,
    },
    #[error("'{found}' is not a recognized column type")]
    UnknownColumnType { found: String },
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
}

/// Parses every statement on one input line.
pub fn parse_line(line: &str) -> Result<Vec<Statement>, ParseError> {
    let mut parser = Parser::new(tokenize(line)?);

    let mut statements = Vec::new();
    loop {
        while parser.accept(";") {}
        if parser.at_end() {
            break;
        }
        statements.push(parser.parse_statement()?);
        if !parser.at_end() {
            parser.expect(";", "';' between statements")?;
        }
    }

    Ok(statements)
}

fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' || c == ')' || c == ',' || c == ';' {
            tokens.push(c.to_string());
            chars.next();
        } else if c.is_ascii_alphanumeric() || c == '_' {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    word.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(word);
        } else {
            return Err(ParseError::UnexpectedCharacter(c));
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<String>,
    position: usize,
}

impl Parser {
    fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    fn next_token(&mut self) -> Result<String, ParseError> {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd)?;
        self.position += 1;
        Ok(token)
    }

    /// Consumes the next token when it equals `expected`.
    fn accept(&mut self, expected: &str) -> bool {
        if self.tokens.get(self.position).is_some_and(|t| t == expected) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected_token: &str, expected: &'static str) -> Result<(), ParseError> {
        let found = self.next_token()?;
        if found == expected_token {
            Ok(())
        } else {
            Err(ParseError::Expected { expected, found })
        }
    }

    fn identifier(&mut self, expected: &'static str) -> Result<String, ParseError> {
        let found = self.next_token()?;
        let is_identifier = found
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if is_identifier {
            Ok(found)
        } else {
            Err(ParseError::Expected { expected, found })
        }
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.next_token()?;
        match keyword.as_str() {
            "create" => self.parse_create(),
            "drop" => self.parse_drop(),
            "show" => self.parse_show(),
            _ => Err(ParseError::UnexpectedToken { found: keyword }),
        }
    }

    fn parse_create(&mut self) -> Result<Statement, ParseError> {
        let kind = self.next_token()?;
        match kind.as_str() {
            "table" => {
                let table_name = self.identifier("a table name")?;
                self.expect("(", "'(' before the column list")?;

                let mut columns = vec![self.parse_column_definition()?];
                while self.accept(",") {
                    columns.push(self.parse_column_definition()?);
                }
                self.expect(")", "')' after the column list")?;

                Ok(Statement::Create(CreateStatement::Table {
                    table_name,
                    columns,
                }))
            }
            "index" => {
                let index_name = self.identifier("an index name")?;
                self.expect("on", "'on'")?;
                let table_name = self.identifier("a table name")?;
                self.expect("(", "'(' before the column list")?;

                let mut columns = vec![self.identifier("a column name")?];
                while self.accept(",") {
                    columns.push(self.identifier("a column name")?);
                }
                self.expect(")", "')' after the column list")?;

                let index_type = if self.accept("using") {
                    Some(self.identifier("an index type")?)
                } else {
                    None
                };

                Ok(Statement::Create(CreateStatement::Index {
                    index_name,
                    table_name,
                    columns,
                    index_type,
                }))
            }
            _ => Err(ParseError::Expected {
                expected: "'table' or 'index'",
                found: kind,
            }),
        }
    }

    fn parse_column_definition(&mut self) -> Result<ColumnDefinition, ParseError> {
        let name = self.identifier("a column name")?;
        let type_token = self.next_token()?;
        let column_type = match type_token.as_str() {
            "int" => ColumnType::Int,
            "text" => ColumnType::Text,
            _ => return Err(ParseError::UnknownColumnType { found: type_token }),
        };

        Ok(ColumnDefinition { name, column_type })
    }

    fn parse_drop(&mut self) -> Result<Statement, ParseError> {
        let kind = self.next_token()?;
        match kind.as_str() {
            "table" => {
                let table_name = self.identifier("a table name")?;
                Ok(Statement::Drop(DropStatement::Table { table_name }))
            }
            "index" => {
                let index_name = self.identifier("an index name")?;
                self.expect("from", "'from'")?;
                let table_name = self.identifier("a table name")?;
                Ok(Statement::Drop(DropStatement::Index {
                    index_name,
                    table_name,
                }))
            }
            _ => Err(ParseError::Expected {
                expected: "'table' or 'index'",
                found: kind,
            }),
        }
    }

    fn parse_show(&mut self) -> Result<Statement, ParseError> {
        let kind = self.next_token()?;
        match kind.as_str() {
            "tables" => Ok(Statement::Show(ShowStatement::Tables)),
            "columns" => {
                self.expect("from", "'from'")?;
                let table_name = self.identifier("a table name")?;
                Ok(Statement::Show(ShowStatement::Columns { table_name }))
            }
            "index" => {
                self.expect("from", "'from'")?;
                let table_name = self.identifier("a table name")?;
                Ok(Statement::Show(ShowStatement::Index { table_name }))
            }
            _ => Err(ParseError::Expected {
                expected: "'tables', 'columns' or 'index'",
                found: kind,
            }),
        }
    }
}
