use relation::{DataType, Row};
use std::fmt;

/// The printable outcome of one statement. Owns its column names, column
/// attributes and rows outright; DDL results carry only a message.
#[derive(Debug)]
pub struct QueryResult {
    column_names: Vec<String>,
    column_attributes: Vec<DataType>,
    rows: Vec<Row>,
    message: String,
}

impl QueryResult {
    /// A message-only result, as produced by DDL statements.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            column_names: Vec::new(),
            column_attributes: Vec::new(),
            rows: Vec::new(),
            message: message.into(),
        }
    }

    /// A rowset result, as produced by `SHOW` statements.
    pub fn with_rows(
        column_names: Vec<String>,
        column_attributes: Vec<DataType>,
        rows: Vec<Row>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            column_names,
            column_attributes,
            rows,
            message: message.into(),
        }
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column_attributes(&self) -> &[DataType] {
        &self.column_attributes
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for QueryResult {
    /// Renders the rowset (when there is one) followed by the message:
    /// column names separated by single spaces, a `+----------+` rule
    /// spanning the columns, then one line per row with the values printed
    /// by their [`relation::Value`] rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.column_names.is_empty() {
            for column_name in &self.column_names {
                write!(f, "{column_name} ")?;
            }
            writeln!(f)?;

            write!(f, "+")?;
            for _ in &self.column_names {
                write!(f, "----------+")?;
            }
            writeln!(f)?;

            for row in &self.rows {
                for column_name in &self.column_names {
                    match row.get(column_name) {
                        Some(value) => write!(f, "{value} ")?,
                        None => write!(f, "??? ")?,
                    }
                }
                writeln!(f)?;
            }
        }

        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod query_result_tests {
    use super::*;
    use relation::Value;
    use relation::value::row_from;

    #[test]
    fn message_only_results_print_just_the_message() {
        let result = QueryResult::with_message("created foo");
        assert_eq!(result.to_string(), "created foo");
    }

    #[test]
    fn rowsets_print_names_rule_rows_then_message() {
        let rows = vec![row_from([
            ("table_name", Value::from("ha")),
            ("seq_in_index", Value::from(1)),
            ("is_unique", Value::from(true)),
        ])];
        let result = QueryResult::with_rows(
            vec![
                "table_name".to_string(),
                "seq_in_index".to_string(),
                "is_unique".to_string(),
            ],
            vec![DataType::Text, DataType::Int, DataType::Boolean],
            rows,
            "successfully returned 1 rows",
        );

        let expected = "table_name seq_in_index is_unique \n\
                        +----------+----------+----------+\n\
                        \"ha\" 1 true \n\
                        successfully returned 1 rows";
        assert_eq!(result.to_string(), expected);
    }
}
