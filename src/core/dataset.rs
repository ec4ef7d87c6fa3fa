use crate::core::error::{GridError, GridResult};
use crate::core::types::Row;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Immutable, row-oriented dataset handed to the grid
///
/// The column set is fixed when the dataset is built and comes from the key
/// order of the first row. Later rows may omit keys (read as null); keys that
/// only appear in later rows are not columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset from rows
    pub fn new(rows: Vec<Row>) -> Self {
        let columns = rows
            .first()
            .map(|row| row.keys().map(str::to_string).collect())
            .unwrap_or_default();
        Self { columns, rows }
    }

    /// Parse a JSON array of objects
    pub fn from_json_str(json: &str) -> GridResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Parse a JSON array of objects from any reader (file, stdin)
    pub fn from_reader<R: Read>(reader: R) -> GridResult<Self> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json_value(value)
    }

    /// Load a dataset file from disk
    pub fn from_path(path: &Path) -> GridResult<Self> {
        let file = std::fs::File::open(path)?;
        let dataset = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            "Loaded {} rows x {} columns from {}",
            dataset.row_count(),
            dataset.columns.len(),
            path.display()
        );
        Ok(dataset)
    }

    fn from_json_value(value: serde_json::Value) -> GridResult<Self> {
        let items = match value {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(GridError::InvalidDataset(format!(
                    "expected a JSON array of objects, found {}",
                    json_kind(&other)
                )));
            }
        };

        let rows = items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                serde_json::Value::Object(map) => Ok(Row::from(map)),
                other => Err(GridError::InvalidDataset(format!(
                    "row {idx} is {}, expected an object",
                    json_kind(&other)
                ))),
            })
            .collect::<GridResult<Vec<_>>>()?;

        Ok(Self::new(rows))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

impl From<Vec<Row>> for Dataset {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CellValue;

    #[test]
    fn test_columns_come_from_first_row() {
        let dataset = Dataset::from_json_str(
            r#"[{"region": "north", "revenue": 10}, {"revenue": 5, "extra": true}]"#,
        )
        .unwrap();

        assert_eq!(dataset.columns(), &["region".to_string(), "revenue".to_string()]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows()[1].get("region"), &CellValue::Null);
        assert!(!dataset.has_column("extra"));
    }

    #[test]
    fn test_empty_array_is_valid() {
        let dataset = Dataset::from_json_str("[]").unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.columns().is_empty());
    }

    #[test]
    fn test_rejects_non_array_and_non_object_rows() {
        assert!(matches!(
            Dataset::from_json_str(r#"{"a": 1}"#),
            Err(GridError::InvalidDataset(_))
        ));
        assert!(matches!(
            Dataset::from_json_str(r#"[{"a": 1}, 3]"#),
            Err(GridError::InvalidDataset(msg)) if msg.contains("row 1")
        ));
        assert!(matches!(
            Dataset::from_json_str("not json"),
            Err(GridError::Json(_))
        ));
    }
}
