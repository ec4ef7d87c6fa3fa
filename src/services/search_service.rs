//! Case-insensitive substring search across every column of a row
//!
//! Rows are kept in their original order; a blank query is the identity.

use crate::core::Row;

/// A normalised search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Build a query; blank (empty or whitespace-only) text gives `None`
    pub fn parse(text: &str) -> Option<Self> {
        if text.trim().is_empty() {
            None
        } else {
            Some(Self {
                needle: text.to_lowercase(),
            })
        }
    }

    /// Whether any column's stringified, lower-cased value contains the query
    pub fn matches(&self, row: &Row, columns: &[String]) -> bool {
        columns
            .iter()
            .any(|column| row.get(column).to_string().to_lowercase().contains(&self.needle))
    }
}

/// Service for search operations
pub struct SearchService;

impl SearchService {
    /// Keep the rows where any column contains `query`, case-insensitively.
    ///
    /// A blank query returns every row unchanged.
    pub fn filter<'a, I>(rows: I, columns: &[String], query: &str) -> Vec<&'a Row>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        match SearchQuery::parse(query) {
            None => rows.into_iter().collect(),
            Some(query) => rows
                .into_iter()
                .filter(|row| query.matches(row, columns))
                .collect(),
        }
    }

    /// Whether a search text counts as an active filter
    pub fn is_active(query: &str) -> bool {
        SearchQuery::parse(query).is_some()
    }
}
