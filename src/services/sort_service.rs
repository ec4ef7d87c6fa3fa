//! Single-column, tri-state, stable sorting

use crate::core::{CellValue, ColumnType, Row, SortDirection};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Which column is sorted and in which direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header activation.
    ///
    /// The same column cycles unsorted -> asc -> desc -> unsorted. A different
    /// column always starts at asc and the previous column is cleared.
    pub fn activate(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.direction = self.direction.cycle();
            if self.direction == SortDirection::Unsorted {
                self.column = None;
            }
        } else {
            self.column = Some(column.to_string());
            self.direction = SortDirection::Asc;
        }
    }

    /// Direction shown for `column`
    pub fn direction_for(&self, column: &str) -> SortDirection {
        if self.column.as_deref() == Some(column) {
            self.direction
        } else {
            SortDirection::Unsorted
        }
    }

    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.direction != SortDirection::Unsorted
    }
}

/// Service for sort operations
pub struct SortService;

impl SortService {
    /// Order rows by one column.
    ///
    /// `Unsorted` returns the input as is. Otherwise the sort is stable, and
    /// null values (plus non-coercible values in numeric columns) come after
    /// every other value in both directions.
    pub fn sort<'a>(
        mut rows: Vec<&'a Row>,
        column: &str,
        direction: SortDirection,
        column_type: ColumnType,
    ) -> Vec<&'a Row> {
        if direction == SortDirection::Unsorted {
            return rows;
        }

        rows.sort_by(|a, b| Self::compare(a.get(column), b.get(column), direction, column_type));
        rows
    }

    /// Comparator used by [`SortService::sort`]
    pub fn compare(
        a: &CellValue,
        b: &CellValue,
        direction: SortDirection,
        column_type: ColumnType,
    ) -> Ordering {
        let ordering = match column_type {
            ColumnType::Numeric => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => return Self::directed(x.total_cmp(&y), direction),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            ColumnType::Textual => match (a.is_null(), b.is_null()) {
                (false, false) => {
                    let ordering = locale_compare(&a.to_string(), &b.to_string());
                    return Self::directed(ordering, direction);
                }
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                (true, true) => Ordering::Equal,
            },
        };
        // null placement does not depend on the direction
        ordering
    }

    fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
        match direction {
            SortDirection::Desc => ordering.reverse(),
            _ => ordering,
        }
    }
}

/// Base letters only: decomposed, combining marks dropped, lower-cased
fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-style text ordering. Base letters decide first, so accented letters
/// sort beside their plain forms; then unaccented before accented, then lower
/// case before upper case.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| {
            let accents = |text: &str| text.to_lowercase().nfd().collect::<String>();
            accents(a).cmp(&accents(b))
        })
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => x.cmp(&y),
                })
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn revenue_rows() -> Vec<Row> {
        [1200, 800, 2400, 1600, 950]
            .into_iter()
            .map(|v| Row::new().with("revenue", v))
            .collect()
    }

    fn values(rows: &[&Row], column: &str) -> Vec<String> {
        rows.iter().map(|r| r.get(column).to_string()).collect()
    }

    #[test]
    fn test_numeric_sort_directions() {
        let rows = revenue_rows();
        let refs: Vec<&Row> = rows.iter().collect();

        let asc = SortService::sort(refs.clone(), "revenue", SortDirection::Asc, ColumnType::Numeric);
        assert_eq!(values(&asc, "revenue"), vec!["800", "950", "1200", "1600", "2400"]);

        let desc = SortService::sort(refs.clone(), "revenue", SortDirection::Desc, ColumnType::Numeric);
        assert_eq!(values(&desc, "revenue"), vec!["2400", "1600", "1200", "950", "800"]);

        let none = SortService::sort(refs, "revenue", SortDirection::Unsorted, ColumnType::Numeric);
        assert_eq!(values(&none, "revenue"), vec!["1200", "800", "2400", "1600", "950"]);
    }

    #[test]
    fn test_nulls_last_in_both_directions() {
        let rows = vec![
            Row::new().with("v", None::<i32>),
            Row::new().with("v", 3),
            Row::new().with("v", "junk"),
            Row::new().with("v", 1),
            Row::new(),
        ];
        let refs: Vec<&Row> = rows.iter().collect();

        let asc = SortService::sort(refs.clone(), "v", SortDirection::Asc, ColumnType::Numeric);
        assert_eq!(values(&asc, "v"), vec!["1", "3", "", "junk", ""]);

        let desc = SortService::sort(refs, "v", SortDirection::Desc, ColumnType::Numeric);
        assert_eq!(values(&desc, "v"), vec!["3", "1", "", "junk", ""]);
    }

    #[test]
    fn test_textual_sort_is_case_insensitive_and_stable() {
        let rows = vec![
            Row::new().with("name", "banana").with("id", 1),
            Row::new().with("name", "Apple").with("id", 2),
            Row::new().with("name", "cherry").with("id", 3),
            Row::new().with("name", "apple").with("id", 4),
            Row::new().with("name", "banana").with("id", 5),
        ];
        let refs: Vec<&Row> = rows.iter().collect();
        let asc = SortService::sort(refs, "name", SortDirection::Asc, ColumnType::Textual);
        assert_eq!(values(&asc, "id"), vec!["4", "2", "1", "5", "3"]);
    }

    #[test]
    fn test_numeric_strings_sort_numerically() {
        let rows = vec![
            Row::new().with("v", "10"),
            Row::new().with("v", "9"),
            Row::new().with("v", "100"),
        ];
        let refs: Vec<&Row> = rows.iter().collect();
        let asc = SortService::sort(refs, "v", SortDirection::Asc, ColumnType::Numeric);
        assert_eq!(values(&asc, "v"), vec!["9", "10", "100"]);
    }

    #[test]
    fn test_activate_cycles_and_switches_columns() {
        let mut state = SortState::default();
        state.activate("revenue");
        assert_eq!(state.direction_for("revenue"), SortDirection::Asc);
        state.activate("revenue");
        assert_eq!(state.direction_for("revenue"), SortDirection::Desc);
        state.activate("region");
        assert_eq!(state.direction_for("region"), SortDirection::Asc);
        assert_eq!(state.direction_for("revenue"), SortDirection::Unsorted);
        state.activate("region");
        state.activate("region");
        assert_eq!(state, SortState::default());
        assert!(!state.is_active());
    }

    #[test]
    fn test_accented_text_sorts_with_base_letters() {
        let rows: Vec<Row> = ["fig", "éclair", "apple", "Éclat"]
            .into_iter()
            .map(|v| Row::new().with("name", v))
            .collect();
        let refs: Vec<&Row> = rows.iter().collect();
        let sorted = SortService::sort(refs, "name", SortDirection::Asc, ColumnType::Textual);
        assert_eq!(values(&sorted, "name"), vec!["apple", "éclair", "Éclat", "fig"]);
    }

    #[test]
    fn test_locale_compare() {
        assert_eq!(locale_compare("a", "B"), Ordering::Less);
        assert_eq!(locale_compare("a", "A"), Ordering::Less);
        assert_eq!(locale_compare("same", "same"), Ordering::Equal);
        assert_eq!(locale_compare("éclair", "fig"), Ordering::Less);
        assert_eq!(locale_compare("Émile", "eve"), Ordering::Less);
        assert_eq!(locale_compare("resume", "résumé"), Ordering::Less);
        assert_eq!(locale_compare("zoë", "zoo"), Ordering::Less);
    }
}
