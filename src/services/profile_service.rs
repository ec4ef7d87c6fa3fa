//! Column profiling: type inference and full-dataset extents
//!
//! Both are computed once per dataset. They never look at search or sort
//! state, so heatmap and bar encodings stay comparable across filtered views.

use crate::core::{ColumnType, Row};
use serde::{Deserialize, Serialize};

/// `(min, max)` of a numeric column over the unfiltered dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` inside the extent, `0.0` for a degenerate extent.
    /// Not clamped: values outside the extent map outside `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max == self.min {
            0.0
        } else {
            (value - self.min) / self.span()
        }
    }
}

/// Service for per-column profiling
pub struct ProfileService;

impl ProfileService {
    /// Classify a column from the first non-null, non-empty value in row order.
    ///
    /// The result is final: later rows that contradict it are not consulted.
    pub fn classify<'a, I>(rows: I, column: &str) -> ColumnType
    where
        I: IntoIterator<Item = &'a Row>,
    {
        rows.into_iter()
            .map(|row| row.get(column))
            .find(|value| !value.is_blank())
            .map(|value| {
                if value.looks_numeric() {
                    ColumnType::Numeric
                } else {
                    ColumnType::Textual
                }
            })
            .unwrap_or_default()
    }

    /// Fold every coercible value of a column into `(min, max)`.
    ///
    /// Values that do not coerce to a number are skipped; a column with no
    /// numeric value at all yields `(0, 0)`.
    pub fn extent<'a, I>(rows: I, column: &str) -> Extent
    where
        I: IntoIterator<Item = &'a Row>,
    {
        rows.into_iter()
            .filter_map(|row| row.get(column).as_number())
            .fold(None, |acc: Option<Extent>, v| match acc {
                None => Some(Extent::new(v, v)),
                Some(e) => Some(Extent::new(e.min.min(v), e.max.max(v))),
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellValue;

    fn rows(values: Vec<CellValue>) -> Vec<Row> {
        values.into_iter().map(|v| Row::new().with("col", v)).collect()
    }

    #[test]
    fn test_classify_skips_blank_values() {
        let data = rows(vec![CellValue::Null, "".into(), "42".into(), "abc".into()]);
        assert_eq!(ProfileService::classify(&data, "col"), ColumnType::Numeric);
    }

    #[test]
    fn test_classify_uses_first_value_only() {
        let data = rows(vec!["n/a".into(), 1.into(), 2.into(), 3.into()]);
        assert_eq!(ProfileService::classify(&data, "col"), ColumnType::Textual);
    }

    #[test]
    fn test_classify_defaults_to_textual() {
        let data = rows(vec![CellValue::Null, "".into()]);
        assert_eq!(ProfileService::classify(&data, "col"), ColumnType::Textual);
        assert_eq!(ProfileService::classify(&data, "missing"), ColumnType::Textual);
    }

    #[test]
    fn test_classify_booleans_and_series_are_textual() {
        assert_eq!(
            ProfileService::classify(&rows(vec![true.into()]), "col"),
            ColumnType::Textual
        );
        assert_eq!(
            ProfileService::classify(&rows(vec![vec![1.0, 2.0].into()]), "col"),
            ColumnType::Textual
        );
    }

    #[test]
    fn test_extent_ignores_non_numeric() {
        let data = rows(vec![
            5.into(),
            "oops".into(),
            CellValue::Null,
            "-2.5".into(),
            12.into(),
        ]);
        assert_eq!(ProfileService::extent(&data, "col"), Extent::new(-2.5, 12.0));
    }

    #[test]
    fn test_extent_without_numbers_is_zero() {
        let data = rows(vec!["a".into(), CellValue::Null]);
        assert_eq!(ProfileService::extent(&data, "col"), Extent::new(0.0, 0.0));
        assert_eq!(ProfileService::extent(&Vec::<Row>::new(), "col"), Extent::default());
    }

    #[test]
    fn test_normalize_handles_degenerate_extent() {
        assert_eq!(Extent::new(3.0, 3.0).normalize(3.0), 0.0);
        assert_eq!(Extent::new(0.0, 10.0).normalize(5.0), 0.5);
        assert_eq!(Extent::new(0.0, 10.0).normalize(20.0), 2.0);
    }
}
