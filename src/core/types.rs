use crate::core::error::GridError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use strum::{Display, EnumString};

lazy_static! {
    /// Strings that coerce cleanly to a number: optional sign, digits with an
    /// optional fraction (or a bare fraction) and an optional exponent.
    static ref NUMERIC_TEXT: Regex =
        Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$").unwrap();
}

static NULL: CellValue = CellValue::Null;

/// A single cell of a dataset row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Numeric sequence, rendered as a sparkline when the column asks for one
    Series(Vec<f64>),
    /// Any other JSON structure (objects, mixed arrays)
    Other(serde_json::Value),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Null or the empty string; such values are skipped by type inference
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Whether the value reads as a number: a number, or text that looks like one
    pub fn looks_numeric(&self) -> bool {
        match self {
            Self::Number(n) => n.is_finite(),
            Self::Text(s) => NUMERIC_TEXT.is_match(s),
            _ => false,
        }
    }

    /// Numeric coercion. Returns `None` for values that do not coerce, which
    /// callers treat as absent.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) if NUMERIC_TEXT.is_match(s) => s.trim().parse::<f64>().ok(),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_series(&self) -> Option<&[f64]> {
        match self {
            Self::Series(values) => Some(values),
            _ => None,
        }
    }
}

/// Plain decimal between 1e-6 and 1e21, exponent form (`1e+21`, `1.5e-7`) outside
pub fn number_text(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) && n.is_finite() {
        let text = format!("{n:e}");
        return match text.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => text,
        };
    }
    n.to_string()
}

/// Stringified form used for searching and plain text; null becomes ""
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&number_text(*n)),
            Self::Text(s) => f.write_str(s),
            Self::Series(values) => {
                let joined = values
                    .iter()
                    .map(|v| number_text(*v))
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::Null),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => {
                let numbers: Option<Vec<f64>> = items.iter().map(|v| v.as_f64()).collect();
                match numbers {
                    Some(series) => Self::Series(series),
                    None => Self::Other(Value::Array(items)),
                }
            }
            other @ Value::Object(_) => Self::Other(other),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<f64>> for CellValue {
    fn from(value: Vec<f64>) -> Self {
        Self::Series(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

/// One record of a dataset. Keys keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Map<String, serde_json::Value>")]
pub struct Row {
    keys: Vec<String>,
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        let column = column.into();
        if !self.cells.contains_key(&column) {
            self.keys.push(column.clone());
        }
        self.cells.insert(column, value.into());
    }

    /// Value for a column; absent keys read as null
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&NULL)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Row {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        let mut row = Row::new();
        for (key, value) in map {
            row.insert(key, CellValue::from(value));
        }
        row
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, value) in iter {
            row.insert(key, value);
        }
        row
    }
}

/// Inferred kind of a column
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    #[default]
    Textual,
}

/// Sort direction of the active sort column
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    Unsorted,
}

impl SortDirection {
    /// Next state of the tri-state cycle: unsorted -> asc -> desc -> unsorted
    pub fn cycle(self) -> Self {
        match self {
            Self::Unsorted => Self::Asc,
            Self::Asc => Self::Desc,
            Self::Desc => Self::Unsorted,
        }
    }

    /// Arrow shown next to a sorted column header
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
            Self::Unsorted => "",
        }
    }
}

/// Horizontal alignment of a column
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Number of rows per page. Only a fixed set of sizes is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub const ALLOWED: [usize; 4] = [10, 25, 50, 100];

    pub fn get(self) -> usize {
        self.0
    }

    /// Every allowed page size, smallest first
    pub fn all() -> Vec<PageSize> {
        Self::ALLOWED.iter().map(|&n| PageSize(n)).collect()
    }

    /// Next larger allowed size, wrapping to the smallest
    pub fn next(self) -> Self {
        let idx = Self::ALLOWED.iter().position(|&n| n == self.0).unwrap_or(0);
        PageSize(Self::ALLOWED[(idx + 1) % Self::ALLOWED.len()])
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(25)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = GridError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&value) {
            Ok(PageSize(value))
        } else {
            Err(GridError::InvalidPageSize(value))
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
