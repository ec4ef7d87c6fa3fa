use crate::core::{Align, ColumnType, SortDirection};
use crate::render::RenderedCell;
use serde::Serialize;
use strum::Display;

pub const NO_DATA_MESSAGE: &str = "No data";
pub const NO_MATCHES_MESSAGE: &str = "No matching rows";

/// Resolved header of one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub name: String,
    pub column_type: ColumnType,
    pub align: Align,
    pub sort: SortDirection,
}

impl ColumnHeader {
    /// Header label with the sort arrow appended when sorted
    pub fn label(&self) -> String {
        match self.sort {
            SortDirection::Unsorted => self.name.clone(),
            direction => format!("{} {}", self.name, direction.indicator()),
        }
    }
}

/// Whether there is anything to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum GridStatus {
    #[default]
    Ready,
    /// The dataset has no rows
    NoData,
    /// Rows exist but the search matched none of them
    NoMatches,
}

impl GridStatus {
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Ready => None,
            Self::NoData => Some(NO_DATA_MESSAGE),
            Self::NoMatches => Some(NO_MATCHES_MESSAGE),
        }
    }
}

/// State of the pagination controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaginationView {
    /// 0-based
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub available_page_sizes: Vec<usize>,
    pub has_prev: bool,
    pub has_next: bool,
    /// Controls are only shown when the filtered row count exceeds the threshold
    pub visible: bool,
}

impl PaginationView {
    /// "Page {page+1} of {total_pages}"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page + 1, self.total_pages)
    }
}

/// Render-ready output of the grid pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridView {
    pub columns: Vec<ColumnHeader>,
    /// Rendered cells of the current page, in column order
    pub rows: Vec<Vec<RenderedCell>>,
    pub status: GridStatus,
    pub filtered_count: usize,
    pub total_count: usize,
    pub summary: String,
    pub pagination: PaginationView,
    /// 1-based number of the first row on this page, 0 when the page is empty
    pub first_row_number: usize,
}

impl GridView {
    pub fn message(&self) -> Option<&'static str> {
        self.status.message()
    }

    /// "{filtered} of {total} rows" while filtering, "{total} rows" otherwise
    pub fn summary_text(filtered: usize, total: usize, filtering: bool) -> String {
        if filtering {
            format!("{filtered} of {total} rows")
        } else {
            format!("{total} rows")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_contracts() {
        assert_eq!(GridStatus::NoData.message(), Some("No data"));
        assert_eq!(GridStatus::NoMatches.message(), Some("No matching rows"));
        assert_eq!(GridStatus::Ready.message(), None);
        assert_eq!(GridView::summary_text(0, 5, true), "0 of 5 rows");
        assert_eq!(GridView::summary_text(5, 5, false), "5 rows");

        let pagination = PaginationView {
            current_page: 0,
            total_pages: 3,
            ..Default::default()
        };
        assert_eq!(pagination.label(), "Page 1 of 3");
    }

    #[test]
    fn test_header_label_shows_direction() {
        let mut header = ColumnHeader {
            name: "revenue".into(),
            column_type: ColumnType::Numeric,
            align: Align::Right,
            sort: SortDirection::Unsorted,
        };
        assert_eq!(header.label(), "revenue");
        header.sort = SortDirection::Desc;
        assert_eq!(header.label(), "revenue ▼");
    }
}
