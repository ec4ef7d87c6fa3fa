use crate::core::PageSize;
use crate::services::SortState;
use serde::{Deserialize, Serialize};

/// Interaction state owned by the grid view model
///
/// Serialisable so a host can persist and restore a view; the derived view is
/// always recomputed from this state and the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridState {
    pub search_text: String,
    pub sort: SortState,
    /// 0-based
    pub current_page: usize,
    pub page_size: PageSize,
}

impl GridState {
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Default::default()
        }
    }
}
