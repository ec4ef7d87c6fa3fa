use serde::{Deserialize, Serialize};
use std::fmt;

/// All possible actions in the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Action {
    // Column cursor
    MoveLeft,
    MoveRight,

    // Sorting
    SortColumn,
    /// Activate the header of the n-th visible column (0-based)
    SortColumnAt(usize),

    // Paging
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CyclePageSize,

    // Search
    StartSearch,
    ClearSearch,

    // Application
    Quit,
    Confirm,
    Cancel,
}

impl Action {
    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Action::MoveLeft => "Focus previous column",
            Action::MoveRight => "Focus next column",
            Action::SortColumn => "Sort focused column",
            Action::SortColumnAt(_) => "Sort column by number",
            Action::NextPage => "Next page",
            Action::PrevPage => "Previous page",
            Action::FirstPage => "First page",
            Action::LastPage => "Last page",
            Action::CyclePageSize => "Cycle page size",
            Action::StartSearch => "Search",
            Action::ClearSearch => "Clear search",
            Action::Quit => "Quit",
            Action::Confirm => "Confirm",
            Action::Cancel => "Cancel",
        }
    }

    /// Get category for grouping in the help line
    pub fn category(&self) -> ActionCategory {
        match self {
            Action::MoveLeft | Action::MoveRight => ActionCategory::Navigation,
            Action::SortColumn | Action::SortColumnAt(_) => ActionCategory::Sorting,
            Action::NextPage
            | Action::PrevPage
            | Action::FirstPage
            | Action::LastPage
            | Action::CyclePageSize => ActionCategory::Paging,
            Action::StartSearch | Action::ClearSearch => ActionCategory::Search,
            Action::Quit | Action::Confirm | Action::Cancel => ActionCategory::Application,
        }
    }

    /// Every action without a payload, plus the first numbered sort
    pub fn all() -> Vec<Action> {
        vec![
            Action::MoveLeft,
            Action::MoveRight,
            Action::SortColumn,
            Action::SortColumnAt(0),
            Action::NextPage,
            Action::PrevPage,
            Action::FirstPage,
            Action::LastPage,
            Action::CyclePageSize,
            Action::StartSearch,
            Action::ClearSearch,
            Action::Quit,
            Action::Confirm,
            Action::Cancel,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    Sorting,
    Paging,
    Search,
    Application,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionCategory::Navigation => write!(f, "Navigation"),
            ActionCategory::Sorting => write!(f, "Sorting"),
            ActionCategory::Paging => write!(f, "Paging"),
            ActionCategory::Search => write!(f, "Search"),
            ActionCategory::Application => write!(f, "Application"),
        }
    }
}
