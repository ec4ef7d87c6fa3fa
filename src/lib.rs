#![allow(clippy::collapsible_if)]

pub mod config;
pub mod core;
pub mod grid;
pub mod logging;
pub mod render;
pub mod services;
pub mod tui;

// Re-export commonly used types
pub use crate::core::{CellValue, ColumnConfig, ColumnConfigs, Dataset, GridError, GridResult, PageSize, Row};
pub use crate::grid::{GridSettings, GridState, GridView, GridViewModel};
pub use crate::render::{CellRenderer, RenderSettings};
