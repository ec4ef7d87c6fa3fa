//! Per-column rendering directives supplied alongside a dataset

use crate::core::types::{Align, ColumnType};
use derive_deref::{Deref, DerefMut};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};

/// Visual encoding layered on top of the plain text of a cell
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VisualType {
    #[default]
    Plain,
    Heatmap,
    Bar,
    Sparkline,
}

/// Number formatting applied to numeric cells
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NumberFormat {
    #[default]
    Default,
    Currency,
    Percent,
    Compact,
}

/// Optional directive for one column. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_type: Option<VisualType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<NumberFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    /// `[low, high]` colours for heatmap shading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heatmap_color_range: Option<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_color: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub conditional_color: bool,
}

impl ColumnConfig {
    pub fn visual_type(&self) -> VisualType {
        self.visual_type.unwrap_or_default()
    }

    pub fn number_format(&self) -> NumberFormat {
        self.number_format.unwrap_or_default()
    }

    /// Explicit alignment, else numeric columns right-align and the rest left-align
    pub fn resolve_align(&self, column_type: ColumnType) -> Align {
        self.align.unwrap_or(match column_type {
            ColumnType::Numeric => Align::Right,
            ColumnType::Textual => Align::Left,
        })
    }
}

/// Column configuration keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut, Serialize, Deserialize)]
pub struct ColumnConfigs(pub HashMap<String, ColumnConfig>);

impl ColumnConfigs {
    /// Configuration for a column, or the defaults when none was supplied
    pub fn for_column(&self, column: &str) -> ColumnConfig {
        self.0.get(column).cloned().unwrap_or_default()
    }

    /// Builder-style insert
    pub fn with(mut self, column: impl Into<String>, config: ColumnConfig) -> Self {
        self.0.insert(column.into(), config);
        self
    }

    /// Overlay `other` on top of `self`; entries in `other` win
    pub fn merged(mut self, other: &ColumnConfigs) -> Self {
        for (column, config) in other.iter() {
            self.0.insert(column.clone(), config.clone());
        }
        self
    }
}
