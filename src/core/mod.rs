pub mod column_config;
pub mod dataset;
pub mod error;
pub mod types;

pub use column_config::{ColumnConfig, ColumnConfigs, NumberFormat, VisualType};
pub use dataset::Dataset;
pub use error::{GridError, GridResult};
pub use types::*;
