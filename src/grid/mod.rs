//! The grid view model and its serialisable state and output

pub mod state;
pub mod text_table;
pub mod view;
pub mod view_model;

pub use state::GridState;
pub use text_table::text_table;
pub use view::{ColumnHeader, GridStatus, GridView, NO_DATA_MESSAGE, NO_MATCHES_MESSAGE, PaginationView};
pub use view_model::{ColumnProfile, GridSettings, GridViewModel};
