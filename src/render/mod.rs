//! Cell rendering: number formatting and visual encodings

pub mod cell;
pub mod cell_renderer;
pub mod color;
pub mod encoders;
pub mod number_format;

pub use cell::{CellEncoding, RenderedCell, Sparkline, Tone};
pub use cell_renderer::{CellRenderer, plain_text};
pub use color::Rgb;
pub use encoders::{EncodeContext, RenderSettings};
pub use number_format::format_number;
