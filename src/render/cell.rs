use crate::core::Align;
use crate::render::color::Rgb;
use serde::Serialize;
use strum::Display;

/// Sign of a conditionally coloured value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

/// Polyline description of an inline sparkline.
///
/// Coordinates are in pixels with the origin at the top left, so larger values
/// have smaller `y`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sparkline {
    pub width: f64,
    pub height: f64,
    pub points: Vec<(f64, f64)>,
    /// The raw values, kept for renderers that draw block characters
    pub values: Vec<f64>,
}

impl Sparkline {
    /// Points in SVG `points` attribute form: `"x1,y1 x2,y2 ..."`
    pub fn svg_points(&self) -> String {
        self.points
            .iter()
            .map(|(x, y)| format!("{},{}", trim_float(*x), trim_float(*y)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One block character per value, scaled to the series range
    pub fn blocks(&self) -> String {
        const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
        self.points
            .iter()
            .map(|(_, y)| {
                let level = if self.height > 0.0 {
                    1.0 - (y / self.height)
                } else {
                    0.0
                };
                BARS[((level * 7.0).round() as usize).min(7)]
            })
            .collect()
    }
}

fn trim_float(v: f64) -> String {
    let s = format!("{:.2}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Encoding layered on top of a cell's text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CellEncoding {
    Plain,
    /// Nothing is drawn (a sparkline with fewer than two points)
    Empty,
    Heatmap {
        background: Rgb,
        foreground: Rgb,
        intensity: f64,
    },
    Bar {
        /// Width of the filled segment in percent; may exceed 100
        percent: f64,
        color: Rgb,
    },
    Sparkline(Sparkline),
    Conditional {
        tone: Tone,
        color: Rgb,
    },
}

/// A fully rendered cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCell {
    pub text: String,
    pub align: Align,
    pub encoding: CellEncoding,
}

impl RenderedCell {
    pub fn plain(text: String, align: Align) -> Self {
        Self {
            text,
            align,
            encoding: CellEncoding::Plain,
        }
    }
}
