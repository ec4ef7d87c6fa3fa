//! Visual encoders. Each one is a pure function from a cell value and its
//! column context to an optional encoding; `None` means "not applicable,
//! fall through to the next encoder".

use crate::core::{CellValue, ColumnConfig, ColumnType};
use crate::render::cell::{CellEncoding, Sparkline, Tone};
use crate::render::color::Rgb;
use crate::services::Extent;
use serde::{Deserialize, Serialize};

/// Colours and geometry shared by every column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub sparkline_width: f64,
    pub sparkline_height: f64,
    pub heatmap_low: Rgb,
    pub heatmap_high: Rgb,
    pub bar_color: Rgb,
    pub positive_color: Rgb,
    pub negative_color: Rgb,
    pub neutral_color: Rgb,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            sparkline_width: 80.0,
            sparkline_height: 24.0,
            heatmap_low: Rgb::new(0xdb, 0xea, 0xfe),
            heatmap_high: Rgb::new(0x1e, 0x3a, 0x8a),
            bar_color: Rgb::new(0x3b, 0x82, 0xf6),
            positive_color: Rgb::new(0x16, 0xa3, 0x4a),
            negative_color: Rgb::new(0xdc, 0x26, 0x26),
            neutral_color: Rgb::new(0x6b, 0x72, 0x80),
        }
    }
}

/// Everything an encoder may look at besides the value itself
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    pub column_type: ColumnType,
    pub config: &'a ColumnConfig,
    pub extent: Extent,
    pub settings: &'a RenderSettings,
}

impl EncodeContext<'_> {
    /// The value as a number, only for numeric columns
    fn numeric(&self, value: &CellValue) -> Option<f64> {
        match self.column_type {
            ColumnType::Numeric => value.as_number(),
            ColumnType::Textual => None,
        }
    }
}

/// Sparkline for numeric series. Series with fewer than two points draw
/// nothing; non-series values are not handled here.
pub fn sparkline(value: &CellValue, ctx: &EncodeContext<'_>) -> Option<CellEncoding> {
    let values = value.as_series()?;
    if values.len() < 2 {
        return Some(CellEncoding::Empty);
    }

    let width = ctx.settings.sparkline_width;
    let height = ctx.settings.sparkline_height;
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let step = width / (values.len() - 1) as f64;

    let points = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let y = if max == min {
                height / 2.0
            } else {
                height - (v - min) / (max - min) * height
            };
            (i as f64 * step, y)
        })
        .collect();

    Some(CellEncoding::Sparkline(Sparkline {
        width,
        height,
        points,
        values: values.to_vec(),
    }))
}

/// Background shading blended between the column's low and high colours
pub fn heatmap(value: &CellValue, ctx: &EncodeContext<'_>) -> Option<CellEncoding> {
    let v = ctx.numeric(value)?;
    let t = ctx.extent.normalize(v);

    let (low, high) = match &ctx.config.heatmap_color_range {
        Some((low, high)) => (
            Rgb::parse_or(Some(low), ctx.settings.heatmap_low),
            Rgb::parse_or(Some(high), ctx.settings.heatmap_high),
        ),
        None => (ctx.settings.heatmap_low, ctx.settings.heatmap_high),
    };
    let foreground = if t > 0.5 { Rgb::WHITE } else { Rgb::INK };

    Some(CellEncoding::Heatmap {
        background: low.lerp(high, t),
        foreground,
        intensity: t,
    })
}

/// Proportional bar; the percentage is not clamped
pub fn bar(value: &CellValue, ctx: &EncodeContext<'_>) -> Option<CellEncoding> {
    let v = ctx.numeric(value)?;
    let color = Rgb::parse_or(ctx.config.bar_color.as_deref(), ctx.settings.bar_color);

    Some(CellEncoding::Bar {
        percent: ctx.extent.normalize(v) * 100.0,
        color,
    })
}

/// Positive, negative or neutral text colour
pub fn conditional(value: &CellValue, ctx: &EncodeContext<'_>) -> Option<CellEncoding> {
    if !ctx.config.conditional_color {
        return None;
    }
    let v = ctx.numeric(value)?;
    let (tone, color) = if v > 0.0 {
        (Tone::Positive, ctx.settings.positive_color)
    } else if v < 0.0 {
        (Tone::Negative, ctx.settings.negative_color)
    } else {
        (Tone::Neutral, ctx.settings.neutral_color)
    };

    Some(CellEncoding::Conditional { tone, color })
}
