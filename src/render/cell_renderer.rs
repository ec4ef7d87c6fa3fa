use crate::core::{CellValue, ColumnConfig, ColumnType, Row, VisualType};
use crate::render::cell::{CellEncoding, RenderedCell};
use crate::render::encoders::{self, EncodeContext, RenderSettings};
use crate::render::number_format::format_number;
use crate::services::Extent;

/// Signature shared by the value encoders
pub type Encoder = fn(&CellValue, &EncodeContext<'_>) -> Option<CellEncoding>;

/// Turns one cell into display text plus an optional visual encoding
#[derive(Debug, Clone, Default)]
pub struct CellRenderer {
    settings: RenderSettings,
}

impl CellRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render `row[column]`.
    ///
    /// Sparklines win first, then heatmap or bar (per the column's visual
    /// type), then conditional colouring, then plain text. Values an encoder
    /// cannot use fall through silently.
    pub fn render(
        &self,
        row: &Row,
        column: &str,
        column_type: ColumnType,
        config: &ColumnConfig,
        extent: Extent,
    ) -> RenderedCell {
        self.render_value(row.get(column), column_type, config, extent)
    }

    pub fn render_value(
        &self,
        value: &CellValue,
        column_type: ColumnType,
        config: &ColumnConfig,
        extent: Extent,
    ) -> RenderedCell {
        let align = config.resolve_align(column_type);
        let ctx = EncodeContext {
            column_type,
            config,
            extent,
            settings: &self.settings,
        };

        if config.visual_type() == VisualType::Sparkline {
            if let Some(encoding) = encoders::sparkline(value, &ctx) {
                return RenderedCell {
                    text: String::new(),
                    align,
                    encoding,
                };
            }
        }

        let text = plain_text(value, column_type, config);
        let encoding = Self::encoder_for(config.visual_type())
            .and_then(|encode| encode(value, &ctx))
            .or_else(|| encoders::conditional(value, &ctx))
            .unwrap_or(CellEncoding::Plain);

        RenderedCell {
            text,
            align,
            encoding,
        }
    }

    fn encoder_for(visual_type: VisualType) -> Option<Encoder> {
        match visual_type {
            VisualType::Heatmap => Some(encoders::heatmap),
            VisualType::Bar => Some(encoders::bar),
            VisualType::Plain | VisualType::Sparkline => None,
        }
    }
}

/// Plain text of a cell: "" for null, formatted numbers in numeric columns,
/// everything else stringified as is
pub fn plain_text(value: &CellValue, column_type: ColumnType, config: &ColumnConfig) -> String {
    if value.is_null() {
        return String::new();
    }
    match (column_type, value.looks_numeric(), value.as_number()) {
        (ColumnType::Numeric, true, Some(n)) => format_number(n, config.number_format()),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Align, NumberFormat};
    use crate::render::cell::Tone;
    use pretty_assertions::assert_eq;

    fn config(visual_type: VisualType) -> ColumnConfig {
        ColumnConfig {
            visual_type: Some(visual_type),
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_numeric_is_formatted_and_right_aligned() {
        let renderer = CellRenderer::default();
        let row = Row::new().with("revenue", 1234567);
        let cell = renderer.render(
            &row,
            "revenue",
            ColumnType::Numeric,
            &ColumnConfig::default(),
            Extent::default(),
        );
        assert_eq!(cell, RenderedCell::plain("1,234,567".into(), Align::Right));
    }

    #[test]
    fn test_null_renders_empty_text() {
        let renderer = CellRenderer::default();
        let cell = renderer.render(
            &Row::new(),
            "missing",
            ColumnType::Numeric,
            &config(VisualType::Heatmap),
            Extent::new(0.0, 1.0),
        );
        assert_eq!(cell.text, "");
        assert_eq!(cell.encoding, CellEncoding::Plain);
    }

    #[test]
    fn test_textual_values_are_not_formatted() {
        let renderer = CellRenderer::default();
        let cell = renderer.render_value(
            &"1234".into(),
            ColumnType::Textual,
            &ColumnConfig::default(),
            Extent::default(),
        );
        assert_eq!(cell.text, "1234");
        assert_eq!(cell.align, Align::Left);
    }

    #[test]
    fn test_heatmap_with_bad_value_falls_back_to_plain() {
        let renderer = CellRenderer::default();
        let cell = renderer.render_value(
            &"n/a".into(),
            ColumnType::Numeric,
            &config(VisualType::Heatmap),
            Extent::new(0.0, 10.0),
        );
        assert_eq!(cell.text, "n/a");
        assert_eq!(cell.encoding, CellEncoding::Plain);
    }

    #[test]
    fn test_bar_keeps_formatted_text() {
        let renderer = CellRenderer::default();
        let mut cfg = config(VisualType::Bar);
        cfg.number_format = Some(NumberFormat::Currency);
        let cell = renderer.render_value(&1500.into(), ColumnType::Numeric, &cfg, Extent::new(0.0, 3000.0));
        assert_eq!(cell.text, "$1,500");
        assert!(matches!(cell.encoding, CellEncoding::Bar { percent, .. } if percent == 50.0));
    }

    #[test]
    fn test_sparkline_requires_series() {
        let renderer = CellRenderer::default();
        let cfg = config(VisualType::Sparkline);

        let line = renderer.render_value(&vec![1.0, 3.0, 2.0].into(), ColumnType::Textual, &cfg, Extent::default());
        assert!(matches!(line.encoding, CellEncoding::Sparkline(_)));
        assert_eq!(line.text, "");

        let single = renderer.render_value(&vec![1.0].into(), ColumnType::Textual, &cfg, Extent::default());
        assert_eq!(single.encoding, CellEncoding::Empty);

        let scalar = renderer.render_value(&"flat".into(), ColumnType::Textual, &cfg, Extent::default());
        assert_eq!(scalar, RenderedCell::plain("flat".into(), Align::Left));
    }

    #[test]
    fn test_conditional_applies_to_plain_columns() {
        let renderer = CellRenderer::default();
        let cfg = ColumnConfig {
            conditional_color: true,
            number_format: Some(NumberFormat::Percent),
            ..Default::default()
        };
        let cell = renderer.render_value(&(-0.042).into(), ColumnType::Numeric, &cfg, Extent::default());
        assert_eq!(cell.text, "-4.2%");
        assert!(matches!(
            cell.encoding,
            CellEncoding::Conditional { tone: Tone::Negative, .. }
        ));
    }

    #[test]
    fn test_heatmap_takes_precedence_over_conditional() {
        let renderer = CellRenderer::default();
        let cfg = ColumnConfig {
            visual_type: Some(VisualType::Heatmap),
            conditional_color: true,
            ..Default::default()
        };
        let cell = renderer.render_value(&5.into(), ColumnType::Numeric, &cfg, Extent::new(0.0, 10.0));
        assert!(matches!(cell.encoding, CellEncoding::Heatmap { .. }));
    }
}
