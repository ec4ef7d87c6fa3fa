//! Plain-text rendering of a `GridView` for non-interactive output

use crate::core::Align;
use crate::grid::view::GridView;
use crate::render::{CellEncoding, RenderedCell};

const SEPARATOR: &str = "  ";

/// What a cell looks like without colour
fn cell_text(cell: &RenderedCell) -> String {
    match &cell.encoding {
        CellEncoding::Sparkline(sparkline) => sparkline.blocks(),
        _ => cell.text.clone(),
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Center => format!("{text:^width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}

/// Aligned columns, then the status message, summary and page indicator
pub fn text_table(view: &GridView) -> String {
    let labels: Vec<String> = view.columns.iter().map(|c| c.label()).collect();
    let cells: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let widths: Vec<usize> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            cells
                .iter()
                .filter_map(|row| row.get(idx))
                .map(|text| text.chars().count())
                .chain(std::iter::once(label.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::new();
    if !labels.is_empty() {
        let header = view
            .columns
            .iter()
            .zip(&labels)
            .zip(&widths)
            .map(|((column, label), width)| pad(label, *width, column.align))
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(header.trim_end().to_string());
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join(SEPARATOR),
        );
    }

    for (row, texts) in view.rows.iter().zip(&cells) {
        let line = row
            .iter()
            .zip(texts)
            .zip(&widths)
            .map(|((cell, text), width)| pad(text, *width, cell.align))
            .collect::<Vec<_>>()
            .join(SEPARATOR);
        lines.push(line.trim_end().to_string());
    }

    if let Some(message) = view.message() {
        lines.push(message.to_string());
    }
    lines.push(String::new());
    let mut footer = view.summary.clone();
    if view.pagination.visible {
        footer.push_str(" | ");
        footer.push_str(&view.pagination.label());
    }
    lines.push(footer);

    lines.join("\n")
}
