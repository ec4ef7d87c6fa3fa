use crate::core::Align;
use crate::grid::{GridView, GridViewModel};
use crate::render::{CellEncoding, RenderedCell};
use crate::tui::{Action, Component, Focusable, Theme};
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use tracing::debug;

/// Width of a bar encoding in terminal cells
pub const BAR_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 40;

/// The data table: headers with sort arrows, the current page of rendered
/// cells and a column cursor used for sorting.
#[derive(Debug, Default)]
pub struct GridTable {
    focused_column: usize,
    focused: bool,
}

impl GridTable {
    pub fn new() -> Self {
        Self {
            focused_column: 0,
            focused: true,
        }
    }

    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    fn sort_column_at(&mut self, idx: usize, model: &mut GridViewModel) -> bool {
        let Some(name) = model.dataset().columns().get(idx).cloned() else {
            debug!("No column {} to sort", idx + 1);
            return false;
        };
        self.focused_column = idx;
        model.set_sort(&name);
        true
    }

    /// Terminal widths: row number column first, then one per data column
    fn column_widths(view: &GridView) -> Vec<Constraint> {
        let number_width = (view.first_row_number + view.rows.len())
            .to_string()
            .len()
            .max(1);
        let mut widths = vec![Constraint::Length(number_width as u16)];

        for (idx, header) in view.columns.iter().enumerate() {
            let content = view
                .rows
                .iter()
                .map(|row| row.get(idx).map(cell_width).unwrap_or(0))
                .max()
                .unwrap_or(0);
            let width = content
                .max(header.label().chars().count())
                .clamp(1, MAX_COLUMN_WIDTH);
            widths.push(Constraint::Length(width as u16));
        }
        widths
    }
}

/// Display width a rendered cell needs
fn cell_width(cell: &RenderedCell) -> usize {
    match &cell.encoding {
        CellEncoding::Bar { .. } => BAR_WIDTH + 1 + cell.text.chars().count(),
        CellEncoding::Sparkline(sparkline) => sparkline.values.len(),
        CellEncoding::Empty => 0,
        _ => cell.text.chars().count(),
    }
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Right,
    }
}

/// Filled part of a bar; out-of-range percentages are drawn clamped
pub fn bar_glyphs(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

/// Translate a rendered cell into a styled table cell
pub fn to_table_cell(cell: &RenderedCell, theme: &Theme) -> Cell<'static> {
    let align = alignment(cell.align);
    match &cell.encoding {
        CellEncoding::Plain => Cell::from(Line::from(cell.text.clone()).alignment(align)),
        CellEncoding::Empty => Cell::from(""),
        CellEncoding::Heatmap {
            background,
            foreground,
            ..
        } => Cell::from(Line::from(cell.text.clone()).alignment(align))
            .style(Style::default().bg(Color::from(*background)).fg(Color::from(*foreground))),
        CellEncoding::Bar { percent, color } => Cell::from(
            Line::from(vec![
                Span::styled(bar_glyphs(*percent), Style::default().fg(Color::from(*color))),
                Span::raw(" "),
                Span::raw(cell.text.clone()),
            ])
            .alignment(align),
        ),
        CellEncoding::Sparkline(sparkline) => Cell::from(
            Line::from(Span::styled(
                sparkline.blocks(),
                Style::default().fg(theme.header_fg),
            ))
            .alignment(align),
        ),
        CellEncoding::Conditional { color, .. } => Cell::from(
            Line::from(Span::styled(
                cell.text.clone(),
                Style::default().fg(Color::from(*color)),
            ))
            .alignment(align),
        ),
    }
}

impl Component for GridTable {
    fn handle_action(&mut self, action: Action, model: &mut GridViewModel) -> Result<bool> {
        let column_count = model.dataset().columns().len();
        match action {
            Action::MoveLeft => {
                self.focused_column = self.focused_column.saturating_sub(1);
                Ok(true)
            }
            Action::MoveRight => {
                if self.focused_column + 1 < column_count {
                    self.focused_column += 1;
                }
                Ok(true)
            }
            Action::SortColumn => Ok(self.sort_column_at(self.focused_column, model)),
            Action::SortColumnAt(idx) => Ok(self.sort_column_at(idx, model)),
            Action::NextPage => {
                model.next_page();
                Ok(true)
            }
            Action::PrevPage => {
                model.prev_page();
                Ok(true)
            }
            Action::FirstPage => {
                model.set_page(0);
                Ok(true)
            }
            Action::LastPage => {
                let last = model.view().pagination.total_pages.saturating_sub(1);
                model.set_page(last);
                Ok(true)
            }
            Action::CyclePageSize => {
                let next = model.state().page_size.next();
                model.set_page_size(next);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, model: &GridViewModel, theme: &Theme) {
        let view = model.view();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", view.summary))
            .border_style(theme.border_style(self.focused));

        if let Some(message) = view.message() {
            let paragraph = Paragraph::new(message)
                .style(theme.message_style())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let header_cells = std::iter::once(Cell::from("#")).chain(
            view.columns.iter().enumerate().map(|(idx, header)| {
                let style = if idx == self.focused_column {
                    theme.focused_header_style()
                } else {
                    theme.header_style()
                };
                Cell::from(Line::from(header.label()).alignment(alignment(header.align)))
                    .style(style)
            }),
        );
        let header = Row::new(header_cells).style(theme.header_style());

        let rows = view.rows.iter().enumerate().map(|(idx, cells)| {
            let number = Cell::from(Line::from((view.first_row_number + idx).to_string()).right_aligned())
                .style(theme.row_number_style());
            let row_style = if idx % 2 == 1 {
                theme.alt_row_style()
            } else {
                theme.normal_style()
            };
            Row::new(std::iter::once(number).chain(cells.iter().map(|c| to_table_cell(c, theme))))
                .style(row_style)
        });

        let table = Table::new(rows, Self::column_widths(view))
            .header(header)
            .column_spacing(2)
            .block(block);

        frame.render_widget(table, area);
    }

    fn name(&self) -> &str {
        "GridTable"
    }
}

impl Focusable for GridTable {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
