use crate::grid::{GridView, GridViewModel};
use crate::tui::{Action, Component, KeyBindings, Theme};
use color_eyre::Result;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

const HINT_ACTIONS: [Action; 6] = [
    Action::StartSearch,
    Action::SortColumn,
    Action::NextPage,
    Action::PrevPage,
    Action::CyclePageSize,
    Action::Quit,
];

/// Bottom line: pagination controls (when shown) and key hints
#[derive(Debug, Default)]
pub struct StatusBar {
    hints: String,
}

impl StatusBar {
    pub fn new(keybindings: &KeyBindings) -> Self {
        let hints = HINT_ACTIONS
            .iter()
            .filter_map(|action| {
                let keys = keybindings.get_keys_for_action(*action);
                keys.first()
                    .map(|key| format!("{key}: {}", action.description()))
            })
            .collect::<Vec<_>>()
            .join("  ");
        Self { hints }
    }

    /// Pagination text, or `None` while the controls are hidden
    pub fn pagination_text(view: &GridView) -> Option<String> {
        let pagination = &view.pagination;
        if !pagination.visible {
            return None;
        }
        let sizes = pagination
            .available_page_sizes
            .iter()
            .map(|size| {
                if *size == pagination.page_size {
                    format!("[{size}]")
                } else {
                    size.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        Some(format!(
            "{} {} {}  rows/page: {}",
            if pagination.has_prev { "◀" } else { " " },
            pagination.label(),
            if pagination.has_next { "▶" } else { " " },
            sizes
        ))
    }
}

impl Component for StatusBar {
    fn handle_action(&mut self, _action: Action, _model: &mut GridViewModel) -> Result<bool> {
        Ok(false)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, model: &GridViewModel, theme: &Theme) {
        let mut spans = Vec::new();
        if let Some(text) = Self::pagination_text(model.view()) {
            spans.push(Span::styled(text, theme.header_style()));
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(self.hints.clone(), theme.muted_style()));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn name(&self) -> &str {
        "StatusBar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColumnConfigs, Dataset, Row};

    fn model(rows: usize) -> GridViewModel {
        let rows = (0..rows).map(|i| Row::new().with("n", i as i64)).collect();
        GridViewModel::new(Dataset::new(rows), ColumnConfigs::default())
    }

    #[test]
    fn test_pagination_hidden_at_threshold() {
        assert_eq!(StatusBar::pagination_text(model(10).view()), None);
    }

    #[test]
    fn test_pagination_text() {
        let mut model = model(55);
        model.set_page(1);
        let text = StatusBar::pagination_text(model.view()).unwrap();
        assert_eq!(text, "◀ Page 2 of 3 ▶  rows/page: 10 [25] 50 100");
    }

    #[test]
    fn test_hints_use_bound_keys() {
        let bar = StatusBar::new(&KeyBindings::default());
        assert!(bar.hints.starts_with("/: Search"));
        assert!(bar.hints.contains("q: Quit"));
    }
}
