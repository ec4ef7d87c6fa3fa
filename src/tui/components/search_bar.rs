use crate::grid::GridViewModel;
use crate::tui::{Action, Component, Focusable, Theme};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Single-line search input. The grid is re-filtered on every keystroke.
#[derive(Debug, Default)]
pub struct SearchBar {
    editing: bool,
    /// Search text in effect before editing started, restored on cancel
    previous: String,
    buffer: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Feed a key press while editing. Returns true when the key was consumed.
    pub fn input(&mut self, key: &KeyEvent, model: &mut GridViewModel) -> bool {
        if !self.editing {
            return false;
        }
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.buffer.push(c);
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            _ => return false,
        }
        model.set_search(self.buffer.clone());
        true
    }
}

impl Component for SearchBar {
    fn handle_action(&mut self, action: Action, model: &mut GridViewModel) -> Result<bool> {
        match action {
            Action::StartSearch if !self.editing => {
                self.editing = true;
                self.previous = model.state().search_text.clone();
                self.buffer = self.previous.clone();
                Ok(true)
            }
            Action::Confirm if self.editing => {
                self.editing = false;
                Ok(true)
            }
            Action::Cancel if self.editing => {
                self.editing = false;
                self.buffer = std::mem::take(&mut self.previous);
                model.set_search(self.buffer.clone());
                Ok(true)
            }
            Action::ClearSearch if !self.editing => {
                self.buffer.clear();
                model.set_search("");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, model: &GridViewModel, theme: &Theme) {
        let text = if self.editing {
            Line::from(vec![
                Span::raw(self.buffer.clone()),
                Span::styled("▏", theme.header_style()),
            ])
        } else if model.state().search_text.is_empty() {
            Line::from(Span::styled("press / to search", theme.muted_style()))
        } else {
            Line::from(model.state().search_text.clone())
        };

        let paragraph = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(theme.border_style(self.editing)),
        );
        frame.render_widget(paragraph, area);
    }

    fn name(&self) -> &str {
        "SearchBar"
    }
}

impl Focusable for SearchBar {
    fn is_focused(&self) -> bool {
        self.editing
    }

    fn set_focused(&mut self, focused: bool) {
        self.editing = focused;
    }
}
