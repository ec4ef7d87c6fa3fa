use crate::grid::GridViewModel;
use crate::tui::components::{GridTable, SearchBar, StatusBar};
use crate::tui::{Action, Component, KeyBindings, Theme};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::time::Duration;
use tracing::debug;

/// Application state
///
/// Owns the grid view model and routes key events to the components.
pub struct App {
    model: GridViewModel,
    table: GridTable,
    search_bar: SearchBar,
    status_bar: StatusBar,
    keybindings: KeyBindings,
    theme: Theme,
    should_quit: bool,
}

impl App {
    pub fn new(model: GridViewModel, keybindings: KeyBindings) -> Self {
        let status_bar = StatusBar::new(&keybindings);
        Self {
            model,
            table: GridTable::new(),
            search_bar: SearchBar::new(),
            status_bar,
            keybindings,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    /// Draw and handle input until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key)?;
                }
            }
        }
        Ok(())
    }

    /// Handle a key event
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Only handle key press events, ignore release/repeat
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // While the search bar is open it takes text input; only Enter and Esc
        // go through the bindings
        if self.search_bar.is_editing() {
            match key.code {
                KeyCode::Enter => return self.handle_action(Action::Confirm),
                KeyCode::Esc => return self.handle_action(Action::Cancel),
                _ => {
                    self.search_bar.input(&key, &mut self.model);
                    return Ok(());
                }
            }
        }

        if let Some(action) = self.keybindings.get_action(&key) {
            self.handle_action(action)?;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action) -> Result<()> {
        debug!("Action: {:?}", action);
        if action == Action::Quit {
            self.should_quit = true;
            return Ok(());
        }

        if self.search_bar.handle_action(action, &mut self.model)? {
            return Ok(());
        }
        self.table.handle_action(action, &mut self.model)?;
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // search
                Constraint::Min(0),    // table
                Constraint::Length(1), // status
            ])
            .split(frame.area());

        self.search_bar
            .render(frame, chunks[0], &self.model, &self.theme);
        self.table.render(frame, chunks[1], &self.model, &self.theme);
        self.status_bar
            .render(frame, chunks[2], &self.model, &self.theme);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn model(&self) -> &GridViewModel {
        &self.model
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColumnConfig, ColumnConfigs, Dataset, Row, SortDirection, VisualType};
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn create_test_app(rows: usize) -> App {
        let rows = (0..rows)
            .map(|i| {
                Row::new()
                    .with("city", format!("city {i}"))
                    .with("sales", (i * 10) as i64)
            })
            .collect();
        let configs = ColumnConfigs::default().with(
            "sales",
            ColumnConfig {
                visual_type: Some(VisualType::Bar),
                ..Default::default()
            },
        );
        App::new(
            GridViewModel::new(Dataset::new(rows), configs),
            KeyBindings::default(),
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_quit_action() {
        let mut app = create_test_app(3);
        assert!(!app.should_quit());
        app.handle_key_event(press(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit());
    }

    #[test]
    fn test_search_mode_captures_letters() {
        let mut app = create_test_app(30);
        app.handle_key_event(press(KeyCode::Char('/'))).unwrap();
        // 'q' and 'n' are search text here, not quit / next page
        for c in "city 1n".chars() {
            app.handle_key_event(press(KeyCode::Char(c))).unwrap();
        }
        assert!(!app.should_quit());
        assert_eq!(app.model().state().search_text, "city 1n");
        assert_eq!(app.model().view().filtered_count, 0);

        app.handle_key_event(press(KeyCode::Backspace)).unwrap();
        app.handle_key_event(press(KeyCode::Enter)).unwrap();
        // city 1, city 10..19
        assert_eq!(app.model().view().filtered_count, 11);

        app.handle_key_event(press(KeyCode::Char('c'))).unwrap();
        assert_eq!(app.model().view().filtered_count, 30);
    }

    #[test]
    fn test_number_keys_sort() {
        let mut app = create_test_app(5);
        app.handle_key_event(press(KeyCode::Char('2'))).unwrap();
        app.handle_key_event(press(KeyCode::Char('2'))).unwrap();
        assert_eq!(
            app.model().state().sort.direction_for("sales"),
            SortDirection::Desc
        );
    }

    #[test]
    fn test_render_shows_summary_and_pagination() {
        let mut app = create_test_app(30);
        let text = screen(&mut app);
        assert!(text.contains("30 rows"));
        assert!(text.contains("Page 1 of 2"));
        assert!(text.contains("sales"));

        app.handle_key_event(press(KeyCode::Char('n'))).unwrap();
        assert!(screen(&mut app).contains("Page 2 of 2"));
    }

    #[test]
    fn test_render_empty_state() {
        let mut app = create_test_app(0);
        assert!(screen(&mut app).contains("No data"));
    }
}
