use crate::grid::GridViewModel;
use crate::tui::action::Action;
use crate::tui::theme::Theme;
use color_eyre::Result;
use ratatui::{Frame, layout::Rect};

/// Base trait for the viewer's widgets
///
/// Components read the shared view model when they render and may mutate it
/// when they handle an action.
pub trait Component {
    /// Handle an action
    ///
    /// Returns Ok(true) if the action was handled and consumed.
    /// Returns Ok(false) if the action was not handled and should propagate.
    fn handle_action(&mut self, action: Action, model: &mut GridViewModel) -> Result<bool>;

    /// Render the component within the given area
    fn render(&mut self, frame: &mut Frame, area: Rect, model: &GridViewModel, theme: &Theme);

    /// Get component name for debugging/logging
    fn name(&self) -> &str;
}

/// Components that can take keyboard focus
pub trait Focusable: Component {
    fn is_focused(&self) -> bool;

    fn set_focused(&mut self, focused: bool);
}
