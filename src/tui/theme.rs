use ratatui::style::{Color, Modifier, Style};

/// Colour scheme for the viewer chrome.
///
/// Cell encodings (heatmaps, bars, tones) bring their own colours from the
/// render settings; the theme only covers borders, headers and status text.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub focused_column_bg: Color,
    pub row_alt_bg: Color, // zebra striping
    pub row_number_fg: Color,

    pub message: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "Default Dark".to_string(),
            foreground: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            header_fg: Color::Cyan,
            header_bg: Color::Reset,
            focused_column_bg: Color::Rgb(40, 44, 60),
            row_alt_bg: Color::Rgb(25, 25, 35),
            row_number_fg: Color::DarkGray,
            message: Color::Yellow,
            muted: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Header of the column under the cursor
    pub fn focused_header_style(&self) -> Style {
        self.header_style()
            .bg(self.focused_column_bg)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn normal_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    pub fn alt_row_style(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.row_alt_bg)
    }

    pub fn row_number_style(&self) -> Style {
        Style::default().fg(self.row_number_fg)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn message_style(&self) -> Style {
        Style::default()
            .fg(self.message)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}
