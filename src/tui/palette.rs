use ratatui::style::{Color, Style};

/// The six color roles of the chat screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: Style,
    pub username: Style,
    pub timestamp: Style,
    pub focused_input: Style,
    pub unfocused_input: Style,
    pub keybinding: Style,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            title: Style::new().fg(Color::White).bg(Color::Magenta),
            username: Style::new().fg(Color::Cyan).bg(Color::Reset),
            timestamp: Style::new().fg(Color::DarkGray).bg(Color::Reset),
            focused_input: Style::new().fg(Color::Reset).bg(Color::Reset),
            unfocused_input: Style::new().fg(Color::Black).bg(Color::White),
            keybinding: Style::new().fg(Color::White).bg(Color::Reset),
        }
    }
}
