use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

use crate::tui::component::Component;

pub const KEYBINDING_LABELS: &str = "| ^C: exit | ^Enter: send | ^R: Refresh messages |";

/// Bottom row listing the available chords.
pub struct KeybindingBar {
    pub style: Style,
}

impl KeybindingBar {
    pub fn new(style: Style) -> Self {
        Self { style }
    }
}

impl Component for KeybindingBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Span::styled(KEYBINDING_LABELS, self.style), area);
    }
}
