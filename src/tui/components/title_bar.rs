//! # TitleBar Component
//!
//! Top row of the screen naming the conversation, e.g.
//! `"chatting with Sam"` or `"all threads in Rust/General"`.
//!
//! The text is padded with spaces to the full width of its area so the
//! title color spans the whole row.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;

use crate::tui::component::Component;
use crate::tui::layout::pad_title;

pub struct TitleBar {
    /// Unpadded title text
    pub title: String,
    pub style: Style,
}

impl TitleBar {
    pub fn new(title: String, style: Style) -> Self {
        Self { title, style }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let text = pad_title(&self.title, area.width);
        frame.render_widget(Span::styled(text, self.style), area);
    }
}
