//! # InputBox Component
//!
//! The two-row box where a message is composed.
//!
//! ## Responsibilities
//!
//! - Own the input buffer (append, backspace)
//! - Hand the buffer over on submit, leaving it empty
//! - Wrap the text character by character across the box rows
//! - Place the terminal cursor right after the last character, scrolling so
//!   the cursor row stays visible
//!
//! Whether a submitted text is actually sent is the caller's decision; the
//! box empties itself on every submit, including an empty one.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::Key;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Ctrl+Enter pressed; carries the buffer as it was (possibly empty).
    Submit(String),
    /// Text content changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Box color (Prop)
    pub style: Style,
}

impl InputBox {
    pub fn new(style: Style) -> Self {
        Self {
            buffer: String::new(),
            style,
        }
    }

    /// Where the cursor sits when the box occupies `area`.
    ///
    /// The row is relative to the first visible row, so once the text needs
    /// more rows than the box has, the cursor stays on the bottom row.
    pub fn cursor_position(&self, area: Rect) -> Position {
        let (row, col) = cursor_cell(&wrap_rows(&self.buffer, area.width), area.width);
        let row = row.saturating_sub(hidden_rows(row, area.height));
        Position::new(area.x.saturating_add(col), area.y.saturating_add(row))
    }
}

/// Split `text` into rows no wider than `width` columns. A character wider
/// than the whole box still gets a row of its own.
fn wrap_rows(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = vec![String::new()];
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width && used > 0 {
            rows.push(String::new());
            used = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(c);
        }
        used += w;
    }
    rows
}

/// Row and column of the cell after the last character. A full last row
/// pushes the cursor to the start of the next one.
fn cursor_cell(rows: &[String], width: u16) -> (u16, u16) {
    let last = rows.len().saturating_sub(1);
    let used = rows.last().map_or(0, |row| row.width());
    let (row, col) = if used >= usize::from(width) {
        (last + 1, 0)
    } else {
        (last, used)
    };
    (
        u16::try_from(row).unwrap_or(u16::MAX),
        u16::try_from(col).unwrap_or(u16::MAX),
    )
}

/// Rows scrolled off the top so `cursor_row` fits in `height` rows.
fn hidden_rows(cursor_row: u16, height: u16) -> u16 {
    (cursor_row + 1).saturating_sub(height.max(1))
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        let rows = wrap_rows(&self.buffer, area.width);
        let (cursor_row, _) = cursor_cell(&rows, area.width);
        let lines: Vec<Line> = rows
            .into_iter()
            .skip(usize::from(hidden_rows(cursor_row, area.height)))
            .map(Line::from)
            .collect();
        frame.render_widget(Paragraph::new(lines).style(self.style), area);

        let mut cursor = self.cursor_position(area);
        cursor.x = cursor.x.min(frame.area().right().saturating_sub(1));
        cursor.y = cursor.y.min(frame.area().bottom().saturating_sub(1));
        frame.set_cursor_position(cursor);
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, key: &Key) -> Option<Self::Event> {
        match key {
            Key::Char(c) => {
                self.buffer.push(*c);
                Some(InputEvent::ContentChanged)
            }
            Key::Backspace => self.buffer.pop().map(|_| InputEvent::ContentChanged),
            Key::Submit => Some(InputEvent::Submit(std::mem::take(&mut self.buffer))),
            Key::Interrupt | Key::Newline | Key::Refresh => None,
        }
    }
}
