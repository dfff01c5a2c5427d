//! # Screen Layout
//!
//! ```text
//! row 0        ┌ title bar ───────────────────────────────┐
//! rows 1..     │ scrollback viewport                      │
//!              │                                          │
//! H-4          │ (spare row)                              │
//! H-3, H-2     │ <prompt> [input box, 2 rows            ] │
//! H-1          └ keybinding bar ──────────────────────────┘
//! ```
//!
//! `layout` is a pure function of the terminal area and the prompt, called
//! for every frame. Nothing is cached between frames.

use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const TITLE_HEIGHT: u16 = 1;
pub const INPUT_HEIGHT: u16 = 2;
pub const KEYBINDING_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub title: Rect,
    pub scrollback: Rect,
    /// Where the prompt label is drawn, left of the input box.
    pub prompt: Rect,
    pub input: Rect,
    pub keybindings: Rect,
}

impl Regions {
    /// Clip every region to `area` so undersized terminals never draw out of bounds.
    pub fn clipped_to(self, area: Rect) -> Self {
        Self {
            title: self.title.intersection(area),
            scrollback: self.scrollback.intersection(area),
            prompt: self.prompt.intersection(area),
            input: self.input.intersection(area),
            keybindings: self.keybindings.intersection(area),
        }
    }
}

pub fn layout(area: Rect, prompt: &str) -> Regions {
    let prompt_width = u16::try_from(prompt.width()).unwrap_or(u16::MAX);
    let width = area.width;
    // The bottom row belongs to the keybinding bar.
    let window_height = area.height.saturating_sub(1);
    let input_row = window_height.saturating_sub(INPUT_HEIGHT);
    let scrollback_height =
        window_height.saturating_sub(TITLE_HEIGHT + INPUT_HEIGHT + KEYBINDING_HEIGHT);

    Regions {
        title: Rect::new(area.x, area.y, width, TITLE_HEIGHT),
        scrollback: Rect::new(area.x, area.y + TITLE_HEIGHT, width, scrollback_height),
        prompt: Rect::new(area.x, area.y + input_row, prompt_width.min(width), 1),
        input: Rect::new(
            area.x.saturating_add(prompt_width).saturating_add(1),
            area.y + input_row,
            width.saturating_sub(prompt_width.saturating_add(2)),
            INPUT_HEIGHT,
        ),
        keybindings: Rect::new(area.x, area.y + window_height, width, KEYBINDING_HEIGHT),
    }
}

/// Pad (or cut) `raw` with spaces to exactly `width` display columns.
pub fn pad_title(raw: &str, width: u16) -> String {
    let width = usize::from(width);
    let mut title = String::with_capacity(width);
    let mut used = 0;
    for ch in raw.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        title.push(ch);
        used += w;
    }
    title.push_str(&" ".repeat(width - used));
    title
}
