//! # Scrollback
//!
//! Messages are drawn onto a `ScrollView` canvas that is taller than any
//! terminal (`SCROLLBACK_ROWS`), and the screen shows the canvas from its
//! top row. Rows beyond the canvas are dropped.
//!
//! ```text
//! ScrollView canvas (100 rows)        screen
//! ┌───────────────────────────┐       ┌──────────────┐
//! │ Sam: hi                   │ ────▶ │ Sam: hi      │  viewport rows
//! │ Me: hello                 │ ────▶ │ Me: hello    │
//! │ ...                       │       └──────────────┘
//! └───────────────────────────┘
//! ```

use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::Style;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation::{ActionOutcome, Conversation};
use crate::core::model::Message;
use crate::core::store::Store;
use crate::tui::component::Component;
use crate::tui::palette::Palette;

pub const SCROLLBACK_ROWS: u16 = 100;

/// Column where the reply annotation of a channel block starts.
const ANNOTATION_INDENT: u16 = 2;

pub struct Scrollback {
    view: ScrollView,
    /// Stays at offset 0: the viewport always shows the top of the canvas.
    scroll_state: ScrollViewState,
}

impl Scrollback {
    pub fn new(width: u16) -> Self {
        let view = ScrollView::new(Size::new(width, SCROLLBACK_ROWS))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        Self {
            view,
            scroll_state: ScrollViewState::default(),
        }
    }

    pub fn clear(&mut self) {
        self.view.buf_mut().reset();
    }

    /// Text of one row with trailing blanks removed.
    pub fn row_text(&self, row: u16) -> String {
        let buffer = self.view.buf();
        let text: String = (0..buffer.area.width)
            .filter_map(|x| buffer.cell((x, row)))
            .map(|cell| cell.symbol())
            .collect();
        text.trim_end().to_string()
    }

    /// Write `text` at (`row`, `col`) and return the column after it.
    fn put(&mut self, row: u16, col: u16, text: &str, style: Style) -> u16 {
        let buffer = self.view.buf_mut();
        let width = buffer.area.width;
        if row >= SCROLLBACK_ROWS || col >= width {
            return col;
        }
        let (end, _) = buffer.set_stringn(col, row, text, usize::from(width - col), style);
        end
    }

    /// Redraw every message of `conversation`, starting from a blank buffer.
    pub fn draw(
        &mut self,
        conversation: &Conversation,
        store: &Store,
        palette: &Palette,
        show_timestamps: bool,
    ) -> ActionOutcome {
        self.clear();
        match conversation {
            Conversation::DirectMessage { thread, other_user } => {
                let placeholder = format!("starting a new conversation with {}", other_user.display_name);
                self.draw_thread(store, thread.id, &placeholder, palette, show_timestamps);
                ActionOutcome::Done
            }
            Conversation::GroupThread { thread } => {
                self.draw_thread(store, thread.id, "starting a new conversation", palette, show_timestamps);
                ActionOutcome::Done
            }
            Conversation::ChannelRoot { channel, .. } => {
                self.draw_channel(store, channel.id, palette, show_timestamps);
                ActionOutcome::Done
            }
            Conversation::ChannelMessage { .. } => conversation.not_yet_supported("draw thread"),
        }
    }

    fn draw_thread(
        &mut self,
        store: &Store,
        thread_id: i64,
        placeholder: &str,
        palette: &Palette,
        show_timestamps: bool,
    ) {
        let messages = store.thread_messages(thread_id);
        if messages.is_empty() {
            self.put(0, 0, placeholder, Style::default());
            return;
        }
        for (row, message) in (0..SCROLLBACK_ROWS).zip(messages) {
            self.draw_message_row(row, store, message, palette, show_timestamps);
        }
    }

    /// Two rows per top-level message: the message, then its reply count.
    fn draw_channel(&mut self, store: &Store, channel_id: i64, palette: &Palette, show_timestamps: bool) {
        let roots = store.channel_messages(channel_id).filter(|m| m.is_toplevel());
        for (row, message) in (0..SCROLLBACK_ROWS).step_by(2).zip(roots) {
            self.draw_message_row(row, store, message, palette, show_timestamps);
            let annotation = reply_annotation(store.reply_count(message.id));
            self.put(row + 1, ANNOTATION_INDENT, &annotation, Style::default());
        }
    }

    fn draw_message_row(
        &mut self,
        row: u16,
        store: &Store,
        message: &Message,
        palette: &Palette,
        show_timestamps: bool,
    ) {
        let mut col = 0;
        if show_timestamps {
            col = self.put(row, col, &timestamp_prefix(message.created_date_time), palette.timestamp);
        }
        let sender = message
            .from_id
            .and_then(|id| store.user(id))
            .map_or("unknown", |u| u.display_name.as_str());
        col = self.put(row, col, &format!("{sender}: "), palette.username);
        self.put(row, col, &single_line(&message.body), Style::default());
    }
}

pub fn reply_annotation(count: usize) -> String {
    match count {
        0 => "(no replies yet)".to_string(),
        1 => "1 reply".to_string(),
        n => format!("{n} replies"),
    }
}

/// `"[HH:MM] "` in local time.
pub fn timestamp_prefix(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("[%H:%M] ").to_string()
}

fn single_line(body: &str) -> String {
    body.replace(['\r', '\n'], " ")
}

impl Component for Scrollback {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.is_empty() {
            return;
        }
        frame.render_stateful_widget(self.view.clone(), area, &mut self.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{channel, payload_at, team, thread, user};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;

    fn sam_dm() -> Conversation {
        Conversation::direct_message(thread(1, "chat-sam"), user(2, "Sam"))
    }

    fn store_with_thread(thread_id: i64, messages: &[(&str, &str, i64)]) -> Store {
        let mut store = Store::in_memory();
        for (remote_id, body, minute) in messages {
            store.get_or_create_message(&payload_at(remote_id, body, *minute)).thread_id = Some(thread_id);
        }
        store
    }

    #[test]
    fn test_direct_messages_drawn_oldest_first() {
        let store = store_with_thread(1, &[("m3", "third", 3), ("m1", "first", 1), ("m2", "second", 2)]);
        let mut scrollback = Scrollback::new(40);

        let outcome = scrollback.draw(&sam_dm(), &store, &Palette::default(), false);

        assert_eq!(outcome, ActionOutcome::Done);
        assert_eq!(scrollback.row_text(0), "Sam: first");
        assert_eq!(scrollback.row_text(1), "Sam: second");
        assert_eq!(scrollback.row_text(2), "Sam: third");
        assert_eq!(scrollback.row_text(3), "");
    }

    #[test]
    fn test_empty_thread_shows_placeholder() {
        let store = Store::in_memory();
        let mut scrollback = Scrollback::new(60);

        scrollback.draw(&sam_dm(), &store, &Palette::default(), false);
        assert_eq!(scrollback.row_text(0), "starting a new conversation with Sam");

        scrollback.draw(&Conversation::group_thread(thread(1, "g")), &store, &Palette::default(), false);
        assert_eq!(scrollback.row_text(0), "starting a new conversation");
    }

    #[test]
    fn test_sender_and_body_styles() {
        let store = store_with_thread(1, &[("m1", "hi", 1)]);
        let palette = Palette::default();
        let mut scrollback = Scrollback::new(20);
        scrollback.draw(&sam_dm(), &store, &palette, false);

        let name_cell = scrollback.view.buf().cell((0, 0)).unwrap();
        assert_eq!(name_cell.symbol(), "S");
        assert_eq!(name_cell.fg, Color::Cyan);
        let body_cell = scrollback.view.buf().cell((5, 0)).unwrap();
        assert_eq!(body_cell.symbol(), "h");
        assert_eq!(body_cell.fg, Color::Reset);
    }

    #[test]
    fn test_timestamp_prefix() {
        let store = store_with_thread(1, &[("m1", "first", 1)]);
        let mut scrollback = Scrollback::new(40);
        scrollback.draw(&sam_dm(), &store, &Palette::default(), true);

        let at = store.find_message("m1").unwrap().created_date_time;
        let expected = format!("{}Sam: first", timestamp_prefix(at));
        assert_eq!(scrollback.row_text(0), expected);
        assert!(expected.starts_with('[') && expected[..8].ends_with("] "));
    }

    #[test]
    fn test_newlines_flattened() {
        let store = store_with_thread(1, &[("m1", "one\ntwo", 1)]);
        let mut scrollback = Scrollback::new(40);
        scrollback.draw(&sam_dm(), &store, &Palette::default(), false);
        assert_eq!(scrollback.row_text(0), "Sam: one two");
        assert_eq!(scrollback.row_text(1), "");
    }

    #[test]
    fn test_rows_past_buffer_are_dropped() {
        let entries: Vec<(String, String, i64)> = (0..120)
            .map(|i| (format!("m{i}"), format!("msg {i}"), i))
            .collect();
        let borrowed: Vec<(&str, &str, i64)> = entries
            .iter()
            .map(|(id, body, minute)| (id.as_str(), body.as_str(), *minute))
            .collect();
        let store = store_with_thread(1, &borrowed);
        let mut scrollback = Scrollback::new(20);
        scrollback.draw(&sam_dm(), &store, &Palette::default(), false);
        assert_eq!(scrollback.row_text(SCROLLBACK_ROWS - 1), "Sam: msg 99");
    }

    #[test]
    fn test_channel_root_blocks() {
        // A, B (reply to C), C, D (reply to C)
        let mut store = Store::in_memory();
        let posts = [("a", "topic A", 1), ("b", "answer", 2), ("c", "topic C", 3), ("d", "another", 4)];
        for (id, body, minute) in posts {
            store.get_or_create_message(&payload_at(id, body, minute)).channel_id = Some(21);
        }
        // Replies resolve their root once it is cached.
        for (id, body, minute) in [posts[1], posts[3]] {
            let mut reply = payload_at(id, body, minute);
            reply.reply_to_id = Some("c".to_string());
            store.get_or_create_message(&reply);
        }

        let conversation = Conversation::channel(team(20, "Rust"), channel(21, 20, "General"));
        let mut scrollback = Scrollback::new(40);
        let outcome = scrollback.draw(&conversation, &store, &Palette::default(), false);

        assert_eq!(outcome, ActionOutcome::Done);
        assert_eq!(scrollback.row_text(0), "Sam: topic A");
        assert_eq!(scrollback.row_text(1), "  (no replies yet)");
        assert_eq!(scrollback.row_text(2), "Sam: topic C");
        assert_eq!(scrollback.row_text(3), "  2 replies");
        assert_eq!(scrollback.row_text(4), "");
    }

    #[test]
    fn test_reply_annotation() {
        assert_eq!(reply_annotation(0), "(no replies yet)");
        assert_eq!(reply_annotation(1), "1 reply");
        assert_eq!(reply_annotation(7), "7 replies");
    }

    #[test]
    fn test_channel_thread_not_yet_supported() {
        let conversation = Conversation::channel_thread(
            team(20, "Rust"),
            channel(21, 20, "General"),
            crate::test_support::message(30, "root", None),
        );
        let mut scrollback = Scrollback::new(40);
        assert!(matches!(
            scrollback.draw(&conversation, &Store::in_memory(), &Palette::default(), false),
            ActionOutcome::NotYetSupported { action: "draw thread", .. }
        ));
        assert_eq!(scrollback.row_text(0), "");
    }

    #[test]
    fn test_viewport_shows_top_rows() {
        let store = store_with_thread(1, &[("m1", "first", 1), ("m2", "second", 2), ("m3", "third", 3)]);
        let mut scrollback = Scrollback::new(20);
        scrollback.draw(&sam_dm(), &store, &Palette::default(), false);

        let mut terminal = Terminal::new(TestBackend::new(20, 4)).unwrap();
        terminal
            .draw(|f| {
                scrollback.render(f, Rect::new(0, 1, 20, 2));
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..20).map(|x| buffer[(x, y)].symbol()).collect::<String>().trim_end().to_string()
        };
        assert_eq!(row(0), "");
        assert_eq!(row(1), "Sam: first");
        assert_eq!(row(2), "Sam: second");
        assert_eq!(row(3), "");
    }
}
