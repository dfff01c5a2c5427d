//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, paints the chat screen and
//! turns keystrokes into conversation actions.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! The loop is synchronous: read one key, act on it, redraw, repeat. A send
//! or refresh blocks the loop until the remote call and the cache commit have
//! finished, so keys typed meanwhile queue up in the terminal.
//!
//! ```text
//! read_key ──► ChatUi::handle_key ──► Conversation action ──► draw_messages
//!    ▲                                                            │
//!    └──────────────────── refresh_display ◄──────────────────────┘
//! ```
//!
//! Terminal resizes are not handled. The scrollback keeps the width it was
//! created with; the other regions follow the new size on the next redraw.
//!
//! The cursor is a steady block; ratatui's `set_cursor_position` resets the
//! blink timer on every `draw()`.

pub mod component;
pub mod components;
pub mod event;
pub mod layout;
pub mod palette;
mod ui;

use log::{info, warn};
use std::io::stdout;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::conversation::{ActionOutcome, Conversation};
use crate::core::error::ChatError;
use crate::core::session::Session;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, Scrollback};
use crate::tui::event::Key;
use crate::tui::palette::Palette;

/// Display switches that come from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    /// Prefix each message with `[HH:MM]`.
    pub show_timestamps: bool,
}

/// One chat screen, bound to a single conversation for its whole life.
pub struct ChatUi<'a> {
    session: &'a mut Session,
    conversation: Conversation,
    palette: Palette,
    input_box: InputBox,
    scrollback: Scrollback,
    show_timestamps: bool,
    exit_requested: bool,
}

impl<'a> ChatUi<'a> {
    /// Build the screen state for `conversation`, with a scrollback `width`
    /// columns wide, and draw the cached messages into it.
    pub fn new(
        session: &'a mut Session,
        conversation: Conversation,
        width: u16,
        options: UiOptions,
    ) -> Self {
        let palette = Palette::default();
        let mut chat = Self {
            session,
            conversation,
            palette,
            input_box: InputBox::new(palette.unfocused_input),
            scrollback: Scrollback::new(width),
            show_timestamps: options.show_timestamps,
            exit_requested: false,
        };
        chat.draw_messages();
        chat
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Text currently in the input box.
    pub fn input(&self) -> &str {
        &self.input_box.buffer
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Redraw the scrollback from the cache.
    pub fn draw_messages(&mut self) -> ActionOutcome {
        let outcome = self.scrollback.draw(
            &self.conversation,
            &self.session.store,
            &self.palette,
            self.show_timestamps,
        );
        report(outcome);
        outcome
    }

    /// Apply one keystroke. Remote and cache failures are returned as-is; the
    /// screen is left as it was before the failed action.
    pub fn handle_key(&mut self, key: Key) -> Result<(), ChatError> {
        match key {
            Key::Interrupt => {
                info!("Exit requested");
                self.exit_requested = true;
            }
            Key::Newline => {}
            Key::Refresh => {
                report(self.conversation.fetch_new_messages(self.session)?);
                self.draw_messages();
            }
            Key::Submit | Key::Backspace | Key::Char(_) => {
                if let Some(InputEvent::Submit(text)) = self.input_box.handle_event(&key) {
                    self.submit(&text)?;
                }
            }
        }
        Ok(())
    }

    fn submit(&mut self, text: &str) -> Result<(), ChatError> {
        if text.is_empty() {
            return Ok(());
        }
        report(self.conversation.send_message(self.session, text)?);
        self.draw_messages();
        Ok(())
    }

    /// Clear the screen, redraw the messages and composite everything.
    pub fn initial_paint(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        terminal.clear()?;
        self.draw_messages();
        self.refresh_display(terminal)
    }

    /// Composite every region onto the terminal and place the cursor.
    pub fn refresh_display(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        terminal.draw(|frame| ui::draw_ui(frame, self))?;
        Ok(())
    }

    /// Read and apply keys until Ctrl+C.
    pub fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<(), ChatError> {
        while !self.exit_requested {
            let Some(key) = event::read_key()? else {
                continue;
            };
            self.handle_key(key)?;
            self.refresh_display(terminal)?;
        }
        Ok(())
    }
}

fn report(outcome: ActionOutcome) {
    if let ActionOutcome::NotYetSupported { mode, action } = outcome {
        warn!("'{action}' is not supported in {mode} mode yet");
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Keyboard enhancement lets Ctrl+Enter arrive distinct from Enter.
        // Terminals without the protocol ignore it and send Ctrl+J instead.
        execute!(
            stdout(),
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags, Hide);
    }
}

/// Take over the terminal and run the chat screen until the user exits or an
/// action fails. The terminal is restored either way.
pub fn run(
    session: &mut Session,
    conversation: Conversation,
    options: UiOptions,
) -> Result<(), ChatError> {
    info!("Opening {} view: {}", conversation.mode(), conversation.title());
    let mut terminal = ratatui::init();
    let result = run_in_terminal(&mut terminal, session, conversation, options);
    ratatui::restore();
    result
}

fn run_in_terminal(
    terminal: &mut DefaultTerminal,
    session: &mut Session,
    conversation: Conversation,
    options: UiOptions,
) -> Result<(), ChatError> {
    let _terminal_mode_guard = TerminalModeGuard::new()?;
    let width = terminal.size()?.width;
    let mut chat = ChatUi::new(session, conversation, width, options);
    chat.initial_paint(terminal)?;
    chat.run_loop(terminal)
}
