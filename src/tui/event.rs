use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// A keystroke the chat loop understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Ctrl+C
    Interrupt,
    /// Ctrl+Enter
    Submit,
    /// Plain Enter. Not a submit.
    Newline,
    /// Ctrl+R
    Refresh,
    Backspace,
    Char(char),
}

/// Block until the next terminal event and classify it.
///
/// Returns `Ok(None)` for events the loop ignores (key releases, arrows,
/// mouse, resize).
pub fn read_key() -> std::io::Result<Option<Key>> {
    let event = event::read()?;
    let key = classify(&event);
    if let Event::Key(key_event) = &event {
        log::debug!(
            "Key event: {:?} with modifiers {:?} -> {:?}",
            key_event.code,
            key_event.modifiers,
            key
        );
    }
    Ok(key)
}

pub fn classify(event: &Event) -> Option<Key> {
    let Event::Key(key_event) = event else {
        return None;
    };
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => Some(Key::Interrupt),
        KeyCode::Char('r') if ctrl => Some(Key::Refresh),
        // Ctrl+J is ASCII LF; most terminals send it for Ctrl+Enter
        KeyCode::Char('j') if ctrl => Some(Key::Submit),
        KeyCode::Enter if ctrl => Some(Key::Submit),
        // Ctrl+H is ASCII BS
        KeyCode::Char('h') if ctrl => Some(Key::Backspace),
        KeyCode::Enter => Some(Key::Newline),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Char(_) if ctrl || key_event.modifiers.contains(KeyModifiers::ALT) => None,
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => None,
    }
}
