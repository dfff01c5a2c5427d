use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::Key;

/// A reusable UI component.
///
/// Components receive data via props (struct fields) and render to a
/// `Frame` within a given `Rect`. `render` takes `&mut self` so stateful
/// components can update what they track during the render pass.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles keystrokes.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a classified key and optionally return a high-level event.
    fn handle_event(&mut self, key: &Key) -> Option<Self::Event>;
}
