use ratatui::Frame;
use ratatui::text::Span;

use crate::tui::ChatUi;
use crate::tui::component::Component;
use crate::tui::components::{KeybindingBar, TitleBar};
use crate::tui::layout::layout;

/// Composite the whole chat screen. The layout is recomputed from the
/// current frame size on every call.
pub fn draw_ui(frame: &mut Frame, chat: &mut ChatUi<'_>) {
    let area = frame.area();
    let prompt = chat.conversation.prompt();
    let regions = layout(area, prompt).clipped_to(area);

    TitleBar::new(chat.conversation.title(), chat.palette.title).render(frame, regions.title);
    chat.scrollback.render(frame, regions.scrollback);
    frame.render_widget(Span::styled(prompt, chat.palette.focused_input), regions.prompt);
    KeybindingBar::new(chat.palette.keybinding).render(frame, regions.keybindings);
    // Last, so the cursor lands in the input box.
    chat.input_box.render(frame, regions.input);
}
