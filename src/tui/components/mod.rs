//! # TUI Components
//!
//! The pieces the chat screen is drawn from.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: conversation title, padded to the full row
//! - `KeybindingBar`: the chord reference on the bottom row
//!
//! ### Stateful Components
//!
//! - `InputBox`: the message being composed, emits `InputEvent`s
//! - `Scrollback`: scroll canvas the messages are drawn onto, shown from its top row
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top row)
//! ├── scrollback.rs      (Message buffer and its viewport)
//! ├── input_box.rs       (Text input)
//! └── keybinding_bar.rs  (Bottom row)
//! ```

mod keybinding_bar;
mod title_bar;
pub use keybinding_bar::{KEYBINDING_LABELS, KeybindingBar};
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::{InputBox, InputEvent};
pub mod scrollback;
pub use scrollback::{SCROLLBACK_ROWS, Scrollback};
