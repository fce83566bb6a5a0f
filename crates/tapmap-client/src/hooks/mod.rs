mod use_keyboard_shortcuts;
mod use_menu_state;

pub use use_keyboard_shortcuts::{use_keyboard_shortcuts, KeyboardShortcutsConfig};
pub use use_menu_state::{use_menu_state, MenuStateHandle};
