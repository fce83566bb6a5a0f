//! Keyboard shortcuts hook for the editor.
//!
//! Provides a reusable hook for handling keyboard shortcuts in Yew components.

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

/// Configuration for keyboard shortcuts.
#[derive(Clone, PartialEq)]
pub struct KeyboardShortcutsConfig {
    /// Callback when `g` is pressed (toggle grid visibility).
    pub on_toggle_grid: Option<Callback<()>>,
    /// Callback when `s` is pressed (toggle grid snapping).
    pub on_toggle_snap: Option<Callback<()>>,
    /// Callback when `0` is pressed (reset zoom and pan).
    pub on_reset_view: Option<Callback<()>>,
    /// Callback when Delete or Backspace is pressed.
    pub on_delete: Option<Callback<()>>,
    /// Whether shortcuts are enabled.
    pub enabled: bool,
}

impl Default for KeyboardShortcutsConfig {
    fn default() -> Self {
        Self {
            on_toggle_grid: None,
            on_toggle_snap: None,
            on_reset_view: None,
            on_delete: None,
            enabled: true,
        }
    }
}

/// Check if the event target is an input element (input, textarea, etc.)
fn is_input_element(event: &KeyboardEvent) -> bool {
    if let Some(target) = event.target() {
        if let Some(element) = target.dyn_ref::<web_sys::HtmlElement>() {
            let tag_name = element.tag_name().to_lowercase();
            return matches!(tag_name.as_str(), "input" | "textarea" | "select");
        }
    }
    false
}

/// Hook for handling keyboard shortcuts.
///
/// Attaches a global keydown listener to the document and calls the
/// appropriate callback for the pressed key. Events targeting form
/// elements are ignored so typing a label never toggles the grid.
#[hook]
pub fn use_keyboard_shortcuts(config: KeyboardShortcutsConfig) {
    let listener_ref = use_mut_ref(|| None::<EventListener>);

    use_effect_with(config.clone(), move |config| {
        // Clean up previous listener
        *listener_ref.borrow_mut() = None;

        if !config.enabled {
            return;
        }

        let config = config.clone();
        let document = gloo::utils::document();

        let listener = EventListener::new(&document, "keydown", move |event| {
            let event = event.dyn_ref::<KeyboardEvent>().unwrap();

            // Skip if focus is on an input element
            if is_input_element(event) {
                return;
            }
            if event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }

            match event.key().as_str() {
                "g" => {
                    if let Some(ref cb) = config.on_toggle_grid {
                        event.prevent_default();
                        cb.emit(());
                    }
                }
                "s" => {
                    if let Some(ref cb) = config.on_toggle_snap {
                        event.prevent_default();
                        cb.emit(());
                    }
                }
                "0" => {
                    if let Some(ref cb) = config.on_reset_view {
                        event.prevent_default();
                        cb.emit(());
                    }
                }
                "Delete" | "Backspace" => {
                    if let Some(ref cb) = config.on_delete {
                        event.prevent_default();
                        cb.emit(());
                    }
                }
                _ => {}
            }
        });

        *listener_ref.borrow_mut() = Some(listener);
    });
}
