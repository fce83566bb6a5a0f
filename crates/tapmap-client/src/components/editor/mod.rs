//! Hotspot editor UI components.

mod context_menu;
mod hotspot_canvas;
pub mod painter;
mod toolbar;

pub use hotspot_canvas::HotspotCanvas;
pub use toolbar::EditorToolbar;
