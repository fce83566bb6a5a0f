//! Tapmap Core Library
//!
//! Display-independent engine for the hotspot editor: layout geometry,
//! coordinate transforms, grid snapping, the hotspot store, the
//! pointer interaction state machine, frame/pointer rate limiting, and
//! the action-area document codec.
//!
//! The display layer (tapmap-client) feeds device-space pointer events
//! into an [`EditorSession`] and paints the [`RenderPlan`] it gets
//! back; everything observable lives here and is tested natively.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod document;
pub mod geometry;
pub mod hotspot;
pub mod interaction;
pub mod render;
pub mod schedule;
pub mod session;
pub mod snap;
pub mod view;

pub use document::{
    DocumentError, MAX_CHAT_BAR_TEXT_LEN, MenuDocument, export_document, export_json,
    import_document,
};
pub use geometry::{
    Corner, LayoutError, LayoutGeometry, MenuSize, Point, Rect, Size, compute_layout,
};
pub use hotspot::{Action, ActionError, Color, Hotspot, HotspotId, HotspotStore};
pub use interaction::{HANDLE_GRAB_SIZE, InteractionState, MIN_HOTSPOT_SIZE};
pub use render::{Crosshair, HotspotSprite, RenderPlan, build_render_plan};
pub use schedule::{FrameCoalescer, POINTER_MOVE_INTERVAL_MS, PointerThrottle};
pub use session::{EditorSession, MenuMeta, SessionEvent};
pub use view::{CoordinateSpace, MAX_ZOOM, MIN_ZOOM, ViewState};
