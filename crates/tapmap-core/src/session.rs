//! The composed editor instance.
//!
//! [`EditorSession`] owns the hotspot store, view state, interaction
//! state, and cached layout geometry for one open editor. All pointer
//! input arrives in device coordinates and is interpreted through the
//! current [`CoordinateSpace`]; until a background image has been
//! decoded and measured, input and render planning are rejected.

use crate::geometry::{LayoutError, LayoutGeometry, MenuSize, Point, Rect, Size, compute_layout};
use crate::hotspot::{Action, HotspotId, HotspotStore};
use crate::interaction::{
    HANDLE_GRAB_SIZE, InteractionState, meets_min_size, resize_bounds,
};
use crate::snap::snap_point;
use crate::view::{CoordinateSpace, ViewState};

/// Menu metadata carried alongside the hotspots into the exported
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuMeta {
    pub name: String,
    pub chat_bar_text: String,
    /// Whether the menu is displayed by default.
    pub selected: bool,
}

impl Default for MenuMeta {
    fn default() -> Self {
        Self {
            name: "menu".to_string(),
            chat_bar_text: "Menu".to_string(),
            selected: false,
        }
    }
}

/// Notable state changes surfaced to the embedding shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new hotspot was committed from a completed draw.
    HotspotCommitted(HotspotId),
    HotspotRemoved(HotspotId),
    SelectionChanged(Option<HotspotId>),
}

/// One open hotspot editor.
#[derive(Debug, Clone)]
pub struct EditorSession {
    store: HotspotStore,
    view: ViewState,
    interaction: InteractionState,
    layout: Option<LayoutGeometry>,
    image_size: Option<(u32, u32)>,
    max_box: Size,
    menu_size: MenuSize,
    meta: MenuMeta,
    selected: Option<HotspotId>,
    /// In-progress rubber-band rectangle while drawing.
    draft: Option<Rect>,
    /// Last known pointer position in logical space, for the
    /// crosshair readout.
    pointer_logical: Option<Point>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(MenuSize::Full)
    }
}

impl EditorSession {
    pub fn new(menu_size: MenuSize) -> Self {
        Self {
            store: HotspotStore::new(),
            view: ViewState::new(),
            interaction: InteractionState::Idle,
            layout: None,
            image_size: None,
            max_box: Size::new(800.0, 600.0),
            menu_size,
            meta: MenuMeta::default(),
            selected: None,
            draft: None,
            pointer_logical: None,
        }
    }

    /// Registers the decoded background image and recomputes layout
    /// geometry. Discards any in-progress gesture; until this has
    /// succeeded once, the session rejects pointer input.
    pub fn set_image(&mut self, width: u32, height: u32) -> Result<(), LayoutError> {
        let layout = compute_layout(width, height, self.menu_size, self.max_box)?;
        self.image_size = Some((width, height));
        self.layout = Some(layout);
        self.cancel_gesture();
        tracing::debug!(width, height, "background image registered");
        Ok(())
    }

    /// Updates the maximum display box (e.g. on container resize) and
    /// recomputes layout geometry if an image is loaded.
    pub fn set_max_box(&mut self, max_box: Size) -> Result<(), LayoutError> {
        self.max_box = max_box;
        self.recompute_layout()
    }

    /// Switches the target menu size. The gesture is discarded and the
    /// layout recomputed; hotspot bounds are left untouched.
    pub fn set_menu_size(&mut self, menu_size: MenuSize) -> Result<(), LayoutError> {
        self.menu_size = menu_size;
        self.cancel_gesture();
        self.recompute_layout()
    }

    fn recompute_layout(&mut self) -> Result<(), LayoutError> {
        if let Some((w, h)) = self.image_size {
            self.layout = Some(compute_layout(w, h, self.menu_size, self.max_box)?);
        }
        Ok(())
    }

    /// Whether the image is decoded and layout geometry is valid.
    pub fn is_ready(&self) -> bool {
        self.layout.is_some()
    }

    pub fn coordinate_space(&self) -> Option<CoordinateSpace> {
        let layout = self.layout?;
        let (w, h) = self.image_size?;
        Some(CoordinateSpace::new(layout, &self.view, w, h))
    }

    fn snap_if_enabled(&self, p: Point) -> Point {
        if self.view.grid_snap_enabled {
            snap_point(p, f64::from(self.view.grid_size))
        } else {
            p
        }
    }

    /// Pointer press in device coordinates. Enters drawing, dragging,
    /// or resizing depending on what lies under the pointer; ignored
    /// while another gesture is active or before the image is ready.
    pub fn pointer_down(&mut self, device: Point, css_size: Size) -> Option<SessionEvent> {
        let Some(cs) = self.coordinate_space() else {
            return None;
        };
        if !self.interaction.is_idle() {
            return None;
        }

        let p = cs.device_to_logical(device, css_size);
        self.pointer_logical = Some(p);
        let grab_radius = cs.surface_len_to_logical(HANDLE_GRAB_SIZE);

        if let Some((target, handle)) = self.store.hit_test_handle(p, grab_radius) {
            self.interaction = InteractionState::Resizing { target, handle };
            return self.select(Some(target));
        }
        if let Some(target) = self.store.hit_test(p) {
            let origin = self.store.get(target).map(|h| h.bounds.origin())?;
            self.interaction = InteractionState::Dragging {
                target,
                grab_offset: Point::new(p.x - origin.x, p.y - origin.y),
            };
            return self.select(Some(target));
        }

        self.draft = None;
        self.interaction = InteractionState::Drawing {
            start: self.snap_if_enabled(p),
        };
        self.select(None)
    }

    /// Pointer move in device coordinates. Updates the active gesture
    /// and the crosshair position.
    pub fn pointer_move(&mut self, device: Point, css_size: Size) {
        let Some(cs) = self.coordinate_space() else {
            return;
        };
        let p = cs.device_to_logical(device, css_size);
        self.pointer_logical = Some(p);

        match self.interaction {
            InteractionState::Drawing { start } => {
                self.draft = Some(Rect::spanning(start, self.snap_if_enabled(p)));
            }
            InteractionState::Dragging {
                target,
                grab_offset,
            } => {
                let origin = self.snap_if_enabled(Point::new(
                    p.x - grab_offset.x,
                    p.y - grab_offset.y,
                ));
                if let Some(hotspot) = self.store.get_mut(target) {
                    hotspot.bounds.x = origin.x;
                    hotspot.bounds.y = origin.y;
                }
            }
            InteractionState::Resizing { target, handle } => {
                let snapped = self.snap_if_enabled(p);
                if let Some(hotspot) = self.store.get_mut(target) {
                    // A result below the minimum size leaves the
                    // previous bounds in place.
                    if let Some(next) = resize_bounds(hotspot.bounds, handle, snapped) {
                        hotspot.bounds = next;
                    }
                }
            }
            InteractionState::Idle => {}
        }
    }

    /// Pointer release: commits a sufficiently large draw, otherwise
    /// just returns to idle.
    pub fn pointer_up(&mut self) -> Option<SessionEvent> {
        let state = std::mem::replace(&mut self.interaction, InteractionState::Idle);
        match state {
            InteractionState::Drawing { .. } => {
                let draft = self.draft.take()?;
                if !meets_min_size(draft) {
                    return None;
                }
                let id = self.store.commit(draft, Action::default_postback());
                tracing::debug!(id, ?draft, "hotspot committed");
                self.selected = Some(id);
                Some(SessionEvent::HotspotCommitted(id))
            }
            _ => None,
        }
    }

    /// Topmost hotspot under a device-space point, for context menus.
    pub fn hotspot_at_device(&self, device: Point, css_size: Size) -> Option<HotspotId> {
        let cs = self.coordinate_space()?;
        self.store.hit_test(cs.device_to_logical(device, css_size))
    }

    /// Aborts any in-progress gesture without committing.
    pub fn cancel_gesture(&mut self) {
        self.interaction = InteractionState::Idle;
        self.draft = None;
    }

    /// Re-enters a drag from the context menu, with a zero grab
    /// offset.
    pub fn begin_move(&mut self, target: HotspotId) -> Option<SessionEvent> {
        if !self.interaction.is_idle() || self.store.get(target).is_none() {
            return None;
        }
        self.interaction = InteractionState::Dragging {
            target,
            grab_offset: Point::new(0.0, 0.0),
        };
        self.select(Some(target))
    }

    pub fn remove_hotspot(&mut self, id: HotspotId) -> Option<SessionEvent> {
        self.store.remove(id)?;
        if self.interaction.gesture_target() == Some(id) {
            self.cancel_gesture();
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(SessionEvent::HotspotRemoved(id))
    }

    pub fn delete_selected(&mut self) -> Option<SessionEvent> {
        self.remove_hotspot(self.selected?)
    }

    fn select(&mut self, id: Option<HotspotId>) -> Option<SessionEvent> {
        if self.selected == id {
            return None;
        }
        self.selected = id;
        Some(SessionEvent::SelectionChanged(id))
    }

    /// Wheel step over the surface; no-op while the zoom is locked.
    pub fn wheel_zoom(&mut self, delta_y: f64) {
        self.view.zoom_by_wheel(delta_y);
    }

    pub fn toggle_grid(&mut self) {
        self.view.toggle_grid();
    }

    pub fn toggle_snap(&mut self) {
        self.view.toggle_snap();
    }

    pub fn reset_view(&mut self) {
        self.view.reset_view();
    }

    pub fn set_grid_size(&mut self, grid_size: u32) {
        self.view.grid_size = grid_size;
    }

    pub fn set_zoom_locked(&mut self, locked: bool) {
        self.view.zoom_locked = locked;
    }

    pub fn store(&self) -> &HotspotStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut HotspotStore {
        &mut self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn selected(&self) -> Option<HotspotId> {
        self.selected
    }

    pub fn draft(&self) -> Option<Rect> {
        self.draft
    }

    pub fn pointer_logical(&self) -> Option<Point> {
        self.pointer_logical
    }

    pub fn menu_size(&self) -> MenuSize {
        self.menu_size
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image_size
    }

    pub fn meta(&self) -> &MenuMeta {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut MenuMeta {
        &mut self.meta
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::MIN_HOTSPOT_SIZE;

    /// Session with a full-size image in an 800x600 box: the canvas is
    /// 800 wide, scale is 0.32, offsets are zero, so device = logical
    /// * 0.32 at zoom 1.
    fn ready_session() -> (EditorSession, Size) {
        let mut session = EditorSession::new(MenuSize::Full);
        session.set_max_box(Size::new(800.0, 600.0)).unwrap();
        session.set_image(2500, 1686).unwrap();
        let layout = session.coordinate_space().unwrap();
        let css = Size::new(layout.layout().canvas_width, layout.layout().canvas_height);
        (session, css)
    }

    fn device_for(logical: Point) -> Point {
        Point::new(logical.x * 0.32, logical.y * 0.32)
    }

    fn draw(session: &mut EditorSession, css: Size, from: Point, to: Point) -> Option<SessionEvent> {
        session.pointer_down(device_for(from), css);
        session.pointer_move(device_for(to), css);
        session.pointer_up()
    }

    #[test]
    fn test_pointer_input_rejected_before_image() {
        let mut session = EditorSession::new(MenuSize::Full);
        assert!(!session.is_ready());
        let css = Size::new(800.0, 600.0);
        assert_eq!(session.pointer_down(Point::new(10.0, 10.0), css), None);
        assert!(session.interaction().is_idle());
    }

    #[test]
    fn test_draw_commits_snapped_bounds() {
        let (mut session, css) = ready_session();
        session.set_grid_size(50);

        let event = draw(
            &mut session,
            css,
            Point::new(100.0, 100.0),
            Point::new(500.0, 400.0),
        );

        let Some(SessionEvent::HotspotCommitted(id)) = event else {
            panic!("expected commit, got {event:?}");
        };
        let hotspot = session.store().get(id).unwrap();
        assert_eq!(hotspot.bounds, Rect::new(100.0, 100.0, 400.0, 300.0));
        assert_eq!(hotspot.action, Action::default_postback());
        assert_eq!(session.selected(), Some(id));
        assert!(session.interaction().is_idle());
    }

    #[test]
    fn test_tiny_draw_commits_nothing() {
        let (mut session, css) = ready_session();
        session.toggle_snap();

        let event = draw(
            &mut session,
            css,
            Point::new(100.0, 100.0),
            Point::new(105.0, 103.0),
        );
        assert_eq!(event, None);
        assert!(session.store().is_empty());
        assert!(session.interaction().is_idle());
    }

    #[test]
    fn test_drag_moves_without_resizing() {
        let (mut session, css) = ready_session();
        draw(
            &mut session,
            css,
            Point::new(100.0, 100.0),
            Point::new(500.0, 400.0),
        );

        // Grab near the middle of the body and drag right by 200.
        session.pointer_down(device_for(Point::new(300.0, 250.0)), css);
        assert!(matches!(
            session.interaction(),
            InteractionState::Dragging { .. }
        ));
        session.pointer_move(device_for(Point::new(500.0, 250.0)), css);
        session.pointer_up();

        let hotspot = &session.store().hotspots()[0];
        assert_eq!(hotspot.bounds, Rect::new(300.0, 100.0, 400.0, 300.0));
    }

    #[test]
    fn test_corner_grab_resizes_and_anchors_origin() {
        let (mut session, css) = ready_session();
        draw(
            &mut session,
            css,
            Point::new(100.0, 100.0),
            Point::new(500.0, 400.0),
        );

        session.pointer_down(device_for(Point::new(500.0, 400.0)), css);
        assert!(matches!(
            session.interaction(),
            InteractionState::Resizing { .. }
        ));
        session.pointer_move(device_for(Point::new(700.0, 600.0)), css);
        session.pointer_up();

        let hotspot = &session.store().hotspots()[0];
        assert_eq!(hotspot.bounds, Rect::new(100.0, 100.0, 600.0, 500.0));
    }

    #[test]
    fn test_resize_below_minimum_retains_bounds() {
        let (mut session, css) = ready_session();
        draw(
            &mut session,
            css,
            Point::new(100.0, 100.0),
            Point::new(500.0, 400.0),
        );
        let before = session.store().hotspots()[0].bounds;
        assert!(before.width > MIN_HOTSPOT_SIZE);

        session.pointer_down(device_for(Point::new(500.0, 400.0)), css);
        session.pointer_move(device_for(Point::new(102.0, 101.0)), css);
        session.pointer_up();

        assert_eq!(session.store().hotspots()[0].bounds, before);
    }

    #[test]
    fn test_no_second_gesture_while_active() {
        let (mut session, css) = ready_session();
        session.pointer_down(device_for(Point::new(100.0, 100.0)), css);
        let state = *session.interaction();

        // A second press is ignored outright.
        session.pointer_down(device_for(Point::new(600.0, 500.0)), css);
        assert_eq!(*session.interaction(), state);
    }

    #[test]
    fn test_image_swap_discards_gesture() {
        let (mut session, css) = ready_session();
        session.pointer_down(device_for(Point::new(100.0, 100.0)), css);
        assert!(!session.interaction().is_idle());

        session.set_image(2500, 1686).unwrap();
        assert!(session.interaction().is_idle());
        assert_eq!(session.draft(), None);
    }

    #[test]
    fn test_begin_move_uses_zero_grab_offset() {
        let (mut session, css) = ready_session();
        let event = draw(
            &mut session,
            css,
            Point::new(100.0, 100.0),
            Point::new(500.0, 400.0),
        );
        let Some(SessionEvent::HotspotCommitted(id)) = event else {
            panic!();
        };

        session.begin_move(id);
        session.pointer_move(device_for(Point::new(600.0, 200.0)), css);
        session.pointer_up();

        let hotspot = session.store().get(id).unwrap();
        assert_eq!(hotspot.bounds.origin(), Point::new(600.0, 200.0));
    }

    #[test]
    fn test_delete_selected() {
        let (mut session, css) = ready_session();
        let Some(SessionEvent::HotspotCommitted(id)) = draw(
            &mut session,
            css,
            Point::new(100.0, 100.0),
            Point::new(500.0, 400.0),
        ) else {
            panic!();
        };

        assert_eq!(
            session.delete_selected(),
            Some(SessionEvent::HotspotRemoved(id))
        );
        assert!(session.store().is_empty());
        assert_eq!(session.selected(), None);
        assert_eq!(session.delete_selected(), None);
    }
}
