//! Render planning.
//!
//! [`build_render_plan`] projects the session's state into surface
//! coordinates so the display layer only has to stroke and fill what
//! it is handed. Nothing here touches a drawing context; the plan is
//! rebuilt per coalesced frame.

use crate::geometry::{Corner, Point, Rect};
use crate::hotspot::{Color, HotspotId};
use crate::session::EditorSession;
use crate::view::CoordinateSpace;

/// One hotspot, projected to the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct HotspotSprite {
    pub id: HotspotId,
    pub rect: Rect,
    pub handles: [Point; 4],
    pub color: Color,
    pub label: String,
    /// Part of the active drag/resize gesture; drawn highlighted.
    pub active: bool,
    pub selected: bool,
}

/// Crosshair at the last known pointer position, with the logical
/// coordinates for the readout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crosshair {
    pub surface: Point,
    pub logical: Point,
}

/// Everything the display layer paints for one frame, in surface
/// backing pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Placement of the background image under the current pan/zoom.
    pub image_rect: Rect,
    /// Grid line segments; empty while the grid is hidden.
    pub grid_lines: Vec<(Point, Point)>,
    pub hotspots: Vec<HotspotSprite>,
    /// In-progress rubber-band rectangle, drawn dashed.
    pub draft: Option<Rect>,
    pub crosshair: Option<Crosshair>,
}

fn project_rect(cs: &CoordinateSpace, rect: Rect) -> Rect {
    let origin = cs.logical_to_surface(rect.origin());
    let far = cs.logical_to_surface(Point::new(rect.right(), rect.bottom()));
    Rect::new(origin.x, origin.y, far.x - origin.x, far.y - origin.y)
}

/// Builds the frame plan, or `None` until the image is decoded and
/// layout geometry exists (rendering earlier is a programming error
/// the readiness gate prevents).
pub fn build_render_plan(session: &EditorSession) -> Option<RenderPlan> {
    let cs = session.coordinate_space()?;
    let (image_width, image_height) = session.image_size()?;
    let layout = *cs.layout();

    let image_rect = project_rect(
        &cs,
        Rect::new(0.0, 0.0, f64::from(image_width), f64::from(image_height)),
    );

    let view = session.view();
    let mut grid_lines = Vec::new();
    if view.show_grid && view.grid_size > 0 {
        let grid = f64::from(view.grid_size);
        let (iw, ih) = (f64::from(image_width), f64::from(image_height));
        let mut x = 0.0;
        while x <= iw {
            grid_lines.push((
                cs.logical_to_surface(Point::new(x, 0.0)),
                cs.logical_to_surface(Point::new(x, ih)),
            ));
            x += grid;
        }
        let mut y = 0.0;
        while y <= ih {
            grid_lines.push((
                cs.logical_to_surface(Point::new(0.0, y)),
                cs.logical_to_surface(Point::new(iw, y)),
            ));
            y += grid;
        }
    }

    let gesture_target = session.interaction().gesture_target();
    let hotspots = session
        .store()
        .hotspots()
        .iter()
        .map(|hotspot| {
            let rect = project_rect(&cs, hotspot.bounds);
            let handles =
                Corner::ALL.map(|corner| cs.logical_to_surface(hotspot.bounds.corner(corner)));
            HotspotSprite {
                id: hotspot.id,
                rect,
                handles,
                color: hotspot.color,
                label: hotspot.label.clone(),
                active: gesture_target == Some(hotspot.id),
                selected: session.selected() == Some(hotspot.id),
            }
        })
        .collect();

    let draft = session.draft().map(|rect| project_rect(&cs, rect));
    let crosshair = session.pointer_logical().map(|logical| Crosshair {
        surface: cs.logical_to_surface(logical),
        logical,
    });

    Some(RenderPlan {
        canvas_width: layout.canvas_width,
        canvas_height: layout.canvas_height,
        image_rect,
        grid_lines,
        hotspots,
        draft,
        crosshair,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{MenuSize, Size};
    use crate::hotspot::Action;

    fn ready_session() -> EditorSession {
        let mut session = EditorSession::new(MenuSize::Full);
        session.set_max_box(Size::new(800.0, 600.0)).unwrap();
        session.set_image(2500, 1686).unwrap();
        session
    }

    #[test]
    fn test_no_plan_before_image() {
        let session = EditorSession::new(MenuSize::Full);
        assert!(build_render_plan(&session).is_none());
    }

    #[test]
    fn test_image_fills_canvas_at_default_view() {
        let plan = build_render_plan(&ready_session()).unwrap();
        assert!((plan.image_rect.x).abs() < 1e-6);
        assert!((plan.image_rect.width - plan.canvas_width).abs() < 1e-6);
    }

    #[test]
    fn test_grid_lines_cover_image() {
        let mut session = ready_session();
        session.set_grid_size(500);
        let plan = build_render_plan(&session).unwrap();
        // 2500/500 -> 6 vertical lines (0..=2500); 1686/500 -> 4
        // horizontal lines (0..=1500).
        assert_eq!(plan.grid_lines.len(), 6 + 4);

        session.toggle_grid();
        let plan = build_render_plan(&session).unwrap();
        assert!(plan.grid_lines.is_empty());
    }

    #[test]
    fn test_hotspot_projection_scales_with_zoom() {
        let mut session = ready_session();
        session
            .store_mut()
            .replace_all(vec![(Rect::new(0.0, 0.0, 1000.0, 500.0), Action::default_postback())]);

        let plan = build_render_plan(&session).unwrap();
        let base = plan.hotspots[0].rect;
        assert!((base.width - 1000.0 * 0.32).abs() < 1e-6);

        session.wheel_zoom(-1.0);
        let plan = build_render_plan(&session).unwrap();
        let zoomed = plan.hotspots[0].rect;
        assert!((zoomed.width - base.width * 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_selected_hotspot_is_flagged() {
        let mut session = ready_session();
        session
            .store_mut()
            .replace_all(vec![(Rect::new(0.0, 0.0, 1000.0, 500.0), Action::default_postback())]);
        let id = session.store().hotspots()[0].id;

        let css = Size::new(800.0, 539.52);
        session.pointer_down(Point::new(100.0, 50.0), css);
        let plan = build_render_plan(&session).unwrap();
        assert!(plan.hotspots[0].active);
        assert!(plan.hotspots[0].selected);
        assert_eq!(session.selected(), Some(id));

        session.pointer_up();
        let plan = build_render_plan(&session).unwrap();
        assert!(!plan.hotspots[0].active);
        assert!(plan.hotspots[0].selected);
    }
}
