//! View state (zoom, pan, grid options) and coordinate transforms.

use crate::geometry::{LayoutGeometry, Point, Size};

/// Zoom bounds for the editing surface.
pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;

/// Multiplier applied per wheel step.
const ZOOM_STEP_IN: f64 = 1.1;
const ZOOM_STEP_OUT: f64 = 0.9;

/// Per-session view settings.
///
/// Created with defaults when the editor opens and discarded on close;
/// `reset_view` restores zoom and pan without touching grid options.
/// Pan participates in the coordinate transform but no default pointer
/// gesture is bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub pan: Point,
    pub zoom_locked: bool,
    pub grid_size: u32,
    pub grid_snap_enabled: bool,
    pub show_grid: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::new(0.0, 0.0),
            zoom_locked: false,
            grid_size: 50,
            grid_snap_enabled: true,
            show_grid: true,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores zoom to 1 and pan to the origin.
    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan = Point::new(0.0, 0.0);
    }

    /// Applies one wheel step: x1.1 when scrolling up, x0.9 when
    /// scrolling down, clamped to `[MIN_ZOOM, MAX_ZOOM]`. Ignored
    /// entirely while the zoom is locked.
    pub fn zoom_by_wheel(&mut self, delta_y: f64) {
        if self.zoom_locked {
            return;
        }
        let step = if delta_y < 0.0 { ZOOM_STEP_IN } else { ZOOM_STEP_OUT };
        self.zoom = (self.zoom * step).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    pub fn toggle_snap(&mut self) {
        self.grid_snap_enabled = !self.grid_snap_enabled;
    }
}

/// Bidirectional mapping between device, surface, and logical space.
///
/// Built from the cached layout geometry and the current view state;
/// never read back from display-element attributes.
#[derive(Debug, Clone, Copy)]
pub struct CoordinateSpace {
    layout: LayoutGeometry,
    zoom: f64,
    pan: Point,
    image_width: f64,
    image_height: f64,
}

impl CoordinateSpace {
    pub fn new(layout: LayoutGeometry, view: &ViewState, image_width: u32, image_height: u32) -> Self {
        Self {
            layout,
            zoom: view.zoom,
            pan: view.pan,
            image_width: f64::from(image_width),
            image_height: f64::from(image_height),
        }
    }

    /// Maps device coordinates (relative to the surface element, in CSS
    /// pixels of `css_size`) into logical image space.
    ///
    /// Scales by the backing/displayed ratio, undoes pan/zoom, undoes
    /// the image placement, then clamps into the image.
    pub fn device_to_logical(&self, device: Point, css_size: Size) -> Point {
        let surface = Point::new(
            device.x * (self.layout.canvas_width / css_size.width),
            device.y * (self.layout.canvas_height / css_size.height),
        );
        self.surface_to_logical(surface)
    }

    /// Maps surface backing pixels into logical image space.
    pub fn surface_to_logical(&self, surface: Point) -> Point {
        let unzoomed = Point::new(
            (surface.x - self.pan.x * self.zoom) / self.zoom,
            (surface.y - self.pan.y * self.zoom) / self.zoom,
        );
        Point::new(
            ((unzoomed.x - self.layout.offset_x) / self.layout.scale)
                .clamp(0.0, self.image_width),
            ((unzoomed.y - self.layout.offset_y) / self.layout.scale)
                .clamp(0.0, self.image_height),
        )
    }

    /// Exact inverse of [`Self::surface_to_logical`]; used by the
    /// renderer to place logical-space geometry on the surface.
    pub fn logical_to_surface(&self, logical: Point) -> Point {
        Point::new(
            (logical.x * self.layout.scale + self.layout.offset_x + self.pan.x) * self.zoom,
            (logical.y * self.layout.scale + self.layout.offset_y + self.pan.y) * self.zoom,
        )
    }

    /// Converts a surface-pixel length into logical units.
    pub fn surface_len_to_logical(&self, len: f64) -> f64 {
        len / (self.layout.scale * self.zoom)
    }

    pub fn layout(&self) -> &LayoutGeometry {
        &self.layout
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{compute_layout, MenuSize};

    fn space(zoom: f64, pan: Point) -> CoordinateSpace {
        let layout = compute_layout(2500, 1686, MenuSize::Full, Size::new(800.0, 600.0)).unwrap();
        let mut view = ViewState::new();
        view.zoom = zoom;
        view.pan = pan;
        CoordinateSpace::new(layout, &view, 2500, 1686)
    }

    #[test]
    fn test_round_trip_inside_drawn_rect() {
        for (zoom, pan) in [
            (1.0, Point::new(0.0, 0.0)),
            (2.0, Point::new(-40.0, 25.0)),
            (0.5, Point::new(13.0, -7.0)),
        ] {
            let cs = space(zoom, pan);
            let css = Size::new(cs.layout().canvas_width, cs.layout().canvas_height);
            for device in [
                Point::new(100.0, 100.0),
                Point::new(400.0, 300.0),
                Point::new(63.7, 412.9),
            ] {
                let logical = cs.device_to_logical(device, css);
                // Skip points the clamp moved out of the image.
                if logical.x <= 0.0
                    || logical.y <= 0.0
                    || logical.x >= 2500.0
                    || logical.y >= 1686.0
                {
                    continue;
                }
                let back = cs.logical_to_surface(logical);
                assert!(
                    (back.x - device.x).abs() < 1.0 && (back.y - device.y).abs() < 1.0,
                    "zoom={zoom} pan=({},{}) device=({},{}) back=({},{})",
                    pan.x,
                    pan.y,
                    device.x,
                    device.y,
                    back.x,
                    back.y
                );
            }
        }
    }

    #[test]
    fn test_device_to_logical_clamps_into_image() {
        let cs = space(1.0, Point::new(0.0, 0.0));
        let css = Size::new(cs.layout().canvas_width, cs.layout().canvas_height);

        let p = cs.device_to_logical(Point::new(-50.0, 10_000.0), css);
        assert_eq!(p.x, 0.0);
        assert_eq!(p.y, 1686.0);
    }

    #[test]
    fn test_device_to_logical_honors_css_scaling() {
        let cs = space(1.0, Point::new(0.0, 0.0));
        // Surface displayed at half its backing size.
        let css = Size::new(
            cs.layout().canvas_width / 2.0,
            cs.layout().canvas_height / 2.0,
        );

        let halved = cs.device_to_logical(Point::new(200.0, 150.0), css);
        let full = cs.device_to_logical(
            Point::new(400.0, 300.0),
            Size::new(cs.layout().canvas_width, cs.layout().canvas_height),
        );
        assert!((halved.x - full.x).abs() < 1e-9);
        assert!((halved.y - full.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_by_wheel_clamps_and_locks() {
        let mut view = ViewState::new();
        for _ in 0..40 {
            view.zoom_by_wheel(-1.0);
        }
        assert!((view.zoom - MAX_ZOOM).abs() < 1e-9);

        for _ in 0..80 {
            view.zoom_by_wheel(1.0);
        }
        assert!((view.zoom - MIN_ZOOM).abs() < 1e-9);

        view.zoom_locked = true;
        view.zoom_by_wheel(-1.0);
        assert!((view.zoom - MIN_ZOOM).abs() < 1e-9);
    }

    #[test]
    fn test_reset_view_restores_defaults() {
        let mut view = ViewState::new();
        view.zoom = 2.5;
        view.pan = Point::new(120.0, -30.0);
        view.show_grid = false;

        view.reset_view();
        assert!((view.zoom - 1.0).abs() < 1e-9);
        assert_eq!(view.pan, Point::new(0.0, 0.0));
        // Grid options are untouched by a view reset.
        assert!(!view.show_grid);
    }
}
