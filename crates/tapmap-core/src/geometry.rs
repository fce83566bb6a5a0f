//! Geometry primitives and canvas layout computation.
//!
//! The editor works in three coordinate spaces:
//! - device: raw pointer coordinates relative to the surface element
//! - surface: backing pixels of the drawing surface
//! - logical: the background image's pixel grid, in which hotspot
//!   bounds are stored and exported
//!
//! [`compute_layout`] derives the surface size and image placement from
//! the image's intrinsic size, the chosen menu size, and the maximum
//! display box. The result is recomputed whenever any input changes,
//! never patched incrementally.

use serde::{Deserialize, Serialize};

/// A point in any of the editor's coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// The normalized rectangle spanned by two arbitrary corner points.
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Corner position for a resize handle.
    pub fn corner(&self, corner: Corner) -> Point {
        match corner {
            Corner::NorthWest => Point::new(self.x, self.y),
            Corner::NorthEast => Point::new(self.right(), self.y),
            Corner::SouthWest => Point::new(self.x, self.bottom()),
            Corner::SouthEast => Point::new(self.right(), self.bottom()),
        }
    }
}

/// One of the four rectangle corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::NorthWest,
        Corner::NorthEast,
        Corner::SouthWest,
        Corner::SouthEast,
    ];
}

/// Admissible menu coordinate spaces.
///
/// Hotspot bounds are persisted in one of exactly two standard sizes;
/// any other dimensions are rejected before coordinates are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuSize {
    /// 2500x1686, the full-height menu.
    #[default]
    Full,
    /// 2500x843, the half-height menu.
    Half,
}

impl MenuSize {
    pub const fn width(self) -> u32 {
        2500
    }

    pub const fn height(self) -> u32 {
        match self {
            Self::Full => 1686,
            Self::Half => 843,
        }
    }

    /// Resolves declared document dimensions to a standard size.
    pub fn from_dimensions(width: u32, height: u32) -> Result<Self, LayoutError> {
        match (width, height) {
            (2500, 1686) => Ok(Self::Full),
            (2500, 843) => Ok(Self::Half),
            _ => Err(LayoutError::UnsupportedMenuSize { width, height }),
        }
    }

    pub fn aspect(self) -> f64 {
        f64::from(self.width()) / f64::from(self.height())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("unsupported menu size {width}x{height} (expected 2500x1686 or 2500x843)")]
    UnsupportedMenuSize { width: u32, height: u32 },
    #[error("degenerate image size {width}x{height}")]
    DegenerateImage { width: u32, height: u32 },
}

/// Derived placement of the background image on the drawing surface.
///
/// Invariants: `drawn_width = image_width * scale`,
/// `scale = min(canvas_width / image_width, canvas_height / image_height)`,
/// and the drawn rectangle is centered inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutGeometry {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub scale: f64,
    pub drawn_width: f64,
    pub drawn_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl LayoutGeometry {
    /// Rectangle the image occupies on the surface, before pan/zoom.
    pub fn drawn_rect(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, self.drawn_width, self.drawn_height)
    }
}

/// Computes the surface size and image placement.
///
/// The surface adopts the menu's aspect ratio inside `max_box`
/// (whichever axis binds), then the image is fit and centered inside it
/// with a uniform scale.
pub fn compute_layout(
    image_width: u32,
    image_height: u32,
    menu_size: MenuSize,
    max_box: Size,
) -> Result<LayoutGeometry, LayoutError> {
    if image_width == 0 || image_height == 0 {
        return Err(LayoutError::DegenerateImage {
            width: image_width,
            height: image_height,
        });
    }

    let target_aspect = menu_size.aspect();
    let (canvas_width, canvas_height) = if target_aspect > max_box.width / max_box.height {
        (max_box.width, max_box.width / target_aspect)
    } else {
        (max_box.height * target_aspect, max_box.height)
    };

    let iw = f64::from(image_width);
    let ih = f64::from(image_height);
    let scale = (canvas_width / iw).min(canvas_height / ih);
    let drawn_width = iw * scale;
    let drawn_height = ih * scale;

    Ok(LayoutGeometry {
        canvas_width,
        canvas_height,
        scale,
        drawn_width,
        drawn_height,
        offset_x: (canvas_width - drawn_width) / 2.0,
        offset_y: (canvas_height - drawn_height) / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_size_dimensions() {
        assert_eq!(MenuSize::Full.width(), 2500);
        assert_eq!(MenuSize::Full.height(), 1686);
        assert_eq!(MenuSize::Half.height(), 843);

        assert_eq!(MenuSize::from_dimensions(2500, 843), Ok(MenuSize::Half));
        assert!(matches!(
            MenuSize::from_dimensions(1024, 768),
            Err(LayoutError::UnsupportedMenuSize { .. })
        ));
    }

    #[test]
    fn test_layout_containment() {
        let layout =
            compute_layout(1200, 800, MenuSize::Full, Size::new(800.0, 600.0)).unwrap();

        assert!(layout.drawn_width <= layout.canvas_width);
        assert!(layout.drawn_height <= layout.canvas_height);
        assert!(layout.offset_x >= 0.0);
        assert!(layout.offset_y >= 0.0);
        // Drawn rect is centered.
        assert!(
            (layout.offset_x * 2.0 + layout.drawn_width - layout.canvas_width).abs() < 1e-9
        );
    }

    #[test]
    fn test_layout_scale_is_uniform() {
        let layout =
            compute_layout(2500, 1686, MenuSize::Full, Size::new(800.0, 600.0)).unwrap();

        assert!((layout.drawn_width - 2500.0 * layout.scale).abs() < 1e-9);
        assert!((layout.drawn_height - 1686.0 * layout.scale).abs() < 1e-9);
        // A matching-aspect image fills the canvas exactly.
        assert!((layout.drawn_width - layout.canvas_width).abs() < 1e-6);
    }

    #[test]
    fn test_layout_rejects_degenerate_image() {
        assert!(matches!(
            compute_layout(0, 800, MenuSize::Full, Size::new(800.0, 600.0)),
            Err(LayoutError::DegenerateImage { .. })
        ));
    }

    #[test]
    fn test_rect_spanning_normalizes() {
        let r = Rect::spanning(Point::new(500.0, 100.0), Point::new(100.0, 400.0));
        assert_eq!(r, Rect::new(100.0, 100.0, 400.0, 300.0));
    }
}
