//! Pointer-driven interaction state machine.
//!
//! Exactly one mode is active at a time; the payload-carrying enum
//! makes a simultaneous drag-and-resize unrepresentable.

use crate::geometry::{Corner, Point, Rect};
use crate::hotspot::HotspotId;

/// Minimum committed hotspot dimension, in logical units. Draws and
/// resizes that would produce a smaller rectangle are discarded.
pub const MIN_HOTSPOT_SIZE: f64 = 10.0;

/// Corner-handle grab radius, in surface pixels. Divided by the
/// current scale and zoom before comparing in logical space.
pub const HANDLE_GRAB_SIZE: f64 = 8.0;

/// Current pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    /// Rubber-banding a new hotspot from a fixed start corner.
    Drawing { start: Point },
    /// Moving an existing hotspot; `grab_offset` is the pointer's
    /// offset from the bounds origin at grab time.
    Dragging {
        target: HotspotId,
        grab_offset: Point,
    },
    /// Resizing an existing hotspot by one corner handle.
    Resizing { target: HotspotId, handle: Corner },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The hotspot owned by the active gesture, if any.
    pub fn gesture_target(&self) -> Option<HotspotId> {
        match self {
            Self::Dragging { target, .. } | Self::Resizing { target, .. } => Some(*target),
            Self::Idle | Self::Drawing { .. } => None,
        }
    }
}

/// Applies a corner-handle resize, keeping the opposite corner fixed.
///
/// `p` is the (already snapped) pointer position in logical space.
/// Returns `None` when either resulting dimension would not exceed
/// [`MIN_HOTSPOT_SIZE`]; the caller retains the previous bounds.
pub fn resize_bounds(bounds: Rect, handle: Corner, p: Point) -> Option<Rect> {
    let (left, top) = (bounds.x, bounds.y);
    let (right, bottom) = (bounds.right(), bounds.bottom());

    let next = match handle {
        Corner::NorthWest => Rect::new(p.x, p.y, right - p.x, bottom - p.y),
        Corner::NorthEast => Rect::new(left, p.y, p.x - left, bottom - p.y),
        Corner::SouthWest => Rect::new(p.x, top, right - p.x, p.y - top),
        Corner::SouthEast => Rect::new(left, top, p.x - left, p.y - top),
    };

    (next.width > MIN_HOTSPOT_SIZE && next.height > MIN_HOTSPOT_SIZE).then_some(next)
}

/// Whether a rubber-band result is large enough to commit.
pub fn meets_min_size(rect: Rect) -> bool {
    rect.width > MIN_HOTSPOT_SIZE && rect.height > MIN_HOTSPOT_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(100.0, 100.0, 200.0, 150.0);

    #[test]
    fn test_se_resize_preserves_origin() {
        let next = resize_bounds(BOUNDS, Corner::SouthEast, Point::new(400.0, 300.0)).unwrap();
        assert_eq!((next.x, next.y), (100.0, 100.0));
        assert_eq!((next.width, next.height), (300.0, 200.0));
    }

    #[test]
    fn test_nw_resize_preserves_opposite_corner() {
        let next = resize_bounds(BOUNDS, Corner::NorthWest, Point::new(150.0, 120.0)).unwrap();
        assert_eq!((next.right(), next.bottom()), (BOUNDS.right(), BOUNDS.bottom()));
        assert_eq!((next.x, next.y), (150.0, 120.0));
    }

    #[test]
    fn test_ne_and_sw_anchor_their_opposites() {
        let ne = resize_bounds(BOUNDS, Corner::NorthEast, Point::new(350.0, 130.0)).unwrap();
        assert_eq!((ne.x, ne.bottom()), (BOUNDS.x, BOUNDS.bottom()));

        let sw = resize_bounds(BOUNDS, Corner::SouthWest, Point::new(120.0, 220.0)).unwrap();
        assert_eq!((sw.right(), sw.y), (BOUNDS.right(), BOUNDS.y));
    }

    #[test]
    fn test_resize_below_min_size_is_rejected() {
        // Collapsing to 5 logical units of width keeps the old bounds.
        assert_eq!(
            resize_bounds(BOUNDS, Corner::SouthEast, Point::new(105.0, 300.0)),
            None
        );
        // Crossing over the anchored corner is rejected as well.
        assert_eq!(
            resize_bounds(BOUNDS, Corner::SouthEast, Point::new(50.0, 50.0)),
            None
        );
    }

    #[test]
    fn test_meets_min_size_threshold() {
        assert!(!meets_min_size(Rect::new(0.0, 0.0, 5.0, 3.0)));
        assert!(!meets_min_size(Rect::new(0.0, 0.0, 10.0, 40.0)));
        assert!(meets_min_size(Rect::new(0.0, 0.0, 10.1, 10.1)));
    }

    #[test]
    fn test_single_active_gesture() {
        let state = InteractionState::Resizing {
            target: 3,
            handle: Corner::SouthEast,
        };
        assert_eq!(state.gesture_target(), Some(3));
        assert!(!state.is_idle());
        assert_eq!(InteractionState::Idle.gesture_target(), None);
    }
}
