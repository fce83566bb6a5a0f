//! Grid quantization of logical coordinates.

use crate::geometry::Point;

/// Snaps `v` to the nearest multiple of `grid`.
///
/// Ties exactly halfway between two grid lines round away from zero
/// (`f64::round` semantics), so `snap(25.0, 50.0) == 50.0`. This rule is
/// observable in exported coordinates and must not change silently.
///
/// A non-positive grid leaves the value untouched.
pub fn snap(v: f64, grid: f64) -> f64 {
    if grid <= 0.0 {
        return v;
    }
    (v / grid).round() * grid
}

/// Per-axis snap of a logical point.
pub fn snap_point(p: Point, grid: f64) -> Point {
    Point::new(snap(p.x, grid), snap(p.y, grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_nearest_line() {
        assert_eq!(snap(104.0, 50.0), 100.0);
        assert_eq!(snap(126.0, 50.0), 150.0);
        assert_eq!(snap(0.0, 50.0), 0.0);
    }

    #[test]
    fn test_snap_half_rounds_away_from_zero() {
        assert_eq!(snap(25.0, 50.0), 50.0);
        assert_eq!(snap(75.0, 50.0), 100.0);
        assert_eq!(snap(-25.0, 50.0), -50.0);
    }

    #[test]
    fn test_snap_is_idempotent() {
        for v in [-173.2, -25.0, 0.0, 3.0, 104.9, 125.0, 999.7] {
            for g in [1.0, 10.0, 50.0, 137.0] {
                let once = snap(v, g);
                assert_eq!(snap(once, g), once, "snap({v}, {g})");
            }
        }
    }

    #[test]
    fn test_snap_ignores_degenerate_grid() {
        assert_eq!(snap(104.0, 0.0), 104.0);
        assert_eq!(snap(104.0, -10.0), 104.0);
    }

    #[test]
    fn test_snap_point_is_per_axis() {
        let p = snap_point(Point::new(104.0, 126.0), 50.0);
        assert_eq!((p.x, p.y), (100.0, 150.0));
    }
}
