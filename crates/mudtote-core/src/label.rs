//! Edge label placement.
//!
//! Labels sit beside the stroke, never on it, and are rotated to follow the
//! edge without ever reading upside down. Loop labels are not rotated: their
//! angle is `None`, which callers must treat as "no rotation" rather than 0°.

use crate::geometry::Point;

/// Distance between an edge and the anchor of its label.
pub const LABEL_OFFSET: f64 = 12.0;

/// Where an edge label goes and how it is turned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    /// Center of the label text.
    pub anchor: Point,
    /// Rotation in degrees, clockwise in screen coordinates, within `(-90, 90]`.
    pub angle: Option<f64>,
}

/// Normalizes an angle in degrees into `(-90, 90]` by a half turn, so text
/// following the line is never upside down.
///
/// ```
/// # use mudtote_core::label::normalize_angle;
/// assert_eq!(normalize_angle(180.0), 0.0);
/// assert_eq!(normalize_angle(-90.0), 90.0);
/// assert_eq!(normalize_angle(135.0), -45.0);
/// assert_eq!(normalize_angle(90.0), 90.0);
/// ```
pub fn normalize_angle(degrees: f64) -> f64 {
    if degrees > 90.0 {
        degrees - 180.0
    } else if degrees <= -90.0 {
        degrees + 180.0
    } else {
        degrees
    }
}

/// Readable angle of a direction vector, in degrees.
fn readable_angle(direction: Point) -> f64 {
    normalize_angle(direction.y().atan2(direction.x()).to_degrees())
}

/// Label of a straight segment: the midpoint pushed [`LABEL_OFFSET`] toward
/// the top of the (readable) text.
pub fn straight_label(start: Point, end: Point) -> LabelPlacement {
    let angle = readable_angle(end.sub_point(start));
    let radians = angle.to_radians();
    let above = Point::new(radians.sin(), -radians.cos());

    LabelPlacement {
        anchor: start.midpoint(end).add_point(above.scale(LABEL_OFFSET)),
        angle: Some(angle),
    }
}

/// Point on the quadratic Bézier `p0 → control → p1` at parameter `t`.
pub fn quadratic_point(p0: Point, control: Point, p1: Point, t: f64) -> Point {
    let u = 1.0 - t;
    p0.scale(u * u)
        .add_point(control.scale(2.0 * u * t))
        .add_point(p1.scale(t * t))
}

/// Derivative of the quadratic Bézier `p0 → control → p1` at parameter `t`.
pub fn quadratic_tangent(p0: Point, control: Point, p1: Point, t: f64) -> Point {
    control
        .sub_point(p0)
        .scale(2.0 * (1.0 - t))
        .add_point(p1.sub_point(control).scale(2.0 * t))
}

/// Label of a quadratic curve: the curve's midpoint (t = 0.5) pushed along
/// the tangent's normal toward the convex side.
///
/// `bend` is the signed displacement the router applied to the control point
/// along the normal of the source→target direction; its sign selects the side.
pub fn curve_label(start: Point, control: Point, end: Point, bend: f64) -> LabelPlacement {
    let mid = quadratic_point(start, control, end, 0.5);
    let tangent = quadratic_tangent(start, control, end, 0.5);
    let normal = tangent.perpendicular().normalize();
    let side = bend.signum();

    LabelPlacement {
        anchor: mid.add_point(normal.scale(LABEL_OFFSET * side)),
        angle: Some(readable_angle(tangent)),
    }
}

/// Label of a self-loop: a fixed spot above-right of the node.
pub fn loop_label(center: Point, width: f64, height: f64, loop_size: f64) -> LabelPlacement {
    LabelPlacement {
        anchor: Point::new(
            center.x() + width / 2.0 + loop_size * 0.5,
            center.y() - height / 2.0 - LABEL_OFFSET,
        ),
        angle: None,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_normalize_angle_range() {
        for degrees in [-179.0, -90.0, -45.0, 0.0, 45.0, 90.0, 91.0, 180.0] {
            let normalized = normalize_angle(degrees);
            assert!(normalized > -90.0 && normalized <= 90.0, "{degrees} -> {normalized}");
        }
    }

    #[test]
    fn test_straight_label_horizontal() {
        let label = straight_label(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert_approx_eq!(f64, label.anchor.x(), 50.0);
        assert_approx_eq!(f64, label.anchor.y(), -LABEL_OFFSET);
        assert_eq!(label.angle, Some(0.0));
    }

    #[test]
    fn test_straight_label_reversed_reads_left_to_right() {
        let forward = straight_label(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let backward = straight_label(Point::new(100.0, 0.0), Point::new(0.0, 0.0));
        assert_approx_eq!(f64, backward.angle.unwrap(), 0.0);
        assert_approx_eq!(f64, forward.anchor.y(), backward.anchor.y());
    }

    #[test]
    fn test_straight_label_vertical() {
        let label = straight_label(Point::new(0.0, 100.0), Point::new(0.0, 0.0));
        assert_approx_eq!(f64, label.angle.unwrap(), 90.0);
        assert_approx_eq!(f64, label.anchor.x(), LABEL_OFFSET, epsilon = 1e-9);
        assert_approx_eq!(f64, label.anchor.y(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_quadratic_midpoint() {
        let mid = quadratic_point(
            Point::new(0.0, 0.0),
            Point::new(50.0, 40.0),
            Point::new(100.0, 0.0),
            0.5,
        );
        assert_approx_eq!(f64, mid.x(), 50.0);
        assert_approx_eq!(f64, mid.y(), 20.0);
    }

    #[test]
    fn test_curve_label_on_convex_side() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(100.0, 0.0);

        // Control below the chord: bend is positive along (0, 1).
        let below = curve_label(start, Point::new(50.0, 40.0), end, 40.0);
        assert_approx_eq!(f64, below.anchor.y(), 20.0 + LABEL_OFFSET);
        assert_approx_eq!(f64, below.angle.unwrap(), 0.0);

        let above = curve_label(start, Point::new(50.0, -40.0), end, -40.0);
        assert_approx_eq!(f64, above.anchor.y(), -20.0 - LABEL_OFFSET);
    }

    #[test]
    fn test_loop_label_has_no_rotation() {
        let label = loop_label(Point::new(0.0, 0.0), 80.0, 80.0, 64.0);
        assert_eq!(label.angle, None);
        assert!(label.anchor.x() > 40.0);
        assert!(label.anchor.y() < -40.0);
    }
}
