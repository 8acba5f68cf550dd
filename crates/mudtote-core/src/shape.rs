//! Node shape geometry.
//!
//! Size and boundary math for every node shape. Dispatch is an explicit
//! `match` on [`ShapeKind`]; all functions are pure.
//!
//! | Shape | Base size | Boundary |
//! |-------|-----------|----------|
//! | Ellipse | 100 × 50 | exact ellipse |
//! | Rectangle | 100 × 50 | exact rectangle |
//! | Diamond | 70 × 70 | circle of radius `0.8 × radius` |
//! | Circle, Triangle, Hexagon, Star | radius 40 | circle of radius `radius` |
//!
//! The base size is scaled by the node's [`SizeClass`](crate::model::SizeClass) multiplier.

use crate::{
    geometry::{Point, Size},
    model::{Node, ShapeKind},
    style::{effective_shape, effective_size},
};

const BASE_WIDTH: f64 = 100.0;
const BASE_HEIGHT: f64 = 50.0;
const DIAMOND_BASE_SIZE: f64 = 70.0;
const CIRCLE_BASE_RADIUS: f64 = 40.0;

/// Fraction of the node radius used as the diamond's boundary circle.
pub const DIAMOND_RADIUS_FACTOR: f64 = 0.8;

/// Radius of the circular marker drawn for TOTE entry and exit points.
pub const BOUNDARY_MARKER_RADIUS: f64 = 10.0;

/// Derived node extent. `radius` is always populated, including for
/// rectangles and ellipses where it is half the width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDescriptor {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl ShapeDescriptor {
    /// Width and height as a [`Size`].
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Computes the drawn extent of a node from its effective shape and size class.
pub fn node_dimensions(node: &Node) -> ShapeDescriptor {
    shape_dimensions(effective_shape(node), effective_size(node).multiplier())
}

/// Computes the extent of `shape` scaled by `multiplier`.
pub fn shape_dimensions(shape: ShapeKind, multiplier: f64) -> ShapeDescriptor {
    match shape {
        ShapeKind::Diamond => {
            let size = DIAMOND_BASE_SIZE * multiplier;
            ShapeDescriptor {
                width: size,
                height: size,
                radius: size / 2.0,
            }
        }
        ShapeKind::Circle | ShapeKind::Triangle | ShapeKind::Hexagon | ShapeKind::Star => {
            let radius = CIRCLE_BASE_RADIUS * multiplier;
            ShapeDescriptor {
                width: radius * 2.0,
                height: radius * 2.0,
                radius,
            }
        }
        ShapeKind::Rectangle | ShapeKind::Ellipse => {
            let width = BASE_WIDTH * multiplier;
            ShapeDescriptor {
                width,
                height: BASE_HEIGHT * multiplier,
                radius: width / 2.0,
            }
        }
    }
}

/// Finds where the ray from the node's center toward `target` crosses the
/// node's drawn outline.
///
/// If `target` coincides with the center the center is returned.
pub fn node_connection_point(node: &Node, target: Point) -> Point {
    let dims = node_dimensions(node);
    boundary_point(effective_shape(node), node.position, dims, target)
}

/// Boundary intersection for an explicit shape and extent centered at `center`.
pub fn boundary_point(
    shape: ShapeKind,
    center: Point,
    dims: ShapeDescriptor,
    target: Point,
) -> Point {
    let direction = target.sub_point(center);
    if direction.is_zero() {
        return center;
    }

    let offset = match shape {
        ShapeKind::Ellipse => ellipse_offset(direction, dims.width / 2.0, dims.height / 2.0),
        ShapeKind::Rectangle => rectangle_offset(direction, dims.width / 2.0, dims.height / 2.0),
        ShapeKind::Diamond => circle_offset(direction, dims.radius * DIAMOND_RADIUS_FACTOR),
        ShapeKind::Circle | ShapeKind::Triangle | ShapeKind::Hexagon | ShapeKind::Star => {
            circle_offset(direction, dims.radius)
        }
    };

    center.add_point(offset)
}

fn ellipse_offset(direction: Point, rx: f64, ry: f64) -> Point {
    // Parametric angle of the boundary point, not the polar angle of `direction`.
    let theta = (direction.y() * rx).atan2(direction.x() * ry);
    Point::new(rx * theta.cos(), ry * theta.sin())
}

fn rectangle_offset(direction: Point, half_width: f64, half_height: f64) -> Point {
    let (dx, dy) = (direction.x(), direction.y());

    if dx.abs() * half_height > dy.abs() * half_width {
        // Exits through the left or right edge.
        Point::new(half_width.copysign(dx), dy * half_width / dx.abs())
    } else {
        Point::new(dx * half_height / dy.abs(), half_height.copysign(dy))
    }
}

fn circle_offset(direction: Point, radius: f64) -> Point {
    direction.normalize().scale(radius)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::{NodeStyle, NodeType, SizeClass};

    fn node_with(node_type: NodeType, shape: Option<ShapeKind>, size: Option<SizeClass>) -> Node {
        let node = Node::new("n", node_type, Point::new(0.0, 0.0));
        if shape.is_none() && size.is_none() {
            return node;
        }
        node.with_style(NodeStyle {
            shape,
            size,
            ..NodeStyle::default()
        })
    }

    fn assert_point_eq(actual: Point, expected: Point) {
        assert_approx_eq!(f64, actual.x(), expected.x(), epsilon = 1e-9);
        assert_approx_eq!(f64, actual.y(), expected.y(), epsilon = 1e-9);
    }

    #[test]
    fn test_dimensions_per_shape() {
        let rect = node_dimensions(&node_with(NodeType::Practice, None, None));
        assert_eq!(rect, ShapeDescriptor { width: 100.0, height: 50.0, radius: 50.0 });

        let diamond = node_dimensions(&node_with(NodeType::Test, None, None));
        assert_eq!(diamond, ShapeDescriptor { width: 70.0, height: 70.0, radius: 35.0 });

        let circle = node_dimensions(&node_with(NodeType::Custom, None, None));
        assert_eq!(circle, ShapeDescriptor { width: 80.0, height: 80.0, radius: 40.0 });
    }

    #[test]
    fn test_dimensions_size_multiplier() {
        let small = node_dimensions(&node_with(NodeType::Vocabulary, None, Some(SizeClass::Small)));
        assert_approx_eq!(f64, small.width, 80.0);
        assert_approx_eq!(f64, small.height, 40.0);

        let large = node_dimensions(&node_with(NodeType::Custom, None, Some(SizeClass::Large)));
        assert_approx_eq!(f64, large.radius, 52.0);
    }

    #[test]
    fn test_dimensions_follow_shape_override() {
        let node = node_with(NodeType::Vocabulary, Some(ShapeKind::Diamond), None);
        assert_approx_eq!(f64, node_dimensions(&node).width, 70.0);
    }

    #[test]
    fn test_coincident_target_returns_center() {
        let node = Node::new("n", NodeType::Practice, Point::new(12.0, 34.0));
        assert_eq!(node_connection_point(&node, Point::new(12.0, 34.0)), node.position);
    }

    #[test]
    fn test_rectangle_axis_aligned() {
        let node = node_with(NodeType::Practice, None, None);
        assert_point_eq(node_connection_point(&node, Point::new(200.0, 0.0)), Point::new(50.0, 0.0));
        assert_point_eq(node_connection_point(&node, Point::new(-200.0, 0.0)), Point::new(-50.0, 0.0));
        assert_point_eq(node_connection_point(&node, Point::new(0.0, 300.0)), Point::new(0.0, 25.0));
        assert_point_eq(node_connection_point(&node, Point::new(0.0, -1.0)), Point::new(0.0, -25.0));
    }

    #[test]
    fn test_rectangle_through_corner_region() {
        let node = node_with(NodeType::Practice, None, None);
        // Slope 1 exits through the top/bottom edge of a 100x50 box.
        assert_point_eq(node_connection_point(&node, Point::new(100.0, 100.0)), Point::new(25.0, 25.0));
        // Shallow slope exits through the right edge.
        assert_point_eq(node_connection_point(&node, Point::new(100.0, 20.0)), Point::new(50.0, 10.0));
    }

    #[test]
    fn test_ellipse_axis_aligned() {
        let node = node_with(NodeType::Vocabulary, None, None);
        assert_point_eq(node_connection_point(&node, Point::new(-200.0, 0.0)), Point::new(-50.0, 0.0));
        assert_point_eq(node_connection_point(&node, Point::new(0.0, 10.0)), Point::new(0.0, 25.0));
    }

    #[test]
    fn test_ellipse_keeps_ray_direction() {
        let node = node_with(NodeType::Vocabulary, None, None);
        let target = Point::new(30.0, 40.0);
        let point = node_connection_point(&node, target);
        // Collinear with the ray from the center.
        assert_approx_eq!(f64, point.x() * target.y(), point.y() * target.x(), epsilon = 1e-9);
        assert!(point.x() > 0.0 && point.y() > 0.0);
    }

    #[test]
    fn test_diamond_uses_reduced_circle() {
        let node = node_with(NodeType::Test, None, None);
        let point = node_connection_point(&node, Point::new(0.0, 500.0));
        assert_point_eq(point, Point::new(0.0, 28.0));
    }

    #[test]
    fn test_polygon_shapes_behave_as_circles() {
        for shape in [ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Hexagon, ShapeKind::Star] {
            let node = node_with(NodeType::Custom, Some(shape), None);
            let point = node_connection_point(&node, Point::new(3.0, 4.0));
            assert_point_eq(point, Point::new(24.0, 32.0));
        }
    }

    #[test]
    fn test_connection_point_is_relative_to_position() {
        let node = Node::new("b", NodeType::Vocabulary, Point::new(200.0, 0.0));
        assert_point_eq(node_connection_point(&node, Point::new(0.0, 0.0)), Point::new(150.0, 0.0));
    }
}
