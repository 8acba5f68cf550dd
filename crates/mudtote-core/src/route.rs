//! Edge routing.
//!
//! Decides the geometry class of every edge and computes its points:
//!
//! - **Straight**: a single edge between two distinct nodes, or a boundary
//!   edge tied to a literal anchor point.
//! - **Curve**: one of several edges sharing an unordered node pair, drawn as a
//!   quadratic Bézier bent away from its siblings.
//! - **Loop**: an edge from a node to itself, drawn as a cubic Bézier.
//!
//! Every function here is pure: the same node/edge snapshot always produces
//! bit-identical output, which keeps independently rendered views in sync.

use std::{cmp::Ordering, f64::consts::PI, slice};

use crate::{
    geometry::{Point, format_number},
    label::{self, LabelPlacement},
    model::{Edge, Node, ShapeKind, find_node},
    shape::{ShapeDescriptor, boundary_point, node_connection_point, node_dimensions},
    style::effective_shape,
};

/// Total spread of the bends assigned to the edges sharing a node pair.
pub const OFFSET_RANGE: f64 = 60.0;

/// How far a self-loop reaches out, as a fraction of the node's larger side.
pub const LOOP_SIZE_FACTOR: f64 = 0.8;

/// Direction a self-loop leaves round shapes: upper-right.
const LOOP_BASE_ANGLE: f64 = -PI / 4.0;

/// Half the angle between a self-loop's start and end on round shapes.
const LOOP_SPREAD: f64 = PI / 8.0;

/// Computed geometry of one edge.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeGeometry {
    Straight {
        start: Point,
        end: Point,
        label: LabelPlacement,
    },
    Curve {
        start: Point,
        control: Point,
        end: Point,
        /// Pair-relative offset from [`edge_offset`].
        offset: f64,
        label: LabelPlacement,
    },
    Loop {
        start: Point,
        controls: [Point; 2],
        end: Point,
        label: LabelPlacement,
    },
}

impl EdgeGeometry {
    /// First point of the path, on the source boundary.
    pub fn start(&self) -> Point {
        match self {
            Self::Straight { start, .. } | Self::Curve { start, .. } | Self::Loop { start, .. } => {
                *start
            }
        }
    }

    /// Last point of the path, on the target boundary.
    pub fn end(&self) -> Point {
        match self {
            Self::Straight { end, .. } | Self::Curve { end, .. } | Self::Loop { end, .. } => *end,
        }
    }

    /// Zero, one or two Bézier control points.
    pub fn control_points(&self) -> &[Point] {
        match self {
            Self::Straight { .. } => &[],
            Self::Curve { control, .. } => slice::from_ref(control),
            Self::Loop { controls, .. } => controls,
        }
    }

    /// Label anchor and rotation.
    pub fn label(&self) -> LabelPlacement {
        match self {
            Self::Straight { label, .. } | Self::Curve { label, .. } | Self::Loop { label, .. } => {
                *label
            }
        }
    }

    /// SVG path data: `M … L …`, `M … Q …` or `M … C …`.
    pub fn path_data(&self) -> String {
        let pt = |p: Point| format!("{} {}", format_number(p.x()), format_number(p.y()));
        match self {
            Self::Straight { start, end, .. } => format!("M {} L {}", pt(*start), pt(*end)),
            Self::Curve {
                start,
                control,
                end,
                ..
            } => format!("M {} Q {} {}", pt(*start), pt(*control), pt(*end)),
            Self::Loop {
                start,
                controls,
                end,
                ..
            } => format!(
                "M {} C {} {} {}",
                pt(*start),
                pt(controls[0]),
                pt(controls[1]),
                pt(*end)
            ),
        }
    }

    /// All points the drawn path and its label can reach, for extent computation.
    pub fn extent_points(&self) -> impl Iterator<Item = Point> + '_ {
        [self.start(), self.end(), self.label().anchor]
            .into_iter()
            .chain(self.control_points().iter().copied())
    }
}

/// Computes the bend of `edge` relative to the other edges joining the same
/// unordered node pair.
///
/// The siblings are ordered by edge id. A lone edge gets 0; `n ≥ 2` edges are
/// spread evenly over [`OFFSET_RANGE`], centered at zero, so two edges get
/// `∓OFFSET_RANGE / 2`.
///
/// The offset is expressed in the pair's own frame (oriented from the
/// lexicographically smaller node id to the larger one), so an A→B edge and
/// a B→A edge with opposite offsets bend to opposite sides.
pub fn edge_offset(edge: &Edge, all_edges: &[Edge]) -> f64 {
    if edge.is_self_loop() {
        return 0.0;
    }

    let mut siblings: Vec<&Edge> = all_edges
        .iter()
        .filter(|other| other.id != edge.id && edge.shares_pair_with(other))
        .collect();
    if siblings.is_empty() {
        return 0.0;
    }
    siblings.push(edge);
    siblings.sort_by(|a, b| a.id.cmp(&b.id));

    let count = siblings.len();
    let index = siblings
        .iter()
        .position(|sibling| sibling.id == edge.id)
        .unwrap_or_default();

    let spacing = OFFSET_RANGE / (count - 1) as f64;
    (index as f64 - (count - 1) as f64 / 2.0) * spacing
}

/// `+1` when `source` sorts before `target`, else `-1`.
fn orientation(source: &Node, target: &Node) -> f64 {
    match source.id.cmp(&target.id) {
        Ordering::Greater => -1.0,
        Ordering::Less | Ordering::Equal => 1.0,
    }
}

/// Computes the geometry of `edge` against the current node snapshot.
///
/// Returns `None` when an endpoint references a node that does not exist,
/// or when a boundary edge lacks both an endpoint and an anchor. Callers
/// skip such edges.
pub fn compute_edge_geometry(
    edge: &Edge,
    nodes: &[Node],
    all_edges: &[Edge],
) -> Option<EdgeGeometry> {
    match (edge.source.as_deref(), edge.target.as_deref()) {
        (Some(source), Some(target)) => {
            let source = find_node(nodes, source)?;
            let target = find_node(nodes, target)?;

            if source.id == target.id {
                return Some(loop_geometry(source));
            }

            let offset = edge_offset(edge, all_edges);
            if offset == 0.0 {
                Some(straight_geometry(source, target))
            } else {
                Some(curve_geometry(source, target, offset))
            }
        }
        (None, Some(target)) => {
            let target = find_node(nodes, target)?;
            let anchor = edge.anchor?;
            let end = node_connection_point(target, anchor);
            Some(EdgeGeometry::Straight {
                start: anchor,
                end,
                label: label::straight_label(anchor, end),
            })
        }
        (Some(source), None) => {
            let source = find_node(nodes, source)?;
            let anchor = edge.anchor?;
            let start = node_connection_point(source, anchor);
            Some(EdgeGeometry::Straight {
                start,
                end: anchor,
                label: label::straight_label(start, anchor),
            })
        }
        (None, None) => None,
    }
}

fn straight_geometry(source: &Node, target: &Node) -> EdgeGeometry {
    let start = node_connection_point(source, target.position);
    let end = node_connection_point(target, source.position);

    EdgeGeometry::Straight {
        start,
        end,
        label: label::straight_label(start, end),
    }
}

fn curve_geometry(source: &Node, target: &Node, offset: f64) -> EdgeGeometry {
    let bend = offset * orientation(source, target);
    let normal = target
        .position
        .sub_point(source.position)
        .perpendicular()
        .normalize();
    let control = source
        .position
        .midpoint(target.position)
        .add_point(normal.scale(bend));

    // Aim at the control point so the endpoints follow the curve's direction.
    let start = node_connection_point(source, control);
    let end = node_connection_point(target, control);

    EdgeGeometry::Curve {
        start,
        control,
        end,
        offset,
        label: label::curve_label(start, control, end, bend),
    }
}

fn loop_geometry(node: &Node) -> EdgeGeometry {
    let dims = node_dimensions(node);
    let loop_size = dims.width.max(dims.height) * LOOP_SIZE_FACTOR;
    let center = node.position;

    let (start, controls, end) = match effective_shape(node) {
        ShapeKind::Rectangle => rectangle_loop(center, dims, loop_size),
        shape => round_loop(shape, center, dims, loop_size),
    };

    EdgeGeometry::Loop {
        start,
        controls,
        end,
        label: label::loop_label(center, dims.width, dims.height, loop_size),
    }
}

/// Loop leaving the upper half of the right edge and returning to its lower half.
fn rectangle_loop(center: Point, dims: ShapeDescriptor, loop_size: f64) -> (Point, [Point; 2], Point) {
    let right = center.x() + dims.width / 2.0;
    let quarter = dims.height / 4.0;

    let start = Point::new(right, center.y() - quarter);
    let end = Point::new(right, center.y() + quarter);
    let controls = [
        Point::new(start.x() + loop_size, start.y() - loop_size / 2.0),
        Point::new(end.x() + loop_size, end.y() + loop_size / 2.0),
    ];
    (start, controls, end)
}

/// Loop around the upper-right direction of ellipses, diamonds and circle-like shapes.
fn round_loop(
    shape: ShapeKind,
    center: Point,
    dims: ShapeDescriptor,
    loop_size: f64,
) -> (Point, [Point; 2], Point) {
    let out = Point::from_angle(LOOP_BASE_ANGLE - LOOP_SPREAD);
    let back = Point::from_angle(LOOP_BASE_ANGLE + LOOP_SPREAD);

    let start = boundary_point(shape, center, dims, center.add_point(out));
    let end = boundary_point(shape, center, dims, center.add_point(back));
    let controls = [
        start.add_point(out.scale(loop_size)),
        end.add_point(back.scale(loop_size)),
    ];
    (start, controls, end)
}
