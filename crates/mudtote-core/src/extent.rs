//! Diagram extent.

use crate::{
    geometry::{Bounds, Point, Size},
    model::Diagram,
    route::compute_edge_geometry,
    shape::{BOUNDARY_MARKER_RADIUS, node_dimensions},
};

/// Smallest box containing everything drawn for `diagram`.
///
/// Covers every node's shape box, every entry/exit marker, and every routed
/// edge's start, end, control points and label anchor. Edges that cannot be
/// routed contribute nothing. Returns `None` for an empty diagram.
pub fn diagram_bounds(diagram: &Diagram) -> Option<Bounds> {
    let marker = Size::new(BOUNDARY_MARKER_RADIUS * 2.0, BOUNDARY_MARKER_RADIUS * 2.0);

    let node_boxes = diagram
        .nodes
        .iter()
        .map(|node| node.position.to_bounds(node_dimensions(node).size()));
    let marker_boxes = diagram
        .entry_points
        .iter()
        .map(|entry| entry.position)
        .chain(diagram.exit_points.iter().map(|exit| exit.position))
        .map(|position| position.to_bounds(marker));
    let edge_points: Vec<Point> = diagram
        .edges
        .iter()
        .filter_map(|edge| compute_edge_geometry(edge, &diagram.nodes, &diagram.edges))
        .flat_map(|geometry| geometry.extent_points().collect::<Vec<_>>())
        .collect();

    node_boxes
        .chain(marker_boxes)
        .chain(edge_points.into_iter().map(Bounds::from_point))
        .reduce(|acc, bounds| acc.merge(&bounds))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::model::{Edge, EdgeType, EntryPoint, Node, NodeType};

    #[test]
    fn test_empty_diagram_has_no_bounds() {
        assert!(diagram_bounds(&Diagram::default()).is_none());
    }

    #[test]
    fn test_bounds_cover_node_boxes() {
        let diagram = Diagram {
            nodes: vec![
                Node::new("a", NodeType::Practice, Point::new(0.0, 0.0)),
                Node::new("b", NodeType::Vocabulary, Point::new(200.0, 100.0)),
            ],
            ..Diagram::default()
        };
        let bounds = diagram_bounds(&diagram).unwrap();
        assert_approx_eq!(f64, bounds.min_x(), -50.0);
        assert_approx_eq!(f64, bounds.min_y(), -25.0);
        assert_approx_eq!(f64, bounds.max_x(), 250.0);
        assert_approx_eq!(f64, bounds.max_y(), 125.0);
    }

    #[test]
    fn test_bounds_cover_loops_and_labels() {
        let node = Node::new("a", NodeType::Custom, Point::new(0.0, 0.0));
        let diagram = Diagram {
            nodes: vec![node],
            edges: vec![Edge::new("l", "a", "a", EdgeType::Loop)],
            ..Diagram::default()
        };
        let bounds = diagram_bounds(&diagram).unwrap();
        // The loop reaches well past the 40px circle.
        assert!(bounds.max_x() > 80.0);
        assert!(bounds.min_y() < -40.0);
    }

    #[test]
    fn test_bounds_cover_entry_points() {
        let diagram = Diagram {
            entry_points: vec![EntryPoint {
                id: "in".to_string(),
                position: Point::new(-300.0, 0.0),
                label: None,
            }],
            nodes: vec![Node::new("a", NodeType::Test, Point::new(0.0, 0.0))],
            ..Diagram::default()
        };
        let bounds = diagram_bounds(&diagram).unwrap();
        assert_approx_eq!(f64, bounds.min_x(), -300.0 - BOUNDARY_MARKER_RADIUS);
    }

    #[test]
    fn test_dangling_edges_are_ignored() {
        let diagram = Diagram {
            nodes: vec![Node::new("a", NodeType::Practice, Point::new(0.0, 0.0))],
            edges: vec![Edge::new("e", "a", "ghost", EdgeType::Pv)],
            ..Diagram::default()
        };
        let bounds = diagram_bounds(&diagram).unwrap();
        assert_approx_eq!(f64, bounds.width(), 100.0);
    }
}
