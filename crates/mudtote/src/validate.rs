//! Import validation.
//!
//! The geometry engine assumes structurally sound input and never checks
//! it. Diagrams arriving from outside (files, clipboard, other tools) go
//! through [`validate_diagram`] first; [`DiagramExporter::parse_json`]
//! refuses anything with an error-severity issue.
//!
//! [`DiagramExporter::parse_json`]: crate::DiagramExporter::parse_json

use std::{collections::HashSet, fmt};

use mudtote_core::{geometry::Point, model::Diagram};

/// How serious an [`Issue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Rendered anyway; the affected element is skipped.
    Warning,
    /// The diagram cannot be rendered faithfully.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// One problem found in a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    severity: Severity,
    element_id: String,
    message: String,
}

impl Issue {
    /// Creates an error-severity issue.
    pub fn error(element_id: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            element_id: element_id.to_string(),
            message: message.into(),
        }
    }

    /// Creates a warning.
    pub fn warning(element_id: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            element_id: element_id.to_string(),
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Id of the node, edge or marker the issue is about.
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`: {}", self.severity, self.element_id, self.message)
    }
}

/// Reports every structural problem in `diagram`, in document order.
///
/// Errors: duplicate node ids, duplicate edge ids, non-finite positions or
/// anchors. Warnings: edges referencing missing nodes, and edges missing an
/// endpoint that are not boundary edges with an anchor.
pub fn validate_diagram(diagram: &Diagram) -> Vec<Issue> {
    let mut issues = Vec::new();

    let mut node_ids = HashSet::new();
    for node in &diagram.nodes {
        if !node_ids.insert(node.id.as_str()) {
            issues.push(Issue::error(&node.id, "duplicate node id"));
        }
        check_point(&mut issues, &node.id, "position", node.position);
    }

    let mut edge_ids = HashSet::new();
    for edge in &diagram.edges {
        if !edge_ids.insert(edge.id.as_str()) {
            issues.push(Issue::error(&edge.id, "duplicate edge id"));
        }
        if let Some(anchor) = edge.anchor {
            check_point(&mut issues, &edge.id, "anchor", anchor);
        }

        for (end, reference) in [("source", &edge.source), ("target", &edge.target)] {
            let Some(id) = reference else { continue };
            if !node_ids.contains(id.as_str()) {
                issues.push(Issue::warning(
                    &edge.id,
                    format!("{end} `{id}` does not exist; the edge will not be drawn"),
                ));
            }
        }

        let missing_endpoint = edge.source.is_none() || edge.target.is_none();
        let routable_boundary = edge.edge_type.is_boundary() && edge.anchor.is_some();
        if missing_endpoint && !routable_boundary {
            issues.push(Issue::warning(
                &edge.id,
                "missing endpoint without a boundary anchor; the edge will not be drawn",
            ));
        }
    }

    for entry in &diagram.entry_points {
        check_point(&mut issues, &entry.id, "position", entry.position);
    }
    for exit in &diagram.exit_points {
        check_point(&mut issues, &exit.id, "position", exit.position);
    }

    issues
}

fn check_point(issues: &mut Vec<Issue>, id: &str, field: &str, point: Point) {
    if !point.is_finite() {
        issues.push(Issue::error(id, format!("{field} is not a finite coordinate")));
    }
}

#[cfg(test)]
mod tests {
    use mudtote_core::model::{Edge, EdgeType, Node, NodeType};

    use super::*;

    fn node(id: &str) -> Node {
        Node::new(id, NodeType::Practice, Point::new(0.0, 0.0))
    }

    #[test]
    fn test_valid_diagram_has_no_issues() {
        let diagram = Diagram {
            nodes: vec![node("a"), node("b")],
            edges: vec![Edge::new("e", "a", "b", EdgeType::Pv)],
            ..Diagram::default()
        };
        assert!(validate_diagram(&diagram).is_empty());
    }

    #[test]
    fn test_duplicate_ids_are_errors() {
        let diagram = Diagram {
            nodes: vec![node("a"), node("a")],
            edges: vec![
                Edge::new("e", "a", "a", EdgeType::Loop),
                Edge::new("e", "a", "a", EdgeType::Loop),
            ],
            ..Diagram::default()
        };
        let issues = validate_diagram(&diagram);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(Issue::is_error));
    }

    #[test]
    fn test_dangling_reference_is_warning() {
        let diagram = Diagram {
            nodes: vec![node("a")],
            edges: vec![Edge::new("e", "a", "ghost", EdgeType::Pv)],
            ..Diagram::default()
        };
        let issues = validate_diagram(&diagram);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity(), Severity::Warning);
        assert_eq!(issues[0].element_id(), "e");
        assert!(issues[0].message().contains("ghost"));
    }

    #[test]
    fn test_non_finite_position_is_error() {
        let diagram = Diagram {
            nodes: vec![Node::new("a", NodeType::Test, Point::new(f64::NAN, 0.0))],
            ..Diagram::default()
        };
        let issues = validate_diagram(&diagram);
        assert!(issues[0].is_error());
        assert_eq!(issues[0].to_string(), "error `a`: position is not a finite coordinate");
    }

    #[test]
    fn test_boundary_edges_need_an_anchor() {
        let mut entry = Edge::new("in", "a", "a", EdgeType::Entry);
        entry.source = None;

        let diagram = Diagram {
            nodes: vec![node("a")],
            edges: vec![entry.clone()],
            ..Diagram::default()
        };
        assert_eq!(validate_diagram(&diagram).len(), 1);

        entry.anchor = Some(Point::new(-100.0, 0.0));
        let diagram = Diagram {
            nodes: vec![node("a")],
            edges: vec![entry],
            ..Diagram::default()
        };
        assert!(validate_diagram(&diagram).is_empty());
    }
}
