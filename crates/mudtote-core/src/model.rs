//! Diagram data model.
//!
//! These types mirror the persisted JSON schema one-to-one:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "a", "type": "vocabulary", "position": {"x": 0, "y": 0}, "label": "V" }],
//!   "edges": [{ "id": "e1", "source": "a", "target": "b", "type": "PV", "isResultant": false }],
//!   "entryPoints": [],
//!   "exitPoints": [],
//!   "metadata": { "created": "...", "modified": "..." }
//! }
//! ```
//!
//! The geometry engine only ever reads these values. Optional style fields
//! stay optional here; [`crate::style`] merges them with per-type defaults
//! at read time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Node kind. Determines the default shape and palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Vocabulary,
    Practice,
    Test,
    Operate,
    Exit,
    Custom,
}

impl NodeType {
    /// Returns the JSON tag of this node type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Practice => "practice",
            Self::Test => "test",
            Self::Operate => "operate",
            Self::Exit => "exit",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size class scaling the shape's base dimensions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeClass {
    /// Multiplier applied to the shape's base dimensions.
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Small => 0.8,
            Self::Medium => 1.0,
            Self::Large => 1.3,
        }
    }
}

/// Drawn outline of a node.
///
/// `Triangle`, `Hexagon` and `Star` are drawn as such, but their boundary
/// math treats them as circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Ellipse,
    Rectangle,
    Diamond,
    Circle,
    Triangle,
    Hexagon,
    Star,
}

/// Optional per-node style override. Every field falls back to the node type's default.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

/// A diagram node. `position` is the center of the drawn shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub position: Point,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
}

impl Node {
    /// Creates a node with no style override.
    pub fn new(id: impl Into<String>, node_type: NodeType, position: Point) -> Self {
        Self {
            id: id.into(),
            node_type,
            position,
            label: String::new(),
            style: None,
        }
    }

    /// Sets the node label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the style override.
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Family an edge kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationFamily {
    Mud,
    Tote,
    Generic,
}

/// Qualifier on a MUD relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Sufficient,
    Necessary,
}

/// Relation kind of an edge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeType {
    #[serde(rename = "PV")]
    Pv,
    #[serde(rename = "VP")]
    Vp,
    #[serde(rename = "PP")]
    Pp,
    #[serde(rename = "VV")]
    Vv,
    #[serde(rename = "PV-sufficient")]
    PvSufficient,
    #[serde(rename = "PV-necessary")]
    PvNecessary,
    #[serde(rename = "VP-sufficient")]
    VpSufficient,
    #[serde(rename = "VP-necessary")]
    VpNecessary,
    #[serde(rename = "PP-sufficient")]
    PpSufficient,
    #[serde(rename = "PP-necessary")]
    PpNecessary,
    #[serde(rename = "VV-sufficient")]
    VvSufficient,
    #[serde(rename = "VV-necessary")]
    VvNecessary,
    #[serde(rename = "sequence")]
    Sequence,
    #[serde(rename = "feedback")]
    Feedback,
    #[serde(rename = "loop")]
    Loop,
    #[serde(rename = "entry")]
    Entry,
    #[serde(rename = "exit")]
    Exit,
    #[default]
    #[serde(rename = "unmarked")]
    Unmarked,
    #[serde(rename = "custom")]
    Custom,
}

impl EdgeType {
    /// Returns the persisted tag of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pv => "PV",
            Self::Vp => "VP",
            Self::Pp => "PP",
            Self::Vv => "VV",
            Self::PvSufficient => "PV-sufficient",
            Self::PvNecessary => "PV-necessary",
            Self::VpSufficient => "VP-sufficient",
            Self::VpNecessary => "VP-necessary",
            Self::PpSufficient => "PP-sufficient",
            Self::PpNecessary => "PP-necessary",
            Self::VvSufficient => "VV-sufficient",
            Self::VvNecessary => "VV-necessary",
            Self::Sequence => "sequence",
            Self::Feedback => "feedback",
            Self::Loop => "loop",
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Unmarked => "unmarked",
            Self::Custom => "custom",
        }
    }

    /// Returns the family this relation belongs to.
    pub fn family(self) -> RelationFamily {
        match self {
            Self::Pv
            | Self::Vp
            | Self::Pp
            | Self::Vv
            | Self::PvSufficient
            | Self::PvNecessary
            | Self::VpSufficient
            | Self::VpNecessary
            | Self::PpSufficient
            | Self::PpNecessary
            | Self::VvSufficient
            | Self::VvNecessary => RelationFamily::Mud,
            Self::Sequence | Self::Feedback | Self::Loop | Self::Entry | Self::Exit => {
                RelationFamily::Tote
            }
            Self::Unmarked | Self::Custom => RelationFamily::Generic,
        }
    }

    /// Returns the unqualified MUD relation (`PV-sufficient` → `PV`), or
    /// `self` for every other kind.
    pub fn base(self) -> Self {
        match self {
            Self::PvSufficient | Self::PvNecessary => Self::Pv,
            Self::VpSufficient | Self::VpNecessary => Self::Vp,
            Self::PpSufficient | Self::PpNecessary => Self::Pp,
            Self::VvSufficient | Self::VvNecessary => Self::Vv,
            other => other,
        }
    }

    /// Returns the qualifier of a MUD relation, if any.
    pub fn qualifier(self) -> Option<Qualifier> {
        match self {
            Self::PvSufficient | Self::VpSufficient | Self::PpSufficient | Self::VvSufficient => {
                Some(Qualifier::Sufficient)
            }
            Self::PvNecessary | Self::VpNecessary | Self::PpNecessary | Self::VvNecessary => {
                Some(Qualifier::Necessary)
            }
            _ => None,
        }
    }

    /// Returns `true` for the boundary kinds that may carry a missing endpoint.
    pub fn is_boundary(self) -> bool {
        matches!(self, Self::Entry | Self::Exit)
    }
}

/// A diagram edge.
///
/// `source` and `target` are `None` only for boundary edges (`entry` without
/// a source, `exit` without a target); such edges carry a literal `anchor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(rename = "type", default)]
    pub edge_type: EdgeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub is_resultant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Point>,
}

impl Edge {
    /// Creates an edge between two nodes.
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        edge_type: EdgeType,
    ) -> Self {
        Self {
            id: id.into(),
            source: Some(source.into()),
            target: Some(target.into()),
            edge_type,
            label: None,
            is_resultant: false,
            anchor: None,
        }
    }

    /// Sets the explicit label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Marks the edge as resultant (drawn dashed).
    pub fn resultant(mut self) -> Self {
        self.is_resultant = true;
        self
    }

    /// Returns `true` if both endpoints reference the same node.
    pub fn is_self_loop(&self) -> bool {
        matches!((&self.source, &self.target), (Some(s), Some(t)) if s == t)
    }

    /// Returns `true` if this edge connects the same unordered node pair as `other`.
    pub fn shares_pair_with(&self, other: &Edge) -> bool {
        match (&self.source, &self.target, &other.source, &other.target) {
            (Some(s1), Some(t1), Some(s2), Some(t2)) => {
                (s1 == s2 && t1 == t2) || (s1 == t2 && t1 == s2)
            }
            _ => false,
        }
    }
}

/// A TOTE entry marker on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub id: String,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A TOTE exit marker on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitPoint {
    pub id: String,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Diagram metadata. Timestamps are kept as the strings the editor wrote.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A complete diagram snapshot.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub entry_points: Vec<EntryPoint>,
    #[serde(default)]
    pub exit_points: Vec<ExitPoint>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Looks up a node by id in a node slice.
pub fn find_node<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    nodes.iter().find(|node| node.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_diagram() -> Diagram {
        Diagram {
            nodes: vec![
                Node::new("v1", NodeType::Vocabulary, Point::new(0.0, 0.0)).with_label("V_1"),
                Node::new("p1", NodeType::Practice, Point::new(200.5, -40.25))
                    .with_label("Practice")
                    .with_style(NodeStyle {
                        size: Some(SizeClass::Large),
                        shape: Some(ShapeKind::Hexagon),
                        background_color: Some("#ffeeaa".to_string()),
                        border_color: None,
                        text_color: Some("navy".to_string()),
                        font_size: Some(16.0),
                    }),
            ],
            edges: vec![
                Edge::new("e1", "v1", "p1", EdgeType::PvSufficient).resultant(),
                Edge::new("e2", "p1", "v1", EdgeType::Vp).with_label("uses"),
                Edge {
                    id: "e3".to_string(),
                    source: None,
                    target: Some("v1".to_string()),
                    edge_type: EdgeType::Entry,
                    label: None,
                    is_resultant: false,
                    anchor: Some(Point::new(-100.0, 0.0)),
                },
            ],
            entry_points: vec![EntryPoint {
                id: "in".to_string(),
                position: Point::new(-100.0, 0.0),
                label: Some("start".to_string()),
            }],
            exit_points: vec![],
            metadata: Metadata {
                created: "2024-01-01T00:00:00.000Z".to_string(),
                modified: "2024-01-02T00:00:00.000Z".to_string(),
                author: Some("R. B.".to_string()),
                description: None,
            },
        }
    }

    #[test]
    fn test_json_round_trip_is_lossless() {
        let diagram = sample_diagram();
        let json = serde_json::to_string_pretty(&diagram).unwrap();
        let parsed: Diagram = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, diagram);
        for (a, b) in parsed.nodes.iter().zip(&diagram.nodes) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.node_type, b.node_type);
            assert_eq!(a.position, b.position);
            assert_eq!(a.label, b.label);
            assert_eq!(a.style, b.style);
        }
        for (a, b) in parsed.edges.iter().zip(&diagram.edges) {
            assert_eq!(a.edge_type, b.edge_type);
            assert_eq!(a.is_resultant, b.is_resultant);
            assert_eq!(a.label, b.label);
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample_diagram()).unwrap();
        assert!(json.get("entryPoints").is_some());
        assert!(json.get("exitPoints").is_some());
        assert_eq!(json["edges"][0]["type"], "PV-sufficient");
        assert_eq!(json["edges"][0]["isResultant"], true);
        assert_eq!(json["edges"][2]["source"], serde_json::Value::Null);
        assert_eq!(json["nodes"][1]["style"]["backgroundColor"], "#ffeeaa");
        assert_eq!(json["nodes"][1]["style"]["shape"], "hexagon");
        assert!(json["nodes"][0].get("style").is_none());
    }

    #[test]
    fn test_parse_minimal_editor_json() {
        let json = r#"{
            "nodes": [{"id": "t", "type": "test", "position": {"x": 10, "y": 20}, "label": "Test"}],
            "edges": [{"id": "e", "source": "t", "target": "t", "type": "loop"}],
            "metadata": {"created": "c", "modified": "m"}
        }"#;
        let diagram: Diagram = serde_json::from_str(json).unwrap();

        assert_eq!(diagram.nodes[0].node_type, NodeType::Test);
        assert_eq!(diagram.nodes[0].position, Point::new(10.0, 20.0));
        assert!(diagram.edges[0].is_self_loop());
        assert!(!diagram.edges[0].is_resultant);
        assert!(diagram.entry_points.is_empty());
    }

    #[test]
    fn test_edge_type_families() {
        assert_eq!(EdgeType::PpNecessary.family(), RelationFamily::Mud);
        assert_eq!(EdgeType::PpNecessary.base(), EdgeType::Pp);
        assert_eq!(EdgeType::PpNecessary.qualifier(), Some(Qualifier::Necessary));
        assert_eq!(EdgeType::Feedback.family(), RelationFamily::Tote);
        assert_eq!(EdgeType::Custom.family(), RelationFamily::Generic);
        assert!(EdgeType::Entry.is_boundary());
        assert!(!EdgeType::Sequence.is_boundary());
    }

    #[test]
    fn test_edge_type_as_str_matches_json_tag() {
        for edge_type in [
            EdgeType::Pv,
            EdgeType::VvSufficient,
            EdgeType::PpNecessary,
            EdgeType::Feedback,
            EdgeType::Unmarked,
        ] {
            let json = serde_json::to_string(&edge_type).unwrap();
            assert_eq!(json, format!("\"{}\"", edge_type.as_str()));
        }
    }

    #[test]
    fn test_shares_pair_with_ignores_direction() {
        let forward = Edge::new("a", "x", "y", EdgeType::Pv);
        let backward = Edge::new("b", "y", "x", EdgeType::Vp);
        let other = Edge::new("c", "x", "z", EdgeType::Pv);

        assert!(forward.shares_pair_with(&backward));
        assert!(!forward.shares_pair_with(&other));
    }
}
