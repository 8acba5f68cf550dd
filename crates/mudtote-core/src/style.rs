//! Style resolution.
//!
//! Node styles are partial overrides; edge styles are derived entirely from
//! the relation kind. Every renderer reads styles through this module so the
//! interactive canvas, the SVG document and the TikZ document agree.

use log::warn;

use crate::{
    color::Color,
    draw::StrokeDefinition,
    model::{Edge, EdgeType, Node, NodeType, Qualifier, RelationFamily, ShapeKind, SizeClass},
};

/// Default node label font size.
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Font size of edge labels.
pub const EDGE_LABEL_FONT_SIZE: f64 = 12.0;

/// Stroke width of edges.
pub const EDGE_STROKE_WIDTH: f64 = 2.0;

/// Stroke width of node outlines.
pub const NODE_STROKE_WIDTH: f64 = 2.0;

/// Fully-populated node style.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNodeStyle {
    pub shape: ShapeKind,
    pub size: SizeClass,
    pub fill: Color,
    pub border: Color,
    pub text: Color,
    pub font_size: f64,
}

impl ResolvedNodeStyle {
    /// Outline stroke of the node.
    pub fn stroke(&self) -> StrokeDefinition {
        StrokeDefinition::solid(self.border, NODE_STROKE_WIDTH)
    }
}

/// Fully-populated edge style.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEdgeStyle {
    pub stroke: StrokeDefinition,
    pub label_color: Color,
    pub font_size: f64,
}

/// Default shape of a node type.
pub fn default_shape(node_type: NodeType) -> ShapeKind {
    match node_type {
        NodeType::Vocabulary => ShapeKind::Ellipse,
        NodeType::Practice | NodeType::Operate | NodeType::Exit => ShapeKind::Rectangle,
        NodeType::Test => ShapeKind::Diamond,
        NodeType::Custom => ShapeKind::Circle,
    }
}

/// Effective shape: the explicit override, else the type default.
pub fn effective_shape(node: &Node) -> ShapeKind {
    node.style
        .as_ref()
        .and_then(|style| style.shape)
        .unwrap_or_else(|| default_shape(node.node_type))
}

/// Effective size class: the explicit override, else medium.
pub fn effective_size(node: &Node) -> SizeClass {
    node.style
        .as_ref()
        .and_then(|style| style.size)
        .unwrap_or_default()
}

/// `(fill, border)` defaults of a node type.
fn default_palette(node_type: NodeType) -> (&'static str, &'static str) {
    match node_type {
        NodeType::Vocabulary => ("#e3f2fd", "#1976d2"),
        NodeType::Practice => ("#fff3e0", "#f57c00"),
        NodeType::Test => ("#f3e5f5", "#7b1fa2"),
        NodeType::Operate => ("#e8f5e9", "#388e3c"),
        NodeType::Exit => ("#ffebee", "#d32f2f"),
        NodeType::Custom => ("#ffffff", "#616161"),
    }
}

const DEFAULT_TEXT_COLOR: &str = "#212121";

/// Parses an override color, falling back to `default` when absent or invalid.
fn resolve_color(node_id: &str, field: &str, value: Option<&str>, default: &str) -> Color {
    let fallback = || Color::new(default).unwrap_or_default();
    match value {
        None => fallback(),
        Some(value) => Color::new(value).unwrap_or_else(|err| {
            warn!(node_id, field, err; "Ignoring invalid color override");
            fallback()
        }),
    }
}

/// Merges the node's optional style over its type defaults.
pub fn resolve_node_style(node: &Node) -> ResolvedNodeStyle {
    let (fill, border) = default_palette(node.node_type);
    let style = node.style.as_ref();

    let font_size = style
        .and_then(|style| style.font_size)
        .filter(|size| *size > 0.0)
        .unwrap_or(DEFAULT_FONT_SIZE);

    ResolvedNodeStyle {
        shape: effective_shape(node),
        size: effective_size(node),
        fill: resolve_color(
            &node.id,
            "backgroundColor",
            style.and_then(|style| style.background_color.as_deref()),
            fill,
        ),
        border: resolve_color(
            &node.id,
            "borderColor",
            style.and_then(|style| style.border_color.as_deref()),
            border,
        ),
        text: resolve_color(
            &node.id,
            "textColor",
            style.and_then(|style| style.text_color.as_deref()),
            DEFAULT_TEXT_COLOR,
        ),
        font_size,
    }
}

/// Palette color of a relation kind. Qualified MUD kinds share their base color.
pub fn edge_color(edge_type: EdgeType) -> Color {
    Color::new(edge_palette(edge_type)).unwrap_or_default()
}

fn edge_palette(edge_type: EdgeType) -> &'static str {
    match edge_type.base() {
        EdgeType::Pv => "#1976d2",
        EdgeType::Vp => "#388e3c",
        EdgeType::Pp => "#f57c00",
        EdgeType::Vv => "#7b1fa2",
        EdgeType::Sequence => "#424242",
        EdgeType::Feedback => "#d32f2f",
        EdgeType::Loop => "#616161",
        EdgeType::Entry => "#2e7d32",
        EdgeType::Exit => "#c62828",
        _ => "#333333",
    }
}

/// Stroke and label style of an edge. Resultant edges are dashed.
pub fn resolve_edge_style(edge: &Edge) -> ResolvedEdgeStyle {
    let color = edge_color(edge.edge_type);
    let stroke = if edge.is_resultant {
        StrokeDefinition::dashed(color, EDGE_STROKE_WIDTH)
    } else {
        StrokeDefinition::solid(color, EDGE_STROKE_WIDTH)
    };

    ResolvedEdgeStyle {
        stroke,
        label_color: color,
        font_size: EDGE_LABEL_FONT_SIZE,
    }
}

/// Label derived from the relation kind alone.
pub fn type_label(edge_type: EdgeType) -> Option<&'static str> {
    if edge_type.family() != RelationFamily::Mud {
        return None;
    }

    let label = match (edge_type.base(), edge_type.qualifier()) {
        (EdgeType::Pv, None) => "PV",
        (EdgeType::Pv, Some(Qualifier::Sufficient)) => "PV-suff",
        (EdgeType::Pv, Some(Qualifier::Necessary)) => "PV-nec",
        (EdgeType::Vp, None) => "VP",
        (EdgeType::Vp, Some(Qualifier::Sufficient)) => "VP-suff",
        (EdgeType::Vp, Some(Qualifier::Necessary)) => "VP-nec",
        (EdgeType::Pp, None) => "PP",
        (EdgeType::Pp, Some(Qualifier::Sufficient)) => "PP-suff",
        (EdgeType::Pp, Some(Qualifier::Necessary)) => "PP-nec",
        (EdgeType::Vv, None) => "VV",
        (EdgeType::Vv, Some(Qualifier::Sufficient)) => "VV-suff",
        (EdgeType::Vv, Some(Qualifier::Necessary)) => "VV-nec",
        _ => return None,
    };
    Some(label)
}

/// Text drawn next to an edge: the explicit label, else the type-derived one.
///
/// An explicit empty label suppresses the type-derived label.
pub fn display_label(edge: &Edge) -> Option<&str> {
    match edge.label.as_deref() {
        Some("") => None,
        Some(label) => Some(label),
        None => type_label(edge.edge_type),
    }
}
