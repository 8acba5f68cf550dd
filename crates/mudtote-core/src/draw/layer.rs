//! Layer-based z-ordering for SVG output.
//!
//! Drawers tag each element with a [`RenderLayer`]; [`LayeredOutput::render`]
//! emits one `<g data-layer="…">` per non-empty layer, bottom to top.
//!
//! ```
//! # use mudtote_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Text};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Label, Box::new(Text::new("PV")));
//! output.add_to_layer(RenderLayer::Edge, Box::new(Path::new()));
//!
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! assert!(groups[0].to_string().contains("data-layer=\"edges\""));
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top in declaration order.
///
/// Edges sit under nodes so that arrowheads end cleanly at node outlines;
/// edge labels sit above nodes so they stay readable where they overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background fill
    Background,
    /// Edge paths and their hit areas
    Edge,
    /// Node shapes, node labels and entry/exit markers
    Node,
    /// Edge labels
    Label,
    /// Selection highlights
    Selection,
}

impl RenderLayer {
    /// Returns the value of the `data-layer` attribute for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Edge => "edges",
            Self::Node => "nodes",
            Self::Label => "labels",
            Self::Selection => "selection",
        }
    }
}

/// SVG nodes collected by layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified layer. Nodes keep their insertion
    /// order within a layer.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of `other`.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    /// Returns `true` if there are no nodes in any layer.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Renders all layers to `<g>` groups, consuming the output.
    ///
    /// Empty layers are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable: insertion order survives within a layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = svg_element::Group::new().set("data-layer", current_layer.name());

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = svg_element::Group::new().set("data-layer", layer.name());
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svg::node::element::{Path, Rectangle};

    #[test]
    fn test_layered_output_new() {
        let output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(output.render().is_empty());
    }

    #[test]
    fn test_layered_output_merge() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Selection, Box::new(Rectangle::new()));

        output1.merge(output2);
        assert_eq!(output1.render().len(), 2);
    }

    #[test]
    fn test_layers_render_bottom_to_top() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Selection, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Edge, Box::new(Path::new()));

        let names: Vec<String> = output.render().iter().map(|g| g.to_string()).collect();
        assert!(names[0].contains("edges"));
        assert!(names[1].contains("nodes"));
        assert!(names[2].contains("selection"));
    }

    #[test]
    fn test_same_layer_keeps_insertion_order() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new().set("id", "first")));
        output.add_to_layer(RenderLayer::Edge, Box::new(Path::new()));
        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new().set("id", "second")));

        let groups = output.render();
        assert_eq!(groups.len(), 2);
        let nodes = groups[1].to_string();
        assert!(nodes.find("first").unwrap() < nodes.find("second").unwrap());
    }
}
