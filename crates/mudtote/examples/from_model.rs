//! Example: Creating a diagram from the data model
//!
//! This example builds a small meaning-use diagram in code, without going
//! through JSON, and prints it as SVG and TikZ.

use mudtote::{
    DiagramExporter,
    geometry::Point,
    model::{Diagram, Edge, EdgeType, Node, NodeType},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building diagram from the data model...\n");

    // A practice that is sufficient to deploy a vocabulary, and the
    // vocabulary that in turn specifies the practice.
    let practice = Node::new("p", NodeType::Practice, Point::new(0.0, 0.0))
        .with_label("Asserting and inferring");
    let vocabulary = Node::new("v", NodeType::Vocabulary, Point::new(260.0, 0.0))
        .with_label("Conditionals");

    let deploys = Edge::new("pv", "p", "v", EdgeType::PvSufficient);
    let specifies = Edge::new("vp", "v", "p", EdgeType::Vp).resultant();

    let diagram = Diagram {
        nodes: vec![practice, vocabulary],
        edges: vec![deploys, specifies],
        ..Diagram::default()
    };

    let exporter = DiagramExporter::default();

    let svg = exporter.render_svg(&diagram)?;
    println!("SVG ({} bytes):\n{svg}\n", svg.len());

    let tex = exporter.render_tikz(&diagram)?;
    println!("TikZ:\n{tex}");

    Ok(())
}
