//! Integration tests for the DiagramExporter API
//!
//! These tests go through the public API only: JSON in, documents out, and
//! the SVG and TikZ outputs checked against each other.

use mudtote::{
    DiagramExporter, MudtoteError,
    canvas::CanvasState,
    config::AppConfig,
    export::tikz::TikzTransform,
    extent::diagram_bounds,
    host::{CommandOutput, CommandTable, commands},
    model::Diagram,
    route::{EdgeGeometry, compute_edge_geometry},
};

const MUD_SOURCE: &str = r#"{
    "nodes": [
        { "id": "v1", "type": "vocabulary", "position": { "x": 0, "y": 0 }, "label": "Deontic vocabulary" },
        { "id": "p1", "type": "practice", "position": { "x": 250, "y": 0 }, "label": "Giving and asking for reasons" },
        { "id": "v2", "type": "vocabulary", "position": { "x": 125, "y": 200 }, "label": "$\\alpha \\to \\beta$" }
    ],
    "edges": [
        { "id": "e1", "source": "p1", "target": "v1", "type": "PV-sufficient" },
        { "id": "e2", "source": "v1", "target": "p1", "type": "VP-necessary", "isResultant": true },
        { "id": "e3", "source": "v2", "target": "v2", "type": "loop", "label": "again" },
        { "id": "e4", "source": "p1", "target": "v2", "type": "VV", "label": "50% off" }
    ]
}"#;

const TOTE_SOURCE: &str = r#"{
    "nodes": [
        { "id": "t", "type": "test", "position": { "x": 0, "y": 0 }, "label": "Hot?" },
        { "id": "o", "type": "operate", "position": { "x": 0, "y": 150 }, "label": "Heat" }
    ],
    "edges": [
        { "id": "in", "target": "t", "type": "entry", "anchor": { "x": -150, "y": 0 } },
        { "id": "t-o", "source": "t", "target": "o", "type": "sequence" },
        { "id": "o-t", "source": "o", "target": "t", "type": "feedback" },
        { "id": "out", "source": "t", "type": "exit", "anchor": { "x": 150, "y": 0 } }
    ],
    "entryPoints": [{ "id": "start", "position": { "x": -150, "y": 0 }, "label": "Enter" }],
    "exitPoints": [{ "id": "done", "position": { "x": 150, "y": 0 } }]
}"#;

fn parse(source: &str) -> Diagram {
    DiagramExporter::default()
        .parse_json(source)
        .expect("Failed to parse diagram")
}

#[test]
fn test_exporter_api_exists() {
    let _exporter = DiagramExporter::default();
    let _exporter = DiagramExporter::new(AppConfig::default());
}

#[test]
fn test_render_all_formats() {
    let exporter = DiagramExporter::default();
    let diagram = parse(MUD_SOURCE);

    let svg = exporter.render_svg(&diagram).expect("Failed to render SVG");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");

    let tex = exporter.render_tikz(&diagram).expect("Failed to render TikZ");
    assert!(tex.contains("\\begin{tikzpicture}"));
    assert!(tex.contains("\\end{document}"));

    let json = exporter.to_json(&diagram).expect("Failed to serialize");
    assert_eq!(exporter.parse_json(&json).expect("Failed to reparse"), diagram);
}

#[test]
fn test_invalid_json_returns_error() {
    let result = DiagramExporter::default().parse_json("{ not json");
    assert!(matches!(result, Err(MudtoteError::Json(_))));
}

#[test]
fn test_duplicate_ids_fail_validation() {
    let source = r#"{
        "nodes": [
            { "id": "a", "type": "test", "position": { "x": 0, "y": 0 } },
            { "id": "a", "type": "test", "position": { "x": 10, "y": 0 } }
        ]
    }"#;
    match DiagramExporter::default().parse_json(source) {
        Err(MudtoteError::Validation(issues)) => {
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].element_id(), "a");
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[test]
fn test_dangling_edges_are_accepted_and_skipped() {
    let source = r#"{
        "nodes": [{ "id": "a", "type": "test", "position": { "x": 0, "y": 0 } }],
        "edges": [{ "id": "lost", "source": "a", "target": "gone", "type": "sequence" }]
    }"#;
    let exporter = DiagramExporter::default();
    let diagram = exporter.parse_json(source).expect("Warnings should not fail");

    let svg = exporter.render_svg(&diagram).unwrap();
    assert!(!svg.contains("data-edge-id=\"lost\""));
    let tex = exporter.render_tikz(&diagram).unwrap();
    assert!(!tex.contains("\\draw[-{Stealth}"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config: AppConfig =
        serde_json::from_str(r#"{ "svg": { "background_color": "nope" } }"#).unwrap();
    assert!(matches!(
        DiagramExporter::try_new(config),
        Err(MudtoteError::Config(_))
    ));

    let config: AppConfig =
        serde_json::from_str(r#"{ "svg": { "background_color": "nope" } }"#).unwrap();
    let result = DiagramExporter::new(config).render_svg(&parse(MUD_SOURCE));
    assert!(matches!(result, Err(MudtoteError::Export(_))));
}

/// Every routed edge appears with the same geometry in both documents: the
/// SVG path verbatim, the TikZ path through the page transform.
fn assert_formats_agree(diagram: &Diagram) {
    let exporter = DiagramExporter::default();
    let svg = exporter.render_svg(diagram).unwrap();
    let tex = exporter.render_tikz(diagram).unwrap();
    let transform = TikzTransform::new(diagram_bounds(diagram), exporter.config().tikz());

    for edge in &diagram.edges {
        let geometry = compute_edge_geometry(edge, &diagram.nodes, &diagram.edges)
            .expect("Every edge in the fixture is routable");

        assert!(
            svg.contains(&format!("d=\"{}\"", geometry.path_data())),
            "SVG is missing the path of {}",
            edge.id
        );

        let start = transform.coordinate(geometry.start());
        let end = transform.coordinate(geometry.end());
        let draw_line = tex
            .lines()
            .find(|line| line.contains("\\draw[-{Stealth}") && line.contains(&start))
            .unwrap_or_else(|| panic!("TikZ is missing the path of {}", edge.id));
        assert!(draw_line.trim_end().ends_with(&format!("{end};")), "{draw_line}");

        if let EdgeGeometry::Curve {
            start: p0,
            control,
            end: p1,
            ..
        } = geometry
        {
            let c1 = p0.add_point(control.sub_point(p0).scale(2.0 / 3.0));
            let c2 = p1.add_point(control.sub_point(p1).scale(2.0 / 3.0));
            assert!(draw_line.contains(&format!(
                ".. controls {} and {} ..",
                transform.coordinate(c1),
                transform.coordinate(c2)
            )));
        }
    }
}

#[test]
fn test_svg_and_tikz_agree_for_mud_diagram() {
    assert_formats_agree(&parse(MUD_SOURCE));
}

#[test]
fn test_svg_and_tikz_agree_for_tote_diagram() {
    assert_formats_agree(&parse(TOTE_SOURCE));
}

#[test]
fn test_tikz_keeps_latex_labels_and_escapes_plain_ones() {
    let tex = DiagramExporter::default()
        .render_tikz(&parse(MUD_SOURCE))
        .unwrap();
    assert!(tex.contains(r"{$\alpha \to \beta$}"));
    assert!(tex.contains(r"{50\% off}"));
    assert!(tex.contains("{PV-suff}"));
}

#[test]
fn test_boundary_markers_in_both_formats() {
    let exporter = DiagramExporter::default();
    let diagram = parse(TOTE_SOURCE);

    let svg = exporter.render_svg(&diagram).unwrap();
    assert!(svg.contains("data-entry-id=\"start\""));
    assert!(svg.contains("data-exit-id=\"done\""));
    assert!(svg.contains(">Enter<"));

    let tex = exporter.render_tikz(&diagram).unwrap();
    assert_eq!(tex.matches(" circle (").count(), 2);
    assert!(tex.contains("{Enter}"));
}

#[test]
fn test_canvas_render() {
    let exporter = DiagramExporter::default();
    let diagram = parse(TOTE_SOURCE);
    let state = CanvasState::new().with_selected_node("t").with_selected_edge("t-o");

    let canvas = exporter.render_canvas(&diagram, &state);
    assert!(canvas.starts_with("<g"));
    assert!(canvas.contains("class=\"mudtote-canvas\""));
    assert!(canvas.contains("data-layer=\"selection\""));
    assert_eq!(canvas.matches("class=\"edge-hit-area\"").count(), 4);
}

#[test]
fn test_command_table_drives_exports() {
    let exporter = DiagramExporter::default();
    let diagram = parse(MUD_SOURCE);

    let mut table = CommandTable::new();
    table.register(commands::EXPORT_SVG, || {
        exporter.render_svg(&diagram).map(CommandOutput::Text)
    });
    table.register(commands::EXPORT_TIKZ, || {
        exporter.render_tikz(&diagram).map(CommandOutput::Text)
    });

    let svg = table.dispatch(commands::EXPORT_SVG).unwrap().into_text().unwrap();
    assert!(svg.starts_with("<svg"));
    let tex = table.dispatch(commands::EXPORT_TIKZ).unwrap().into_text().unwrap();
    assert!(tex.contains("tikzpicture"));

    assert!(matches!(
        table.dispatch(commands::UNDO),
        Err(MudtoteError::UnknownCommand(_))
    ));
}
