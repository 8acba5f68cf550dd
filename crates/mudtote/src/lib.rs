//! Mudtote - MUD and TOTE diagrams rendered to SVG and TikZ.
//!
//! Import, validation and export for node-and-edge diagrams in Brandom's
//! meaning-use (MUD) notation, Miller-Galanter-Pribram TOTE cycles, or a
//! generic mode. The geometry lives in `mudtote_core`; this crate turns it
//! into documents (SVG, LaTeX/TikZ, JSON) and into the live canvas view, and
//! exposes a command table for embedding shells.

pub mod canvas;
pub mod config;
pub mod export;
pub mod host;
pub mod validate;

mod error;

pub use mudtote_core::{color, draw, extent, geometry, label, model, route, shape, style, text};

pub use error::MudtoteError;

use log::{debug, info, warn};

use canvas::{Canvas, CanvasState};
use config::AppConfig;
use export::{Exporter, json::Json, svg::Svg, tikz::Tikz};
use model::Diagram;
use validate::{Issue, validate_diagram};

/// Entry point for importing and exporting diagrams.
///
/// # Examples
///
/// ```rust
/// use mudtote::{DiagramExporter, config::AppConfig};
///
/// let source = r#"{
///     "nodes": [
///         { "id": "v", "type": "vocabulary", "position": { "x": 0, "y": 0 }, "label": "V" },
///         { "id": "p", "type": "practice", "position": { "x": 200, "y": 0 }, "label": "P" }
///     ],
///     "edges": [{ "id": "e", "source": "p", "target": "v", "type": "PV" }]
/// }"#;
///
/// let exporter = DiagramExporter::new(AppConfig::default());
/// let diagram = exporter.parse_json(source).expect("Failed to parse");
///
/// let svg = exporter.render_svg(&diagram).expect("Failed to render");
/// assert!(svg.contains("data-edge-id=\"e\""));
///
/// let tex = exporter.render_tikz(&diagram).expect("Failed to render");
/// assert!(tex.contains("\\begin{tikzpicture}"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramExporter {
    config: AppConfig,
}

impl DiagramExporter {
    /// Creates an exporter with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Creates an exporter after checking the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`MudtoteError::Config`] naming the first invalid value.
    pub fn try_new(config: AppConfig) -> Result<Self, MudtoteError> {
        config.validate().map_err(MudtoteError::Config)?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parses and validates a diagram in the persisted JSON schema.
    ///
    /// Warnings (dangling references, edges without endpoints) are logged and
    /// the diagram is accepted; those edges are simply not drawn.
    ///
    /// # Errors
    ///
    /// Returns [`MudtoteError::Json`] for malformed JSON and
    /// [`MudtoteError::Validation`] with every error-severity issue found.
    pub fn parse_json(&self, source: &str) -> Result<Diagram, MudtoteError> {
        info!("Parsing diagram JSON");
        let diagram: Diagram = serde_json::from_str(source)?;
        debug!(
            nodes = diagram.nodes.len(),
            edges = diagram.edges.len(),
            entry_points = diagram.entry_points.len(),
            exit_points = diagram.exit_points.len();
            "Diagram parsed"
        );

        let (errors, warnings): (Vec<Issue>, Vec<Issue>) = validate_diagram(&diagram)
            .into_iter()
            .partition(Issue::is_error);
        for issue in &warnings {
            warn!(element_id = issue.element_id(); "{}", issue.message());
        }
        if !errors.is_empty() {
            return Err(MudtoteError::Validation(errors));
        }

        Ok(diagram)
    }

    /// Serializes `diagram` back to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MudtoteError::Export`] if serialization fails.
    pub fn to_json(&self, diagram: &Diagram) -> Result<String, MudtoteError> {
        Ok(Json.export_diagram(diagram)?)
    }

    /// Renders `diagram` to a standalone SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`MudtoteError::Export`] if the SVG configuration is invalid.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, MudtoteError> {
        let mut svg = Svg::new(self.config.svg())?;
        let document = svg.export_diagram(diagram)?;
        info!(bytes = document.len(); "SVG rendered successfully");
        Ok(document)
    }

    /// Renders `diagram` to a LaTeX document holding a TikZ picture.
    ///
    /// # Errors
    ///
    /// Returns [`MudtoteError::Export`] if rendering fails.
    pub fn render_tikz(&self, diagram: &Diagram) -> Result<String, MudtoteError> {
        let mut tikz = Tikz::new(self.config.tikz());
        let document = tikz.export_diagram(diagram)?;
        info!(bytes = document.len(); "TikZ rendered successfully");
        Ok(document)
    }

    /// Renders the live canvas markup for `diagram` with the selection in
    /// `state`.
    pub fn render_canvas(&self, diagram: &Diagram, state: &CanvasState) -> String {
        Canvas::new(self.config.svg()).render(diagram, state).to_string()
    }
}
