//! JSON export of the persisted diagram schema.

use log::info;

use mudtote_core::model::Diagram;

use super::{Error, Exporter};

/// Pretty-printed JSON backend.
#[derive(Debug, Default)]
pub struct Json;

impl Exporter for Json {
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<String, Error> {
        info!(nodes = diagram.nodes.len(), edges = diagram.edges.len(); "Serializing diagram to JSON");
        serde_json::to_string_pretty(diagram).map_err(|err| Error::Render(err.to_string()))
    }

    fn file_extension(&self) -> &'static str {
        "json"
    }
}
