//! Mudtote Core
//!
//! Pure geometry engine and data model for Meaning-Use Diagrams (MUD) and
//! Test-Operate-Test-Exit (TOTE) diagrams. Every renderer in the workspace
//! draws from the values computed here, so the interactive canvas, the SVG
//! document and the TikZ document always agree on where things are.
//!
//! - **Model**: the persisted diagram schema ([`model`] module)
//! - **Shapes**: node extents and boundary intersection ([`shape`] module)
//! - **Routing**: edge classification, parallel-edge offsets and Bézier
//!   geometry ([`route`] module)
//! - **Labels**: edge label anchors and readable rotation ([`label`] module)
//! - **Style**: per-type defaults merged with node overrides ([`style`] module)
//! - **Text**: fixed-metric measurement and wrapping ([`text`] module)
//! - **Draw**: SVG drawers shared by the document and canvas renderers
//!   ([`draw`] module)
//!
//! Everything in this crate is deterministic: identical input produces
//! bit-identical output.

pub mod color;
pub mod draw;
pub mod extent;
pub mod geometry;
pub mod label;
pub mod model;
pub mod route;
pub mod shape;
pub mod style;
pub mod text;
