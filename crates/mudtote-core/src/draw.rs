//! SVG drawing primitives shared by the static SVG serializer and the
//! interactive canvas.
//!
//! Drawers never compute geometry: node extents come from [`crate::shape`],
//! edge paths from [`crate::route`], and styles from [`crate::style`].

mod edge;
mod layer;
mod node;
mod stroke;
mod text;

pub use edge::EdgeDrawer;
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use node::{
    BoundaryKind, NodeDrawer, RECTANGLE_CORNER_RADIUS, STAR_INNER_RATIO, shape_outline,
};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{Text, TextDefinition};
