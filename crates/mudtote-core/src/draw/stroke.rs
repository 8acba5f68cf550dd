//! Stroke and line-style definitions.
//!
//! Edges and node outlines share one stroke model so that the SVG drawers
//! and the TikZ serializer agree on color, width and dash pattern.
//!
//! - [`StrokeDefinition`]: color, width and style of a line
//! - [`StrokeStyle`]: solid or dashed pattern
//! - [`apply_stroke!`](crate::apply_stroke!): applies a stroke to an SVG element
//!
//! ```
//! use mudtote_core::draw::{StrokeDefinition, StrokeStyle};
//! use mudtote_core::color::Color;
//!
//! let stroke = StrokeDefinition::dashed(Color::new("blue").unwrap(), 1.5);
//! assert_eq!(*stroke.style(), StrokeStyle::Dashed);
//!
//! let path = svg::node::element::Path::new().set("d", "M 0 0 L 10 10");
//! let path = mudtote_core::apply_stroke!(path, &stroke);
//! assert!(path.to_string().contains("stroke-dasharray"));
//! ```

use crate::color::Color;

/// Line pattern of a stroke.
///
/// | Variant | SVG `stroke-dasharray` | TikZ option |
/// |---------|------------------------|-------------|
/// | `Solid` | *(none)* | `solid` |
/// | `Dashed` | `"6,4"` | `dash pattern=on 6pt off 4pt` |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("6,4"),
        }
    }

    /// Returns the TikZ option selecting this line pattern
    pub fn to_tikz_value(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dash pattern=on 6pt off 4pt",
        }
    }
}

/// A stroke definition for rendering lines and borders.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f64,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a solid stroke (convenience constructor).
    pub fn solid(color: Color, width: f64) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke (convenience constructor).
    pub fn dashed(color: Color, width: f64) -> Self {
        let mut stroke = Self::new(color, width);
        stroke.set_style(StrokeStyle::Dashed);
        stroke
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Sets the stroke style.
    pub fn set_style(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Apply all stroke attributes to an SVG element.
///
/// Sets color, opacity, width and, for patterned styles, the dash array.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let mut elem = $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width());

        if let Some(dasharray) = $stroke.style().to_svg_value() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}
