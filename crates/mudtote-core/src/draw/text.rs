//! Multi-line SVG text.
//!
//! Lines are centered horizontally and vertically on the anchor point, one
//! `<tspan>` per line, with the fixed line height from [`crate::text`].

use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    geometry::{Point, format_number},
    text::line_height,
};

/// Font and color settings for a block of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f64,
    color: Option<Color>,
    halo: Option<Color>,
}

impl TextDefinition {
    /// Creates a definition with no explicit fill color.
    pub fn new(font_family: impl Into<String>, font_size: f64) -> Self {
        Self {
            font_family: font_family.into(),
            font_size,
            color: None,
            halo: None,
        }
    }

    /// Sets the text fill color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Draws a stroke of `color` behind the glyphs so the text stays
    /// legible over edges.
    pub fn with_halo(mut self, color: Color) -> Self {
        self.halo = Some(color);
        self
    }
}

/// A drawable block of pre-wrapped lines.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    lines: &'a [String],
    rotation: Option<f64>,
}

impl<'a> Text<'a> {
    pub fn new(definition: &'a TextDefinition, lines: &'a [String]) -> Self {
        Self {
            definition,
            lines,
            rotation: None,
        }
    }

    /// Rotates the text by `degrees` around its anchor. `None` leaves it upright.
    pub fn with_rotation(mut self, degrees: Option<f64>) -> Self {
        self.rotation = degrees;
        self
    }

    /// Renders the block centered on `position`.
    pub fn render(&self, position: Point) -> svg_element::Text {
        let font_size = self.definition.font_size;
        let line_height = line_height(font_size);
        let total_height = line_height * self.lines.len() as f64;
        let y_offset = -(total_height + line_height) / 2.0;

        let x = format_number(position.x());
        let mut rendered = svg_element::Text::new("")
            .set("x", x.clone())
            .set("y", format_number(position.y() + y_offset))
            .set("text-anchor", "middle")
            .set("dominant-baseline", "central")
            .set("font-family", self.definition.font_family.as_str())
            .set("font-size", format_number(font_size));

        if let Some(color) = self.definition.color {
            rendered = rendered
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        if let Some(halo) = self.definition.halo {
            rendered = rendered
                .set("stroke", halo.to_string())
                .set("stroke-width", 3)
                .set("stroke-linejoin", "round")
                .set("paint-order", "stroke");
        }

        if let Some(angle) = self.rotation {
            rendered = rendered.set(
                "transform",
                format!(
                    "rotate({} {} {})",
                    format_number(angle),
                    x,
                    format_number(position.y())
                ),
            );
        }

        for line in self.lines {
            let tspan = svg_element::TSpan::new("")
                .set("x", x.clone())
                .set("dy", format_number(line_height))
                .add(SvgText::new(line.as_str()));
            rendered = rendered.add(tspan);
        }

        rendered
    }
}
