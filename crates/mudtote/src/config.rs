//! Configuration types for Mudtote serializers.
//!
//! All types implement [`serde::Deserialize`] with a default for every
//! field, so a configuration file only needs the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining both serializers.
//! - [`SvgConfig`] - Padding, background and font of the SVG document.
//! - [`TikzConfig`] - Scaling limits and document class of the TikZ document.
//!
//! # Example
//!
//! ```
//! # use mudtote::config::{AppConfig, DocumentClass};
//! let config = AppConfig::default();
//! assert_eq!(config.svg().padding(), 40.0);
//! assert_eq!(config.tikz().document_class(), DocumentClass::Standalone);
//! assert!(config.svg().background_color().is_ok());
//! ```

use serde::Deserialize;

use mudtote_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// SVG serializer section.
    #[serde(default)]
    svg: SvgConfig,

    /// TikZ serializer section.
    #[serde(default)]
    tikz: TikzConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its two sections.
    pub fn new(svg: SvgConfig, tikz: TikzConfig) -> Self {
        Self { svg, tikz }
    }

    /// Returns the SVG configuration.
    pub fn svg(&self) -> &SvgConfig {
        &self.svg
    }

    /// Returns the TikZ configuration.
    pub fn tikz(&self) -> &TikzConfig {
        &self.tikz
    }

    /// Checks every value that can only be validated after parsing.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        self.svg.background_color()?;
        self.tikz.validate()
    }
}

fn default_padding() -> f64 {
    40.0
}

fn default_font_family() -> String {
    "Arial".to_string()
}

/// SVG document settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SvgConfig {
    /// Space around the diagram extent, in diagram units.
    #[serde(default = "default_padding")]
    padding: f64,

    /// Background fill as a color string. Transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Font family of all text.
    #[serde(default = "default_font_family")]
    font_family: String,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            padding: default_padding(),
            background_color: None,
            font_family: default_font_family(),
        }
    }
}

impl SvgConfig {
    pub fn padding(&self) -> f64 {
        self.padding
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Sets the background color string.
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// LaTeX document class wrapping the picture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentClass {
    /// `standalone`, cropped to the picture.
    #[default]
    Standalone,
    /// `article`, with the picture in a centered figure.
    Article,
}

fn default_units_per_cm() -> f64 {
    50.0
}

fn default_max_width_cm() -> f64 {
    16.0
}

fn default_max_height_cm() -> f64 {
    22.0
}

/// TikZ document settings.
///
/// Diagram units are mapped to centimetres at `1 / units_per_cm`, shrunk
/// further when the result would exceed the maximum page extent.
#[derive(Debug, Clone, Deserialize)]
pub struct TikzConfig {
    #[serde(default = "default_units_per_cm")]
    units_per_cm: f64,

    #[serde(default = "default_max_width_cm")]
    max_width_cm: f64,

    #[serde(default = "default_max_height_cm")]
    max_height_cm: f64,

    #[serde(default)]
    document_class: DocumentClass,
}

impl Default for TikzConfig {
    fn default() -> Self {
        Self {
            units_per_cm: default_units_per_cm(),
            max_width_cm: default_max_width_cm(),
            max_height_cm: default_max_height_cm(),
            document_class: DocumentClass::default(),
        }
    }
}

impl TikzConfig {
    pub fn units_per_cm(&self) -> f64 {
        self.units_per_cm
    }

    pub fn max_width_cm(&self) -> f64 {
        self.max_width_cm
    }

    pub fn max_height_cm(&self) -> f64 {
        self.max_height_cm
    }

    pub fn document_class(&self) -> DocumentClass {
        self.document_class
    }

    /// Sets the document class.
    pub fn with_document_class(mut self, document_class: DocumentClass) -> Self {
        self.document_class = document_class;
        self
    }

    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("units_per_cm", self.units_per_cm),
            ("max_width_cm", self.max_width_cm),
            ("max_height_cm", self.max_height_cm),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("tikz.{name} must be a positive number, got {value}"));
            }
        }
        Ok(())
    }
}
