//! Command-line argument definitions for the Mudtote CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, and logging verbosity.

use std::path::Path;

use clap::{Parser, ValueEnum};

use mudtote::host::commands;

/// Output format of the exported diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Standalone SVG document
    Svg,
    /// LaTeX document with a TikZ picture
    Tikz,
    /// Normalized diagram JSON
    Json,
    /// Live canvas markup (an SVG group for embedding)
    Canvas,
}

impl Format {
    /// Guesses the format from an output path's extension.
    pub fn from_path(path: &str) -> Option<Self> {
        match Path::new(path).extension()?.to_str()? {
            "svg" => Some(Self::Svg),
            "tex" => Some(Self::Tikz),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Host command that produces this format.
    pub fn command(self) -> &'static str {
        match self {
            Self::Svg => commands::EXPORT_SVG,
            Self::Tikz => commands::EXPORT_TIKZ,
            Self::Json => commands::EXPORT_JSON,
            Self::Canvas => commands::EXPORT_CANVAS,
        }
    }

    /// Output file used when `--output` is not given.
    pub fn default_output(self) -> &'static str {
        match self {
            Self::Svg | Self::Canvas => "out.svg",
            Self::Tikz => "out.tex",
            Self::Json => "out.json",
        }
    }
}

/// Command-line arguments for the Mudtote diagram exporter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram JSON file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format; inferred from the output extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The explicit format, else the one implied by the output path, else SVG.
    pub fn resolved_format(&self) -> Format {
        self.format
            .or_else(|| self.output.as_deref().and_then(Format::from_path))
            .unwrap_or(Format::Svg)
    }

    /// The explicit output path, else the format's default.
    pub fn resolved_output(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| self.resolved_format().default_output().to_string())
    }
}
