//! Line and point styles for equation tags

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stroke style for curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Marker style for points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointStyle {
    Point,
    Open,
    Cross,
}

/// The single style an equation may carry
///
/// Line and point styles share one slot, so at most one of either kind is
/// allowed per equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EquationStyle {
    Line(LineStyle),
    Point(PointStyle),
}

impl EquationStyle {
    /// Canonical uppercase name, as the graphing engine expects it
    pub fn name(&self) -> &'static str {
        match self {
            EquationStyle::Line(LineStyle::Solid) => "SOLID",
            EquationStyle::Line(LineStyle::Dashed) => "DASHED",
            EquationStyle::Line(LineStyle::Dotted) => "DOTTED",
            EquationStyle::Point(PointStyle::Point) => "POINT",
            EquationStyle::Point(PointStyle::Open) => "OPEN",
            EquationStyle::Point(PointStyle::Cross) => "CROSS",
        }
    }

    /// Look up a style by name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<EquationStyle> {
        STYLE_NAMES.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Whether this is a point marker rather than a stroke
    pub fn is_point(&self) -> bool {
        matches!(self, EquationStyle::Point(_))
    }
}

impl fmt::Display for EquationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<EquationStyle> for String {
    fn from(style: EquationStyle) -> Self {
        style.name().to_string()
    }
}

impl TryFrom<String> for EquationStyle {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EquationStyle::from_name(&value).ok_or_else(|| format!("unknown style '{}'", value))
    }
}

/// Lowercased style name to style
static STYLE_NAMES: phf::Map<&'static str, EquationStyle> = phf_map! {
    "solid" => EquationStyle::Line(LineStyle::Solid),
    "dashed" => EquationStyle::Line(LineStyle::Dashed),
    "dotted" => EquationStyle::Line(LineStyle::Dotted),
    "point" => EquationStyle::Point(PointStyle::Point),
    "open" => EquationStyle::Point(PointStyle::Open),
    "cross" => EquationStyle::Point(PointStyle::Cross),
};
