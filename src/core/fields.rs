//! Graph settings data model
//!
//! [`PartialSettings`] is what a settings segment (or a host record) yields:
//! every field optional. [`GraphSettings`] is the complete record obtained by
//! merging a partial record over defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::colors::Color;

/// Angle unit used by trigonometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DegreeMode {
    Radians,
    Degrees,
}

impl DegreeMode {
    pub const ALL: [DegreeMode; 2] = [DegreeMode::Radians, DegreeMode::Degrees];

    pub fn name(&self) -> &'static str {
        match self {
            DegreeMode::Radians => "RADIANS",
            DegreeMode::Degrees => "DEGREES",
        }
    }

    /// Look up a mode by name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<DegreeMode> {
        DegreeMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }

    /// Comma-separated list of accepted names, for error messages
    pub fn known_names() -> String {
        DegreeMode::ALL
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DegreeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Complete settings of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSettings {
    /// Width of the rendered graph, in pixels
    pub width: u32,
    /// Height of the rendered graph, in pixels
    pub height: u32,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    /// Draw the background grid
    pub grid: bool,
    pub hide_axis_numbers: bool,
    pub degree_mode: DegreeMode,
    /// Color for equations without a color tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_color: Option<Color>,
}

impl GraphSettings {
    /// Horizontal extent of the viewport
    pub fn x_span(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent of the viewport
    pub fn y_span(&self) -> f64 {
        self.top - self.bottom
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        GraphSettings {
            width: 600,
            height: 400,
            left: -10.0,
            right: 10.0,
            bottom: -7.0,
            top: 7.0,
            grid: true,
            hide_axis_numbers: false,
            degree_mode: DegreeMode::Radians,
            default_color: None,
        }
    }
}

/// Settings with every field optional
///
/// Absent fields are left out of the serialized form, which keeps the
/// content hash of a graph stable when new fields are added to the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_axis_numbers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree_mode: Option<DegreeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_color: Option<Color>,
}

impl PartialSettings {
    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        *self == PartialSettings::default()
    }

    /// Fill every absent field from `defaults`
    pub fn merge_over(&self, defaults: &GraphSettings) -> GraphSettings {
        GraphSettings {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            left: self.left.unwrap_or(defaults.left),
            right: self.right.unwrap_or(defaults.right),
            bottom: self.bottom.unwrap_or(defaults.bottom),
            top: self.top.unwrap_or(defaults.top),
            grid: self.grid.unwrap_or(defaults.grid),
            hide_axis_numbers: self.hide_axis_numbers.unwrap_or(defaults.hide_axis_numbers),
            degree_mode: self.degree_mode.unwrap_or(defaults.degree_mode),
            default_color: self
                .default_color
                .clone()
                .or_else(|| defaults.default_color.clone()),
        }
    }

    /// New record with the fields set in `overrides` replacing ours
    pub fn overlay(&self, overrides: &PartialSettings) -> PartialSettings {
        PartialSettings {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            left: overrides.left.or(self.left),
            right: overrides.right.or(self.right),
            bottom: overrides.bottom.or(self.bottom),
            top: overrides.top.or(self.top),
            grid: overrides.grid.or(self.grid),
            hide_axis_numbers: overrides.hide_axis_numbers.or(self.hide_axis_numbers),
            degree_mode: overrides.degree_mode.or(self.degree_mode),
            default_color: overrides
                .default_color
                .clone()
                .or_else(|| self.default_color.clone()),
        }
    }
}
