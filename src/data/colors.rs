//! Color support for equations and the `defaultColor` setting
//!
//! A color token is either one of the named [`ColorConstant`]s (matched
//! case-insensitively) or a `#` followed by one or more ASCII alphanumerics.
//! Hex tokens are passed through verbatim: neither the digit count nor the
//! digit range is checked, the graphing engine decides what to make of them.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Body of a hex color, after the leading `#`
    static ref HEX_BODY_RE: Regex = Regex::new(r"^[0-9a-zA-Z]+$").unwrap();
}

/// Named colors understood in equation tags and settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorConstant {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    Purple,
    Orange,
    Black,
    White,
}

impl ColorConstant {
    /// Every constant, in declaration order
    pub const ALL: [ColorConstant; 10] = [
        ColorConstant::Red,
        ColorConstant::Green,
        ColorConstant::Blue,
        ColorConstant::Yellow,
        ColorConstant::Magenta,
        ColorConstant::Cyan,
        ColorConstant::Purple,
        ColorConstant::Orange,
        ColorConstant::Black,
        ColorConstant::White,
    ];

    /// Display name of the constant
    pub fn name(&self) -> &'static str {
        match self {
            ColorConstant::Red => "Red",
            ColorConstant::Green => "Green",
            ColorConstant::Blue => "Blue",
            ColorConstant::Yellow => "Yellow",
            ColorConstant::Magenta => "Magenta",
            ColorConstant::Cyan => "Cyan",
            ColorConstant::Purple => "Purple",
            ColorConstant::Orange => "Orange",
            ColorConstant::Black => "Black",
            ColorConstant::White => "White",
        }
    }

    /// Canonical hex value bound to the constant
    pub fn hex(&self) -> &'static str {
        match self {
            ColorConstant::Red => "#ff0000",
            ColorConstant::Green => "#00ff00",
            ColorConstant::Blue => "#0000ff",
            ColorConstant::Yellow => "#ffff00",
            ColorConstant::Magenta => "#ff00ff",
            ColorConstant::Cyan => "#00ffff",
            ColorConstant::Purple => "#cc8899",
            ColorConstant::Orange => "#ffa500",
            ColorConstant::Black => "#000000",
            ColorConstant::White => "#ffffff",
        }
    }

    /// Look up a constant by name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<ColorConstant> {
        COLOR_CONSTANTS
            .get(name.to_ascii_lowercase().as_str())
            .copied()
    }

    /// Comma-separated list of the constant names, for error messages
    pub fn known_names() -> String {
        ColorConstant::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Lowercased constant name to constant
static COLOR_CONSTANTS: phf::Map<&'static str, ColorConstant> = phf_map! {
    "red" => ColorConstant::Red,
    "green" => ColorConstant::Green,
    "blue" => ColorConstant::Blue,
    "yellow" => ColorConstant::Yellow,
    "magenta" => ColorConstant::Magenta,
    "cyan" => ColorConstant::Cyan,
    "purple" => ColorConstant::Purple,
    "orange" => ColorConstant::Orange,
    "black" => ColorConstant::Black,
    "white" => ColorConstant::White,
};

/// A parsed color: a named constant or a verbatim hex token
///
/// Serializes as its hex string so that `red` and the constant's hex value
/// describe the same graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    Named(ColorConstant),
    Hex(String),
}

impl Color {
    /// Hex string handed to the graphing engine
    pub fn as_hex(&self) -> &str {
        match self {
            Color::Named(constant) => constant.hex(),
            Color::Hex(hex) => hex,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_hex())
    }
}

impl From<ColorConstant> for Color {
    fn from(constant: ColorConstant) -> Self {
        Color::Named(constant)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        match color {
            Color::Named(constant) => constant.hex().to_string(),
            Color::Hex(hex) => hex,
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_color(&value).ok_or_else(|| {
            format!(
                "'{}' is not a hex color or one of [{}]",
                value,
                ColorConstant::known_names()
            )
        })
    }
}

/// Parse a color token
///
/// Returns `None` when the token is neither a hex color nor a known constant;
/// callers decide whether that is an error or a cue to try another reading.
pub fn parse_color(token: &str) -> Option<Color> {
    if let Some(body) = token.strip_prefix('#') {
        return HEX_BODY_RE
            .is_match(body)
            .then(|| Color::Hex(token.to_string()));
    }

    ColorConstant::from_name(token).map(Color::Named)
}
