//! Data layer - static tables and grammar constants
//!
//! This module contains the fixed vocabulary of the graph block language:
//! - Named color constants and hex color parsing
//! - Line and point styles
//! - Delimiters, tag names and size limits

pub mod colors;
pub mod constants;
pub mod styles;

// Re-export commonly used items
pub use colors::{parse_color, Color, ColorConstant};
pub use constants::{EQUATION_DELIMITER, HIDDEN_TAG, LABEL_TAG, MAX_SIZE, SEGMENT_DELIMITER};
pub use styles::{EquationStyle, LineStyle, PointStyle};
