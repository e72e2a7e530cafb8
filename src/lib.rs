//! # desmos-dsl
//!
//! Parser and validator for the small graph description language used to
//! embed Desmos graphs in Markdown notes.
//!
//! A graph block has an optional settings segment and an equations segment,
//! separated by `---`:
//!
//! ```text
//! left=0; right=10
//! grid=false
//! ---
//! y = sin(x) | dashed | red
//! y = x^2 | x > 0 | label:parabola
//! ```
//!
//! Parsing produces an immutable [`Graph`]: the equations with their tags,
//! the settings merged over defaults and validated, an optional hint for
//! likely mistakes, and a content hash used as a cache key. Rendering is left
//! to the host; this crate only describes the graph.
//!
//! ## Usage Examples
//!
//! ```rust
//! use desmos_dsl::{parse_graph, ColorConstant, Color};
//!
//! let graph = parse_graph("width=300\n---\ny=x|red").unwrap();
//! assert_eq!(graph.settings().width, 300);
//! assert_eq!(graph.equations()[0].color, Some(Color::Named(ColorConstant::Red)));
//! assert_eq!(graph.hash().len(), 64);
//! ```
//!
//! Errors carry the offending line when there is one:
//!
//! ```rust
//! use desmos_dsl::parse_graph;
//!
//! let err = parse_graph("y=x|red|blue").unwrap_err();
//! assert_eq!(err.line(), Some(1));
//! ```

/// Core parsing modules
pub mod core;

/// Data layer - static tables and constants
pub mod data;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export core types and functions
pub use crate::core::{
    adjust_bounds, parse_equation, parse_settings_str, validate_settings, DegreeMode, Equation,
    Graph, GraphSettings, PartialSettings, PotentialErrorHint,
};

// Re-export data types
pub use data::{parse_color, Color, ColorConstant, EquationStyle, LineStyle, PointStyle, MAX_SIZE};

// Re-export utilities
pub use utils::config;
pub use utils::diagnostics;
pub use utils::error::{ConfigError, ParseResult, SyntaxError};

/// Parse a graph block against the default settings
pub fn parse_graph(source: &str) -> ParseResult<Graph> {
    Graph::parse(source)
}

/// Parse a graph block against caller-supplied default settings
pub fn parse_graph_with_defaults(source: &str, defaults: &GraphSettings) -> ParseResult<Graph> {
    Graph::parse_with_defaults(source, defaults)
}
