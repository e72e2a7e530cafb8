//! Core parsing modules
//!
//! This module contains the graph block front end:
//! - `segments`: splits the source into settings and equations
//! - `settings`: parses `key[=value]` directives against the field schema
//! - `equation`: parses equation lines and classifies their tags
//! - `bounds`: infers missing viewport edges and validates settings
//! - `graph`: assembles the final [`Graph`] and its content hash

pub mod bounds;
pub mod equation;
pub mod fields;
pub mod graph;
pub mod segments;
pub mod settings;

// Re-export main types and functions
pub use bounds::{adjust_bounds, validate_settings};
pub use equation::{parse_equation, Equation, ParsedEquation, PotentialErrorHint};
pub use fields::{DegreeMode, GraphSettings, PartialSettings};
pub use graph::Graph;
pub use segments::{split_segments, SourceLine};
pub use settings::{parse_settings, parse_settings_str, FieldKind, FIELD_SCHEMA};
