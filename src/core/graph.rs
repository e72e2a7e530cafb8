//! Graph assembly
//!
//! Ties the segment splitter, settings parser and equation parser together,
//! infers missing bounds, merges defaults, validates, and exposes a content
//! hash for caching.
//!
//! # Hash policy
//!
//! The hash covers the equations and the *partial* settings (after bounds
//! inference, before defaults are merged), serialized as JSON with unset
//! fields left out. Adding a new optional setting to the schema therefore
//! does not change the hash of graphs that never use it.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

use super::bounds::{adjust_bounds, validate_settings};
use super::equation::{parse_equation, Equation, PotentialErrorHint};
use super::fields::{GraphSettings, PartialSettings};
use super::segments::split_segments;
use super::settings::parse_settings;
use crate::utils::error::{ParseResult, SyntaxError};

/// A parsed, validated graph description
///
/// Immutable once built; updates produce a new `Graph`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    equations: Vec<Equation>,
    settings: GraphSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    potential_error_hint: Option<PotentialErrorHint>,
    /// Settings as written, after bounds inference
    #[serde(skip)]
    raw_settings: PartialSettings,
    #[serde(skip)]
    hash_input: String,
    #[serde(skip)]
    hash: OnceLock<String>,
}

/// What the content hash is computed over
#[derive(Serialize)]
struct HashInput<'a> {
    equations: &'a [Equation],
    settings: &'a PartialSettings,
}

impl Graph {
    /// Parse a graph block against the built-in defaults
    pub fn parse(source: &str) -> ParseResult<Graph> {
        Graph::parse_with_defaults(source, &GraphSettings::default())
    }

    /// Parse a graph block against caller-owned defaults
    pub fn parse_with_defaults(source: &str, defaults: &GraphSettings) -> ParseResult<Graph> {
        let segments = split_segments(source)?;
        let settings = parse_settings(&segments.settings_lines())?;

        let mut equations = Vec::new();
        let mut hint = None;
        for line in segments.equation_lines() {
            let parsed = parse_equation(line.text).map_err(|err| err.at_line(line.number))?;
            // The last hinting restriction wins
            if parsed.hint.is_some() {
                hint = parsed.hint;
            }
            equations.push(parsed.equation);
        }

        tracing::debug!(
            equations = equations.len(),
            settings_given = !settings.is_empty(),
            hinted = hint.is_some(),
            "parsed graph block"
        );

        Graph::assemble(equations, settings, defaults, hint)
    }

    /// Build a graph from already-structured parts
    pub fn from_parts(
        equations: Vec<Equation>,
        settings: PartialSettings,
        defaults: &GraphSettings,
    ) -> ParseResult<Graph> {
        Graph::assemble(equations, settings, defaults, None)
    }

    fn assemble(
        equations: Vec<Equation>,
        settings: PartialSettings,
        defaults: &GraphSettings,
        hint: Option<PotentialErrorHint>,
    ) -> ParseResult<Graph> {
        let raw_settings = adjust_bounds(&settings, defaults);
        let merged = raw_settings.merge_over(defaults);
        validate_settings(&merged)?;
        Graph::build(equations, raw_settings, merged, hint)
    }

    fn build(
        equations: Vec<Equation>,
        raw_settings: PartialSettings,
        settings: GraphSettings,
        potential_error_hint: Option<PotentialErrorHint>,
    ) -> ParseResult<Graph> {
        let hash_input = serde_json::to_string(&HashInput {
            equations: &equations,
            settings: &raw_settings,
        })
        .map_err(|err| SyntaxError::internal(format!("cannot serialize graph: {}", err)))?;

        Ok(Graph {
            equations,
            settings,
            potential_error_hint,
            raw_settings,
            hash_input,
            hash: OnceLock::new(),
        })
    }

    /// A new graph with `overrides` applied on top of the current settings
    ///
    /// Overrides are taken as explicit, so no bounds inference happens; the
    /// result is validated like a freshly parsed graph.
    pub fn with_settings(&self, overrides: &PartialSettings) -> ParseResult<Graph> {
        let raw_settings = self.raw_settings.overlay(overrides);
        let settings = overrides.merge_over(&self.settings);
        validate_settings(&settings)?;
        Graph::build(
            self.equations.clone(),
            raw_settings,
            settings,
            self.potential_error_hint.clone(),
        )
    }

    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Settings as written in the source, after bounds inference
    pub fn raw_settings(&self) -> &PartialSettings {
        &self.raw_settings
    }

    /// Hint to show alongside a rendering failure, if any
    pub fn potential_error_hint(&self) -> Option<&PotentialErrorHint> {
        self.potential_error_hint.as_ref()
    }

    /// SHA-256 of the graph content as lowercase hex, computed on first use
    pub fn hash(&self) -> &str {
        self.hash.get_or_init(|| digest_hex(self.hash_input.as_bytes()))
    }

    #[cfg(test)]
    pub(crate) fn hash_input(&self) -> &str {
        &self.hash_input
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.equations == other.equations
            && self.settings == other.settings
            && self.potential_error_hint == other.potential_error_hint
            && self.raw_settings == other.raw_settings
    }
}

fn digest_hex(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::DegreeMode;
    use crate::data::colors::{Color, ColorConstant};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_equation() {
        let graph = Graph::parse("y=x").unwrap();
        assert_eq!(graph.equations(), &[Equation::new("y=x")]);
        assert_eq!(graph.settings(), &GraphSettings::default());
        assert!(graph.potential_error_hint().is_none());
    }

    #[test]
    fn test_settings_and_equations() {
        let graph = Graph::parse(
            "width=300; height=200\ndegreeMode=degrees\n---\ny=sin(x)|red\ny=cos(x)|dashed",
        )
        .unwrap();
        assert_eq!(graph.settings().width, 300);
        assert_eq!(graph.settings().height, 200);
        assert_eq!(graph.settings().degree_mode, DegreeMode::Degrees);
        assert_eq!(graph.equations().len(), 2);
        assert_eq!(
            graph.equations()[0].color,
            Some(Color::Named(ColorConstant::Red))
        );
    }

    #[test]
    fn test_equation_error_has_line() {
        let err = Graph::parse("grid=false\n---\ny=x\ny=x|red|blue").unwrap_err();
        assert_eq!(err.line(), Some(4));
        assert!(matches!(err.root(), SyntaxError::DuplicateColor { .. }));
    }

    #[test]
    fn test_left_only_infers_right() {
        let graph = Graph::parse("left=50\n---\ny=x").unwrap();
        assert_eq!(graph.settings().left, 50.0);
        assert_eq!(graph.settings().right, 70.0);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = Graph::parse("left=10; right=5\n---\ny=x").unwrap_err();
        assert!(matches!(err, SyntaxError::InvertedBounds { .. }));
        assert!(Graph::parse("bottom=3; top=3\n---\ny=x").is_err());
    }

    #[test]
    fn test_last_hint_wins() {
        let graph = Graph::parse("y=x|x<\\pi\ny=2x|x>\\theta\ny=3x|x>0").unwrap();
        let hint = graph.potential_error_hint().unwrap();
        assert_eq!(hint.restriction, r"x>\theta");
    }

    #[test]
    fn test_custom_defaults() {
        let defaults = GraphSettings {
            left: 0.0,
            right: 100.0,
            grid: false,
            ..Default::default()
        };
        let graph = Graph::parse_with_defaults("y=x", &defaults).unwrap();
        assert_eq!(graph.settings(), &defaults);

        let graph = Graph::parse_with_defaults("left=150\n---\ny=x", &defaults).unwrap();
        assert_eq!(graph.settings().right, 250.0);
    }

    #[test]
    fn test_hash_input_excludes_defaults() {
        let graph = Graph::parse("y=x").unwrap();
        assert_eq!(graph.hash_input(), r#"{"equations":[{"equation":"y=x"}],"settings":{}}"#);

        let graph = Graph::parse("left=50\n---\ny=x").unwrap();
        assert_eq!(
            graph.hash_input(),
            r#"{"equations":[{"equation":"y=x"}],"settings":{"left":50.0,"right":70.0}}"#
        );
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let graph = Graph::parse("y=x").unwrap();
        let hash = graph.hash();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        // Memoized
        assert!(std::ptr::eq(hash, graph.hash()));
    }

    #[test]
    fn test_hash_known_digest() {
        assert_eq!(
            digest_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_determinism() {
        let a = Graph::parse("grid=false\n---\ny=x|red").unwrap();
        let b = Graph::parse("grid=false\n---\ny=x|red").unwrap();
        assert_eq!(a.hash(), b.hash());

        let c = Graph::parse("grid=false\n---\ny=x|blue").unwrap();
        assert_ne!(a.hash(), c.hash());
        let d = Graph::parse("grid=true\n---\ny=x|red").unwrap();
        assert_ne!(a.hash(), d.hash());
    }

    #[test]
    fn test_with_settings_builds_new_graph() {
        let graph = Graph::parse("left=-5; right=5\n---\ny=x").unwrap();
        let moved = graph
            .with_settings(&PartialSettings {
                left: Some(0.0),
                right: Some(10.0),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(graph.settings().left, -5.0);
        assert_eq!(moved.settings().left, 0.0);
        assert_eq!(moved.settings().right, 10.0);
        assert_eq!(moved.equations(), graph.equations());
        assert_ne!(moved.hash(), graph.hash());
    }

    #[test]
    fn test_with_settings_validates() {
        let graph = Graph::parse("y=x").unwrap();
        let result = graph.with_settings(&PartialSettings {
            left: Some(20.0),
            ..Default::default()
        });
        assert!(matches!(result, Err(SyntaxError::InvertedBounds { .. })));
    }

    #[test]
    fn test_from_parts() {
        let graph = Graph::from_parts(
            vec![Equation::new("y=x^2")],
            PartialSettings::default(),
            &GraphSettings::default(),
        )
        .unwrap();
        assert_eq!(graph, Graph::parse("y=x^2").unwrap());
    }

    #[test]
    fn test_graph_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Graph>();
    }
}
