//! WASM bindings for desmos-dsl
//!
//! This module provides JavaScript-accessible functions for the host plugin:
//! parsing graph blocks, checking them, and migrating stored settings.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::{config::PluginSettings, diagnostics::DiagnosticLevel, Graph, PotentialErrorHint};

/// Parse result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    /// Whether parsing succeeded
    pub success: bool,
    /// The parsed graph
    pub graph: Option<Graph>,
    /// Content hash of the graph, for caching
    pub hash: Option<String>,
    /// Error message if parsing failed
    pub error: Option<String>,
    /// Line of the error, if known
    pub line: Option<usize>,
    /// Hint to show if rendering later fails
    pub hint: Option<PotentialErrorHint>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Parse a graph block
///
/// # Arguments
/// * `source` - The contents of the fenced graph block
///
/// # Returns
/// A `ParseOutcome` object
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "parseGraph")]
pub fn parse_graph_wasm(source: &str) -> JsValue {
    let outcome = match Graph::parse(source) {
        Ok(graph) => ParseOutcome {
            success: true,
            hash: Some(graph.hash().to_string()),
            hint: graph.potential_error_hint().cloned(),
            graph: Some(graph),
            error: None,
            line: None,
        },
        Err(err) => ParseOutcome {
            success: false,
            graph: None,
            hash: None,
            error: Some(err.root().to_string()),
            line: err.line(),
            hint: None,
        },
    };

    serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
}

/// Check a graph block for problems
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkGraph")]
pub fn check_graph_wasm(source: &str) -> JsValue {
    let result = crate::diagnostics::check_source(source);

    // Group diagnostics by level
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        let text = d.to_string();
        match d.level {
            DiagnosticLevel::Error => errors.push(text),
            DiagnosticLevel::Warning => warnings.push(text),
            DiagnosticLevel::Info => infos.push(text),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Summary of graph check results
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Bring the host's stored settings record up to `version`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "migrateSettings")]
pub fn migrate_settings_wasm(raw: JsValue, version: &str) -> JsValue {
    let raw: serde_json::Value = serde_wasm_bindgen::from_value(raw).unwrap_or_default();
    let settings = PluginSettings::migrate(&raw, version);
    serde_wasm_bindgen::to_value(&settings).unwrap_or(JsValue::NULL)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
