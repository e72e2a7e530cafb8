//! Graph block diagnostics
//!
//! Turns parse results into user-facing messages:
//!
//! - A parse failure becomes a single error, located at its line when known
//! - A potential-error hint becomes a note
//! - A rendering failure reported by the graphing engine is paired with the
//!   graph's hint, which is the only time that hint is surfaced to authors
//!
//! ## Example
//!
//! ```rust
//! use desmos_dsl::diagnostics::check_source;
//!
//! let result = check_source("y=x|red|blue");
//! assert!(result.has_errors());
//! ```

use std::fmt;

use crate::core::equation::PotentialErrorHint;
use crate::core::graph::Graph;
use crate::utils::error::SyntaxError;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - the graph may not render as intended
    Warning,
    /// Error - the graph cannot be rendered
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "note"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        let diag = Diagnostic::new(DiagnosticLevel::Error, err.root().to_string());
        match err.line() {
            Some(line) => diag.with_line(line),
            None => diag,
        }
    }
}

impl From<&PotentialErrorHint> for Diagnostic {
    fn from(hint: &PotentialErrorHint) -> Self {
        Diagnostic::new(DiagnosticLevel::Info, hint.message.clone())
            .with_source(hint.restriction.clone())
            .with_suggestion(format!("try '{}'", hint.suggestion))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> line N
        //         |
        //         | source text
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        if let Some(line) = self.line {
            write!(f, "\n  --> line {}", line)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of notes
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(plural(self.errors, "error"));
        }
        if self.warnings > 0 {
            parts.push(plural(self.warnings, "warning"));
        }
        if self.infos > 0 {
            parts.push(plural(self.infos, "note"));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

/// Check a graph block for problems
pub fn check_source(source: &str) -> CheckResult {
    let mut result = CheckResult::new();

    match Graph::parse(source) {
        Ok(graph) => {
            if let Some(hint) = graph.potential_error_hint() {
                result.add(Diagnostic::from(hint));
            }
        }
        Err(err) => result.add(Diagnostic::from(&err)),
    }

    result
}

/// Diagnostic for a graph the graphing engine failed to render
///
/// The graph's potential-error hint, if any, becomes the suggestion.
pub fn render_failure(graph: &Graph, engine_message: &str) -> Diagnostic {
    let diag = Diagnostic::new(
        DiagnosticLevel::Error,
        format!("the graph could not be rendered: {}", engine_message),
    );

    match graph.potential_error_hint() {
        Some(hint) => diag
            .with_source(hint.restriction.clone())
            .with_suggestion(hint.to_string()),
        None => diag,
    }
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}
