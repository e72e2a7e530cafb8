//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Diagnostics and error reporting
//! - Error types and result types
//! - Host plugin configuration

pub mod config;
pub mod diagnostics;
pub mod error;

// Re-export commonly used items
pub use config::{CacheLocation, CacheSettings, PluginSettings};
pub use diagnostics::{
    check_source, format_diagnostics, render_failure, CheckResult, Diagnostic, DiagnosticLevel,
};
pub use error::{ConfigError, ConfigResult, ParseResult, SyntaxError};
