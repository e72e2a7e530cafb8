//! Error handling for graph block parsing
//!
//! Every parse failure is a [`SyntaxError`]; the variant names the failure
//! category and the message is what the author sees. There is no recovery:
//! the first error aborts the whole parse.

use thiserror::Error;

/// Parse error for graph blocks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    /// The segment delimiter appeared more than once
    #[error("too many segments, the '{delimiter}' delimiter may appear at most once (found {found} segments)")]
    TooManySegments {
        delimiter: &'static str,
        found: usize,
    },

    /// A settings key outside the schema
    #[error("unrecognized field: {0}")]
    UnknownField(String),

    /// A settings key given twice
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// A field that needs a value was given none
    #[error("field '{0}' must have a value")]
    MissingValue(String),

    /// Non-numeric value for a numeric field
    #[error("field '{field}' must have a numeric value, got '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Width or height that is not a whole, non-negative number
    #[error("field '{field}' must be a non-negative whole number, got '{value}'")]
    InvalidSize { field: String, value: String },

    /// Value other than `true`/`false` for a flag
    #[error("field '{field}' must have a boolean value (true or false), got '{value}'")]
    InvalidBoolean { field: String, value: String },

    /// Value outside an enumerated set
    #[error("field '{field}' must be one of [{expected}], got '{value}'")]
    InvalidChoice {
        field: String,
        value: String,
        expected: String,
    },

    /// Value that is neither a hex color nor a known constant
    #[error("field '{field}' must be a hex color or one of [{known}], got '{value}'")]
    InvalidColor {
        field: String,
        value: String,
        known: String,
    },

    /// Second style tag on one equation
    #[error("duplicate style identifiers detected: '{first}' and '{second}'")]
    DuplicateStyle { first: String, second: String },

    /// Second color tag on one equation
    #[error("duplicate color identifiers detected: '{first}' and '{second}'")]
    DuplicateColor { first: String, second: String },

    /// `LABEL:` with nothing after the colon
    #[error("label must have a value")]
    EmptyLabel,

    /// Second label directive on one equation
    #[error("duplicate label identifiers detected")]
    DuplicateLabel,

    /// An equation line with no expression
    #[error("equation must not be empty")]
    EmptyEquation,

    /// Lower bound not strictly below the upper bound
    #[error("{low_name} ({low}) must be less than {high_name} ({high})")]
    InvertedBounds {
        low_name: &'static str,
        low: f64,
        high_name: &'static str,
        high: f64,
    },

    /// Width or height above the ceiling
    #[error("{field} ({value}) must not exceed {max}")]
    SizeExceeded {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// An error raised while parsing a particular source line
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<SyntaxError>,
    },

    /// Internal inconsistency, never caused by user input
    #[error("internal error: {0}")]
    Internal(String),
}

impl SyntaxError {
    /// Attach a 1-based source line number
    pub fn at_line(self, line: usize) -> Self {
        match self {
            // Keep the innermost location
            SyntaxError::AtLine { .. } => self,
            other => SyntaxError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }

    /// Source line the error was raised on, if known
    pub fn line(&self) -> Option<usize> {
        match self {
            SyntaxError::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// The error without any line context
    pub fn root(&self) -> &SyntaxError {
        match self {
            SyntaxError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        SyntaxError::Internal(message.into())
    }
}

/// Result type for parse operations
pub type ParseResult<T> = Result<T, SyntaxError>;

/// Errors decoding host-provided plugin settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or a field of the wrong shape
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored record is not a JSON object
    #[error("settings record must be a JSON object")]
    NotAnObject,
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_names_key() {
        let err = SyntaxError::UnknownField("colour".to_string());
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_line_context() {
        let err = SyntaxError::EmptyLabel.at_line(4);
        assert_eq!(err.line(), Some(4));
        assert_eq!(err.root(), &SyntaxError::EmptyLabel);
        assert_eq!(err.to_string(), "line 4: label must have a value");
    }

    #[test]
    fn test_line_context_is_not_nested() {
        let err = SyntaxError::EmptyLabel.at_line(4).at_line(9);
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_bounds_message() {
        let err = SyntaxError::InvertedBounds {
            low_name: "left",
            low: 10.0,
            high_name: "right",
            high: 5.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("left (10)"));
        assert!(msg.contains("right (5)"));
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::from(json_err);
        assert!(err.to_string().starts_with("invalid settings JSON"));
    }
}
