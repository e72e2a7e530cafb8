//! Equation line parser
//!
//! An equation line is an expression followed by `|`-separated segments:
//!
//! ```text
//! y = sin(x) | dashed | red | x > 0 | label:wave
//! ```
//!
//! The expression is passed through untouched. Each trailing segment is run
//! through an ordered chain of classifiers and the first match decides what
//! it is: hidden flag, style, color, label, or (when nothing matches) a
//! restriction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::data::colors::{parse_color, Color};
use crate::data::constants::{EQUATION_DELIMITER, HIDDEN_TAG, LABEL_TAG};
use crate::data::styles::EquationStyle;
use crate::utils::error::{ParseResult, SyntaxError};

/// One parsed equation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equation {
    /// The expression, verbatim
    pub equation: String,
    /// Restriction expressions in source order; all must hold
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EquationStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    /// Label text; an empty string labels the equation with its own source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Equation {
    pub fn new(equation: impl Into<String>) -> Self {
        Equation {
            equation: equation.into(),
            ..Default::default()
        }
    }

    /// Whether the label should show the equation's own text
    pub fn labels_itself(&self) -> bool {
        self.label.as_deref() == Some("")
    }
}

/// Hint attached when a restriction looks like it was written in LaTeX
///
/// Restrictions are plain expressions, so a backslash is suspicious but not
/// necessarily wrong. The hint is only worth showing if the graphing engine
/// later rejects the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotentialErrorHint {
    /// The restriction that triggered the hint
    pub restriction: String,
    pub message: String,
    /// The restriction with control sequences rewritten as plain names
    pub suggestion: String,
}

impl PotentialErrorHint {
    fn for_restriction(restriction: &str) -> Self {
        PotentialErrorHint {
            restriction: restriction.to_string(),
            message: "restrictions are plain expressions and do not accept LaTeX control sequences"
                .to_string(),
            suggestion: restriction.replace('\\', ""),
        }
    }
}

impl fmt::Display for PotentialErrorHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: try '{}' instead of '{}'",
            self.message, self.suggestion, self.restriction
        )
    }
}

/// Result of parsing one line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEquation {
    pub equation: Equation,
    /// Hint from the last backslash-bearing restriction on the line
    pub hint: Option<PotentialErrorHint>,
}

/// Meaning of a trailing segment
#[derive(Debug, Clone, PartialEq)]
enum Tag<'a> {
    Hidden,
    Style(EquationStyle),
    Color(Color),
    /// `LABEL:text`; the text may be empty, which is rejected later
    Label(&'a str),
    /// Bare `LABEL`
    SelfLabel,
    Restriction(&'a str),
}

type Classifier = for<'a> fn(&'a str) -> Option<Tag<'a>>;

/// Classifiers in precedence order; the first match wins
const CLASSIFIERS: [Classifier; 5] = [
    classify_hidden,
    classify_style,
    classify_color,
    classify_label,
    classify_self_label,
];

fn classify_hidden(segment: &str) -> Option<Tag<'_>> {
    segment.eq_ignore_ascii_case(HIDDEN_TAG).then_some(Tag::Hidden)
}

fn classify_style(segment: &str) -> Option<Tag<'_>> {
    EquationStyle::from_name(segment).map(Tag::Style)
}

fn classify_color(segment: &str) -> Option<Tag<'_>> {
    parse_color(segment).map(Tag::Color)
}

fn classify_label(segment: &str) -> Option<Tag<'_>> {
    let (head, value) = segment.split_once(':')?;
    head.eq_ignore_ascii_case(LABEL_TAG)
        .then(|| Tag::Label(value.trim()))
}

fn classify_self_label(segment: &str) -> Option<Tag<'_>> {
    segment.eq_ignore_ascii_case(LABEL_TAG).then_some(Tag::SelfLabel)
}

fn classify(segment: &str) -> Tag<'_> {
    CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(segment))
        .unwrap_or(Tag::Restriction(segment))
}

/// Parse a single non-blank equation line
pub fn parse_equation(line: &str) -> ParseResult<ParsedEquation> {
    let mut segments = line
        .split(EQUATION_DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let expression = segments.next().ok_or(SyntaxError::EmptyEquation)?;
    let mut equation = Equation::new(expression);
    let mut hint = None;

    for segment in segments {
        let tag = classify(segment);
        tracing::trace!(segment, ?tag, "classified equation segment");

        match tag {
            Tag::Hidden => equation.hidden = true,
            Tag::Style(style) => {
                if let Some(first) = equation.style {
                    return Err(SyntaxError::DuplicateStyle {
                        first: first.name().to_string(),
                        second: segment.to_string(),
                    });
                }
                equation.style = Some(style);
            }
            Tag::Color(color) => {
                if let Some(first) = &equation.color {
                    return Err(SyntaxError::DuplicateColor {
                        first: first.to_string(),
                        second: segment.to_string(),
                    });
                }
                equation.color = Some(color);
            }
            Tag::Label(text) => {
                if text.is_empty() {
                    return Err(SyntaxError::EmptyLabel);
                }
                set_label(&mut equation, text)?;
            }
            Tag::SelfLabel => set_label(&mut equation, "")?,
            Tag::Restriction(restriction) => {
                if restriction.contains('\\') {
                    tracing::debug!(restriction, "restriction looks like LaTeX");
                    hint = Some(PotentialErrorHint::for_restriction(restriction));
                }
                equation.restrictions.push(restriction.to_string());
            }
        }
    }

    Ok(ParsedEquation { equation, hint })
}

fn set_label(equation: &mut Equation, text: &str) -> ParseResult<()> {
    if equation.label.is_some() {
        return Err(SyntaxError::DuplicateLabel);
    }
    equation.label = Some(text.to_string());
    Ok(())
}
