//! Settings segment parser
//!
//! The settings segment is a run of `key[=value]` directives separated by
//! `;` or line breaks. Keys are matched case-sensitively against a fixed
//! schema; enumerated and boolean values are matched case-insensitively.
//!
//! ```text
//! width=300; height=200
//! left=-5; right=5
//! grid=false
//! hideAxisNumbers
//! degreeMode=degrees
//! ```

use fxhash::FxHashSet;
use phf::phf_map;

use super::fields::{DegreeMode, PartialSettings};
use super::segments::SourceLine;
use crate::data::colors::{parse_color, ColorConstant};
use crate::utils::error::{ParseResult, SyntaxError};

/// Value type of a settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-negative whole number of pixels
    Size,
    /// Any finite decimal number
    Number,
    /// Flag; a bare key turns it on
    Boolean,
    /// One of [`DegreeMode`]
    DegreeMode,
    /// Hex color or named constant
    Color,
}

/// Settings schema: field name to value type
pub static FIELD_SCHEMA: phf::Map<&'static str, FieldKind> = phf_map! {
    "width" => FieldKind::Size,
    "height" => FieldKind::Size,
    "left" => FieldKind::Number,
    "right" => FieldKind::Number,
    "bottom" => FieldKind::Number,
    "top" => FieldKind::Number,
    "grid" => FieldKind::Boolean,
    "hideAxisNumbers" => FieldKind::Boolean,
    "degreeMode" => FieldKind::DegreeMode,
    "defaultColor" => FieldKind::Color,
};

/// A single `key[=value]` directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub key: &'a str,
    /// Trimmed value; `None` when there is no `=` or nothing after it
    pub value: Option<&'a str>,
}

impl<'a> Directive<'a> {
    /// Split on the first `=` only, so values may contain `=`
    pub fn parse(raw: &'a str) -> Self {
        match raw.split_once('=') {
            Some((key, value)) => {
                let value = value.trim();
                Directive {
                    key: key.trim(),
                    value: (!value.is_empty()).then_some(value),
                }
            }
            None => Directive {
                key: raw.trim(),
                value: None,
            },
        }
    }
}

/// Parse the lines of a settings segment
pub fn parse_settings(lines: &[SourceLine<'_>]) -> ParseResult<PartialSettings> {
    let mut settings = PartialSettings::default();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for line in lines {
        for raw in line.text.split(';') {
            if raw.trim().is_empty() {
                continue;
            }
            let directive = Directive::parse(raw);
            apply_directive(&mut settings, &mut seen, directive)
                .map_err(|err| err.at_line(line.number))?;
        }
    }

    Ok(settings)
}

/// Parse a settings segment given as a single string
pub fn parse_settings_str(segment: &str) -> ParseResult<PartialSettings> {
    parse_settings(&super::segments::non_blank_lines(segment, 1))
}

fn apply_directive<'a>(
    settings: &mut PartialSettings,
    seen: &mut FxHashSet<&'a str>,
    directive: Directive<'a>,
) -> ParseResult<()> {
    let Directive { key, value } = directive;

    let kind = FIELD_SCHEMA
        .get(key)
        .copied()
        .ok_or_else(|| SyntaxError::UnknownField(key.to_string()))?;

    if !seen.insert(key) {
        return Err(SyntaxError::DuplicateField(key.to_string()));
    }

    tracing::trace!(key, ?value, ?kind, "settings directive");

    match kind {
        FieldKind::Size => {
            let size = parse_size(key, value)?;
            match key {
                "width" => settings.width = Some(size),
                "height" => settings.height = Some(size),
                _ => return Err(unassignable(key, kind)),
            }
        }
        FieldKind::Number => {
            let number = parse_number(key, value)?;
            match key {
                "left" => settings.left = Some(number),
                "right" => settings.right = Some(number),
                "bottom" => settings.bottom = Some(number),
                "top" => settings.top = Some(number),
                _ => return Err(unassignable(key, kind)),
            }
        }
        FieldKind::Boolean => {
            let flag = parse_flag(key, value)?;
            match key {
                "grid" => settings.grid = Some(flag),
                "hideAxisNumbers" => settings.hide_axis_numbers = Some(flag),
                _ => return Err(unassignable(key, kind)),
            }
        }
        FieldKind::DegreeMode => {
            let value = require(key, value)?;
            let mode = DegreeMode::from_name(value).ok_or_else(|| SyntaxError::InvalidChoice {
                field: key.to_string(),
                value: value.to_string(),
                expected: DegreeMode::known_names(),
            })?;
            settings.degree_mode = Some(mode);
        }
        FieldKind::Color => {
            let value = require(key, value)?;
            let color = parse_color(value).ok_or_else(|| SyntaxError::InvalidColor {
                field: key.to_string(),
                value: value.to_string(),
                known: ColorConstant::known_names(),
            })?;
            settings.default_color = Some(color);
        }
    }

    Ok(())
}

/// Schema entry with no slot in [`PartialSettings`]
fn unassignable(key: &str, kind: FieldKind) -> SyntaxError {
    SyntaxError::internal(format!("field '{}' of kind {:?} has no setting", key, kind))
}

fn require<'a>(key: &str, value: Option<&'a str>) -> ParseResult<&'a str> {
    value.ok_or_else(|| SyntaxError::MissingValue(key.to_string()))
}

fn parse_number(key: &str, value: Option<&str>) -> ParseResult<f64> {
    let value = require(key, value)?;
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| SyntaxError::InvalidNumber {
            field: key.to_string(),
            value: value.to_string(),
        })
}

fn parse_size(key: &str, value: Option<&str>) -> ParseResult<u32> {
    let number = parse_number(key, value)?;
    let in_range = number >= 0.0 && number.fract() == 0.0 && number <= f64::from(u32::MAX);
    if !in_range {
        return Err(SyntaxError::InvalidSize {
            field: key.to_string(),
            value: value.unwrap_or_default().to_string(),
        });
    }
    Ok(number as u32)
}

fn parse_flag(key: &str, value: Option<&str>) -> ParseResult<bool> {
    match value {
        None => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
        Some(v) => Err(SyntaxError::InvalidBoolean {
            field: key.to_string(),
            value: v.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::colors::Color;
    use pretty_assertions::assert_eq;

    fn parse(segment: &str) -> ParseResult<PartialSettings> {
        parse_settings_str(segment)
    }

    #[test]
    fn test_directive_split_on_first_equals() {
        assert_eq!(
            Directive::parse(" label = a=b "),
            Directive {
                key: "label",
                value: Some("a=b")
            }
        );
        assert_eq!(
            Directive::parse("grid"),
            Directive {
                key: "grid",
                value: None
            }
        );
        assert_eq!(
            Directive::parse("grid="),
            Directive {
                key: "grid",
                value: None
            }
        );
    }

    #[test]
    fn test_semicolons_and_newlines_are_equivalent() {
        let joined = parse("width=200; height=201; left=-100; right=101; bottom=-102; top=103;").unwrap();
        let lines = parse("width=200\nheight=201\nleft=-100\nright=101\nbottom=-102\ntop=103").unwrap();
        assert_eq!(joined, lines);
        assert_eq!(joined.width, Some(200));
        assert_eq!(joined.left, Some(-100.0));
        assert_eq!(joined.top, Some(103.0));
    }

    #[test]
    fn test_empty_segment() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse(" ;; \n ; ").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_key() {
        let err = parse("colour=red").unwrap_err();
        assert_eq!(err.root(), &SyntaxError::UnknownField("colour".to_string()));
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let err = parse("Width=100").unwrap_err();
        assert_eq!(err.root(), &SyntaxError::UnknownField("Width".to_string()));
        assert!(parse("hideaxisnumbers").is_err());
    }

    #[test]
    fn test_duplicate_key() {
        let err = parse("width=100; width=200").unwrap_err();
        assert_eq!(err.root(), &SyntaxError::DuplicateField("width".to_string()));
    }

    #[test]
    fn test_numeric_fields() {
        let settings = parse("left=-2.5; right=1e2").unwrap();
        assert_eq!(settings.left, Some(-2.5));
        assert_eq!(settings.right, Some(100.0));

        assert!(matches!(
            parse("left=abc").unwrap_err().root(),
            SyntaxError::InvalidNumber { .. }
        ));
        assert!(matches!(
            parse("left=NaN").unwrap_err().root(),
            SyntaxError::InvalidNumber { .. }
        ));
        assert_eq!(
            parse("top").unwrap_err().root(),
            &SyntaxError::MissingValue("top".to_string())
        );
    }

    #[test]
    fn test_size_fields() {
        assert_eq!(parse("width=640").unwrap().width, Some(640));
        assert!(matches!(
            parse("height=-1").unwrap_err().root(),
            SyntaxError::InvalidSize { .. }
        ));
        assert!(matches!(
            parse("height=10.5").unwrap_err().root(),
            SyntaxError::InvalidSize { .. }
        ));
    }

    #[test]
    fn test_boolean_fields() {
        assert_eq!(parse("grid").unwrap().grid, Some(true));
        assert_eq!(parse("grid=true").unwrap().grid, Some(true));
        assert_eq!(parse("grid=FALSE").unwrap().grid, Some(false));
        assert_eq!(parse("hideAxisNumbers").unwrap().hide_axis_numbers, Some(true));
        assert!(matches!(
            parse("grid=yes").unwrap_err().root(),
            SyntaxError::InvalidBoolean { .. }
        ));
    }

    #[test]
    fn test_degree_mode() {
        assert_eq!(
            parse("degreeMode=degrees").unwrap().degree_mode,
            Some(DegreeMode::Degrees)
        );
        let err = parse("degreeMode=turns").unwrap_err();
        assert!(err.to_string().contains("RADIANS, DEGREES"));
        assert_eq!(
            parse("degreeMode").unwrap_err().root(),
            &SyntaxError::MissingValue("degreeMode".to_string())
        );
    }

    #[test]
    fn test_default_color() {
        assert_eq!(
            parse("defaultColor=Orange").unwrap().default_color,
            Some(Color::Named(ColorConstant::Orange))
        );
        assert_eq!(
            parse("defaultColor=#12ab").unwrap().default_color,
            Some(Color::Hex("#12ab".to_string()))
        );
        let err = parse("defaultColor=mauve").unwrap_err();
        assert!(err.to_string().contains("Red"));
    }

    #[test]
    fn test_error_carries_line() {
        let err = parse("width=100\n\nheight=oops").unwrap_err();
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_schema_covers_every_setting() {
        let mut keys: Vec<&str> = FIELD_SCHEMA.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "bottom",
                "defaultColor",
                "degreeMode",
                "grid",
                "height",
                "hideAxisNumbers",
                "left",
                "right",
                "top",
                "width"
            ]
        );
    }
}
