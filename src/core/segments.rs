//! Source segmentation
//!
//! A graph block is an optional settings segment and an equations segment,
//! separated by a single `---`. Each segment is then cut into trimmed,
//! non-blank lines that remember where they came from.

use lazy_static::lazy_static;
use regex::Regex;

use crate::data::constants::SEGMENT_DELIMITER;
use crate::utils::error::{ParseResult, SyntaxError};

lazy_static! {
    /// Universal line break: `\r\n`, `\r` or `\n`
    static ref LINE_BREAK_RE: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
}

/// A trimmed, non-blank line of the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number in the whole source
    pub number: usize,
    pub text: &'a str,
}

/// The two halves of a graph block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Text before the delimiter, if there was one
    pub settings: Option<&'a str>,
    /// Text after the delimiter, or the whole source
    pub equations: &'a str,
    /// Line number of the first physical line of `equations`
    equations_start: usize,
}

impl<'a> Segments<'a> {
    /// Non-blank lines of the settings segment
    pub fn settings_lines(&self) -> Vec<SourceLine<'a>> {
        self.settings
            .map(|segment| non_blank_lines(segment, 1))
            .unwrap_or_default()
    }

    /// Non-blank lines of the equations segment
    pub fn equation_lines(&self) -> Vec<SourceLine<'a>> {
        non_blank_lines(self.equations, self.equations_start)
    }
}

/// Split the source on the segment delimiter
pub fn split_segments(source: &str) -> ParseResult<Segments<'_>> {
    let parts: Vec<&str> = source.split(SEGMENT_DELIMITER).collect();

    match *parts.as_slice() {
        [equations] => Ok(Segments {
            settings: None,
            equations,
            equations_start: 1,
        }),
        [settings, equations] => {
            // The delimiter line itself is the first line of the equations segment
            let equations_start = LINE_BREAK_RE.find_iter(settings).count() + 1;
            tracing::debug!(equations_start, "split settings and equations segments");
            Ok(Segments {
                settings: Some(settings),
                equations,
                equations_start,
            })
        }
        _ => Err(SyntaxError::TooManySegments {
            delimiter: SEGMENT_DELIMITER,
            found: parts.len(),
        }),
    }
}

/// Trimmed non-blank lines of `segment`, numbered from `first_line`
pub fn non_blank_lines(segment: &str, first_line: usize) -> Vec<SourceLine<'_>> {
    LINE_BREAK_RE
        .split(segment)
        .enumerate()
        .filter_map(|(idx, line)| {
            let text = line.trim();
            (!text.is_empty()).then_some(SourceLine {
                number: first_line + idx,
                text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(lines: &[SourceLine<'a>]) -> Vec<&'a str> {
        lines.iter().map(|l| l.text).collect()
    }

    #[test]
    fn test_no_delimiter() {
        let segments = split_segments("y=x\ny=2x").unwrap();
        assert_eq!(segments.settings, None);
        assert_eq!(texts(&segments.equation_lines()), vec!["y=x", "y=2x"]);
    }

    #[test]
    fn test_one_delimiter() {
        let segments = split_segments("grid=false\n---\ny=x").unwrap();
        assert_eq!(segments.settings, Some("grid=false\n"));
        assert_eq!(texts(&segments.settings_lines()), vec!["grid=false"]);
        assert_eq!(texts(&segments.equation_lines()), vec!["y=x"]);
    }

    #[test]
    fn test_too_many_delimiters() {
        let err = split_segments("a\n---\nb\n---\nc").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::TooManySegments {
                delimiter: "---",
                found: 3
            }
        );
    }

    #[test]
    fn test_blank_lines_dropped_and_trimmed() {
        let lines = non_blank_lines("  y=x  \n\n   \n\ty=2x\n", 1);
        assert_eq!(texts(&lines), vec!["y=x", "y=2x"]);
    }

    #[test]
    fn test_universal_newlines() {
        let lines = non_blank_lines("a\r\nb\rc\nd", 1);
        assert_eq!(texts(&lines), vec!["a", "b", "c", "d"]);
        assert_eq!(lines[3].number, 4);
    }

    #[test]
    fn test_equation_line_numbers_follow_settings() {
        let segments = split_segments("width=300\nheight=200\n---\n\ny=x").unwrap();
        let lines = segments.equation_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].number, 5);
    }

    #[test]
    fn test_line_numbers_without_settings() {
        let segments = split_segments("\ny=x\n\ny=2x").unwrap();
        let numbers: Vec<usize> = segments.equation_lines().iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![2, 4]);
    }
}
