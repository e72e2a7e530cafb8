//! Viewport bounds inference and settings validation
//!
//! When only one edge of an axis is given and it lies on the wrong side of
//! the default opposite edge, the opposite edge is moved so the axis keeps
//! the default span. This runs on the partial settings, before defaults are
//! merged in.

use super::fields::{GraphSettings, PartialSettings};
use crate::data::constants::MAX_SIZE;
use crate::utils::error::{ParseResult, SyntaxError};

/// Infer missing axis edges from the given ones
pub fn adjust_bounds(settings: &PartialSettings, defaults: &GraphSettings) -> PartialSettings {
    let mut adjusted = settings.clone();

    let (left, right) = infer_axis(settings.left, settings.right, defaults.left, defaults.right);
    adjusted.left = left;
    adjusted.right = right;

    let (bottom, top) = infer_axis(settings.bottom, settings.top, defaults.bottom, defaults.top);
    adjusted.bottom = bottom;
    adjusted.top = top;

    if adjusted != *settings {
        tracing::debug!(
            left = ?adjusted.left,
            right = ?adjusted.right,
            bottom = ?adjusted.bottom,
            top = ?adjusted.top,
            "inferred viewport bounds"
        );
    }

    adjusted
}

/// One axis: `(low, high)` with a missing edge filled in when needed
fn infer_axis(
    low: Option<f64>,
    high: Option<f64>,
    default_low: f64,
    default_high: f64,
) -> (Option<f64>, Option<f64>) {
    let span = default_high - default_low;
    match (low, high) {
        (Some(low), None) if low >= default_high => (Some(low), Some(low + span)),
        (None, Some(high)) if high <= default_low => (Some(high - span), Some(high)),
        other => other,
    }
}

/// Check the invariants of merged settings
pub fn validate_settings(settings: &GraphSettings) -> ParseResult<()> {
    if settings.left >= settings.right {
        return Err(SyntaxError::InvertedBounds {
            low_name: "left",
            low: settings.left,
            high_name: "right",
            high: settings.right,
        });
    }

    if settings.bottom >= settings.top {
        return Err(SyntaxError::InvertedBounds {
            low_name: "bottom",
            low: settings.bottom,
            high_name: "top",
            high: settings.top,
        });
    }

    for (field, value) in [("width", settings.width), ("height", settings.height)] {
        if value > MAX_SIZE {
            return Err(SyntaxError::SizeExceeded {
                field,
                value,
                max: MAX_SIZE,
            });
        }
    }

    Ok(())
}
