//! Grammar constants shared by the parser modules

/// Delimiter separating the settings segment from the equations segment
pub const SEGMENT_DELIMITER: &str = "---";

/// Delimiter separating an equation from its trailing tags
pub const EQUATION_DELIMITER: char = '|';

/// Largest accepted value for `width` and `height`
pub const MAX_SIZE: u32 = 99_999;

/// Tag marking an equation as hidden
pub const HIDDEN_TAG: &str = "HIDDEN";

/// Tag requesting a label; with a `:` suffix it carries the label text
pub const LABEL_TAG: &str = "LABEL";
