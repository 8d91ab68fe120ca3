use thiserror::Error;

use crate::paint::ColorParseError;

/// Errors raised at the console's boundary.
///
/// Nothing here is retried: validation failures must be fixed at the call site,
/// and text that cannot be decoded is rejected before the buffer is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// A configuration value is outside its allowed set.
    #[error("invalid {field} {value:?}; expected one of: {allowed}")]
    Validation {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// A numeric configuration value is outside its range.
    #[error("invalid {field} {value}: expected {expected}")]
    OutOfRange {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Input handed to the console was not text.
    #[error("console input is not valid UTF-8 text (invalid byte at offset {offset})")]
    NotText { offset: usize },
}

impl ConsoleError {
    pub(crate) fn validation(field: &'static str, value: impl Into<String>, allowed: &[&str]) -> Self {
        Self::Validation {
            field,
            value: value.into(),
            allowed: allowed.join(", "),
        }
    }

    pub(crate) fn out_of_range(field: &'static str, value: impl ToString, expected: &'static str) -> Self {
        Self::OutOfRange {
            field,
            value: value.to_string(),
            expected,
        }
    }
}

impl From<ColorParseError> for ConsoleError {
    fn from(err: ColorParseError) -> Self {
        Self::Validation {
            field: "color",
            value: err.spec,
            allowed: "#rgb, #rgba, #rrggbb, #rrggbbaa or a color name".to_string(),
        }
    }
}
