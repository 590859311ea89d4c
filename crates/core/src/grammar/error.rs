//! Parse errors.
//!
//! Every failure aborts the whole parse with one [`ModeParseError`]. Each
//! variant carries the byte span of the offending text and maps to a stable
//! diagnostic code.

use super::diag::{Diagnostic, Span, codes};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Coarse grouping of parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed structure: missing digits, separators, misplaced suffixes.
    Syntax,
    /// A flag, name, option key or option value that is not recognised.
    UnknownToken,
    /// Two parts of the input contradict each other.
    Conflict,
    /// An option value is missing or given where none is allowed.
    MissingValue,
}

/// Why a mode option string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeParseError {
    /// The input is empty.
    #[error("empty mode option")]
    Empty,

    /// A decimal digit run was expected.
    #[error("expected an integer {field}")]
    ExpectedNumber {
        /// Which value was being read (`width`, `bpp`, `margin_left`, ...).
        field: &'static str,
        /// Where the digits were expected.
        span: Span,
    },

    /// A digit run does not fit in 32 bits.
    #[error("{field} value is out of range")]
    NumberOutOfRange {
        /// Which value was being read.
        field: &'static str,
        /// The digit run.
        span: Span,
    },

    /// The `x` between width and height is missing.
    #[error("expected 'x' between width and height")]
    MissingSeparator {
        /// Where the separator was expected.
        span: Span,
    },

    /// `-bpp` or `@refresh` after a trailing flag.
    #[error("'{suffix}' suffix must come before the mode flags")]
    MisplacedSuffix {
        /// `-` or `@`.
        suffix: char,
        /// The suffix character.
        span: Span,
    },

    /// A trailing character that is not a known flag.
    #[error("unknown mode flag '{flag}'")]
    UnknownFlag {
        /// The offending character.
        flag: char,
        /// The character.
        span: Span,
    },

    /// A second force flag in the same flag run.
    #[error("force flag '{flag}' conflicts with earlier '{previous}'")]
    ForceConflict {
        /// The second force flag.
        flag: char,
        /// The force flag seen first.
        previous: char,
        /// The second flag.
        span: Span,
    },

    /// The clause names a mode that is not in the registry.
    #[error("unknown named mode '{name}'")]
    UnknownNamedMode {
        /// The name as written.
        name: String,
        /// The name.
        span: Span,
    },

    /// A named mode followed by `@refresh`.
    #[error("named mode '{name}' does not accept a refresh rate")]
    RefreshOnNamedMode {
        /// The named mode.
        name: String,
        /// From the `@` to the end of the clause.
        span: Span,
    },

    /// An empty entry in the comma-separated options.
    #[error("empty option")]
    EmptyOption {
        /// Zero-width span where the option should be.
        span: Span,
    },

    /// An option key that is not recognised.
    #[error("unknown option '{key}'")]
    UnknownOption {
        /// The key as written.
        key: String,
        /// The whole option.
        span: Span,
    },

    /// An option that needs a value was given without one.
    #[error("option '{key}' requires a value")]
    MissingValue {
        /// The option key.
        key: &'static str,
        /// The option.
        span: Span,
    },

    /// A bare option was given a value.
    #[error("option '{key}' does not take a value")]
    UnexpectedValue {
        /// The option key.
        key: &'static str,
        /// The value.
        span: Span,
    },

    /// `rotate=` with a value other than 0, 90, 180 or 270.
    #[error("invalid rotation '{value}', expected 0, 90, 180 or 270")]
    InvalidRotation {
        /// The value as written.
        value: String,
        /// The value.
        span: Span,
    },

    /// A second `rotate=` option.
    #[error("rotation given more than once")]
    DuplicateRotation {
        /// The second option.
        span: Span,
    },

    /// Rotation or reflection in options with no mode clause.
    #[error("option '{key}' requires a resolution or named mode")]
    RotationWithoutMode {
        /// `rotate`, `reflect_x` or `reflect_y`.
        key: &'static str,
        /// The option.
        span: Span,
    },

    /// `tv_mode=` with a value that is not a TV norm.
    #[error("unknown TV mode '{value}'")]
    UnknownTvMode {
        /// The value as written.
        value: String,
        /// The value.
        span: Span,
    },

    /// `panel_orientation=` with an unknown value.
    #[error("unknown panel orientation '{value}'")]
    UnknownPanelOrientation {
        /// The value as written.
        value: String,
        /// The value.
        span: Span,
    },
}

impl ModeParseError {
    /// Byte span of the offending input.
    pub fn span(&self) -> Span {
        match self {
            ModeParseError::Empty => Span::empty(0),
            ModeParseError::ExpectedNumber { span, .. }
            | ModeParseError::NumberOutOfRange { span, .. }
            | ModeParseError::MissingSeparator { span }
            | ModeParseError::MisplacedSuffix { span, .. }
            | ModeParseError::UnknownFlag { span, .. }
            | ModeParseError::ForceConflict { span, .. }
            | ModeParseError::UnknownNamedMode { span, .. }
            | ModeParseError::RefreshOnNamedMode { span, .. }
            | ModeParseError::EmptyOption { span }
            | ModeParseError::UnknownOption { span, .. }
            | ModeParseError::MissingValue { span, .. }
            | ModeParseError::UnexpectedValue { span, .. }
            | ModeParseError::InvalidRotation { span, .. }
            | ModeParseError::DuplicateRotation { span }
            | ModeParseError::RotationWithoutMode { span, .. }
            | ModeParseError::UnknownTvMode { span, .. }
            | ModeParseError::UnknownPanelOrientation { span, .. } => *span,
        }
    }

    /// Stable diagnostic code, e.g. `"VM2004"`.
    pub fn code(&self) -> &'static str {
        match self {
            ModeParseError::Empty => codes::EMPTY_INPUT,
            ModeParseError::ExpectedNumber { .. } => codes::EXPECTED_INTEGER,
            ModeParseError::NumberOutOfRange { .. } => codes::NUMBER_OUT_OF_RANGE,
            ModeParseError::MissingSeparator { .. } => codes::MISSING_SEPARATOR,
            ModeParseError::MisplacedSuffix { .. } => codes::MISPLACED_SUFFIX,
            ModeParseError::EmptyOption { .. } => codes::EMPTY_OPTION,
            ModeParseError::UnknownFlag { .. } => codes::UNKNOWN_FLAG,
            ModeParseError::UnknownNamedMode { .. } => codes::UNKNOWN_NAMED_MODE,
            ModeParseError::UnknownOption { .. } => codes::UNKNOWN_OPTION,
            ModeParseError::InvalidRotation { .. } => codes::INVALID_ROTATION,
            ModeParseError::UnknownTvMode { .. } => codes::UNKNOWN_TV_MODE,
            ModeParseError::UnknownPanelOrientation { .. } => codes::UNKNOWN_PANEL_ORIENTATION,
            ModeParseError::DuplicateRotation { .. } => codes::DUPLICATE_ROTATION,
            ModeParseError::ForceConflict { .. } => codes::FORCE_CONFLICT,
            ModeParseError::RefreshOnNamedMode { .. } => codes::REFRESH_ON_NAMED_MODE,
            ModeParseError::RotationWithoutMode { .. } => codes::ROTATION_WITHOUT_MODE,
            ModeParseError::MissingValue { .. } => codes::MISSING_VALUE,
            ModeParseError::UnexpectedValue { .. } => codes::UNEXPECTED_VALUE,
        }
    }

    /// Coarse category of the error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ModeParseError::Empty
            | ModeParseError::ExpectedNumber { .. }
            | ModeParseError::NumberOutOfRange { .. }
            | ModeParseError::MissingSeparator { .. }
            | ModeParseError::MisplacedSuffix { .. }
            | ModeParseError::EmptyOption { .. } => ErrorCategory::Syntax,
            ModeParseError::UnknownFlag { .. }
            | ModeParseError::UnknownNamedMode { .. }
            | ModeParseError::UnknownOption { .. }
            | ModeParseError::InvalidRotation { .. }
            | ModeParseError::UnknownTvMode { .. }
            | ModeParseError::UnknownPanelOrientation { .. } => ErrorCategory::UnknownToken,
            ModeParseError::DuplicateRotation { .. }
            | ModeParseError::ForceConflict { .. }
            | ModeParseError::RefreshOnNamedMode { .. }
            | ModeParseError::RotationWithoutMode { .. } => ErrorCategory::Conflict,
            ModeParseError::MissingValue { .. } | ModeParseError::UnexpectedValue { .. } => {
                ErrorCategory::MissingValue
            }
        }
    }

    /// Convert into an error [`Diagnostic`] with machine-readable context.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut ctx: BTreeMap<String, String> = BTreeMap::new();
        let mut put = |k: &str, v: String| {
            ctx.insert(k.to_string(), v);
        };
        match self {
            ModeParseError::Empty
            | ModeParseError::MissingSeparator { .. }
            | ModeParseError::EmptyOption { .. }
            | ModeParseError::DuplicateRotation { .. } => {}
            ModeParseError::ExpectedNumber { field, .. }
            | ModeParseError::NumberOutOfRange { field, .. } => put("field", (*field).into()),
            ModeParseError::MisplacedSuffix { suffix, .. } => put("suffix", suffix.to_string()),
            ModeParseError::UnknownFlag { flag, .. } => put("flag", flag.to_string()),
            ModeParseError::ForceConflict { flag, previous, .. } => {
                put("flag", flag.to_string());
                put("previous", previous.to_string());
            }
            ModeParseError::UnknownNamedMode { name, .. }
            | ModeParseError::RefreshOnNamedMode { name, .. } => put("name", name.clone()),
            ModeParseError::UnknownOption { key, .. } => put("option", key.clone()),
            ModeParseError::MissingValue { key, .. }
            | ModeParseError::UnexpectedValue { key, .. }
            | ModeParseError::RotationWithoutMode { key, .. } => put("option", (*key).into()),
            ModeParseError::InvalidRotation { value, .. } => {
                put("option", "rotate".into());
                put("value", value.clone());
            }
            ModeParseError::UnknownTvMode { value, .. } => {
                put("option", "tv_mode".into());
                put("value", value.clone());
            }
            ModeParseError::UnknownPanelOrientation { value, .. } => {
                put("option", "panel_orientation".into());
                put("value", value.clone());
            }
        }
        let diag = Diagnostic::error(self.code(), self.to_string(), Some(self.span()));
        if ctx.is_empty() {
            diag
        } else {
            diag.with_context(ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::diag::Severity;

    #[test]
    fn empty_has_zero_width_span() {
        assert_eq!(ModeParseError::Empty.span(), Span::empty(0));
        assert_eq!(ModeParseError::Empty.code(), "VM1001");
        assert_eq!(ModeParseError::Empty.category(), ErrorCategory::Syntax);
    }

    #[test]
    fn diagnostic_carries_code_span_and_context() {
        let err = ModeParseError::InvalidRotation {
            value: "42".into(),
            span: Span::new(15, 17),
        };
        let d = err.to_diagnostic();
        assert_eq!(d.id, codes::INVALID_ROTATION);
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.span, Some(Span::new(15, 17)));
        let ctx = d.context.unwrap();
        assert_eq!(ctx.get("option").map(String::as_str), Some("rotate"));
        assert_eq!(ctx.get("value").map(String::as_str), Some("42"));
    }

    #[test]
    fn context_omitted_when_empty() {
        let d = ModeParseError::DuplicateRotation {
            span: Span::new(16, 25),
        }
        .to_diagnostic();
        assert!(d.context.is_none());
        assert_eq!(d.message, "rotation given more than once");
    }

    #[test]
    fn categories_match_code_ranges() {
        let cases = [
            (
                ModeParseError::ForceConflict {
                    flag: 'e',
                    previous: 'd',
                    span: Span::new(0, 1),
                },
                ErrorCategory::Conflict,
                "VM3",
            ),
            (
                ModeParseError::UnexpectedValue {
                    key: "reflect_x",
                    span: Span::new(0, 1),
                },
                ErrorCategory::MissingValue,
                "VM4",
            ),
            (
                ModeParseError::UnknownFlag {
                    flag: 'f',
                    span: Span::new(0, 1),
                },
                ErrorCategory::UnknownToken,
                "VM2",
            ),
        ];
        for (err, category, prefix) in cases {
            assert_eq!(err.category(), category, "{err}");
            assert!(err.code().starts_with(prefix), "{err}: {}", err.code());
        }
    }
}
