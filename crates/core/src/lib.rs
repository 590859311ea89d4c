//! vidmode core library.
//!
//! Parses `video=` style display mode option strings such as
//! `1920x1080M@60e,rotate=90` into a [`ModeDescriptor`], renders descriptors
//! back into canonical text, and lints them against a connector's
//! capabilities. The main entry points are [`parse_str`] and
//! [`parse_for_connector`] for parsing, [`emit_mode_option`] for output, and
//! [`validate_descriptor`] for the capability lint.

#![warn(missing_docs)]

/// Mode option grammar: dispatcher, scanners, options, descriptor and emitter.
pub mod grammar;
/// Capability lint over parsed descriptors.
pub mod validate;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parser
pub use grammar::error::{ErrorCategory, ModeParseError};
pub use grammar::parser::{parse_for_connector, parse_str};

// Descriptor
pub use grammar::descriptor::{
    Force, ModeDescriptor, PanelOrientation, RotationReflection, TvMargins,
};

// Emitter
pub use grammar::emit::emit_mode_option;

// Options
pub use grammar::options::{OPTION_KEYS, is_option_key};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, Severity, Span, codes};

// Validator
pub use validate::{ValidationResult, validate_descriptor};

// Tables and profiles
pub use grammar::tables::{NAMED_MODES, NamedMode, TvNorm, named_mode};
pub use vidmode_profile::{ConnectorProfile, ConnectorType};

// Serialization helpers
pub use grammar::dump::to_pretty_json;
