//! Re-exports from the diagnostics crate.

pub use vidmode_diagnostics::{Diagnostic, Severity, Span, codes, explain, severity_for_code};
