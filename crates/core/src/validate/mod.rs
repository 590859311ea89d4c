//! Capability lint: checks a parsed descriptor against a connector profile.
//!
//! The parser accepts anything grammatical. This pass reports settings that
//! parse fine but will not take effect as written on the given connector.
//! Findings are warnings or notes, never errors.

pub use crate::grammar::diag::Diagnostic;
use crate::grammar::descriptor::ModeDescriptor;
use crate::grammar::diag::{Severity, codes};
use serde::Serialize;
use std::collections::BTreeMap;
use vidmode_profile::ConnectorProfile;

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Result of linting a descriptor against a connector profile.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// `true` if no errors were found (warnings and info are allowed).
    pub ok: bool,
    /// All diagnostics produced by the lint.
    pub issues: Vec<Diagnostic>,
}

/// Lint `desc` against the capabilities in `profile`.
pub fn validate_descriptor(desc: &ModeDescriptor, profile: &ConnectorProfile) -> ValidationResult {
    let mut issues = Vec::new();
    let connector = profile.connector_type;

    if profile.interlace_allowed == Some(false) && desc.is_interlaced() {
        let what = match desc.named_mode() {
            Some(mode) if !desc.interlace => format!("named mode {} is interlaced", mode.name),
            _ => "interlaced scan requested".to_string(),
        };
        issues.push(
            Diagnostic::with_default_severity(
                codes::INTERLACE_NOT_ALLOWED,
                format!("{what} but connector '{}' does not allow interlace", profile.id),
                None,
            )
            .with_context(ctx!("connector" => connector.name(), "profile" => profile.id.clone())),
        );
    }

    if let Some(norm) = desc.tv_mode
        && !connector.is_tv()
    {
        issues.push(
            Diagnostic::with_default_severity(
                codes::TV_MODE_ON_NON_TV_CONNECTOR,
                format!("tv_mode={norm} has no effect on a {connector} connector"),
                None,
            )
            .with_context(ctx!("connector" => connector.name(), "tv_mode" => norm.name())),
        );
    }

    if desc.reduced_blanking && !desc.cvt {
        issues.push(Diagnostic::with_default_severity(
            codes::REDUCED_BLANKING_WITHOUT_CVT,
            "reduced blanking (R) requested without CVT (M); it only applies to CVT timings",
            None,
        ));
    }

    log::debug!(
        "capability lint on {connector}: {} issue(s)",
        issues.len()
    );
    let ok = !issues.iter().any(|d| d.severity == Severity::Error);
    ValidationResult { ok, issues }
}
