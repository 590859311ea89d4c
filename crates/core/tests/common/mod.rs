//! Shared test helpers for `vidmode_core` integration tests.

#![allow(unreachable_pub)]

use vidmode_core::{
    ConnectorProfile, ConnectorType, ModeDescriptor, ModeParseError, parse_for_connector,
    parse_str,
};

// ─── Connector profiles ─────────────────────────────────────────────────────

/// Profile for a connector of the given type with unknown capabilities.
#[allow(dead_code)]
pub fn connector(ty: ConnectorType) -> ConnectorProfile {
    ConnectorProfile::for_connector(ty)
}

/// Every connector type as a profile.
#[allow(dead_code)]
pub fn all_connectors() -> Vec<ConnectorProfile> {
    ConnectorType::ALL.into_iter().map(connector).collect()
}

// ─── Parse helpers ──────────────────────────────────────────────────────────

/// Parse with no connector, panicking with the input on failure.
#[allow(dead_code)]
pub fn parse_ok(input: &str) -> ModeDescriptor {
    parse_str(input).unwrap_or_else(|e| panic!("{input:?} should parse: {e} ({})", e.code()))
}

/// Parse for a connector type, panicking with the input on failure.
#[allow(dead_code)]
pub fn parse_ok_on(input: &str, ty: ConnectorType) -> ModeDescriptor {
    parse_for_connector(input, &connector(ty))
        .unwrap_or_else(|e| panic!("{input:?} should parse on {ty}: {e} ({})", e.code()))
}

/// Parse with no connector, panicking if the input is accepted.
#[allow(dead_code)]
pub fn parse_err(input: &str) -> ModeParseError {
    match parse_str(input) {
        Ok(d) => panic!("{input:?} should be rejected, got {d:?}"),
        Err(e) => e,
    }
}

/// Assert that `input` is rejected with diagnostic code `code`.
#[allow(dead_code)]
pub fn assert_rejected(input: &str, code: &str) {
    let err = parse_err(input);
    assert_eq!(
        err.code(),
        code,
        "{input:?} rejected with {} ({err}), expected {code}",
        err.code()
    );
}

/// Assert the descriptor has no clause-level fields set.
#[allow(dead_code)]
pub fn assert_no_clause_fields(d: &ModeDescriptor) {
    assert!(!d.specified, "specified");
    assert!(!d.refresh_specified, "refresh_specified");
    assert!(!d.bpp_specified, "bpp_specified");
    assert!(!d.reduced_blanking, "reduced_blanking");
    assert!(!d.cvt, "cvt");
    assert!(!d.interlace, "interlace");
    assert!(!d.margins, "margins");
}
