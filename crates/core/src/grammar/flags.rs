//! Trailing mode flags: `i`, `m`, `e`, `d`, `D`.
//!
//! The flag run is scanned by a small state machine. Interlace and margins
//! are idempotent; the force state may only move from `Unset` to `Set` once.

use super::descriptor::{Force, ModeDescriptor};
use super::error::ModeParseError;
use super::lexer::Cursor;
use vidmode_profile::ConnectorProfile;

/// Force state of the flag run being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ForceState {
    Unset,
    Set {
        /// Letter that set the state.
        flag: char,
        force: Force,
    },
}

impl ForceState {
    fn apply(self, flag: char, force: Force, cursor: &Cursor<'_>) -> Result<Self, ModeParseError> {
        match self {
            ForceState::Unset => Ok(ForceState::Set { flag, force }),
            ForceState::Set { flag: previous, .. } => Err(ModeParseError::ForceConflict {
                flag,
                previous,
                span: cursor.next_char_span(),
            }),
        }
    }
}

/// Force requested by `flag` on the given connector.
pub(crate) fn force_for_flag(flag: char, profile: &ConnectorProfile) -> Option<Force> {
    match flag {
        'e' => Some(Force::On),
        'd' => Some(Force::Off),
        'D' if profile.connector_type.is_digital() => Some(Force::OnDigital),
        'D' => Some(Force::On),
        _ => None,
    }
}

/// Consume the rest of `cursor` as a flag run, recording flags in `desc`.
pub(crate) fn scan_flags(
    cursor: &mut Cursor<'_>,
    profile: &ConnectorProfile,
    desc: &mut ModeDescriptor,
) -> Result<(), ModeParseError> {
    let mut state = ForceState::Unset;

    while let Some(c) = cursor.peek() {
        match c {
            'i' => desc.interlace = true,
            'm' => desc.margins = true,
            'e' | 'd' | 'D' => {
                let force = force_for_flag(c, profile).unwrap_or_default();
                state = state.apply(c, force, cursor)?;
                log::trace!("force flag '{c}' at {} -> {force:?}", cursor.offset());
            }
            '-' | '@' => {
                return Err(ModeParseError::MisplacedSuffix {
                    suffix: c,
                    span: cursor.next_char_span(),
                });
            }
            _ => {
                return Err(ModeParseError::UnknownFlag {
                    flag: c,
                    span: cursor.next_char_span(),
                });
            }
        }
        cursor.bump();
    }

    if let ForceState::Set { force, .. } = state {
        desc.force = force;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::diag::Span;
    use vidmode_profile::ConnectorType;

    fn scan(text: &str, profile: &ConnectorProfile) -> Result<ModeDescriptor, ModeParseError> {
        let mut desc = ModeDescriptor::default();
        scan_flags(&mut Cursor::new(text, 0), profile, &mut desc)?;
        Ok(desc)
    }

    #[test]
    fn flags_set_fields() {
        let d = scan("ime", &ConnectorProfile::default()).unwrap();
        assert!(d.interlace);
        assert!(d.margins);
        assert_eq!(d.force, Force::On);
    }

    #[test]
    fn repeated_non_force_flags_are_idempotent() {
        let d = scan("iimm", &ConnectorProfile::default()).unwrap();
        assert!(d.interlace && d.margins);
        assert_eq!(d.force, Force::Unspecified);
    }

    #[test]
    fn digital_d_depends_on_connector() {
        let analog = ConnectorProfile::for_connector(ConnectorType::Vga);
        let hdmi = ConnectorProfile::for_connector(ConnectorType::HdmiA);
        assert_eq!(scan("D", &analog).unwrap().force, Force::On);
        assert_eq!(scan("D", &hdmi).unwrap().force, Force::OnDigital);
    }

    #[test]
    fn second_force_flag_conflicts() {
        let err = scan("de", &ConnectorProfile::default()).unwrap_err();
        assert_eq!(
            err,
            ModeParseError::ForceConflict {
                flag: 'e',
                previous: 'd',
                span: Span::new(1, 2)
            }
        );
        assert!(matches!(
            scan("ee", &ConnectorProfile::default()),
            Err(ModeParseError::ForceConflict { .. })
        ));
    }

    #[test]
    fn suffix_after_flag_is_misplaced() {
        let err = scan("e-24", &ConnectorProfile::default()).unwrap_err();
        assert!(matches!(err, ModeParseError::MisplacedSuffix { suffix: '-', .. }));
    }

    #[test]
    fn unknown_flag_rejected() {
        let err = scan("f", &ConnectorProfile::default()).unwrap_err();
        assert_eq!(
            err,
            ModeParseError::UnknownFlag {
                flag: 'f',
                span: Span::new(0, 1)
            }
        );
    }
}
