//! The comma-separated options that follow the mode clause.

use super::descriptor::{ModeDescriptor, PanelOrientation, RotationReflection};
use super::diag::Span;
use super::error::ModeParseError;
use super::lexer::{OptionToken, parse_decimal, split_options};
use super::tables::TvNorm;

/// Every recognised option key.
pub const OPTION_KEYS: &[&str] = &[
    "rotate",
    "reflect_x",
    "reflect_y",
    "margin_left",
    "margin_right",
    "margin_top",
    "margin_bottom",
    "tv_mode",
    "panel_orientation",
];

/// `true` if `key` is a recognised option key.
pub fn is_option_key(key: &str) -> bool {
    OPTION_KEYS.contains(&key)
}

/// Parse `text`, which starts at absolute offset `base`, into `desc`.
///
/// `has_mode` is false for freestanding options, where rotation and
/// reflection are rejected.
pub(crate) fn parse_options(
    text: &str,
    base: usize,
    has_mode: bool,
    desc: &mut ModeDescriptor,
) -> Result<(), ModeParseError> {
    let mut rotation_seen = false;

    for tok in split_options(text, base) {
        if tok.is_empty() {
            return Err(ModeParseError::EmptyOption {
                span: Span::empty(tok.start),
            });
        }
        log::trace!("option '{}' at {}", tok.key, tok.start);

        match tok.key {
            "rotate" => {
                require_mode("rotate", &tok, has_mode)?;
                if rotation_seen {
                    return Err(ModeParseError::DuplicateRotation { span: tok.span() });
                }
                rotation_seen = true;
                let value = required_value("rotate", &tok)?;
                let rotation = value
                    .parse::<u32>()
                    .ok()
                    .filter(|_| value.bytes().all(|b| b.is_ascii_digit()))
                    .and_then(RotationReflection::from_degrees)
                    .ok_or_else(|| ModeParseError::InvalidRotation {
                        value: value.to_string(),
                        span: tok.value_span(),
                    })?;
                desc.rotation_reflection = desc.rotation_reflection.with_rotation(rotation);
            }
            "reflect_x" => {
                reflect("reflect_x", &tok, has_mode)?;
                desc.rotation_reflection |= RotationReflection::REFLECT_X;
            }
            "reflect_y" => {
                reflect("reflect_y", &tok, has_mode)?;
                desc.rotation_reflection |= RotationReflection::REFLECT_Y;
            }
            "margin_left" => desc.tv_margins.left = margin("margin_left", &tok)?,
            "margin_right" => desc.tv_margins.right = margin("margin_right", &tok)?,
            "margin_top" => desc.tv_margins.top = margin("margin_top", &tok)?,
            "margin_bottom" => desc.tv_margins.bottom = margin("margin_bottom", &tok)?,
            "tv_mode" => {
                let value = required_value("tv_mode", &tok)?;
                let norm =
                    TvNorm::from_name(value).ok_or_else(|| ModeParseError::UnknownTvMode {
                        value: value.to_string(),
                        span: tok.value_span(),
                    })?;
                desc.tv_mode = Some(norm);
            }
            "panel_orientation" => {
                let value = required_value("panel_orientation", &tok)?;
                let orientation = PanelOrientation::from_name(value).ok_or_else(|| {
                    ModeParseError::UnknownPanelOrientation {
                        value: value.to_string(),
                        span: tok.value_span(),
                    }
                })?;
                desc.panel_orientation = Some(orientation);
            }
            other => {
                return Err(ModeParseError::UnknownOption {
                    key: other.to_string(),
                    span: tok.span(),
                });
            }
        }
    }
    Ok(())
}

fn require_mode(
    key: &'static str,
    tok: &OptionToken<'_>,
    has_mode: bool,
) -> Result<(), ModeParseError> {
    if has_mode {
        Ok(())
    } else {
        Err(ModeParseError::RotationWithoutMode {
            key,
            span: tok.span(),
        })
    }
}

fn reflect(key: &'static str, tok: &OptionToken<'_>, has_mode: bool) -> Result<(), ModeParseError> {
    require_mode(key, tok, has_mode)?;
    if tok.value.is_some() {
        return Err(ModeParseError::UnexpectedValue {
            key,
            span: tok.value_span(),
        });
    }
    Ok(())
}

fn required_value<'a>(key: &'static str, tok: &OptionToken<'a>) -> Result<&'a str, ModeParseError> {
    match tok.value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ModeParseError::MissingValue {
            key,
            span: tok.span(),
        }),
    }
}

fn margin(key: &'static str, tok: &OptionToken<'_>) -> Result<u32, ModeParseError> {
    let value = required_value(key, tok)?;
    parse_decimal(value, tok.value_span().start, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(text: &str, has_mode: bool) -> Result<ModeDescriptor, ModeParseError> {
        let mut desc = ModeDescriptor::default();
        parse_options(text, 0, has_mode, &mut desc)?;
        Ok(desc)
    }

    #[test]
    fn option_keys_are_recognised() {
        assert!(is_option_key("reflect_x"));
        assert!(is_option_key("margin_bottom"));
        assert!(!is_option_key("reflect"));
        assert!(!is_option_key("NTSC"));
    }

    #[test]
    fn rotation_replaces_default() {
        let d = opts("rotate=270,reflect_x", true).unwrap();
        assert_eq!(
            d.rotation_reflection,
            RotationReflection::ROTATE_270 | RotationReflection::REFLECT_X
        );
    }

    #[test]
    fn rotate_value_must_be_plain_digits() {
        for bad in ["42", "+90", "90deg", "-0"] {
            let err = opts(&format!("rotate={bad}"), true).unwrap_err();
            assert!(
                matches!(err, ModeParseError::InvalidRotation { .. }),
                "rotate={bad}: {err:?}"
            );
        }
    }

    #[test]
    fn later_values_override_earlier_ones() {
        let d = opts("margin_left=1,margin_left=2,tv_mode=PAL-B,tv_mode=PAL-I", true).unwrap();
        assert_eq!(d.tv_margins.left, 2);
        assert_eq!(d.tv_mode, Some(TvNorm::PalI));
    }

    #[test]
    fn margin_errors() {
        assert!(matches!(
            opts("margin_top", true),
            Err(ModeParseError::MissingValue { key: "margin_top", .. })
        ));
        assert!(matches!(
            opts("margin_top=x", true),
            Err(ModeParseError::ExpectedNumber { field: "margin_top", .. })
        ));
    }

    #[test]
    fn error_spans_point_at_values() {
        let err = opts("reflect_y=1", true).unwrap_err();
        assert_eq!(err.span(), Span::new(10, 11));
        let err = opts("panel_orientation=sideways", false).unwrap_err();
        assert_eq!(err.span(), Span::new(18, 26));
    }
}
