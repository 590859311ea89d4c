//! Emitter: renders a [`ModeDescriptor`] back into canonical mode option text.
//!
//! Output order is fixed: the clause (`WxH[M][R][-bpp][@refresh][i][m][force]`,
//! `NAME[-bpp][i][m][force]` or a lone force letter), then `rotate`,
//! `reflect_x`, `reflect_y`, non-zero margins, `tv_mode` and
//! `panel_orientation`. Re-parsing the output yields the same descriptor.
//!
//! A descriptor with nothing set emits `margin_left=0`, the shortest text
//! that parses back to it.

use crate::grammar::descriptor::{ModeDescriptor, RotationReflection};

// ── Public API ──────────────────────────────────────────────────────────

/// Emit canonical mode option text for `desc`.
pub fn emit_mode_option(desc: &ModeDescriptor) -> String {
    let mut parts: Vec<String> = Vec::new();

    let clause = emit_clause(desc);
    if !clause.is_empty() {
        parts.push(clause);
    }
    emit_options(desc, &mut parts);
    if parts.is_empty() {
        parts.push("margin_left=0".into());
    }

    parts.join(",")
}

// ── Clause ──────────────────────────────────────────────────────────────

fn emit_clause(desc: &ModeDescriptor) -> String {
    let mut out = String::new();

    if desc.specified {
        match &desc.name {
            Some(name) => out.push_str(name),
            None => {
                out.push_str(&format!("{}x{}", desc.xres, desc.yres));
                if desc.cvt {
                    out.push('M');
                }
                if desc.reduced_blanking {
                    out.push('R');
                }
            }
        }
        if desc.bpp_specified {
            out.push_str(&format!("-{}", desc.bpp));
        }
        if desc.refresh_specified && desc.name.is_none() {
            out.push_str(&format!("@{}", desc.refresh));
        }
        if desc.interlace {
            out.push('i');
        }
        if desc.margins {
            out.push('m');
        }
    }

    if let Some(flag) = desc.force.flag() {
        out.push(flag);
    }
    out
}

// ── Options ─────────────────────────────────────────────────────────────

fn emit_options(desc: &ModeDescriptor, parts: &mut Vec<String>) {
    let rr = desc.rotation_reflection;
    if rr.degrees() != 0 {
        parts.push(format!("rotate={}", rr.degrees()));
    }
    if rr.contains(RotationReflection::REFLECT_X) {
        parts.push("reflect_x".into());
    }
    if rr.contains(RotationReflection::REFLECT_Y) {
        parts.push("reflect_y".into());
    }

    let m = &desc.tv_margins;
    if !m.is_zero() {
        for (key, value) in [
            ("margin_left", m.left),
            ("margin_right", m.right),
            ("margin_top", m.top),
            ("margin_bottom", m.bottom),
        ] {
            if value != 0 {
                parts.push(format!("{key}={value}"));
            }
        }
    }

    if let Some(norm) = desc.tv_mode {
        parts.push(format!("tv_mode={norm}"));
    }
    if let Some(orientation) = desc.panel_orientation {
        parts.push(format!("panel_orientation={}", orientation.name()));
    }
}
