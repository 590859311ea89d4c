//! Build script for generating diagnostic code tables at compile time.
//!
//! Reads `spec/diagnostics.jsonc` and writes three files into `OUT_DIR`:
//! - `generated_codes.rs`: one `pub const` per diagnostic plus an `ALL` slice
//! - `generated_explain.rs`: a match mapping IDs to long descriptions
//! - `generated_severity.rs`: a match mapping IDs to default severities

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;
use vidmode_jsonc_strip::strip_jsonc;

struct Entry {
    id: String,
    const_name: String,
    summary: String,
    description: String,
    severity: &'static str,
}

fn main() {
    let spec_path = Path::new("spec/diagnostics.jsonc");
    println!("cargo:rerun-if-changed={}", spec_path.display());

    let raw = fs::read_to_string(spec_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", spec_path.display()));

    let catalogue: serde_json::Value = serde_json::from_str(&strip_jsonc(&raw))
        .expect("failed to parse diagnostics.jsonc as JSON");

    let diagnostics = catalogue["diagnostics"]
        .as_array()
        .expect("diagnostics.jsonc: expected `diagnostics` array");

    let entries = collect_entries(diagnostics);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let out_path = Path::new(&out_dir);

    // ── generated_codes.rs ──────────────────────────────────────────────
    let mut codes =
        String::from("// Auto-generated from spec/diagnostics.jsonc. DO NOT EDIT.\n\n");
    for e in &entries {
        codes.push_str(&format!("/// {}\n", e.summary));
        codes.push_str(&format!(
            "pub const {}: &str = \"{}\";\n\n",
            e.const_name, e.id
        ));
    }
    codes.push_str("/// Every diagnostic ID, in catalogue order.\n");
    codes.push_str("pub const ALL: &[&str] = &[\n");
    for e in &entries {
        codes.push_str(&format!("    {},\n", e.const_name));
    }
    codes.push_str("];\n");
    fs::write(out_path.join("generated_codes.rs"), &codes)
        .expect("failed to write generated_codes.rs");

    // ── generated_explain.rs ────────────────────────────────────────────
    let mut explain = String::from("match id {\n");
    for e in &entries {
        explain.push_str(&format!(
            "    \"{}\" => Some(\"{}\"),\n",
            e.id,
            escape_rust_string_literal(&e.description)
        ));
    }
    explain.push_str("    _ => None,\n}\n");
    fs::write(out_path.join("generated_explain.rs"), &explain)
        .expect("failed to write generated_explain.rs");

    // ── generated_severity.rs ───────────────────────────────────────────
    let mut severity = String::from("match id {\n");
    for e in &entries {
        severity.push_str(&format!("    \"{}\" => Some({}),\n", e.id, e.severity));
    }
    severity.push_str("    _ => None,\n}\n");
    fs::write(out_path.join("generated_severity.rs"), &severity)
        .expect("failed to write generated_severity.rs");
}

fn collect_entries(diagnostics: &[serde_json::Value]) -> Vec<Entry> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut entries = Vec::with_capacity(diagnostics.len());

    for (i, entry) in diagnostics.iter().enumerate() {
        let field = |key: &str| -> String {
            entry[key]
                .as_str()
                .unwrap_or_else(|| panic!("diagnostics[{i}] missing `{key}`"))
                .to_string()
        };
        let id = field("id");
        let const_name = field("constName");

        assert!(
            id.starts_with("VM") && id.len() == 6 && id[2..].bytes().all(|b| b.is_ascii_digit()),
            "diagnostics[{i}]: id '{id}' must look like VM0000"
        );
        assert!(
            !const_name.is_empty()
                && const_name
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
                && const_name.as_bytes()[0].is_ascii_uppercase(),
            "diagnostics[{i}] (id={id}): constName '{const_name}' is not SCREAMING_SNAKE_CASE"
        );
        assert!(
            seen_ids.insert(id.clone()),
            "diagnostics[{i}]: duplicate id '{id}'"
        );
        assert!(
            seen_names.insert(const_name.clone()),
            "diagnostics[{i}] (id={id}): duplicate constName '{const_name}'"
        );

        let severity = match field("severity").as_str() {
            "error" => "Severity::Error",
            "warn" => "Severity::Warn",
            "info" => "Severity::Info",
            other => panic!("diagnostics[{i}] (id={id}): invalid severity '{other}'"),
        };

        entries.push(Entry {
            summary: field("summary"),
            description: field("description"),
            id,
            const_name,
            severity,
        });
    }
    entries
}

fn escape_rust_string_literal(value: &str) -> String {
    value.chars().flat_map(char::escape_default).collect()
}
