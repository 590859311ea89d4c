//! `vidmode` command-line tool.

mod render;

use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use vidmode_core::{
    ConnectorProfile, ConnectorType, Diagnostic, ModeDescriptor, NAMED_MODES, TvNorm,
    emit_mode_option, parse_for_connector, to_pretty_json, validate_descriptor,
};
use vidmode_diagnostics as diag;
use vidmode_profile::load_profile_from_str;

use crate::render::{Format, has_errors, print_summary, render_diagnostics_pretty};

/// Name shown for the mode string in annotated diagnostics.
const MODE_SOURCE_NAME: &str = "<mode>";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "vidmode",
    version,
    about = "Parse, check, and format DRM video= mode option strings"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log parser decisions to stderr (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a mode string and print its descriptor.
    Parse(ModeArgs),

    /// Parse a mode string and lint it against the connector's capabilities.
    Check(ModeArgs),

    /// Print the canonical spelling of a mode string.
    Format(ModeArgs),

    /// Explain a diagnostic code (e.g. VM2001).
    Explain { id: String },

    /// List a built-in registry.
    List {
        #[arg(value_enum)]
        what: ListKind,
    },
}

#[derive(Args, Debug)]
struct ModeArgs {
    /// The mode option string, without the `video=<connector>:` prefix.
    #[arg(allow_hyphen_values = true)]
    mode: String,
    /// Connector type the mode is meant for (e.g. hdmi-a, composite).
    #[arg(long)]
    connector: Option<ConnectorType>,
    /// Path to a connector profile (JSON or JSONC). `--connector` overrides
    /// the profile's connector type.
    #[arg(long)]
    profile: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ListKind {
    NamedModes,
    TvModes,
    Connectors,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Parse(args) => cmd_parse(&args, format)?,
        Cmd::Check(args) => cmd_check(&args, format)?,
        Cmd::Format(args) => cmd_format(&args, format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
        Cmd::List { what } => cmd_list(what, format)?,
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(args: &ModeArgs, format: Format) -> Result<()> {
    let profile = resolve_profile(args)?;
    let (descriptor, diagnostics) = parse_mode(&args.mode, &profile);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "mode": args.mode,
                "descriptor": descriptor,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(desc) = &descriptor {
                println!("{}", to_pretty_json(desc)?);
            }
            render_diagnostics_pretty(&args.mode, MODE_SOURCE_NAME, &diagnostics);
            print_summary(&diagnostics);
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_check(args: &ModeArgs, format: Format) -> Result<()> {
    let profile = resolve_profile(args)?;
    let (descriptor, mut issues) = parse_mode(&args.mode, &profile);
    if let Some(desc) = &descriptor {
        issues.extend(validate_descriptor(desc, &profile).issues);
    }
    let ok = !has_errors(&issues);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": ok,
                "connector": profile.connector_type,
                "descriptor": descriptor,
                "issues": issues,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            render_diagnostics_pretty(&args.mode, MODE_SOURCE_NAME, &issues);
            print_summary(&issues);
            if ok {
                eprintln!("check ok");
            }
        }
    }

    exit_on_errors(&issues);
    Ok(())
}

fn cmd_format(args: &ModeArgs, format: Format) -> Result<()> {
    let profile = resolve_profile(args)?;
    let (descriptor, diagnostics) = parse_mode(&args.mode, &profile);
    let formatted = descriptor.as_ref().map(emit_mode_option);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "mode": args.mode,
                "formatted": formatted,
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if let Some(text) = &formatted {
                println!("{text}");
            }
            render_diagnostics_pretty(&args.mode, MODE_SOURCE_NAME, &diagnostics);
            print_summary(&diagnostics);
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "severity": diag::severity_for_code(id),
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // The explanation is the command's output, so it goes to stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

fn cmd_list(what: ListKind, format: Format) -> Result<()> {
    match (what, format) {
        (ListKind::NamedModes, Format::Json) => {
            println!("{}", serde_json::to_string_pretty(NAMED_MODES)?);
        }
        (ListKind::NamedModes, Format::Pretty) => {
            for mode in NAMED_MODES {
                let t = &mode.timing;
                println!(
                    "{:<8} {:<8} {}x{}{}@{}",
                    mode.name,
                    mode.tv_norm.name(),
                    t.hdisplay,
                    t.vdisplay,
                    if t.interlace { "i" } else { "" },
                    t.refresh_hz()
                );
            }
        }
        (ListKind::TvModes, Format::Json) => {
            println!("{}", serde_json::to_string_pretty(&TvNorm::ALL)?);
        }
        (ListKind::TvModes, Format::Pretty) => {
            for norm in TvNorm::ALL {
                println!("{norm}");
            }
        }
        (ListKind::Connectors, Format::Json) => {
            let rows: Vec<_> = ConnectorType::ALL
                .iter()
                .map(|ty| {
                    serde_json::json!({
                        "name": ty.name(),
                        "digital": ty.is_digital(),
                        "tv": ty.is_tv(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        (ListKind::Connectors, Format::Pretty) => {
            for ty in ConnectorType::ALL {
                let tag = if ty.is_digital() {
                    " (digital)"
                } else if ty.is_tv() {
                    " (tv)"
                } else {
                    ""
                };
                println!("{}{tag}", ty.name());
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Parse `mode`, turning a rejection into a single error diagnostic.
fn parse_mode(mode: &str, profile: &ConnectorProfile) -> (Option<ModeDescriptor>, Vec<Diagnostic>) {
    match parse_for_connector(mode, profile) {
        Ok(desc) => (Some(desc), Vec::new()),
        Err(err) => (None, vec![err.to_diagnostic()]),
    }
}

/// Resolve the capability context from (in priority order):
///   1. `--profile` file, with `--connector` overriding its connector type
///   2. `--connector` alone
///   3. the default profile (unknown connector, no capability limits)
fn resolve_profile(args: &ModeArgs) -> Result<ConnectorProfile> {
    let profile = match (&args.profile, args.connector) {
        (Some(path), connector) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read profile {path}"))?;
            let mut profile = load_profile_from_str(&text)
                .with_context(|| format!("invalid profile {path}"))?;
            if let Some(ty) = connector {
                profile.connector_type = ty;
            }
            profile
        }
        (None, Some(ty)) => ConnectorProfile::for_connector(ty),
        (None, None) => ConnectorProfile::default(),
    };
    log::debug!(
        "using profile {} for connector {}",
        profile.id,
        profile.connector_type
    );
    Ok(profile)
}

/// Exit with code 1 if any diagnostic is an error.
/// Warnings and info do not cause a non-zero exit.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if has_errors(diagnostics) {
        process::exit(1);
    }
}
