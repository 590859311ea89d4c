use super::{
    descriptor::ModeDescriptor,
    diag::Span,
    error::ModeParseError,
    flags::scan_flags,
    lexer::Cursor,
    options::{is_option_key, parse_options},
    tables::named_mode,
};
use vidmode_profile::ConnectorProfile;

// ─── Clause Kinds ───────────────────────────────────────────────────────────

/// What the text before the first comma turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    /// `WxH...`
    Resolution,
    /// `NAME...`
    Named,
    /// A lone `e`, `d` or `D`.
    ForceOnly,
    /// No clause; the whole input is options.
    None,
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse a mode option string for a connector of unknown type.
///
/// ```
/// let mode = vidmode_core::parse_str("1920x1080@60e").unwrap();
/// assert_eq!((mode.xres, mode.yres, mode.refresh), (1920, 1080, 60));
/// ```
pub fn parse_str(input: &str) -> Result<ModeDescriptor, ModeParseError> {
    parse_for_connector(input, &ConnectorProfile::default())
}

/// Parse a mode option string against the capabilities of one connector.
///
/// The connector only affects the `D` flag, which selects digital output on
/// DVI and HDMI connectors.
pub fn parse_for_connector(
    input: &str,
    profile: &ConnectorProfile,
) -> Result<ModeDescriptor, ModeParseError> {
    let result = Parser::new(input, profile).parse();
    if let Err(err) = &result {
        log::debug!("rejected mode option {input:?}: {err} ({})", err.code());
    }
    result
}

// ─── Parser Implementation ─────────────────────────────────────────────────

struct Parser<'a> {
    input: &'a str,
    profile: &'a ConnectorProfile,
    desc: ModeDescriptor,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, profile: &'a ConnectorProfile) -> Self {
        Self {
            input,
            profile,
            desc: ModeDescriptor::default(),
        }
    }

    fn parse(mut self) -> Result<ModeDescriptor, ModeParseError> {
        if self.input.is_empty() {
            return Err(ModeParseError::Empty);
        }

        let clause_end = self.input.find(',').unwrap_or(self.input.len());
        let clause_text = &self.input[..clause_end];
        let clause = Self::classify(clause_text);
        log::debug!(
            "mode option {:?}: {clause:?} clause {clause_text:?} on {}",
            self.input,
            self.profile.connector_type
        );

        match clause {
            Clause::Resolution => self.parse_resolution(clause_text)?,
            Clause::Named => self.parse_named(clause_text)?,
            Clause::ForceOnly => scan_flags(
                &mut Cursor::new(clause_text, 0),
                self.profile,
                &mut self.desc,
            )?,
            Clause::None => {
                parse_options(self.input, 0, false, &mut self.desc)?;
                return Ok(self.desc);
            }
        }

        if clause_end < self.input.len() {
            let has_mode = self.desc.specified;
            parse_options(
                &self.input[clause_end + 1..],
                clause_end + 1,
                has_mode,
                &mut self.desc,
            )?;
        }
        Ok(self.desc)
    }

    fn classify(clause: &str) -> Clause {
        match clause.as_bytes().first() {
            Some(b) if b.is_ascii_digit() => Clause::Resolution,
            _ if matches!(clause, "e" | "d" | "D") => Clause::ForceOnly,
            _ if clause.is_empty() || clause.contains('=') || is_option_key(clause) => {
                Clause::None
            }
            _ => Clause::Named,
        }
    }

    // ── Resolution clause ───────────────────────────────────────────────

    fn parse_resolution(&mut self, clause: &str) -> Result<(), ModeParseError> {
        let mut cur = Cursor::new(clause, 0);

        self.desc.xres = cur.digits("width")?;
        if !cur.eat('x') {
            return Err(ModeParseError::MissingSeparator {
                span: cur.next_char_span(),
            });
        }
        self.desc.yres = cur.digits("height")?;

        if cur.eat('M') {
            self.desc.cvt = true;
        }
        if cur.eat('R') {
            self.desc.reduced_blanking = true;
        }
        if cur.eat('-') {
            self.desc.bpp = cur.digits("bpp")?;
            self.desc.bpp_specified = true;
        }
        if cur.eat('@') {
            self.desc.refresh = cur.digits("refresh")?;
            self.desc.refresh_specified = true;
        }

        scan_flags(&mut cur, self.profile, &mut self.desc)?;
        self.desc.specified = true;
        Ok(())
    }

    // ── Named-mode clause ───────────────────────────────────────────────

    fn parse_named(&mut self, clause: &str) -> Result<(), ModeParseError> {
        let name_end = clause.find(['-', '@']).unwrap_or(clause.len());
        let name = &clause[..name_end];
        let Some(mode) = named_mode(name) else {
            return Err(ModeParseError::UnknownNamedMode {
                name: name.to_string(),
                span: Span::new(0, name_end),
            });
        };

        if let Some(at) = clause[name_end..].find('@') {
            return Err(ModeParseError::RefreshOnNamedMode {
                name: mode.name.to_string(),
                span: Span::new(name_end + at, clause.len()),
            });
        }

        let mut cur = Cursor::new(&clause[name_end..], name_end);
        if cur.eat('-') {
            self.desc.bpp = cur.digits("bpp")?;
            self.desc.bpp_specified = true;
        }
        scan_flags(&mut cur, self.profile, &mut self.desc)?;

        self.desc.name = Some(mode.name.to_string());
        self.desc.specified = true;
        Ok(())
    }
}
