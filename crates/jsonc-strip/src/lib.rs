//! JSONC pre-processing for vidmode data files.
//!
//! Connector profiles and the diagnostics catalogue are hand-edited, so they
//! are allowed to carry comments and trailing commas. [`strip_jsonc`] turns
//! such a document into plain JSON that `serde_json` accepts:
//!
//! - `//` line comments and `/* ... */` block comments are removed
//! - a comma directly before a closing `}` or `]` is removed
//! - string literals (including escaped quotes) are copied untouched

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Str,
    StrEscape,
    LineComment,
    BlockComment,
}

/// Strip comments and trailing commas from JSONC input.
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    drop_trailing_commas(&strip_comments(input))
}

fn strip_comments(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut state = State::Code;
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();
        match state {
            State::Code => match (b, next) {
                (b'/', Some(b'/')) => {
                    state = State::LineComment;
                    i += 2;
                    continue;
                }
                (b'/', Some(b'*')) => {
                    state = State::BlockComment;
                    i += 2;
                    continue;
                }
                (b'"', _) => {
                    state = State::Str;
                    out.push(b);
                }
                _ => out.push(b),
            },
            State::Str => {
                out.push(b);
                match b {
                    b'\\' => state = State::StrEscape,
                    b'"' => state = State::Code,
                    _ => {}
                }
            }
            State::StrEscape => {
                out.push(b);
                state = State::Str;
            }
            State::LineComment => {
                if b == b'\n' {
                    out.push(b);
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if b == b'*' && next == Some(b'/') {
                    state = State::Code;
                    i += 2;
                    continue;
                }
            }
        }
        i += 1;
    }

    // Only whole ASCII-delimited ranges were dropped, so the bytes remain UTF-8.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn drop_trailing_commas(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut in_str = false;
    let mut escaped = false;
    let mut last = 0usize;

    for (i, &b) in bytes.iter().enumerate() {
        if in_str {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_str = false;
            }
            continue;
        }
        match b {
            b'"' => in_str = true,
            b',' => {
                let closes = bytes[i + 1..]
                    .iter()
                    .find(|c| !c.is_ascii_whitespace())
                    .is_some_and(|c| matches!(c, b'}' | b']'));
                if closes {
                    out.push_str(&input[last..i]);
                    last = i + 1;
                }
            }
            _ => {}
        }
    }
    out.push_str(&input[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::strip_jsonc;

    #[test]
    fn strips_line_and_block_comments() {
        let input = r#"
{
  // connector under test
  "id": "hdmi", /* inline */ "connector_type": "hdmi-a"
}
"#;
        let stripped = strip_jsonc(input);
        assert!(!stripped.contains("connector under test"));
        assert!(!stripped.contains("inline"));
        assert!(stripped.contains("\"id\": \"hdmi\""));
        assert!(stripped.contains("\"connector_type\": \"hdmi-a\""));
    }

    #[test]
    fn keeps_comment_markers_inside_strings() {
        let input = r#"{ "doc": "see http://example.com/*x*/", "note": "//keep \" //too" }"#;
        let stripped = strip_jsonc(input);
        assert!(stripped.contains("http://example.com/*x*/"));
        assert!(stripped.contains(r#""note": "//keep \" //too""#));
    }

    #[test]
    fn removes_trailing_commas() {
        let input = "{ \"a\": [1, 2, ], \"b\": { \"c\": 3, // last\n }, }";
        let stripped = strip_jsonc(input);
        let value: Vec<char> = stripped.chars().filter(|c| !c.is_whitespace()).collect();
        let value: String = value.into_iter().collect();
        assert_eq!(value, r#"{"a":[1,2],"b":{"c":3}}"#);
    }

    #[test]
    fn keeps_commas_inside_strings() {
        let input = r#"{ "list": "a, ]", "x": 1 }"#;
        assert_eq!(strip_jsonc(input), input);
    }

    #[test]
    fn unterminated_block_comment_consumes_rest() {
        assert_eq!(strip_jsonc("{} /* open"), "{} ");
    }

    #[test]
    fn preserves_multibyte_text() {
        let input = "{ \"name\": \"Écran €\" } // ünïcode";
        assert_eq!(strip_jsonc(input), "{ \"name\": \"Écran €\" } ");
    }
}
