/// String literal escaping and unescaping.
///
/// This module converts between:
/// - Runtime strings (e.g., "hello\n" with an actual newline character)
/// - Source string literals (e.g., "hello\n" with a backslash-n sequence)
///
/// Escapes follow the Java conventions expression authors are used to:
/// `\t \n \r \b \f \" \' \\`, octal escapes of up to three digits
/// (`\0`, `\12`, `\377`) and `\uNNNN`.
use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

/// Errors that can occur when unescaping string literals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnescapeError {
    /// Invalid escape sequence (e.g., `\q`)
    #[error("invalid escape sequence '{seq}' at position {pos}")]
    InvalidEscape { pos: usize, seq: String },

    /// Not enough hex digits after `\u`
    #[error("incomplete Unicode escape at position {pos}: expected 4 digits, got {got}")]
    IncompleteUnicodeEscape { pos: usize, got: usize },

    /// `\uNNNN` naming a surrogate or otherwise invalid scalar value
    #[error("invalid Unicode scalar value U+{value:X} at position {pos}")]
    InvalidUnicodeScalar { pos: usize, value: u32 },

    /// Backslash at the very end of the literal
    #[error("dangling backslash at position {pos}")]
    DanglingBackslash { pos: usize },
}

/// Escape special characters so `s` can be written back as a double-quoted literal.
pub fn escape_string(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for ch in s.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// Unescape the body of a string literal (without its surrounding quotes).
///
/// Returns the input unchanged when it contains no escapes.
pub fn unescape_string(input: &str) -> Result<Cow<'_, str>, UnescapeError> {
    if !input.contains('\\') {
        return Ok(Cow::Borrowed(input));
    }

    let mut output = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '\\' {
            output.push(ch);
            continue;
        }

        match chars.next() {
            Some((_, 'n')) => output.push('\n'),
            Some((_, 'r')) => output.push('\r'),
            Some((_, 't')) => output.push('\t'),
            Some((_, 'b')) => output.push('\u{8}'),
            Some((_, 'f')) => output.push('\u{c}'),
            Some((_, '\\')) => output.push('\\'),
            Some((_, '"')) => output.push('"'),
            Some((_, '\'')) => output.push('\''),
            Some((_, first @ '0'..='7')) => {
                // Up to three octal digits, but only while the value stays below 0o400.
                let max_digits = if first <= '3' { 3 } else { 2 };
                let mut value = first.to_digit(8).unwrap_or(0);
                let mut digits = 1;
                while digits < max_digits {
                    match chars.peek().and_then(|(_, c)| c.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            digits += 1;
                            chars.next();
                        }
                        None => break,
                    }
                }
                // Always a valid scalar: value < 0o400.
                output.extend(char::from_u32(value));
            }
            Some((upos, 'u')) => {
                let mut value = 0u32;
                let mut got = 0;
                while got < 4 {
                    match chars.peek().and_then(|(_, c)| c.to_digit(16)) {
                        Some(d) => {
                            value = value * 16 + d;
                            got += 1;
                            chars.next();
                        }
                        None => break,
                    }
                }
                if got < 4 {
                    return Err(UnescapeError::IncompleteUnicodeEscape { pos: upos - 1, got });
                }
                let scalar = char::from_u32(value)
                    .ok_or(UnescapeError::InvalidUnicodeScalar { pos: upos - 1, value })?;
                output.push(scalar);
            }
            Some((_, other)) => {
                return Err(UnescapeError::InvalidEscape {
                    pos,
                    seq: format!("\\{}", other),
                });
            }
            None => return Err(UnescapeError::DanglingBackslash { pos }),
        }
    }

    Ok(Cow::Owned(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn escaped(s: &str) -> String {
        let mut out = String::new();
        escape_string(&mut out, s).unwrap();
        out
    }

    #[test]
    fn test_unescape_no_escapes() {
        assert!(matches!(unescape_string("abc"), Ok(Cow::Borrowed("abc"))));
    }

    #[test]
    fn test_unescape_common_escapes() {
        assert_eq!(unescape_string(r#"a\tb\nc\"d\\"#).unwrap(), "a\tb\nc\"d\\");
        assert_eq!(unescape_string(r"\b\f\'").unwrap(), "\u{8}\u{c}'");
    }

    #[test]
    fn test_unescape_octal() {
        // `\00` is a two-digit octal escape; the `8` that follows is not octal.
        assert_eq!(unescape_string(r"\008").unwrap(), "\u{0}8");
        assert_eq!(unescape_string(r"\101").unwrap(), "A");
        assert_eq!(unescape_string(r"\477").unwrap(), "\u{27}7");
    }

    #[test]
    fn test_unescape_unicode() {
        assert_eq!(unescape_string(r"\u00e9t\u00E9").unwrap(), "\u{e9}t\u{e9}");
    }

    #[test]
    fn test_unescape_incomplete_unicode() {
        assert_eq!(
            unescape_string(r"\u12"),
            Err(UnescapeError::IncompleteUnicodeEscape { pos: 0, got: 2 })
        );
    }

    #[test]
    fn test_unescape_surrogate_rejected() {
        assert_eq!(
            unescape_string(r"\ud800"),
            Err(UnescapeError::InvalidUnicodeScalar {
                pos: 0,
                value: 0xd800
            })
        );
    }

    #[test]
    fn test_unescape_invalid_escape() {
        assert_eq!(
            unescape_string(r"x\q"),
            Err(UnescapeError::InvalidEscape {
                pos: 1,
                seq: "\\q".to_string()
            })
        );
    }

    #[test]
    fn test_unescape_dangling_backslash() {
        assert_eq!(
            unescape_string("abc\\"),
            Err(UnescapeError::DanglingBackslash { pos: 3 })
        );
    }

    #[test]
    fn test_escape_round_trip() {
        let original = "tab\there \"quoted\" back\\slash\n";
        let literal = escaped(original);
        assert_eq!(literal, r#""tab\there \"quoted\" back\\slash\n""#);
        assert_eq!(unescape_string(&literal[1..literal.len() - 1]).unwrap(), original);
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escaped("\u{1}"), r#""\u0001""#);
    }
}
