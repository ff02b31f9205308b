//! Backslash escape decoding shared by `.lang` values and CSV cells.

use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// A `\x`, `\u` or `\U` escape whose digits do not name a Unicode scalar value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid escape sequence `{sequence}`")]
pub struct EscapeError {
    pub sequence: String,
}

/// Decodes backslash escape sequences.
///
/// Supports `\n`, `\t`, `\b`, `\r`, `\f`, `\a`, `\v`, `\xHH`, `\uHHHH` and
/// `\UHHHHHHHH`. Any other escaped character stands for itself, so `\"`,
/// `\\` and `\;` become `"`, `\` and `;`. A hex escape without enough hex
/// digits also degrades to its letter. A lone trailing backslash is kept.
///
/// # Examples
/// ```
/// use i18nco::lang::escape::decode_escape_sequences;
///
/// assert_eq!(decode_escape_sequences(r"a\tb").unwrap(), "a\tb");
/// assert_eq!(decode_escape_sequences(r"\u004c").unwrap(), "L");
/// assert_eq!(decode_escape_sequences(r#"say \"hi\""#).unwrap(), "say \"hi\"");
/// ```
pub fn decode_escape_sequences(text: &str) -> Result<String, EscapeError> {
    if !text.contains('\\') {
        return Ok(text.to_string());
    }

    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let Some(escaped) = chars.next() else {
            result.push('\\');
            break;
        };

        let decoded = match escaped {
            'n' => '\n',
            't' => '\t',
            'b' => '\u{8}',
            'r' => '\r',
            'f' => '\u{c}',
            'a' => '\u{7}',
            'v' => '\u{b}',
            'x' => decode_hex(&mut chars, 'x', 2)?,
            'u' => decode_hex(&mut chars, 'u', 4)?,
            'U' => decode_hex(&mut chars, 'U', 8)?,
            other => other,
        };
        result.push(decoded);
    }

    Ok(result)
}

/// Consumes exactly `width` hex digits when they are all present.
fn decode_hex(
    chars: &mut Peekable<Chars<'_>>,
    letter: char,
    width: usize,
) -> Result<char, EscapeError> {
    let digits: String = chars.clone().take(width).collect();
    if digits.chars().count() != width || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(letter);
    }

    for _ in 0..width {
        chars.next();
    }

    u32::from_str_radix(&digits, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| EscapeError { sequence: format!("\\{letter}{digits}") })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("", "")]
    #[case::plain("Hello", "Hello")]
    #[case::newline(r"\n", "\n")]
    #[case::tab(r"\t", "\t")]
    #[case::backslash(r"\\", "\\")]
    #[case::quote(r#"\""#, "\"")]
    #[case::semicolon(r"a \; b", "a ; b")]
    #[case::control(r"\b\f\a\v\r", "\u{8}\u{c}\u{7}\u{b}\r")]
    #[case::unicode_short(r"\u001a", "\u{1a}")]
    #[case::unicode_letter(r"\u004c", "L")]
    #[case::unicode_long(r"\U0001F600", "\u{1F600}")]
    #[case::hex(r"\x7c", "|")]
    #[case::hex_letter(r"\x64", "d")]
    #[case::mixed(r"line1\nline2\ttab", "line1\nline2\ttab")]
    #[case::unknown_escape(r"\q", "q")]
    #[case::short_unicode(r"\u12", "u12")]
    #[case::non_hex(r"\xzz", "xzz")]
    #[case::trailing_backslash(r"end\", "end\\")]
    fn test_decode_escape_sequences(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(decode_escape_sequences(input).unwrap(), expected);
    }

    #[rstest]
    #[case::surrogate(r"\uD800", r"\uD800")]
    #[case::out_of_range(r"\U00110000", r"\U00110000")]
    fn test_decode_escape_sequences_rejects_invalid_scalar(
        #[case] input: &str,
        #[case] sequence: &str,
    ) {
        assert_eq!(
            decode_escape_sequences(input),
            Err(EscapeError { sequence: sequence.to_string() })
        );
    }
}
