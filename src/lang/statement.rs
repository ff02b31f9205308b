//! Turns logical lines into directive and assignment statements.

use super::error::{
    ParseError,
    ParseErrorKind,
};
use super::escape::decode_escape_sequences;
use super::lexer::{
    LineShape,
    LogicalLine,
    find_closing_quote,
    find_separator,
    scan_directive,
};
use crate::types::KeyPath;

/// One parsed line of a `.lang` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Directive(Directive),
    Assignment(Assignment),
}

/// `#define <name> <arguments>...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<String>,
}

/// `key = value`, with the key still relative to the current superiors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub key: KeyPath,
    pub value: String,
    /// The value was quoted, so its surrounding whitespace is kept verbatim.
    pub raw: bool,
}

/// Parses one logical line produced by [`super::lexer::LogicalLines`].
pub fn parse_statement(line: &LogicalLine) -> Result<Statement, ParseError> {
    let text = line.text.trim();
    let parsed = match LineShape::of(text) {
        LineShape::Directive(body) => parse_directive(body).map(Statement::Directive),
        LineShape::Assignment => parse_assignment(text).map(Statement::Assignment),
        LineShape::Blank | LineShape::Comment => Err(ParseErrorKind::MalformedStatement(
            "expected a directive or `key = value`".to_string(),
        )),
    };
    parsed.map_err(|kind| ParseError::new(line.number, kind))
}

/// Splits a directive body into its name and decoded arguments.
fn parse_directive(body: &str) -> Result<Directive, ParseErrorKind> {
    let scan = scan_directive(body)?;
    let mut tokens = scan.tokens.into_iter();

    let Some(name) = tokens.next() else {
        return Err(ParseErrorKind::MalformedStatement("`#define` without a name".to_string()));
    };

    let arguments = tokens
        .map(|token| {
            if token.quoted { decode_escape_sequences(&token.text) } else { Ok(token.text) }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Directive { name: name.text, arguments })
}

/// Splits `key = value` at the first unescaped `=` and decodes the value.
fn parse_assignment(text: &str) -> Result<Assignment, ParseErrorKind> {
    let Some(separator) = find_separator(text) else {
        return Err(ParseErrorKind::MalformedStatement(format!(
            "expected `key = value`, found `{text}`"
        )));
    };

    let key_text = text.get(..separator).unwrap_or_default().trim();
    let key = parse_key(key_text)?;

    let value_text = text.get(separator + 1..).unwrap_or_default().trim_start();
    let Some(inner) = value_text.strip_prefix('"') else {
        let value = decode_escape_sequences(value_text.trim_end())?;
        return Ok(Assignment { key, value, raw: false });
    };

    let end = find_closing_quote(inner).ok_or(ParseErrorKind::UnterminatedString)?;
    let trailing = inner.get(end + 1..).unwrap_or_default().trim();
    if !trailing.is_empty() {
        return Err(ParseErrorKind::MalformedStatement(format!(
            "unexpected `{trailing}` after quoted value"
        )));
    }

    let value = decode_escape_sequences(inner.get(..end).unwrap_or_default())?;
    Ok(Assignment { key, value, raw: true })
}

/// Validates the text left of `=` as a key path.
fn parse_key(key_text: &str) -> Result<KeyPath, ParseErrorKind> {
    if key_text.is_empty() {
        return Err(ParseErrorKind::MalformedStatement("missing key before `=`".to_string()));
    }
    if key_text.contains('"') {
        return Err(ParseErrorKind::MalformedStatement(format!(
            "key `{key_text}` must not contain quotes"
        )));
    }
    if key_text.contains(char::is_whitespace) {
        return Err(ParseErrorKind::MalformedStatement(format!(
            "key `{key_text}` must not contain whitespace"
        )));
    }

    KeyPath::parse(&key_text.replace("\\=", "="))
        .map_err(|e| ParseErrorKind::MalformedStatement(e.to_string()))
}
