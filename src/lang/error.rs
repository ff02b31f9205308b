use thiserror::Error;

use super::escape::EscapeError;

/// What went wrong while compiling a `.lang` source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A quoted value or token is never closed.
    #[error("unterminated quoted string")]
    UnterminatedString,

    /// A line that is neither a directive nor `key = value`, or has a bad key path.
    #[error("malformed statement: {0}")]
    MalformedStatement(String),

    #[error("`#define locale` requires at least one locale")]
    EmptyLocaleDirective,

    #[error("unknown directive `{0}`")]
    UnknownDirective(String),

    #[error("invalid locale identifier: {0}")]
    InvalidLocale(String),

    #[error(transparent)]
    InvalidEscape(#[from] EscapeError),
}

/// A parse failure tied to the first physical line of the offending statement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number.
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    #[must_use]
    pub const fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}
