//! Splits `.lang` source into logical lines.
//!
//! A logical line is one statement after backslash continuations have been
//! joined and comments have been removed. Blank and comment-only lines never
//! leave this module.

use std::iter::Enumerate;
use std::str::Lines;

use super::error::{
    ParseError,
    ParseErrorKind,
};

/// Keyword that opens a directive line.
pub(crate) const DIRECTIVE_KEYWORD: &str = "#define";

/// A statement-sized chunk of source, trimmed and comment-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the first physical line.
    pub number: usize,
    /// Joined statement text without its comment.
    pub text: String,
}

/// Coarse shape of a trimmed line, decided by its first characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineShape<'a> {
    /// Nothing but whitespace.
    Blank,
    /// `;`, `//`, or `#` not followed by `define`.
    Comment,
    /// Text following `#define`.
    Directive(&'a str),
    /// Anything else, expected to be `key = value`.
    Assignment,
}

impl<'a> LineShape<'a> {
    /// Classifies a line that has already been trimmed.
    pub(crate) fn of(trimmed: &'a str) -> Self {
        if trimmed.is_empty() {
            return Self::Blank;
        }
        if starts_comment(trimmed) {
            return Self::Comment;
        }
        if let Some(body) = directive_body(trimmed) {
            return Self::Directive(body);
        }
        // `#` lines other than `#define` are comments too.
        if trimmed.starts_with('#') {
            return Self::Comment;
        }
        Self::Assignment
    }
}

/// Returns the text after `#define` when the line is a directive.
fn directive_body(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix(DIRECTIVE_KEYWORD)?;
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

/// `;` and `//` open a comment.
fn starts_comment(text: &str) -> bool {
    text.starts_with(';') || text.starts_with("//")
}

/// Byte offset of the closing `"` of a string whose opening quote was
/// already consumed. Backslash escapes are skipped.
pub(crate) fn find_closing_quote(text: &str) -> Option<usize> {
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => return Some(index),
            _ => {}
        }
    }
    None
}

/// Byte offset of the first `=` that is not escaped with a backslash.
pub(crate) fn find_separator(text: &str) -> Option<usize> {
    let mut escaped = false;
    for (index, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '=' => return Some(index),
            _ => {}
        }
    }
    None
}

/// One whitespace-separated token of a directive body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawToken {
    /// Token text; for quoted tokens the still-escaped text between the quotes.
    pub(crate) text: String,
    /// The token was written between double quotes.
    pub(crate) quoted: bool,
}

/// Tokens of a directive body plus where a trailing comment starts, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DirectiveScan {
    /// Tokens in source order, the directive name first.
    pub(crate) tokens: Vec<RawToken>,
    /// Byte offset in the body where a trailing comment begins.
    pub(crate) comment_start: Option<usize>,
}

/// Splits a directive body into tokens.
///
/// A `"` at the start of a token opens a quoted token that may contain
/// whitespace. Outside quotes, `;` or `//` begins a comment.
pub(crate) fn scan_directive(body: &str) -> Result<DirectiveScan, ParseErrorKind> {
    let mut tokens = Vec::new();
    let mut current: Option<String> = None;
    let mut resume_at = 0;

    for (index, ch) in body.char_indices() {
        if index < resume_at {
            continue;
        }

        if ch.is_whitespace() {
            if let Some(text) = current.take() {
                tokens.push(RawToken { text, quoted: false });
            }
            continue;
        }

        if body.get(index..).is_some_and(starts_comment) {
            if let Some(text) = current.take() {
                tokens.push(RawToken { text, quoted: false });
            }
            return Ok(DirectiveScan { tokens, comment_start: Some(index) });
        }

        if ch == '"' && current.is_none() {
            let inner_start = index + ch.len_utf8();
            let inner = body.get(inner_start..).unwrap_or_default();
            let end = find_closing_quote(inner).ok_or(ParseErrorKind::UnterminatedString)?;
            let text = inner.get(..end).unwrap_or_default().to_string();
            tokens.push(RawToken { text, quoted: true });
            resume_at = inner_start + end + 1;
            continue;
        }

        current.get_or_insert_with(String::new).push(ch);
    }

    if let Some(text) = current.take() {
        tokens.push(RawToken { text, quoted: false });
    }

    Ok(DirectiveScan { tokens, comment_start: None })
}

/// Quote state of an assignment's value.
enum ValueQuote {
    /// The value is not quoted.
    Bare,
    /// Quoted and closed; holds the byte offset just past the closing quote.
    Closed(usize),
    /// Quoted, with no closing quote yet.
    Open,
}

/// Finds the quote state of the value in a trimmed assignment line.
fn value_quote(text: &str) -> ValueQuote {
    let Some(separator) = find_separator(text) else {
        return ValueQuote::Bare;
    };
    let after = text.get(separator + 1..).unwrap_or_default();
    let value = after.trim_start();
    let value_start = separator + 1 + (after.len() - value.len());

    let Some(inner) = value.strip_prefix('"') else {
        return ValueQuote::Bare;
    };
    find_closing_quote(inner)
        .map_or(ValueQuote::Open, |end| ValueQuote::Closed(value_start + 1 + end + 1))
}

/// Where a [`QuoteScanner`] stands in the line it has read so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ScanState {
    /// Only whitespace so far.
    #[default]
    Start,
    /// Assignment key, up to the first unescaped `=`.
    Key,
    /// Between `=` and the first character of the value.
    ValueStart,
    /// Inside a quoted value.
    QuotedValue,
    /// Directive body, between tokens.
    TokenGap,
    /// Inside an unquoted directive token.
    BareToken,
    /// Inside a quoted directive token.
    QuotedToken,
    /// Nothing later on the line can open a quote.
    Settled,
}

/// Tracks whether a logical line under construction is inside a quote.
///
/// Each call to [`QuoteScanner::advance`] reads only the bytes appended since
/// the previous call, so joining a long run of continuations stays linear.
/// It agrees with [`scan_directive`] and [`value_quote`] on the finished line.
#[derive(Debug, Default)]
struct QuoteScanner {
    /// Bytes of the line already read.
    scanned: usize,
    /// Where the scan stopped.
    state: ScanState,
    /// The last character read was an escaping backslash.
    escaped: bool,
}

impl QuoteScanner {
    /// The text read so far ends inside a quoted value or token.
    const fn inside_quote(&self) -> bool {
        matches!(self.state, ScanState::QuotedValue | ScanState::QuotedToken)
    }

    /// Reads `text` from where the previous call stopped up to byte `end`.
    ///
    /// Bytes before `end` must not change between calls.
    fn advance(&mut self, text: &str, end: usize) {
        let base = self.scanned;
        let Some(pending) = text.get(base..end) else {
            return;
        };

        let mut chars = pending.char_indices().peekable();
        while let Some((offset, ch)) = chars.next() {
            let index = base + offset;
            if self.escaped {
                self.escaped = false;
                continue;
            }

            match (self.state, ch) {
                (ScanState::Start, ch) if ch.is_whitespace() => {}
                (ScanState::Start, _) => {
                    self.scanned = self.enter(text.get(index..end).unwrap_or_default(), index);
                    return self.advance(text, end);
                }
                (ScanState::Settled, _) => break,
                (ScanState::Key | ScanState::QuotedValue | ScanState::QuotedToken, '\\') => {
                    self.escaped = true;
                }
                (ScanState::Key, '=') => self.state = ScanState::ValueStart,
                (ScanState::ValueStart, ch) if ch.is_whitespace() => {}
                (ScanState::ValueStart, '"') => self.state = ScanState::QuotedValue,
                (ScanState::ValueStart, _) | (ScanState::QuotedValue, '"') => {
                    self.state = ScanState::Settled;
                }
                (ScanState::TokenGap | ScanState::BareToken, ch) if ch.is_whitespace() => {
                    self.state = ScanState::TokenGap;
                }
                (ScanState::TokenGap | ScanState::BareToken, ';') => {
                    self.state = ScanState::Settled;
                }
                (ScanState::TokenGap | ScanState::BareToken, '/') => match chars.peek() {
                    Some((_, '/')) => self.state = ScanState::Settled,
                    Some(_) => self.state = ScanState::BareToken,
                    None => {
                        // Undecided until the next character arrives.
                        self.scanned = index;
                        return;
                    }
                },
                (ScanState::TokenGap, '"') => self.state = ScanState::QuotedToken,
                (ScanState::TokenGap, _) => self.state = ScanState::BareToken,
                (ScanState::QuotedToken, '"') => self.state = ScanState::TokenGap,
                (ScanState::Key | ScanState::QuotedValue | ScanState::BareToken
                | ScanState::QuotedToken, _) => {}
            }
        }
        self.scanned = end;
    }

    /// Picks the line shape at its first non-blank character and returns the
    /// byte offset scanning resumes from.
    fn enter(&mut self, rest: &str, index: usize) -> usize {
        match LineShape::of(rest) {
            LineShape::Directive(body) => {
                self.state = ScanState::TokenGap;
                index + rest.len() - body.len()
            }
            LineShape::Assignment => {
                self.state = ScanState::Key;
                index
            }
            LineShape::Blank | LineShape::Comment => {
                self.state = ScanState::Settled;
                index
            }
        }
    }
}

/// True when the line ends with a backslash that is not itself escaped.
fn has_continuation_marker(text: &str) -> bool {
    let trailing = text.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

/// Removes a trailing comment where one is allowed and trims the result.
///
/// Comments are honoured on directive lines and after a closed quoted value.
/// An unquoted value keeps `;` and `//` as ordinary text.
fn strip_comment(text: &str) -> &str {
    let trimmed = text.trim();
    match LineShape::of(trimmed) {
        LineShape::Blank | LineShape::Comment => "",
        LineShape::Directive(body) => {
            let comment_start = scan_directive(body).ok().and_then(|scan| scan.comment_start);
            comment_start.map_or(trimmed, |start| {
                let cut = trimmed.len() - body.len() + start;
                trimmed.get(..cut).unwrap_or(trimmed).trim_end()
            })
        }
        LineShape::Assignment => {
            let ValueQuote::Closed(after_quote) = value_quote(trimmed) else {
                return trimmed;
            };
            let rest = trimmed.get(after_quote..).unwrap_or_default();
            if starts_comment(rest.trim_start()) {
                trimmed.get(..after_quote).unwrap_or(trimmed)
            } else {
                trimmed
            }
        }
    }
}

/// Iterator over the logical lines of one `.lang` source.
///
/// Each call to [`LogicalLines::new`] starts a fresh traversal.
#[derive(Debug)]
pub struct LogicalLines<'a> {
    /// Remaining physical lines with their 0-based index.
    physical: Enumerate<Lines<'a>>,
}

impl<'a> LogicalLines<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { physical: source.lines().enumerate() }
    }

    /// Appends physical lines while the text ends with a continuation marker.
    ///
    /// Outside a quoted value the join point collapses to one space. Inside a
    /// quoted value nothing is inserted. Leading indentation of the continued
    /// line is dropped in both cases.
    fn join_continuations(&mut self, text: &mut String, scanner: &mut QuoteScanner) {
        while has_continuation_marker(text) {
            text.pop();
            // Trailing blanks cannot open or close a quote, and may be cut below.
            let kept = text.trim_end().len();
            scanner.advance(text, kept);

            let Some((_, next)) = self.physical.next() else {
                break;
            };
            let next = next.trim_start();

            if scanner.inside_quote() {
                text.push_str(next);
                continue;
            }

            text.truncate(kept);
            if !text.is_empty() && !next.is_empty() {
                text.push(' ');
            }
            text.push_str(next);
        }
    }
}

impl Iterator for LogicalLines<'_> {
    type Item = Result<LogicalLine, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, first) = self.physical.next()?;
            let number = index + 1;

            let mut text = first.to_string();
            let mut scanner = QuoteScanner::default();
            self.join_continuations(&mut text, &mut scanner);
            scanner.advance(&text, text.len());

            if scanner.inside_quote() {
                return Some(Err(ParseError::new(number, ParseErrorKind::UnterminatedString)));
            }

            let statement = strip_comment(&text);
            if statement.is_empty() {
                continue;
            }

            return Some(Ok(LogicalLine { number, text: statement.to_string() }));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn collect(source: &str) -> Vec<(usize, String)> {
        LogicalLines::new(source).map(|line| line.unwrap()).map(|l| (l.number, l.text)).collect()
    }

    #[rstest]
    #[case::blank("", LineShape::Blank)]
    #[case::semicolon("; note", LineShape::Comment)]
    #[case::slashes("// note", LineShape::Comment)]
    #[case::hash("# heading", LineShape::Comment)]
    #[case::hash_lookalike("#defined = x", LineShape::Comment)]
    #[case::directive("#define locale en_US", LineShape::Directive(" locale en_US"))]
    #[case::bare_directive("#define", LineShape::Directive(""))]
    #[case::assignment("hello = Hello", LineShape::Assignment)]
    fn test_line_shape(#[case] line: &str, #[case] expected: LineShape<'_>) {
        assert_eq!(LineShape::of(line), expected);
    }

    #[googletest::test]
    fn test_blank_and_comment_lines_are_dropped() {
        let source = "\n   \n; comment\n// another\n# heading\nhello = Hello\n";

        let lines = collect(source);

        expect_that!(lines.len(), eq(1));
        expect_that!(lines[0].0, eq(6));
        expect_that!(lines[0].1, eq("hello = Hello"));
    }

    #[rstest]
    fn test_continuation_joins_with_single_space() {
        let source = "robert = I have become death \\\n         the destroyer of worlds\n";

        let lines = collect(source);

        assert_eq!(lines, vec![(1, "robert = I have become death the destroyer of worlds".into())]);
    }

    #[rstest]
    fn test_continuation_spans_several_lines() {
        let source = "a = one \\\n  two \\\n  three\nb = four";

        let lines = collect(source);

        assert_eq!(lines, vec![(1, "a = one two three".into()), (4, "b = four".into())]);
    }

    #[rstest]
    fn test_continuation_inside_quotes_inserts_nothing() {
        let source = "quote = \"  keep \\\n    going  \"\n";

        let lines = collect(source);

        assert_eq!(lines, vec![(1, "quote = \"  keep going  \"".into())]);
    }

    #[rstest]
    fn test_escaped_backslash_is_not_a_continuation() {
        let source = "path = C:\\\\\nnext = 1";

        let lines = collect(source);

        assert_eq!(lines, vec![(1, "path = C:\\\\".into()), (2, "next = 1".into())]);
    }

    #[rstest]
    fn test_continuation_at_end_of_input_drops_marker() {
        let lines = collect("a = dangling \\");

        assert_eq!(lines, vec![(1, "a = dangling".into())]);
    }

    #[rstest]
    #[case::unquoted_semicolon(
        "mode.singleton = Singleton Mode ; not a comment",
        "mode.singleton = Singleton Mode ; not a comment"
    )]
    #[case::unquoted_slashes("url = https://example.com", "url = https://example.com")]
    #[case::quoted_then_comment("greet = \"Hi ; there\" ; trailing", "greet = \"Hi ; there\"")]
    #[case::quoted_then_slashes("greet = \"Hi\"   // trailing", "greet = \"Hi\"")]
    #[case::directive_comment("#define locale en_US en_GB ; both", "#define locale en_US en_GB")]
    #[case::directive_quoted_semicolon(
        "#define superiors \"a;b\" // note",
        "#define superiors \"a;b\""
    )]
    fn test_comment_boundaries(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(collect(source), vec![(1, expected.to_string())]);
    }

    #[rstest]
    #[case::value("greet = \"never closed\nnext = 1", 1)]
    #[case::continued_value("first = 1\ngreet = \"open \\\n still open", 2)]
    #[case::directive_token("#define superiors \"open", 1)]
    fn test_unterminated_string(#[case] source: &str, #[case] line: usize) {
        let result: std::result::Result<Vec<_>, _> = LogicalLines::new(source).collect();

        assert_eq!(result, Err(ParseError::new(line, ParseErrorKind::UnterminatedString)));
    }

    #[rstest]
    fn test_crlf_line_endings() {
        let lines = collect("a = 1\r\nb = 2\r\n");

        assert_eq!(lines, vec![(1, "a = 1".into()), (2, "b = 2".into())]);
    }

    #[googletest::test]
    fn test_scan_directive_tokens() {
        let scan = scan_directive(" superiors \"two words\" plain ; tail").unwrap();

        expect_that!(scan.tokens.len(), eq(3));
        expect_that!(scan.tokens[0].text, eq("superiors"));
        expect_that!(scan.tokens[1].text, eq("two words"));
        expect_that!(scan.tokens[1].quoted, eq(true));
        expect_that!(scan.tokens[2].quoted, eq(false));
        expect_that!(scan.comment_start == Some(29), eq(true));
    }

    #[rstest]
    #[case::bare_value("a = b", false)]
    #[case::open_value("a = \"b", true)]
    #[case::closed_value("a = \"b\" ; c", false)]
    #[case::escaped_quote("a = \"b\\\"", true)]
    #[case::escaped_separator("a\\=\"b = c", false)]
    #[case::quote_after_bare_value("a = b \"c", false)]
    #[case::open_token("#define superiors \"a b", true)]
    #[case::closed_token("#define superiors \"a\" \"b\"", false)]
    #[case::quote_inside_bare_token("#define superiors a\"b", false)]
    #[case::token_comment("#define locale en ; \"x", false)]
    #[case::token_slashes("#define locale en // \"x", false)]
    #[case::single_slash("#define superiors a/\"b", false)]
    #[case::comment_line("; \"x", false)]
    #[case::leading_blanks("   a = \"b", true)]
    fn test_quote_scanner(#[case] text: &str, #[case] expected: bool) {
        let mut scanner = QuoteScanner::default();

        scanner.advance(text, text.len());

        assert_eq!(scanner.inside_quote(), expected);
    }

    #[rstest]
    fn test_quote_scanner_resumes_across_appends() {
        let mut text = String::from("#define superiors a/");
        let mut scanner = QuoteScanner::default();

        scanner.advance(&text, text.len());
        text.push_str("/ \"x");
        scanner.advance(&text, text.len());

        assert!(!scanner.inside_quote());
    }

    #[rstest]
    fn test_continuation_inside_quoted_directive_token() {
        let lines = collect("#define superiors \"a \\\n    b\" ; note\nx = 1");

        assert_eq!(lines, vec![(1, "#define superiors \"a b\"".into()), (3, "x = 1".into())]);
    }

    #[rstest]
    fn test_long_continuation_chain() {
        let count = 20_000;
        let bare = format!("long = start \\\n{}  end", "  x \\\n".repeat(count));
        let quoted = format!("long = \"start\\\n{}  end\"", "  x \\\n".repeat(count));

        let bare_lines = collect(&bare);
        let quoted_lines = collect(&quoted);

        assert_eq!(bare_lines, vec![(1, format!("long = start{} end", " x".repeat(count)))]);
        assert_eq!(quoted_lines, vec![(1, format!("long = \"start{}end\"", "x ".repeat(count)))]);
    }

    #[rstest]
    #[case::plain("key = value", Some(4))]
    #[case::escaped("a\\=b = c", Some(5))]
    #[case::none("no separator", None)]
    fn test_find_separator(#[case] text: &str, #[case] expected: Option<usize>) {
        assert_eq!(find_separator(text), expected);
    }
}
