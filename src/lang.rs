//! Compiler for the `.lang` translation format.
//!
//! ```text
//! ; comment
//! #define locale en_US en_GB
//! #define superiors mode
//! singleton = Singleton Mode
//! robert = I have become death \
//!          the destroyer of worlds
//! ```
//!
//! Source text is split into logical lines, each logical line becomes a
//! [`Statement`], and directives thread a [`DirectiveState`] through the
//! assignments that follow them.

/// `#define` state machine
pub mod directive;
/// Parse errors
mod error;
/// Escape sequence decoding
pub mod escape;
/// Physical to logical lines
pub mod lexer;
/// Statement parser
pub mod statement;

pub use directive::DirectiveState;
pub use error::{
    ParseError,
    ParseErrorKind,
};
pub use escape::{
    EscapeError,
    decode_escape_sequences,
};
pub use lexer::{
    LogicalLine,
    LogicalLines,
};
pub use statement::{
    Assignment,
    Directive,
    Statement,
    parse_statement,
};

use crate::locale::system_locale_or_default;
use crate::table::Entry;
use crate::types::{
    KeyPath,
    LocaleId,
};

/// Parses `.lang` source into fully resolved entries, in file order.
///
/// `default_locale` seeds the active locale set (the system locale when
/// `None`) and `default_superiors` seeds the key prefix. Either may be
/// replaced by `#define` directives inside the source.
///
/// Parsing stops at the first error.
///
/// # Errors
/// Returns the first [`ParseError`] encountered, with its line number.
///
/// # Examples
/// ```
/// use i18nco::lang::parse_lang;
/// use i18nco::types::LocaleId;
///
/// let source = "#define locale en_US en_GB\nhello = Hello\n";
/// let entries = parse_lang(source, Some(LocaleId::new("fr_FR").unwrap()), None).unwrap();
///
/// assert_eq!(entries.len(), 2);
/// assert_eq!(entries[0].locale.as_str(), "en_US");
/// assert_eq!(entries[1].key.dotted(), "hello");
/// ```
pub fn parse_lang(
    source: &str,
    default_locale: Option<LocaleId>,
    default_superiors: Option<KeyPath>,
) -> Result<Vec<Entry>, ParseError> {
    let locale = default_locale.unwrap_or_else(system_locale_or_default);
    let state = DirectiveState::new(locale, default_superiors.unwrap_or_default());

    let (_, entries) = LogicalLines::new(source).try_fold(
        (state, Vec::new()),
        |(mut state, mut entries), line| {
            let line = line?;
            match parse_statement(&line)? {
                Statement::Directive(directive) => state
                    .apply(&directive)
                    .map_err(|kind| ParseError::new(line.number, kind))?,
                Statement::Assignment(assignment) => {
                    entries.extend(state.entries_for(&assignment));
                }
            }
            Ok::<_, ParseError>((state, entries))
        },
    )?;

    Ok(entries)
}
