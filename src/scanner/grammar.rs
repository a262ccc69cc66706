//! Lexical table shared by every component that needs to know where the
//! array language puts literal and comment boundaries.
//!
//! The boundary scanner, the statement splitter and the syntax highlighter all
//! read from here. A change to the expression grammar's delimiters, comment
//! syntax or quote-introducers is made in this one place.

/// Opening brackets tracked on the depth stack.
pub const OPEN_BRACKETS: [char; 3] = ['(', '{', '['];

/// Closing brackets, index-aligned with [`OPEN_BRACKETS`].
pub const CLOSE_BRACKETS: [char; 3] = [')', '}', ']'];

/// Delimits ordinary string literals.
pub const STRING_QUOTE: char = '"';

/// Escape character inside string and quoted literals.
pub const ESCAPE: char = '\\';

/// Starts a comment when it appears where a comment may begin.
pub const COMMENT: char = '/';

/// A line holding only this character closes a block comment.
pub const BLOCK_COMMENT_END: char = '\\';

/// Operator characters that may be picked as the delimiter of a quoted or
/// raw-quoted literal.
pub const DELIMITERS: &[char] = &[
    '!', '#', '$', '%', '&', '\'', '*', '+', ',', '-', '.', '/', ':', ';', '<', '=', '>', '?',
    '@', '^', '_', '`', '|', '~',
];

/// A single line starting with this marker is a system command.
pub const SYSTEM_COMMAND_MARKER: char = ')';

/// Terminates a statement in the SQL dialect.
pub const SQL_TERMINATOR: char = ';';

/// How the body of a custom-delimited literal is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// Backslash escapes the delimiter.
    Escaped,
    /// No escapes; a doubled delimiter stands for one delimiter character.
    Raw,
}

/// Two-character tokens that open a custom-delimited literal when the next
/// character is in [`DELIMITERS`].
pub const QUOTE_INTRODUCERS: &[(&str, QuoteKind)] = &[
    ("rx", QuoteKind::Escaped),
    ("qq", QuoteKind::Escaped),
    ("rq", QuoteKind::Raw),
];

/// Returns the matching opening bracket for a closing one.
pub fn opener_for(close: char) -> Option<char> {
    CLOSE_BRACKETS
        .iter()
        .position(|&c| c == close)
        .map(|i| OPEN_BRACKETS[i])
}

pub fn is_open_bracket(ch: char) -> bool {
    OPEN_BRACKETS.contains(&ch)
}

pub fn is_close_bracket(ch: char) -> bool {
    CLOSE_BRACKETS.contains(&ch)
}

pub fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Whitespace after which a comment may start.
pub fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Looks up the quote-introducer that `written` ends with, if any.
pub fn introducer_suffix(written: &str) -> Option<QuoteKind> {
    QUOTE_INTRODUCERS
        .iter()
        .find(|(token, _)| written.ends_with(token))
        .map(|&(_, kind)| kind)
}
