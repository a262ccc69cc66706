//! Bracket, quote and comment state machine.
//!
//! The scanner is fed one character at a time and answers whether a
//! self-contained unit of array-language input ends at the newline it was just
//! given. It never builds tokens: brackets, literal bodies and comments are
//! the only structure that decides where a statement ends.

use super::grammar::{self, QuoteKind};

/// Lexical state active at the current scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScannerState {
    #[default]
    Normal,
    LineComment,
    BlockComment,
    StringLiteral,
    QuotedLiteral,
    RawQuotedLiteral,
}

impl ScannerState {
    /// True for every state that hides brackets from the depth stack.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            ScannerState::StringLiteral
                | ScannerState::QuotedLiteral
                | ScannerState::RawQuotedLiteral
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, ScannerState::LineComment | ScannerState::BlockComment)
    }
}

/// Verdict of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanResult {
    /// A unit ends here; carries the byte length of the consumed text,
    /// including the terminating newline.
    Complete(usize),
    /// The stream ended inside a bracket, literal or comment.
    NeedMoreInput,
}

impl ScanResult {
    pub fn is_complete(self) -> bool {
        matches!(self, ScanResult::Complete(_))
    }
}

enum Step {
    Continue,
    Boundary,
}

/// Incremental boundary scanner.
///
/// Build a new value for every check; nothing carries over between buffers.
/// Feeding may continue past a reported boundary (the highlighter does this),
/// but the error flag then stays set for the rest of the stream.
#[derive(Debug)]
pub struct Scanner {
    state: ScannerState,
    brackets: Vec<char>,
    mismatched: bool,
    written: String,
    /// A comment may start at the next character.
    comment_start: bool,
    /// The previous character was a newline.
    line_start: bool,
    comment_opened_at_line_start: bool,
    /// Inside a block comment, the current line so far is a lone `\`.
    lone_end_marker: bool,
    delimiter: Option<char>,
    escaped: bool,
    /// A raw literal's delimiter was seen; the next character decides
    /// whether it was doubled or closed the literal.
    raw_close_pending: bool,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            state: ScannerState::Normal,
            brackets: Vec::new(),
            mismatched: false,
            written: String::new(),
            comment_start: true,
            line_start: true,
            comment_opened_at_line_start: false,
            lone_end_marker: false,
            delimiter: None,
            escaped: false,
            raw_close_pending: false,
        }
    }

    pub fn state(&self) -> ScannerState {
        self.state
    }

    /// Number of currently open brackets.
    pub fn depth(&self) -> usize {
        self.brackets.len()
    }

    /// Whether a closing bracket failed to match the innermost open one.
    pub fn is_error(&self) -> bool {
        self.mismatched
    }

    /// Text consumed so far, with carriage returns removed.
    pub fn consumed(&self) -> &str {
        &self.written
    }

    /// Feeds one character.
    ///
    /// Returns `Some(ScanResult::Complete(len))` when the character is the
    /// newline that ends a unit, `None` otherwise.
    pub fn feed(&mut self, ch: char) -> Option<ScanResult> {
        if ch == '\r' {
            return None;
        }

        if self.raw_close_pending {
            self.raw_close_pending = false;
            if Some(ch) == self.delimiter {
                self.write(ch);
                return None;
            }
            self.state = ScannerState::Normal;
            self.delimiter = None;
        }

        let step = match self.state {
            ScannerState::Normal => self.normal(ch),
            ScannerState::LineComment => self.line_comment(ch),
            ScannerState::BlockComment => self.block_comment(ch),
            ScannerState::StringLiteral => {
                self.string_literal(ch);
                Step::Continue
            }
            ScannerState::QuotedLiteral => {
                self.quoted_literal(ch);
                Step::Continue
            }
            ScannerState::RawQuotedLiteral => {
                if Some(ch) == self.delimiter {
                    self.raw_close_pending = true;
                }
                Step::Continue
            }
        };

        self.write(ch);
        match step {
            Step::Boundary => Some(ScanResult::Complete(self.written.len())),
            Step::Continue => None,
        }
    }

    /// Verdict once the source is exhausted without a boundary.
    pub fn finish(&self) -> ScanResult {
        ScanResult::NeedMoreInput
    }

    fn write(&mut self, ch: char) {
        self.written.push(ch);
        self.line_start = ch == '\n';
    }

    fn at_boundary(&self) -> bool {
        self.brackets.is_empty() || self.mismatched
    }

    /// Leaves a comment at a newline that did not end the unit.
    fn resume_after_newline(&mut self) -> Step {
        self.state = ScannerState::Normal;
        if self.at_boundary() {
            return Step::Boundary;
        }
        self.comment_start = true;
        Step::Continue
    }

    fn normal(&mut self, ch: char) -> Step {
        let comment_start = std::mem::replace(&mut self.comment_start, false);

        if grammar::is_delimiter(ch)
            && let Some(kind) = grammar::introducer_suffix(&self.written)
        {
            self.delimiter = Some(ch);
            self.escaped = false;
            self.state = match kind {
                QuoteKind::Escaped => ScannerState::QuotedLiteral,
                QuoteKind::Raw => ScannerState::RawQuotedLiteral,
            };
            return Step::Continue;
        }

        match ch {
            '\n' => {
                if self.at_boundary() {
                    return Step::Boundary;
                }
                self.comment_start = true;
            }
            grammar::STRING_QUOTE => {
                self.escaped = false;
                self.state = ScannerState::StringLiteral;
            }
            grammar::COMMENT if comment_start => {
                self.comment_opened_at_line_start = self.line_start;
                self.state = ScannerState::LineComment;
            }
            c if grammar::is_open_bracket(c) => {
                self.brackets.push(c);
                self.comment_start = true;
            }
            c if grammar::is_close_bracket(c) => {
                if self.brackets.last().copied() == grammar::opener_for(c) {
                    self.brackets.pop();
                } else {
                    self.mismatched = true;
                }
            }
            c if grammar::is_blank(c) => self.comment_start = true,
            _ => {}
        }
        Step::Continue
    }

    fn line_comment(&mut self, ch: char) -> Step {
        if ch != '\n' {
            return Step::Continue;
        }
        if self.comment_opened_at_line_start {
            self.lone_end_marker = false;
            self.state = ScannerState::BlockComment;
            return Step::Continue;
        }
        self.resume_after_newline()
    }

    fn block_comment(&mut self, ch: char) -> Step {
        if ch == '\n' {
            if std::mem::replace(&mut self.lone_end_marker, false) {
                return self.resume_after_newline();
            }
            return Step::Continue;
        }
        self.lone_end_marker = ch == grammar::BLOCK_COMMENT_END && self.line_start;
        Step::Continue
    }

    fn string_literal(&mut self, ch: char) {
        match ch {
            grammar::ESCAPE => self.escaped = !self.escaped,
            grammar::STRING_QUOTE if !self.escaped => self.state = ScannerState::Normal,
            _ => self.escaped = false,
        }
    }

    fn quoted_literal(&mut self, ch: char) {
        if ch == grammar::ESCAPE {
            self.escaped = !self.escaped;
        } else if Some(ch) == self.delimiter && !self.escaped {
            self.state = ScannerState::Normal;
            self.delimiter = None;
        } else {
            self.escaped = false;
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs a fresh scanner over `chars` until the first boundary.
pub fn scan<I: IntoIterator<Item = char>>(chars: I) -> ScanResult {
    let mut scanner = Scanner::new();
    for ch in chars {
        if let Some(result) = scanner.feed(ch) {
            return result;
        }
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_str(text: &str) -> ScanResult {
        scan(text.chars())
    }

    fn state_after(text: &str) -> ScannerState {
        let mut scanner = Scanner::new();
        for ch in text.chars() {
            scanner.feed(ch);
        }
        scanner.state()
    }

    #[test]
    fn test_simple_expression() {
        let mut scanner = Scanner::new();
        let mut result = None;
        for ch in "1+1\n".chars() {
            result = scanner.feed(ch);
        }
        assert_eq!(result, Some(ScanResult::Complete(4)));
        assert_eq!(scanner.consumed(), "1+1\n");
    }

    #[test]
    fn test_open_bracket_needs_more() {
        assert_eq!(scan_str("(1+1\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("(1+1\n2)\n"), ScanResult::Complete(8));
    }

    #[test]
    fn test_nested_brackets() {
        assert_eq!(scan_str("f:{[x]\n(x;\n1)}\n"), ScanResult::Complete(15));
        assert_eq!(scan_str("f:{[x]\n(x;\n1)\n"), ScanResult::NeedMoreInput);
    }

    #[test]
    fn test_stray_close_forces_completion() {
        assert_eq!(scan_str("2)\n"), ScanResult::Complete(3));
    }

    #[test]
    fn test_mismatch_completes_at_next_newline_regardless_of_depth() {
        // `(` stays open after the bad `]`, yet the newline ends the unit.
        assert_eq!(scan_str("((1]\n"), ScanResult::Complete(5));
    }

    #[test]
    fn test_mismatch_leaves_stack_untouched() {
        let mut scanner = Scanner::new();
        for ch in "({)".chars() {
            scanner.feed(ch);
        }
        assert!(scanner.is_error());
        assert_eq!(scanner.depth(), 2);
    }

    #[test]
    fn test_string_spanning_newline() {
        assert_eq!(scan_str("\"abc\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("\"abc\ndef\"\n"), ScanResult::Complete(10));
    }

    #[test]
    fn test_brackets_inside_string_ignored() {
        assert_eq!(scan_str("\"(((\"\n"), ScanResult::Complete(6));
    }

    #[test]
    fn test_escaped_quote_in_string() {
        assert_eq!(scan_str("\"a\\\"\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("\"a\\\"b\"\n"), ScanResult::Complete(7));
        // A doubled backslash does not escape the closing quote.
        assert_eq!(scan_str("\"a\\\\\"\n"), ScanResult::Complete(6));
    }

    #[test]
    fn test_quoted_literal_with_custom_delimiter() {
        assert_eq!(state_after("qq|"), ScannerState::QuotedLiteral);
        assert_eq!(scan_str("qq|a(b|\n"), ScanResult::Complete(8));
        assert_eq!(scan_str("rx/a)\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("rx/a)\nb/\n"), ScanResult::Complete(9));
    }

    #[test]
    fn test_quoted_literal_escaped_delimiter() {
        assert_eq!(scan_str("qq|a\\|(\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("qq|a\\||\n"), ScanResult::Complete(8));
    }

    #[test]
    fn test_raw_literal_doubled_delimiter_stays_open() {
        assert_eq!(state_after("rq!a!!"), ScannerState::RawQuotedLiteral);
        assert_eq!(scan_str("rq!a!!b\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("rq!a!!b!\n"), ScanResult::Complete(9));
    }

    #[test]
    fn test_raw_literal_has_no_escapes() {
        assert_eq!(scan_str("rq|a\\|\n"), ScanResult::Complete(7));
    }

    #[test]
    fn test_raw_literal_close_reprocesses_next_char() {
        // The character after the closing delimiter is read as normal input.
        assert_eq!(scan_str("rq|x|(\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("rq|x|(\n)\n"), ScanResult::Complete(9));
    }

    #[test]
    fn test_delimiter_without_introducer_is_plain() {
        assert_eq!(scan_str("a|b\n"), ScanResult::Complete(4));
        assert_eq!(state_after("qx|"), ScannerState::Normal);
    }

    #[test]
    fn test_line_comment_after_whitespace() {
        assert_eq!(scan_str("1 / (\n"), ScanResult::Complete(6));
        assert_eq!(state_after("1 /"), ScannerState::LineComment);
    }

    #[test]
    fn test_slash_after_operand_is_not_a_comment() {
        assert_eq!(state_after("+/"), ScannerState::Normal);
        assert_eq!(scan_str("+/(\n"), ScanResult::NeedMoreInput);
    }

    #[test]
    fn test_line_comment_inside_brackets_resumes_normal() {
        assert_eq!(scan_str("(1 / )\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("(1 / )\n2)\n"), ScanResult::Complete(10));
    }

    #[test]
    fn test_comment_after_open_bracket() {
        assert_eq!(state_after("(/"), ScannerState::LineComment);
    }

    #[test]
    fn test_comment_at_line_start_opens_block() {
        assert_eq!(state_after("/\n"), ScannerState::BlockComment);
        assert_eq!(scan_str("/\n1+1\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("/\n1+(\n\\\n"), ScanResult::Complete(8));
    }

    #[test]
    fn test_block_comment_needs_lone_backslash() {
        assert_eq!(scan_str("/\n \\\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("/\n\\x\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("/\na\\\n"), ScanResult::NeedMoreInput);
    }

    #[test]
    fn test_block_comment_end_inside_brackets() {
        assert_eq!(scan_str("(\n/\n\\\n"), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("(\n/\n\\\n)\n"), ScanResult::Complete(8));
    }

    #[test]
    fn test_carriage_returns_discarded() {
        let mut scanner = Scanner::new();
        let mut result = None;
        for ch in "1+1\r\n".chars() {
            result = scanner.feed(ch);
        }
        assert_eq!(result, Some(ScanResult::Complete(4)));
        assert_eq!(scanner.consumed(), "1+1\n");
    }

    #[test]
    fn test_end_of_stream_needs_more() {
        assert_eq!(scan_str(""), ScanResult::NeedMoreInput);
        assert_eq!(scan_str("1+1"), ScanResult::NeedMoreInput);
    }

    #[test]
    fn test_boundary_at_first_balanced_line() {
        assert_eq!(scan_str("a\nb\n"), ScanResult::Complete(2));
    }

    #[test]
    fn test_repeatable() {
        let text = "(1;\n\"x\n";
        assert_eq!(scan_str(text), scan_str(text));
    }
}
