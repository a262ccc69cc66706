//! Syntax highlighter for the array language and the SQL dialect
//!
//! Array-language input is coloured from the boundary scanner's own state, so
//! what looks like a string or comment on screen is exactly what the
//! completion rule treats as one. SQL gets a small keyword highlighter.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::boundary::{Mode, is_system_command};
use crate::repl::SharedState;
use crate::scanner::grammar::{is_close_bracket, is_open_bracket};
use crate::scanner::{Scanner, ScannerState, buffer_lines};

/// Mode-aware syntax highlighter
pub struct SyntaxHighlighter {
    state: SharedState,
    enabled: bool,
}

impl SyntaxHighlighter {
    /// Create a new syntax highlighter following the mode in `state`
    pub fn new(state: SharedState, enabled: bool) -> Self {
        Self { state, enabled }
    }
}

impl Highlighter for SyntaxHighlighter {
    fn highlight(&self, line: &str, cursor: usize) -> StyledText {
        // Repainted on every edit and cursor move; the validator reads it back
        self.state.record_cursor(line, cursor);

        if !self.enabled || !self.state.get_color_enabled() {
            let mut styled = StyledText::new();
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        if is_system_command(&buffer_lines(line)) {
            let mut styled = StyledText::new();
            styled.push((Color::Magenta.bold(), line.to_string()));
            return styled;
        }

        match self.state.mode() {
            Mode::Array => ArrayHighlighter::highlight(line),
            Mode::Sql => SqlHighlighter::highlight(line),
        }
    }
}

/// Appends `ch` to the last segment when the style matches, else starts one.
fn push_char(styled: &mut StyledText, style: Style, ch: char) {
    if let Some((last_style, text)) = styled.buffer.last_mut()
        && *last_style == style
    {
        text.push(ch);
        return;
    }
    styled.push((style, ch.to_string()));
}

// ============================================================================
// Array-language highlighter
// ============================================================================

struct ArrayHighlighter;

impl ArrayHighlighter {
    /// Lexical region a character belongs to, given the scanner state before
    /// and after it was fed.
    ///
    /// Opening quotes and comment markers take the state they enter; closing
    /// quotes and comment-ending newlines keep the state they leave. A raw
    /// literal only closes once the following character has been seen, so that
    /// character is judged by where it lands.
    fn region(before: ScannerState, after: ScannerState) -> ScannerState {
        if before == ScannerState::RawQuotedLiteral && after != before {
            after
        } else if before != ScannerState::Normal {
            before
        } else {
            after
        }
    }

    fn style(region: ScannerState, ch: char, mismatched: bool) -> Style {
        if region.is_literal() {
            Color::Yellow.into()
        } else if region.is_comment() {
            Color::DarkGray.dimmed()
        } else if mismatched {
            Color::Red.bold()
        } else if is_open_bracket(ch) || is_close_bracket(ch) {
            Color::Cyan.into()
        } else {
            Style::default()
        }
    }

    fn highlight(text: &str) -> StyledText {
        let mut styled = StyledText::new();
        let mut scanner = Scanner::new();

        for ch in text.chars() {
            let before = scanner.state();
            let had_error = scanner.is_error();
            let boundary = scanner.feed(ch).is_some();
            let region = Self::region(before, scanner.state());
            let mismatched = !had_error && scanner.is_error();

            push_char(&mut styled, Self::style(region, ch, mismatched), ch);

            if boundary {
                scanner = Scanner::new();
            }
        }

        styled
    }
}

// ============================================================================
// SQL Syntax Highlighter
// ============================================================================

struct SqlHighlighter;

impl SqlHighlighter {
    const KEYWORDS: &'static [&'static str] = &[
        "SELECT", "FROM", "WHERE", "INSERT", "INTO", "UPDATE", "DELETE", "CREATE", "DROP",
        "ALTER", "TABLE", "VIEW", "JOIN", "INNER", "LEFT", "RIGHT", "OUTER", "CROSS", "ON",
        "USING", "AS", "AND", "OR", "NOT", "IN", "BETWEEN", "LIKE", "IS", "NULL", "TRUE",
        "FALSE", "ORDER", "BY", "GROUP", "HAVING", "LIMIT", "OFFSET", "DISTINCT", "CASE",
        "WHEN", "THEN", "ELSE", "END", "WITH", "UNION", "VALUES", "SET", "ASC", "DESC",
    ];

    const FUNCTIONS: &'static [&'static str] = &[
        "COUNT", "SUM", "AVG", "MIN", "MAX", "UPPER", "LOWER", "LENGTH", "COALESCE", "CAST",
        "ABS", "ROUND",
    ];

    fn is_keyword(word: &str) -> bool {
        Self::KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(word))
    }

    fn is_function(word: &str) -> bool {
        Self::FUNCTIONS.iter().any(|f| f.eq_ignore_ascii_case(word))
    }

    fn get_style(word: &str) -> Style {
        if Self::is_keyword(word) {
            Color::Green.bold()
        } else if Self::is_function(word) {
            Color::Magenta.into()
        } else {
            Style::default()
        }
    }

    fn flush_word(styled: &mut StyledText, word: &mut String) {
        if !word.is_empty() {
            styled.push((Self::get_style(word.as_str()), std::mem::take(word)));
        }
    }

    fn highlight(text: &str) -> StyledText {
        let mut styled = StyledText::new();
        let mut word = String::new();
        let mut chars = text.chars().peekable();

        while let Some(ch) = chars.next() {
            // String literal; a doubled quote simply opens the next one
            if ch == '\'' {
                Self::flush_word(&mut styled, &mut word);
                let mut literal = String::from(ch);
                for c in chars.by_ref() {
                    literal.push(c);
                    if c == '\'' {
                        break;
                    }
                }
                styled.push((Color::Yellow.into(), literal));
                continue;
            }

            // Line comment up to the end of the line
            if ch == '-' && chars.peek() == Some(&'-') {
                Self::flush_word(&mut styled, &mut word);
                let mut comment = String::from(ch);
                while let Some(&c) = chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    comment.push(c);
                    chars.next();
                }
                styled.push((Color::DarkGray.dimmed(), comment));
                continue;
            }

            if ch.is_alphanumeric() || ch == '_' {
                word.push(ch);
                continue;
            }

            Self::flush_word(&mut styled, &mut word);
            let style = match ch {
                '(' | ')' => Color::Cyan.into(),
                ',' | '.' => Color::DarkGray.into(),
                ';' => Color::White.bold(),
                '*' | '+' | '-' | '/' | '=' | '<' | '>' | '!' => Color::Blue.into(),
                _ => Style::default(),
            };
            styled.push((style, ch.to_string()));
        }

        Self::flush_word(&mut styled, &mut word);
        styled
    }
}

// ============================================================================
// Tests
// ============================================================================
