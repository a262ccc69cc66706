//! Character source over the lines typed so far.

use std::slice;
use std::str::Chars;

/// Streams the characters of a sequence of lines, following every line with
/// an explicit `\n`.
pub struct LineSource<'a, S> {
    lines: slice::Iter<'a, S>,
    current: Option<Chars<'a>>,
}

impl<'a, S: AsRef<str>> LineSource<'a, S> {
    pub fn new(lines: &'a [S]) -> Self {
        Self {
            lines: lines.iter(),
            current: None,
        }
    }
}

impl<S: AsRef<str>> Iterator for LineSource<'_, S> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(chars) = self.current.as_mut() {
                if let Some(ch) = chars.next() {
                    return Some(ch);
                }
                self.current = None;
                return Some('\n');
            }
            self.current = Some(self.lines.next()?.as_ref().chars());
        }
    }
}

/// Splits an editor buffer into its lines.
///
/// Unlike [`str::lines`], a trailing `\n` yields a trailing empty line, which
/// is what the editor shows: the cursor sits on a fresh, empty last line.
pub fn buffer_lines(buffer: &str) -> Vec<&str> {
    buffer.split('\n').collect()
}
