use std::sync::{Arc, PoisonError, RwLock};

use crate::boundary::Mode;
use crate::config::DisplayConfig;

/// State shared between the line editor components and the main loop.
///
/// The validator, highlighter and prompt all need the active language mode,
/// and a `)sql` or `)array` command changes it between two reads.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Active language mode
    pub mode: Arc<RwLock<Mode>>,

    /// Color output setting
    pub color_enabled: Arc<RwLock<bool>>,

    /// Where the cursor was at the last repaint
    cursor: Arc<RwLock<Option<CursorPosition>>>,
}

/// Cursor line within a specific buffer.
#[derive(Debug, Clone)]
struct CursorPosition {
    buffer: String,
    line: usize,
}

impl SharedState {
    /// Create a new shared state.
    ///
    /// * `mode` - Initial language mode
    pub fn new(mode: Mode) -> Self {
        Self::with_config(mode, &DisplayConfig::default())
    }

    /// Create a new shared state with display configuration.
    ///
    /// * `mode` - Initial language mode
    /// * `display_config` - Display configuration settings
    pub fn with_config(mode: Mode, display_config: &DisplayConfig) -> Self {
        Self {
            mode: Arc::new(RwLock::new(mode)),
            color_enabled: Arc::new(RwLock::new(display_config.color_output)),
            cursor: Arc::new(RwLock::new(None)),
        }
    }

    /// Get the active language mode.
    pub fn mode(&self) -> Mode {
        *self.mode.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the active language mode.
    pub fn set_mode(&self, mode: Mode) {
        *self.mode.write().unwrap_or_else(PoisonError::into_inner) = mode;
    }

    /// Get current color setting.
    pub fn get_color_enabled(&self) -> bool {
        *self
            .color_enabled
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Remember the cursor position in `buffer`.
    ///
    /// `cursor` is a byte offset, as the line editor reports it.
    pub fn record_cursor(&self, buffer: &str, cursor: usize) {
        let end = cursor.min(buffer.len());
        let line = buffer.as_bytes()[..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        *self.cursor.write().unwrap_or_else(PoisonError::into_inner) = Some(CursorPosition {
            buffer: buffer.to_string(),
            line,
        });
    }

    /// Cursor line recorded for `buffer`.
    ///
    /// `None` when nothing was recorded for this exact buffer.
    pub fn cursor_line(&self, buffer: &str) -> Option<usize> {
        self.cursor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|position| position.buffer == buffer)
            .map(|position| position.line)
    }
}
