use super::*;
use crate::boundary::Mode;
use crate::config::DisplayConfig;

#[test]
fn test_shared_state_creation() {
    let state = SharedState::new(Mode::Array);
    assert_eq!(state.mode(), Mode::Array);
    assert!(state.get_color_enabled());
}

#[test]
fn test_shared_state_mode_change() {
    let state = SharedState::new(Mode::Array);
    state.set_mode(Mode::Sql);
    assert_eq!(state.mode(), Mode::Sql);
}

#[test]
fn test_shared_state_clones_share_mode() {
    let state = SharedState::new(Mode::Array);
    let other = state.clone();
    other.set_mode(Mode::Sql);
    assert_eq!(state.mode(), Mode::Sql);
}

#[test]
fn test_shared_state_with_config() {
    let display = DisplayConfig {
        color_output: false,
        ..DisplayConfig::default()
    };
    let state = SharedState::with_config(Mode::Sql, &display);
    assert!(!state.get_color_enabled());
    assert_eq!(state.mode(), Mode::Sql);
}

#[test]
fn test_shared_state_cursor_line() {
    let state = SharedState::new(Mode::Array);
    assert_eq!(state.cursor_line("a\nb"), None);

    state.record_cursor("a\nb\nc", 3);
    assert_eq!(state.cursor_line("a\nb\nc"), Some(1));
    assert_eq!(state.cursor_line("a\nb"), None);

    // Past the end counts as the last line
    state.record_cursor("a\nb", 99);
    assert_eq!(state.cursor_line("a\nb"), Some(1));
}
