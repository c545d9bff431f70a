//! Terminal state signals.
//!
//! Provides reactive signals for terminal dimensions.
//! These are the root signals that trigger layout and, through the layout,
//! every balancer whose container depends on the terminal width.

use spark_signals::{signal, Signal};

// =============================================================================
// Terminal Size Signals
// =============================================================================

thread_local! {
    static TERMINAL_WIDTH: Signal<u16> = signal(80);
    static TERMINAL_HEIGHT: Signal<u16> = signal(24);
}

/// Get the current terminal width.
pub fn terminal_width() -> u16 {
    terminal_width_signal().get()
}

/// Get the current terminal height.
pub fn terminal_height() -> u16 {
    terminal_height_signal().get()
}

/// Set the terminal size (called on resize events).
pub fn set_terminal_size(width: u16, height: u16) {
    terminal_width_signal().set(width);
    terminal_height_signal().set(height);
}

/// Get the terminal width signal for reactive tracking.
pub fn terminal_width_signal() -> Signal<u16> {
    TERMINAL_WIDTH.with(|w| w.clone())
}

/// Get the terminal height signal for reactive tracking.
pub fn terminal_height_signal() -> Signal<u16> {
    TERMINAL_HEIGHT.with(|h| h.clone())
}

// =============================================================================
// Terminal Detection
// =============================================================================

/// Detect and set the actual terminal size from the environment.
///
/// Uses crossterm to query the terminal dimensions. Keeps the previous size
/// when stdout is not a terminal.
pub fn detect_terminal_size() {
    match crossterm::terminal::size() {
        Ok((width, height)) => set_terminal_size(width, height),
        Err(err) => tracing::debug!(%err, "terminal size unavailable, keeping previous size"),
    }
}

// =============================================================================
// Tests
// =============================================================================
