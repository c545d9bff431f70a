//! Mount API - Application lifecycle and layout effect.
//!
//! Mounting wires the terminal to the reactive layout: the terminal size is
//! detected, a layout effect publishes every recomputed layout, and the tick
//! loop feeds resize events back into the terminal signals and delivers
//! queued resize observations (which is what re-balances text after a
//! container changes size).
//!
//! # Example
//!
//! ```ignore
//! use spark_balancer::pipeline::{mount, run};
//!
//! let handle = mount()?;
//! run(&handle)?; // Blocks until Ctrl+C or handle.stop()
//! handle.unmount();
//! ```

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use spark_signals::effect;

use super::layout_derived::{clear_layout, create_layout_derived, set_layout};
use super::resize_observer::deliver_resize_observations;
use super::terminal::{detect_terminal_size, set_terminal_size};

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that allows unmounting.
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    running: Arc<AtomicBool>,
}

impl MountHandle {
    /// Stop the layout effect and clean up.
    pub fn unmount(mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.stop_layout_effect();
        clear_layout();
    }

    /// Check if still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop the application (sets running to false).
    /// Use this to trigger graceful shutdown from custom code.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn stop_layout_effect(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.stop_layout_effect();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount the application.
///
/// This sets up:
/// 1. Terminal size detection
/// 2. The layout derived and the effect publishing its result
///
/// Returns a MountHandle for cleanup.
pub fn mount() -> io::Result<MountHandle> {
    detect_terminal_size();

    let layout_derived = create_layout_derived();

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    let stop = effect(move || {
        if !running_clone.load(Ordering::SeqCst) {
            return;
        }

        // Read from derived (creates dependency)
        let layout = layout_derived.get();
        tracing::trace!(
            width = layout.content_width,
            height = layout.content_height,
            "layout published"
        );
        set_layout(layout);
    });

    Ok(MountHandle {
        stop_effect: Some(Box::new(stop)),
        running,
    })
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Event Loop
// =============================================================================

/// Apply one terminal event. Returns false if it requests shutdown.
fn handle_event(event: Event) -> bool {
    match event {
        Event::Resize(width, height) => {
            tracing::debug!(width, height, "terminal resized");
            set_terminal_size(width, height);
            true
        }
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            !(key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        }
        _ => true,
    }
}

/// Run the event loop once (non-blocking).
///
/// Polls for one terminal event, then delivers queued resize observations.
///
/// # Returns
///
/// * `Ok(true)` - Continue running
/// * `Ok(false)` - Stop requested (Ctrl+C pressed or `handle.stop()` called)
/// * `Err(e)` - I/O error while polling
pub fn tick(handle: &MountHandle) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    // Poll with short timeout (~60fps)
    if event::poll(Duration::from_millis(16))? && !handle_event(event::read()?) {
        handle.stop();
    }

    deliver_resize_observations();

    Ok(handle.is_running())
}

/// Run the event loop (blocking until stopped).
pub fn run(handle: &MountHandle) -> io::Result<()> {
    while tick(handle)? {
        // Continue processing events
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
