//! Balance Arrays
//!
//! Marker attributes and inline style of balancer wrappers:
//! - balanceId: unique marker used to find a wrapper without a reference
//! - balanceRatio: the ratio in effect for the wrapper
//! - inlineMaxWidth: max width written by the balancer (cells, fractional)
//!
//! None of these are reactive. The balancer writes the inline max width many
//! times per pass while measuring, so layout consumers instead track the
//! style epoch, which is bumped once per settled pass.

use std::cell::RefCell;

use spark_signals::{signal, Signal};

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    static BALANCE_ID: RefCell<Vec<Option<String>>> = const { RefCell::new(Vec::new()) };

    static BALANCE_RATIO: RefCell<Vec<f32>> = const { RefCell::new(Vec::new()) };

    static INLINE_MAX_WIDTH: RefCell<Vec<Option<f32>>> = const { RefCell::new(Vec::new()) };

    /// Bumped whenever a settled inline style should reach the layout derived.
    static STYLE_EPOCH: Signal<u64> = signal(0);
}

const DEFAULT_RATIO: f32 = 1.0;

fn grow<T: Clone>(arr: &mut Vec<T>, index: usize, default: T) {
    if arr.len() <= index {
        arr.resize(index + 1, default);
    }
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    BALANCE_ID.with(|arr| grow(&mut arr.borrow_mut(), index, None));
    BALANCE_RATIO.with(|arr| grow(&mut arr.borrow_mut(), index, DEFAULT_RATIO));
    INLINE_MAX_WIDTH.with(|arr| grow(&mut arr.borrow_mut(), index, None));
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    BALANCE_ID.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
    BALANCE_RATIO.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = DEFAULT_RATIO;
        }
    });
    INLINE_MAX_WIDTH.with(|arr| {
        if let Some(slot) = arr.borrow_mut().get_mut(index) {
            *slot = None;
        }
    });
}

/// Reset all arrays.
pub fn reset() {
    BALANCE_ID.with(|arr| arr.borrow_mut().clear());
    BALANCE_RATIO.with(|arr| arr.borrow_mut().clear());
    INLINE_MAX_WIDTH.with(|arr| arr.borrow_mut().clear());
}

// =============================================================================
// Marker Attributes
// =============================================================================

/// Get the balancer marker of `index`.
pub fn get_balance_id(index: usize) -> Option<String> {
    BALANCE_ID.with(|arr| arr.borrow().get(index).cloned().flatten())
}

/// Set the balancer marker of `index`.
pub fn set_balance_id(index: usize, id: &str) {
    BALANCE_ID.with(|arr| {
        let mut arr = arr.borrow_mut();
        grow(&mut arr, index, None);
        arr[index] = Some(id.to_string());
    });
}

/// Find the wrapper carrying marker `id`.
pub fn find_balancer(id: &str) -> Option<usize> {
    BALANCE_ID.with(|arr| {
        arr.borrow()
            .iter()
            .position(|marker| marker.as_deref() == Some(id))
    })
}

/// Get the ratio attribute of `index` (1.0 when never set).
pub fn get_balance_ratio(index: usize) -> f32 {
    BALANCE_RATIO.with(|arr| arr.borrow().get(index).copied().unwrap_or(DEFAULT_RATIO))
}

/// Record the ratio in effect for `index`.
pub fn set_balance_ratio(index: usize, ratio: f32) {
    BALANCE_RATIO.with(|arr| {
        let mut arr = arr.borrow_mut();
        grow(&mut arr, index, DEFAULT_RATIO);
        arr[index] = ratio;
    });
}

// =============================================================================
// Inline Max Width
// =============================================================================

/// Get the inline max width of `index`.
pub fn get_inline_max_width(index: usize) -> Option<f32> {
    INLINE_MAX_WIDTH.with(|arr| arr.borrow().get(index).copied().flatten())
}

/// Set (or clear with `None`) the inline max width of `index`.
pub fn set_inline_max_width(index: usize, width: Option<f32>) {
    INLINE_MAX_WIDTH.with(|arr| {
        let mut arr = arr.borrow_mut();
        grow(&mut arr, index, None);
        arr[index] = width;
    });
}

// =============================================================================
// Style Epoch
// =============================================================================

/// Read the style epoch (reactive).
pub fn style_epoch() -> u64 {
    STYLE_EPOCH.with(|s| s.clone()).get()
}

/// Notify layout consumers that inline styles changed.
pub fn bump_style_epoch() {
    let epoch = STYLE_EPOCH.with(|s| s.clone());
    let next = epoch.get().wrapping_add(1);
    epoch.set(next);
}
