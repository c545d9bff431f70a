//! Core Arrays
//!
//! The most fundamental component arrays:
//! - componentType: What kind of component (box, text, balancer)
//! - parentIndex: Parent in hierarchy
//! - visible: Is component laid out
//!
//! `componentType` is an exception - it stores values directly (not reactive).

use std::cell::RefCell;

use spark_signals::{slot_array, Slot, SlotArray};

use super::{clear_slot, reset_slots};
use crate::types::ComponentType;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Component type - stores values directly (not reactive).
    static COMPONENT_TYPE: RefCell<Vec<ComponentType>> = const { RefCell::new(Vec::new()) };

    /// Parent component index (None for root).
    static PARENT_INDEX: SlotArray<Option<usize>> = slot_array(Some(None));

    /// Is component visible (false = removed from layout).
    static VISIBLE: SlotArray<bool> = slot_array(Some(true));
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    COMPONENT_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(ComponentType::None);
        }
    });
    PARENT_INDEX.with(|arr| arr.ensure_capacity(index + 1));
    VISIBLE.with(|arr| arr.ensure_capacity(index + 1));
}

/// Clear values at index (called when releasing).
pub fn clear_at_index(index: usize) {
    COMPONENT_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        if index < arr.len() {
            arr[index] = ComponentType::None;
        }
    });
    PARENT_INDEX.with(|arr| clear_slot(arr, index, None));
    VISIBLE.with(|arr| clear_slot(arr, index, true));
}

/// Reset all arrays.
pub fn reset() {
    COMPONENT_TYPE.with(|arr| arr.borrow_mut().clear());
    PARENT_INDEX.with(|arr| reset_slots(arr, None));
    VISIBLE.with(|arr| reset_slots(arr, true));
}

// =============================================================================
// Component Type
// =============================================================================

/// Get component type at index.
pub fn get_component_type(index: usize) -> ComponentType {
    COMPONENT_TYPE.with(|arr| arr.borrow().get(index).copied().unwrap_or(ComponentType::None))
}

/// Set component type at index.
pub fn set_component_type(index: usize, value: ComponentType) {
    COMPONENT_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(ComponentType::None);
        }
        arr[index] = value;
    });
}

// =============================================================================
// Parent Index
// =============================================================================

/// Get parent index at index (reactive - tracks this index).
pub fn get_parent_index(index: usize) -> Option<usize> {
    let slot = PARENT_INDEX.with(|arr| arr.slot(index));
    slot.get().flatten()
}

/// Set parent index at index.
pub fn set_parent_index(index: usize, parent: Option<usize>) {
    let slot = PARENT_INDEX.with(|arr| arr.slot(index));
    slot.set_value(parent);
}

// =============================================================================
// Visible
// =============================================================================

/// Get visibility at index (reactive).
pub fn get_visible(index: usize) -> bool {
    let slot = VISIBLE.with(|arr| arr.slot(index));
    slot.get().unwrap_or(true)
}

/// Set visibility at index.
pub fn set_visible(index: usize, visible: bool) {
    let slot = VISIBLE.with(|arr| arr.slot(index));
    slot.set_value(visible);
}

/// Slot holding the visibility of `index` (for prop binding).
pub fn visible_slot(index: usize) -> Slot<bool> {
    VISIBLE.with(|arr| arr.slot(index))
}
