//! Parallel Arrays
//!
//! All component state lives in these parallel arrays.
//! Each array index corresponds to one component.
//!
//! Reactive columns are `SlotArray`s: one stable `Slot` per index, so a
//! derived or effect that reads index 3 only re-runs when index 3 changes.
//! Columns nobody needs to track (component type, balancer markers, inline
//! max width) are plain vectors.
//!
//! Slots are always cloned out of their column before they are read or
//! written. A write wakes effects synchronously, and those effects read the
//! same columns again.
//!
//! # Array Categories
//!
//! - **core**: Component type, parent, visibility
//! - **text**: Text content and wrap mode
//! - **balance**: Balancer marker attributes and inline max width

pub mod core;
pub mod text;
pub mod balance;

use spark_signals::{Slot, SlotArray};

use crate::primitives::PropValue;

use self::core as core_arrays;
use self::text as text_arrays;
use self::balance as balance_arrays;

// =============================================================================
// Slot Binding
// =============================================================================

/// Point a slot at a [`PropValue`].
///
/// Static values are stored in the slot. Signals are read and written
/// through. Getters are called on every read, tracking what they read.
pub fn bind_slot<T: Clone + PartialEq + 'static>(slot: &Slot<T>, prop: PropValue<T>) {
    match prop {
        PropValue::Static(v) => slot.set_value(v),
        PropValue::Signal(s) => slot.set_signal(&s),
        PropValue::Getter(g) => slot.set_getter(move || g()),
    }
}

/// Reset the slot at `index` back to `default`, if the column has it.
pub(crate) fn clear_slot<T: Clone + PartialEq + 'static>(arr: &SlotArray<T>, index: usize, default: T) {
    if arr.has(index) {
        arr.slot(index).set_value(default);
    }
}

/// Reset every slot of a column back to `default`.
pub(crate) fn reset_slots<T: Clone + PartialEq + 'static>(arr: &SlotArray<T>, default: T) {
    for index in 0..arr.len() {
        arr.slot(index).set_value(default.clone());
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Ensure all arrays have capacity for the given index.
///
/// Called by registry when allocating.
pub fn ensure_all_capacity(index: usize) {
    core_arrays::ensure_capacity(index);
    text_arrays::ensure_capacity(index);
    balance_arrays::ensure_capacity(index);
}

/// Clear all array values at an index.
///
/// Called by registry when releasing.
pub fn clear_all_at_index(index: usize) {
    core_arrays::clear_at_index(index);
    text_arrays::clear_at_index(index);
    balance_arrays::clear_at_index(index);
}

/// Reset all parallel arrays to release memory.
///
/// Called automatically when all components are destroyed.
pub fn reset_all_arrays() {
    core_arrays::reset();
    text_arrays::reset();
    balance_arrays::reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use spark_signals::{effect, signal, slot, slot_array};

    #[test]
    fn test_bind_slot_follows_source() {
        let target = slot(Some(0u16));

        bind_slot(&target, PropValue::Static(3));
        assert_eq!(target.get(), Some(3));
        assert!(target.is_static());

        let source = signal(7u16);
        bind_slot(&target, PropValue::Signal(source.clone()));
        assert_eq!(target.get(), Some(7));
        source.set(9);
        assert_eq!(target.get(), Some(9));

        let doubled = source.clone();
        bind_slot(&target, PropValue::getter(move || doubled.get() * 2));
        assert_eq!(target.get(), Some(18));
        assert!(target.is_getter());
    }

    #[test]
    fn test_bound_signal_wakes_readers_without_extra_effects() {
        let target = slot(Some(0u16));
        let source = signal(1u16);
        bind_slot(&target, PropValue::Signal(source.clone()));

        let runs = Rc::new(Cell::new(0));
        let runs_for_effect = runs.clone();
        let reader = target.clone();
        let _stop = effect(move || {
            let _ = reader.get();
            runs_for_effect.set(runs_for_effect.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        source.set(2);
        assert_eq!(runs.get(), 2);
        assert_eq!(target.get(), Some(2));
    }

    #[test]
    fn test_clear_and_reset_slots() {
        let arr = slot_array(Some(7u16));
        arr.ensure_capacity(4);
        arr.slot(1).set_value(11);
        arr.slot(3).set_value(12);

        clear_slot(&arr, 1, 7);
        clear_slot(&arr, 9, 7);
        assert_eq!(arr.get(1), Some(7));
        assert_eq!(arr.len(), 4);

        reset_slots(&arr, 7);
        assert_eq!(arr.get(3), Some(7));
    }
}
