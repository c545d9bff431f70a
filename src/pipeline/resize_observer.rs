//! Resize Observer - Size-change notifications for components.
//!
//! An observer watches one component. An effect recomputes the component's
//! size whenever the tree, the terminal or the style epoch changes, and
//! queues an entry when the size differs from the last one seen. The first
//! measurement always queues an entry.
//!
//! Entries are not delivered from inside the effect. Callbacks typically
//! write layout state (the balancer does), so they run later, outside any
//! reactive tracking, when [`deliver_resize_observations`] is called. The
//! mount loop calls it on every tick.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::effect;

use crate::engine::arrays::balance;
use crate::layout::LayoutTree;
use super::terminal::{terminal_height, terminal_width};

// =============================================================================
// Types
// =============================================================================

/// A queued size change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEntry {
    /// Observed component index.
    pub index: usize,
    /// Width in cells.
    pub width: f32,
    /// Height in cells.
    pub height: f32,
}

type ResizeCallback = Rc<dyn Fn(&ResizeEntry)>;

thread_local! {
    static NEXT_OBSERVER_ID: Cell<u64> = const { Cell::new(0) };
    static CALLBACKS: RefCell<Vec<(u64, ResizeCallback)>> = const { RefCell::new(Vec::new()) };
    static PENDING: RefCell<Vec<(u64, ResizeEntry)>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Observer
// =============================================================================

/// Observes the size of one component until disconnected or dropped.
pub struct ResizeObserver {
    id: u64,
    stop_effect: Option<Box<dyn FnOnce()>>,
}

impl ResizeObserver {
    /// Start observing `index`.
    ///
    /// The initial size is queued immediately; `callback` runs on delivery.
    pub fn observe(index: usize, callback: impl Fn(&ResizeEntry) + 'static) -> Self {
        let id = NEXT_OBSERVER_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });

        CALLBACKS.with(|callbacks| callbacks.borrow_mut().push((id, Rc::new(callback))));

        let last_size: Rc<Cell<Option<(f32, f32)>>> = Rc::new(Cell::new(None));
        let stop = effect(move || {
            let _ = balance::style_epoch();
            let mut tree = LayoutTree::build(terminal_width(), terminal_height(), false);
            let Some((width, height)) = tree.size(index) else { return };

            if last_size.get() != Some((width, height)) {
                last_size.set(Some((width, height)));
                tracing::trace!(index, width, height, "resize observed");
                PENDING.with(|pending| {
                    pending.borrow_mut().push((id, ResizeEntry { index, width, height }));
                });
            }
        });

        Self {
            id,
            stop_effect: Some(Box::new(stop)),
        }
    }

    /// Stop observing. Entries still queued for this observer are dropped.
    pub fn disconnect(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
        let id = self.id;
        CALLBACKS.with(|callbacks| callbacks.borrow_mut().retain(|(observer, _)| *observer != id));
        PENDING.with(|pending| pending.borrow_mut().retain(|(observer, _)| *observer != id));
    }
}

impl Drop for ResizeObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}

// =============================================================================
// Delivery
// =============================================================================

/// Deliver all queued entries to their observers' callbacks.
///
/// Entries queued by callbacks themselves are delivered on the next call.
/// Returns the number of callbacks invoked.
pub fn deliver_resize_observations() -> usize {
    let pending = PENDING.with(|pending| std::mem::take(&mut *pending.borrow_mut()));

    let mut delivered = 0;
    for (id, entry) in pending {
        // Clone out so the callback may connect or disconnect observers
        let callback = CALLBACKS.with(|callbacks| {
            callbacks
                .borrow()
                .iter()
                .find(|(observer, _)| *observer == id)
                .map(|(_, callback)| callback.clone())
        });
        if let Some(callback) = callback {
            callback(&entry);
            delivered += 1;
        }
    }
    delivered
}

/// Number of entries waiting for delivery.
pub fn pending_resize_observations() -> usize {
    PENDING.with(|pending| pending.borrow().len())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, create_flex_node, reset_registry};
    use crate::engine::arrays::core as core_arrays;
    use crate::pipeline::terminal::set_terminal_size;
    use crate::types::{ComponentType, Dimension};

    fn setup() {
        reset_registry();
        set_terminal_size(80, 24);
        PENDING.with(|pending| pending.borrow_mut().clear());
    }

    fn full_width_box() -> usize {
        let idx = allocate_index(None);
        core_arrays::set_component_type(idx, ComponentType::Box);
        let node = create_flex_node(idx);
        node.width.set_value(Dimension::Percent(100.0));
        node.height.set_value(Dimension::Cells(2));
        idx
    }

    #[test]
    fn test_initial_observation_is_queued() {
        setup();
        let idx = full_width_box();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _observer = ResizeObserver::observe(idx, move |entry| seen_clone.borrow_mut().push(*entry));

        assert_eq!(pending_resize_observations(), 1);
        assert_eq!(deliver_resize_observations(), 1);
        assert_eq!(
            seen.borrow().as_slice(),
            &[ResizeEntry { index: idx, width: 80.0, height: 2.0 }]
        );
        assert_eq!(deliver_resize_observations(), 0);
    }

    #[test]
    fn test_resize_queues_entry() {
        setup();
        let idx = full_width_box();

        let widths = Rc::new(RefCell::new(Vec::new()));
        let widths_clone = widths.clone();
        let _observer = ResizeObserver::observe(idx, move |entry| widths_clone.borrow_mut().push(entry.width));
        deliver_resize_observations();

        set_terminal_size(100, 24);
        deliver_resize_observations();

        assert_eq!(widths.borrow().as_slice(), &[80.0, 100.0]);
    }

    #[test]
    fn test_unchanged_size_is_not_queued() {
        setup();
        let idx = full_width_box();

        let _observer = ResizeObserver::observe(idx, |_| {});
        deliver_resize_observations();

        set_terminal_size(80, 50);
        assert_eq!(pending_resize_observations(), 0);
    }

    #[test]
    fn test_disconnect_stops_delivery() {
        setup();
        let idx = full_width_box();

        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let mut observer = ResizeObserver::observe(idx, move |_| count_clone.set(count_clone.get() + 1));

        observer.disconnect();

        set_terminal_size(60, 24);
        assert_eq!(deliver_resize_observations(), 0);
        assert_eq!(count.get(), 0);
    }
}
