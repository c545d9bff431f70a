//! Layout Derived - Reactive layout computation.
//!
//! Creates a Derived that computes layout whenever:
//! - Terminal size changes
//! - Any FlexNode slot, text slot or visibility changes
//! - Components are added/removed
//! - A balancer settles a new inline max width (style epoch)

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::derived;

use crate::engine::arrays::balance;
use crate::layout::{compute_layout, ComputedLayout};
use super::terminal::{terminal_height_signal, terminal_width_signal};

// =============================================================================
// Current Layout
// =============================================================================

thread_local! {
    /// Latest layout published by the mount effect.
    static CURRENT_LAYOUT: RefCell<Option<Rc<ComputedLayout>>> = const { RefCell::new(None) };
}

/// Get the last published layout, or an empty one before the first mount.
pub fn get_layout() -> Rc<ComputedLayout> {
    try_get_layout().unwrap_or_default()
}

/// Get the last published layout, if any.
pub fn try_get_layout() -> Option<Rc<ComputedLayout>> {
    CURRENT_LAYOUT.with(|l| l.borrow().clone())
}

/// Publish a layout.
pub fn set_layout(layout: ComputedLayout) {
    CURRENT_LAYOUT.with(|l| *l.borrow_mut() = Some(Rc::new(layout)));
}

/// Clear the cached layout (for unmount/testing).
pub fn clear_layout() {
    CURRENT_LAYOUT.with(|l| *l.borrow_mut() = None);
}

// =============================================================================
// Derived
// =============================================================================

/// Handle to the layout derived.
///
/// Reading it from an effect tracks the derived, which tracks the tree.
#[derive(Clone)]
pub struct LayoutDerived {
    read: Rc<dyn Fn() -> ComputedLayout>,
}

impl LayoutDerived {
    /// Current layout (recomputed if any dependency changed).
    pub fn get(&self) -> ComputedLayout {
        (self.read)()
    }
}

/// Create the layout derived.
///
/// Height is never constrained: balancers measure the natural height of
/// their containers.
pub fn create_layout_derived() -> LayoutDerived {
    let tw_signal = terminal_width_signal();
    let th_signal = terminal_height_signal();

    let layout = derived(move || {
        // Read terminal dimensions (creates reactive dependency)
        let tw = tw_signal.get();
        let th = th_signal.get();

        // Inline max widths are not reactive; the epoch stands in for them
        let _ = balance::style_epoch();

        compute_layout(tw, th, false)
    });

    LayoutDerived {
        read: Rc::new(move || layout.get()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, create_flex_node, reset_registry};
    use crate::engine::arrays::core as core_arrays;
    use crate::types::{ComponentType, Dimension};
    use crate::pipeline::terminal::set_terminal_size;

    fn setup() {
        reset_registry();
        clear_layout();
        set_terminal_size(80, 24);
    }

    #[test]
    fn test_layout_derived_empty() {
        setup();

        let layout_derived = create_layout_derived();
        let layout = layout_derived.get();

        assert_eq!(layout.content_width, 0);
        assert_eq!(layout.content_height, 0);
    }

    #[test]
    fn test_layout_derived_with_component() {
        setup();

        let idx = allocate_index(None);
        core_arrays::set_component_type(idx, ComponentType::Box);
        let node = create_flex_node(idx);
        node.width.set_value(Dimension::Cells(40));
        node.height.set_value(Dimension::Cells(10));

        let layout_derived = create_layout_derived();
        let layout = layout_derived.get();

        assert_eq!(layout.width[idx], 40);
        assert_eq!(layout.height[idx], 10);
    }

    #[test]
    fn test_layout_derived_reacts_to_terminal_resize() {
        setup();

        let idx = allocate_index(None);
        core_arrays::set_component_type(idx, ComponentType::Box);
        let node = create_flex_node(idx);
        node.width.set_value(Dimension::Percent(100.0));
        node.height.set_value(Dimension::Cells(3));

        let layout_derived = create_layout_derived();

        assert_eq!(layout_derived.get().width[idx], 80);

        set_terminal_size(120, 40);

        assert_eq!(layout_derived.get().width[idx], 120);
    }

    #[test]
    fn test_layout_derived_reacts_to_style_epoch() {
        setup();

        let container = allocate_index(None);
        core_arrays::set_component_type(container, ComponentType::Box);
        create_flex_node(container).width.set_value(Dimension::Cells(30));

        let wrapper = allocate_index(None);
        core_arrays::set_component_type(wrapper, ComponentType::Balancer);
        core_arrays::set_parent_index(wrapper, Some(container));
        create_flex_node(wrapper);

        let layout_derived = create_layout_derived();
        assert_eq!(layout_derived.get().width[wrapper], 30);

        balance::set_inline_max_width(wrapper, Some(12.0));
        balance::bump_style_epoch();

        assert_eq!(layout_derived.get().width[wrapper], 12);
    }

    #[test]
    fn test_published_layout() {
        setup();

        assert!(try_get_layout().is_none());
        assert_eq!(get_layout().content_width, 0);

        let mut layout = ComputedLayout::new();
        layout.content_width = 7;
        set_layout(layout);

        assert_eq!(get_layout().content_width, 7);
    }
}
