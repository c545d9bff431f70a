//! Box Primitive - Container component with flexbox layout.
//!
//! The fundamental container component. Holds children and gives them a
//! width to wrap against; a balancer's container is usually a box.
//!
//! # Reactivity
//!
//! Props are bound directly to FlexNode slots, preserving reactive connections.
//! When a signal changes, the layout updates automatically.
//!
//! # Example
//!
//! ```ignore
//! use spark_balancer::primitives::{box_primitive, text, BoxProps, TextProps};
//! use spark_signals::signal;
//!
//! let width = signal(Dimension::Cells(40));
//!
//! let cleanup = box_primitive(BoxProps {
//!     width: Some(width.clone().into()),
//!     children: Some(Box::new(|| {
//!         text(TextProps {
//!             content: "Hello!".into(),
//!             ..Default::default()
//!         });
//!     })),
//!     ..Default::default()
//! });
//!
//! // Update width - layout reacts automatically
//! width.set(Dimension::Cells(80));
//! ```

use std::rc::Rc;

use crate::engine::{
    allocate_index, release_index, create_flex_node, FlexNode,
    get_current_parent_index, push_parent_context, pop_parent_context,
};
use crate::engine::arrays::{bind_slot, core};
use crate::types::ComponentType;
use super::types::{BoxProps, Children, Cleanup, PropValue};

// =============================================================================
// Shared Binding Helpers
// =============================================================================

/// Bind padding shorthand and per-side overrides.
pub(super) fn bind_padding(
    node: &Rc<FlexNode>,
    all: Option<PropValue<u16>>,
    sides: [Option<PropValue<u16>>; 4],
) {
    let targets = [
        &node.padding_top,
        &node.padding_right,
        &node.padding_bottom,
        &node.padding_left,
    ];
    for (target, side) in targets.into_iter().zip(sides) {
        // Shorthand - apply unless individual is set
        if let Some(prop) = side.or_else(|| all.clone()) {
            bind_slot(target, prop);
        }
    }
}

/// Build children with `index` as their parent.
pub(super) fn build_children(index: usize, children: Option<Children>) {
    if let Some(children) = children {
        push_parent_context(index);
        children();
        pop_parent_context();
    }
}

// =============================================================================
// Box Component
// =============================================================================

/// Create a box container component.
///
/// Returns a cleanup function that releases the box and all of its
/// children when called.
pub fn box_primitive(props: BoxProps) -> Cleanup {
    // 1. ALLOCATE INDEX
    let index = allocate_index(props.id.as_deref());

    // 2. CREATE FLEXNODE - Persistent layout object with reactive properties
    let flex_node = create_flex_node(index);

    // 3. CORE SETUP - Type, parent
    core::set_component_type(index, ComponentType::Box);
    if let Some(parent) = get_current_parent_index() {
        core::set_parent_index(index, Some(parent));
    }

    // 4. BIND VISIBILITY
    if let Some(visible) = props.visible {
        bind_slot(&core::visible_slot(index), visible);
    }

    // 5. BIND FLEXNODE - Layout properties
    if let Some(dir) = props.flex_direction {
        bind_slot(&flex_node.flex_direction, dir);
    }
    if let Some(grow) = props.grow {
        bind_slot(&flex_node.flex_grow, grow);
    }

    // Dimensions
    if let Some(w) = props.width {
        bind_slot(&flex_node.width, w);
    }
    if let Some(h) = props.height {
        bind_slot(&flex_node.height, h);
    }
    if let Some(min_w) = props.min_width {
        bind_slot(&flex_node.min_width, min_w);
    }
    if let Some(max_w) = props.max_width {
        bind_slot(&flex_node.max_width, max_w);
    }

    // Spacing - Padding
    bind_padding(
        &flex_node,
        props.padding,
        [props.padding_top, props.padding_right, props.padding_bottom, props.padding_left],
    );

    // 6. RENDER CHILDREN
    build_children(index, props.children);

    // 7. RETURN CLEANUP
    Box::new(move || release_index(index))
}

// =============================================================================
// Tests
// =============================================================================
